//! Grocery list PDF rendering.
//!
//! # Responsibility
//! - Render one list as a paginated A4 document: title, timestamp, item
//!   table and a right-aligned total.
//! - Derive the export file name from the list name and date.
//!
//! # Invariants
//! - Rows keep list order; the table header repeats on every page.
//! - Rendering is pure; only `write_list_pdf` touches the filesystem.

use crate::export::ExportError;
use crate::model::item::{format_price, GroceryItem};
use chrono::{NaiveDate, NaiveDateTime};
use log::info;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::{Path, PathBuf};

static NON_ALNUM_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^A-Za-z0-9]").expect("valid file name regex"));

// A4 in points.
const PAGE_WIDTH: i64 = 595;
const PAGE_HEIGHT: i64 = 842;
const MARGIN: i64 = 42;
const TITLE_SIZE: i64 = 18;
const META_SIZE: i64 = 10;
const TABLE_SIZE: i64 = 10;
const TOTAL_SIZE: i64 = 14;
const HEADER_GAP: i64 = 28;
const TOTAL_GAP: i64 = 42;
const ROW_HEIGHT: i64 = 18;
const CELL_PADDING: i64 = 4;
// Courier glyphs are 600/1000 em wide.
const COURIER_ADVANCE: f64 = 0.6;

const COLUMNS: [(&str, i64); 4] = [
    ("Item Name", 211),
    ("Quantity", 120),
    ("Price", 90),
    ("Bought", 90),
];

const REGULAR_FONT: &str = "F1";
const BOLD_FONT: &str = "F2";

/// Everything the exporter needs from the store.
#[derive(Debug, Clone, Copy)]
pub struct ListExport<'a> {
    pub name: &'a str,
    pub items: &'a [GroceryItem],
    pub total: f64,
}

/// Builds `grocery_list_<safe name>_<yyyymmdd>.pdf`.
///
/// Every character outside `[A-Za-z0-9]` becomes `_`, then the name is
/// lowercased.
pub fn export_file_name(list_name: &str, date: NaiveDate) -> String {
    let safe_name = NON_ALNUM_RE.replace_all(list_name, "_").to_lowercase();
    format!("grocery_list_{safe_name}_{}.pdf", date.format("%Y%m%d"))
}

/// Renders the list into PDF bytes.
pub fn render_list_pdf(
    export: &ListExport<'_>,
    generated_at: NaiveDateTime,
) -> Result<Vec<u8>, ExportError> {
    let mut layout = PageLayout::new();

    layout.text(
        BOLD_FONT,
        TITLE_SIZE,
        MARGIN,
        &format!("Grocery List: {}", export.name),
    );
    layout.advance(HEADER_GAP);

    layout.push(Operation::new("g", vec![Object::Real(0.4)]));
    layout.text(
        REGULAR_FONT,
        META_SIZE,
        MARGIN,
        &format!(
            "Generated on: {}",
            generated_at.format("%B %d, %Y %H:%M")
        ),
    );
    layout.push(Operation::new("g", vec![Object::Real(0.0)]));
    layout.advance(HEADER_GAP);

    layout.table_header();
    for item in export.items {
        if layout.remaining() < ROW_HEIGHT {
            layout.new_page();
            layout.table_header();
        }
        let price = format_price(item.price);
        let bought = if item.bought { "Yes" } else { "No" };
        layout.table_row([item.name.as_str(), item.quantity.as_str(), &price, bought]);
    }

    layout.advance(TOTAL_GAP);
    if layout.remaining() < 0 {
        layout.new_page();
    }
    let total_text = format!("Total Spend: {}", format_price(export.total));
    let total_x = PAGE_WIDTH - MARGIN - text_width(&total_text, TOTAL_SIZE);
    layout.text(BOLD_FONT, TOTAL_SIZE, total_x, &total_text);

    assemble(layout.finish())
}

/// Renders the list and writes it into `dir` under `export_file_name`.
pub fn write_list_pdf(
    dir: &Path,
    export: &ListExport<'_>,
    generated_at: NaiveDateTime,
) -> Result<PathBuf, ExportError> {
    let bytes = render_list_pdf(export, generated_at)?;
    std::fs::create_dir_all(dir)?;
    let path = dir.join(export_file_name(export.name, generated_at.date()));
    std::fs::write(&path, &bytes)?;
    info!(
        "event=pdf_export module=export status=ok items={} bytes={} path={}",
        export.items.len(),
        bytes.len(),
        path.display()
    );
    Ok(path)
}

/// Accumulates drawing operations page by page.
///
/// `cursor` is measured from the top edge; conversion to PDF's bottom-left
/// origin happens when operations are emitted.
struct PageLayout {
    pages: Vec<Vec<Operation>>,
    cursor: i64,
}

impl PageLayout {
    fn new() -> Self {
        Self {
            pages: vec![Vec::new()],
            cursor: MARGIN,
        }
    }

    fn push(&mut self, op: Operation) {
        if let Some(page) = self.pages.last_mut() {
            page.push(op);
        }
    }

    fn advance(&mut self, by: i64) {
        self.cursor += by;
    }

    fn remaining(&self) -> i64 {
        PAGE_HEIGHT - MARGIN - self.cursor
    }

    fn new_page(&mut self) {
        self.pages.push(Vec::new());
        self.cursor = MARGIN;
    }

    /// Writes one line of text whose baseline sits `size` below the cursor.
    fn text(&mut self, font: &str, size: i64, x: i64, value: &str) {
        let baseline = PAGE_HEIGHT - self.cursor - size;
        self.push(Operation::new("BT", vec![]));
        self.push(Operation::new("Tf", vec![font.into(), size.into()]));
        self.push(Operation::new("Td", vec![x.into(), baseline.into()]));
        self.push(Operation::new(
            "Tj",
            vec![Object::string_literal(encode_win_ansi(value))],
        ));
        self.push(Operation::new("ET", vec![]));
    }

    fn table_header(&mut self) {
        let top = PAGE_HEIGHT - self.cursor - ROW_HEIGHT;
        let width = COLUMNS.iter().map(|(_, width)| width).sum::<i64>();
        self.push(Operation::new(
            "rg",
            vec![Object::Real(0.49), Object::Real(0.58), Object::Real(0.49)],
        ));
        self.push(Operation::new(
            "re",
            vec![MARGIN.into(), top.into(), width.into(), ROW_HEIGHT.into()],
        ));
        self.push(Operation::new("f", vec![]));
        self.push(Operation::new("g", vec![Object::Real(1.0)]));
        self.cells(BOLD_FONT, COLUMNS.map(|(title, _)| title));
        self.push(Operation::new("g", vec![Object::Real(0.0)]));
        self.advance(ROW_HEIGHT);
    }

    fn table_row(&mut self, values: [&str; 4]) {
        let top = PAGE_HEIGHT - self.cursor - ROW_HEIGHT;
        let mut x = MARGIN;
        for (_, width) in COLUMNS {
            self.push(Operation::new(
                "re",
                vec![x.into(), top.into(), width.into(), ROW_HEIGHT.into()],
            ));
            x += width;
        }
        self.push(Operation::new("S", vec![]));
        self.cells(REGULAR_FONT, values);
        self.advance(ROW_HEIGHT);
    }

    fn cells(&mut self, font: &str, values: [&str; 4]) {
        let cursor = self.cursor;
        self.cursor += (ROW_HEIGHT - TABLE_SIZE) / 2;
        let mut x = MARGIN;
        for ((_, width), value) in COLUMNS.iter().zip(values) {
            let clipped = fit_to_width(value, width - 2 * CELL_PADDING, TABLE_SIZE);
            self.text(font, TABLE_SIZE, x + CELL_PADDING, &clipped);
            x += width;
        }
        self.cursor = cursor;
    }

    fn finish(self) -> Vec<Vec<Operation>> {
        self.pages
    }
}

fn assemble(pages: Vec<Vec<Operation>>) -> Result<Vec<u8>, ExportError> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let regular_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
        "Encoding" => "WinAnsiEncoding",
    });
    let bold_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier-Bold",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            REGULAR_FONT => regular_id,
            BOLD_FONT => bold_id,
        },
    });

    let mut kids = Vec::with_capacity(pages.len());
    for operations in pages {
        let content = Content { operations };
        let encoded = content
            .encode()
            .map_err(|err| ExportError::Pdf(err.to_string()))?;
        let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(Object::from(page_id));
    }

    let page_count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_count,
            "Resources" => resources_id,
            "MediaBox" => vec![
                Object::Integer(0),
                Object::Integer(0),
                PAGE_WIDTH.into(),
                PAGE_HEIGHT.into(),
            ],
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)
        .map_err(|err| ExportError::Pdf(err.to_string()))?;
    Ok(bytes)
}

fn text_width(value: &str, size: i64) -> i64 {
    (value.chars().count() as f64 * COURIER_ADVANCE * size as f64).ceil() as i64
}

/// Truncates `value` with `...` so it fits in `width` points.
fn fit_to_width(value: &str, width: i64, size: i64) -> String {
    let max_chars = (width as f64 / (COURIER_ADVANCE * size as f64)).floor() as usize;
    if value.chars().count() <= max_chars {
        return value.to_string();
    }
    let keep = max_chars.saturating_sub(3);
    let mut clipped = value.chars().take(keep).collect::<String>();
    clipped.push_str("...");
    clipped
}

/// Maps text onto the single-byte WinAnsi encoding of the standard fonts.
///
/// Latin-1 code points map to themselves; anything else becomes `?`.
fn encode_win_ansi(value: &str) -> Vec<u8> {
    value
        .chars()
        .map(|ch| match u32::from(ch) {
            code @ 0x20..=0x7E | code @ 0xA0..=0xFF => code as u8,
            _ => b'?',
        })
        .collect()
}
