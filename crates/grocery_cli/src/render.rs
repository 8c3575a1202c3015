//! Text rendering of lists, the list selector and totals.
//!
//! Every function is a pure mapping from state to a printable string.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use grocery_core::{compute_total, format_price, GroceryList, ListId};

const SHORT_ID_CHARS: usize = 8;

/// Renders the list selector: every list, with the current one marked.
pub fn render_lists(lists: &[GroceryList], current: Option<&ListId>) -> String {
    if lists.is_empty() {
        return "No lists yet. Create one with `grocery create <NAME>`.".to_string();
    }

    let mut table = Table::new();
    table.set_header(vec![
        header_cell(""),
        header_cell("Id"),
        header_cell("Name"),
        header_cell("Items"),
        header_cell("Total"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 3, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Right);

    for list in lists {
        let marker = if Some(&list.id) == current { "*" } else { "" };
        table.add_row(vec![
            Cell::new(marker).fg(Color::Green),
            Cell::new(short_id(list.id.as_str())),
            Cell::new(&list.name),
            Cell::new(list.items.len()),
            Cell::new(format_price(compute_total(&list.items))),
        ]);
    }
    table.to_string()
}

/// Renders one list as an item table followed by its total.
pub fn render_list(list: &GroceryList) -> String {
    let mut out = format!("{}\n", list.name);
    if list.items.is_empty() {
        out.push_str("Your grocery list is empty. Add some items!\n");
    } else {
        let mut table = Table::new();
        table.set_header(vec![
            header_cell("Id"),
            header_cell("Item"),
            header_cell("Quantity"),
            header_cell("Price"),
            header_cell("Bought"),
        ]);
        apply_table_style(&mut table);
        align_column(&mut table, 3, CellAlignment::Right);
        align_column(&mut table, 4, CellAlignment::Center);

        for item in &list.items {
            let (name, bought) = if item.bought {
                (
                    Cell::new(&item.name)
                        .fg(Color::DarkGrey)
                        .add_attribute(Attribute::CrossedOut),
                    Cell::new("yes").fg(Color::Green),
                )
            } else {
                (Cell::new(&item.name), Cell::new("no"))
            };
            table.add_row(vec![
                Cell::new(short_id(item.id.as_str())),
                name,
                Cell::new(&item.quantity),
                Cell::new(format_price(item.price)),
                bought,
            ]);
        }
        out.push_str(&table.to_string());
        out.push('\n');
    }
    out.push_str(&render_total(compute_total(&list.items)));
    out
}

pub fn render_total(total: f64) -> String {
    format!("Total Spend: {}", format_price(total))
}

fn short_id(id: &str) -> String {
    id.chars().take(SHORT_ID_CHARS).collect()
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

#[cfg(test)]
mod tests {
    use super::{render_list, render_lists, render_total};
    use grocery_core::{GroceryItem, GroceryList, ItemId, ListId, NewItem};

    fn weekly() -> GroceryList {
        let mut list = GroceryList::new(ListId::from("list-0001-weekly"), "Weekly");
        let mut apples =
            GroceryItem::from_new(ItemId::from("item-apples"), &NewItem::new("Apples", "2 lbs", 1.99));
        apples.bought = true;
        list.items.push(apples);
        list.items.push(GroceryItem::from_new(
            ItemId::from("item-milk"),
            &NewItem::new("Milk", "1 gal", 3.49),
        ));
        list
    }

    #[test]
    fn list_view_shows_items_and_total_of_all_items() {
        let rendered = render_list(&weekly());
        assert!(rendered.starts_with("Weekly\n"));
        assert!(rendered.contains("Apples"));
        assert!(rendered.contains("1 gal"));
        assert!(rendered.contains("$3.49"));
        assert!(rendered.contains("item-app"));
        assert!(rendered.ends_with("Total Spend: $5.48"));
    }

    #[test]
    fn empty_list_view_shows_hint() {
        let list = GroceryList::new(ListId::from("l"), "Empty");
        let rendered = render_list(&list);
        assert!(rendered.contains("Your grocery list is empty."));
        assert!(rendered.ends_with("Total Spend: $0.00"));
    }

    #[test]
    fn selector_lists_every_list() {
        let lists = vec![weekly(), GroceryList::new(ListId::from("list-0002"), "Party")];
        let rendered = render_lists(&lists, Some(&ListId::from("list-0001-weekly")));
        assert!(rendered.contains("Weekly"));
        assert!(rendered.contains("Party"));
        assert!(rendered.contains("list-000"));
    }

    #[test]
    fn total_uses_two_decimals() {
        assert_eq!(render_total(1.5), "Total Spend: $1.50");
    }
}
