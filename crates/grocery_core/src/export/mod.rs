//! Document export for grocery lists.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod pdf;

pub use pdf::{export_file_name, render_list_pdf, write_list_pdf, ListExport};

#[derive(Debug)]
pub enum ExportError {
    /// The PDF backend failed to encode or serialize the document.
    Pdf(String),
    Io(std::io::Error),
    /// There is no current list to export.
    NoCurrentList,
}

impl Display for ExportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pdf(message) => write!(f, "pdf rendering failed: {message}"),
            Self::Io(err) => write!(f, "failed to write export: {err}"),
            Self::NoCurrentList => write!(f, "no list is selected"),
        }
    }
}

impl Error for ExportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Pdf(_) | Self::NoCurrentList => None,
        }
    }
}

impl From<std::io::Error> for ExportError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}
