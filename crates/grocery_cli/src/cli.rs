//! CLI argument definitions.
//!
//! All `clap` structures live here so that `main.rs` stays focused on
//! dispatching subcommands into the session callbacks.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Grocery list tracker with running totals and PDF export.
#[derive(Parser)]
#[command(name = "grocery", version, about = "Track grocery lists and what they cost")]
pub struct Cli {
    /// Directory holding the slot database and logs.
    #[arg(long, env = "GROCERY_DATA_DIR", default_value = ".grocery", global = true)]
    pub data_dir: PathBuf,

    /// Log level: trace|debug|info|warn|error. Defaults by build mode.
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show every list and mark the current one.
    Lists,

    /// Create a list and make it current.
    Create {
        /// Name of the new list.
        name: String,
    },

    /// Make another list current.
    Select {
        /// List id or a unique id prefix.
        list: String,
    },

    /// Show the items of the current list and its total.
    Show,

    /// Add an item to the current list.
    Add {
        /// Item name, e.g. "Apples".
        #[arg(long, short)]
        name: String,

        /// Free-text quantity, e.g. "2 lbs".
        #[arg(long, short)]
        quantity: String,

        /// Price in dollars, at least 0.01.
        #[arg(long, short, allow_hyphen_values = true)]
        price: String,
    },

    /// Flip the bought flag of an item in the current list.
    Toggle {
        /// Item id or a unique id prefix.
        item: String,
    },

    /// Delete an item from the current list.
    Delete {
        /// Item id or a unique id prefix.
        item: String,
    },

    /// Print the current list's total.
    Total,

    /// Export the current list as a PDF.
    Export {
        /// Output directory (defaults to the working directory).
        #[arg(long, short)]
        out: Option<PathBuf>,
    },
}
