//! Spreadsheet round-trip: scraped cells in, a header-labelled [`Table`] out.
//!
//! [`Table`]: crate::table::Table

pub mod address;
pub mod builder;
pub mod reader;

pub use address::CellAddress;
pub use builder::SheetBuilder;
pub use reader::{read_sheet, read_table};
