// mod.rs - Barcode list loaders

pub mod csv;
pub mod list;

pub use self::csv::{read_two_column_lists, TwoColumnLists};
pub use self::list::{parse_barcode_list, read_barcode_list};

/// One raw value from an input file, with its 1-based line number
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListEntry {
    pub line: usize,
    pub value: String,
}
