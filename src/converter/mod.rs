mod converter;
mod table;

pub use converter::Conversion;
pub use converter::Converter;
pub use table::DfaTable;
pub use table::DfaTableRow;
