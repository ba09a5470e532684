// Row source: streams CSV records from a file
pub mod quoting;
pub mod reader;

pub use quoting::{QuoteChecked, QuotingViolation};
pub use reader::{RowSource, Rows};
