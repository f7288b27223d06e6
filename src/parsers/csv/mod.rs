pub mod dto;
pub mod parser;
pub mod types;

pub mod prelude {
    pub use super::dto::{Field, RawRow, header_key};
    pub use super::parser::CsvParser;
    pub use super::types::{CsvAmount, parse_amount};
}
