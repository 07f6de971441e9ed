pub mod ast;
pub mod conversion;
pub mod error;
pub mod grammar;
pub mod parser;

pub use ast::{Filter, FilterType};
pub use error::ParseError;
pub use parser::{parse_clause, parse_datetime, parse_filters};
