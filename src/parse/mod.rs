pub mod when_parser;

pub use when_parser::{classify, parse_date};
