mod errors;
mod file_parser;

pub use errors::DatasetError;
pub use file_parser::{parse_file, parse_line};
