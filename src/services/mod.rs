pub mod result_parser;

pub use result_parser::{ResultParser, TerminalPage};
