pub mod osdtrace;
pub mod radostrace;

pub use osdtrace::{parse_file, parse_line, parse_lines};
