pub mod commands;
pub mod error;
pub mod models;
pub mod output;
pub mod parsers;
pub mod processors;
pub mod utils;

// 주요 기능 재내보내기(re-exporting)
pub use commands::{run_osdtrace, run_radostrace, AnalyzeOptions, RadostraceOptions};
pub use error::{AnalyzeError, Result};
pub use models::{LatencyField, OpKind, OsdOp};
pub use parsers::{parse_file, parse_line, parse_lines};
