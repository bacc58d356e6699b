// 명령어 처리 모듈
pub mod osdtrace;
pub mod radostrace;

pub use osdtrace::{run_osdtrace, AnalyzeOptions, Mode};
pub use radostrace::{run_radostrace, RadostraceOptions};
