use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum AnalyzeError {
    #[error("{0} does not seem like a latency field, exiting...")]
    NotLatencyField(String),

    #[error("{0} is not a latency field reported by osdtrace, exiting...")]
    UnknownLatencyField(String),

    #[error("latency threshold must be a non-negative number of microseconds, got {0}")]
    NegativeThreshold(i64),

    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write report")]
    Write(#[from] io::Error),
}

impl AnalyzeError {
    /// Process exit status for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            AnalyzeError::NotLatencyField(_)
            | AnalyzeError::UnknownLatencyField(_)
            | AnalyzeError::NegativeThreshold(_) => 1,
            AnalyzeError::Read { .. } | AnalyzeError::Write(_) => 2,
        }
    }
}

pub type Result<T> = std::result::Result<T, AnalyzeError>;
