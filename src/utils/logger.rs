use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use std::sync::Once;
use std::sync::OnceLock;

// 전역 로거 인스턴스를 저장할 정적 변수
static LOGGER: OnceLock<Mutex<Option<File>>> = OnceLock::new();
static INIT: Once = Once::new();
static VERBOSE: AtomicBool = AtomicBool::new(false);

/// Diagnostics sink. Reports go to stdout through their own writers, so
/// everything logged here lands on stderr (when verbose) and in the optional
/// log file.
pub struct Logger;

impl Logger {
    pub fn init(log_file: Option<&Path>, verbose: bool) {
        INIT.call_once(|| {
            VERBOSE.store(verbose, Ordering::Relaxed);

            let Some(log_path) = log_file else {
                LOGGER.get_or_init(|| Mutex::new(None));
                return;
            };

            // 디렉토리가 없으면 생성
            let log_dir = log_path.parent().unwrap_or_else(|| Path::new("."));
            if !log_dir.as_os_str().is_empty() && !log_dir.exists() {
                if let Err(e) = fs::create_dir_all(log_dir) {
                    eprintln!("cannot create log directory {}: {e}", log_dir.display());
                    LOGGER.get_or_init(|| Mutex::new(None));
                    return;
                }
            }

            let file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(log_path);

            match file {
                Ok(file) => {
                    LOGGER.get_or_init(|| Mutex::new(Some(file)));
                }
                Err(e) => {
                    eprintln!("cannot open log file {}: {e}", log_path.display());
                    LOGGER.get_or_init(|| Mutex::new(None));
                }
            }
        });
    }

    pub fn is_verbose() -> bool {
        VERBOSE.load(Ordering::Relaxed)
    }

    pub fn log_error(message: &str) {
        // 에러는 verbose 여부와 관계없이 출력
        eprintln!("{message}");
        Self::write_to_file(format_args!("ERROR: {message}"));
    }

    pub fn log_fmt(args: std::fmt::Arguments<'_>) {
        if Self::is_verbose() {
            eprintln!("{args}");
        }
        Self::write_to_file(args);
    }

    pub fn flush() -> std::io::Result<()> {
        if let Some(logger) = LOGGER.get() {
            if let Ok(mut file_guard) = logger.lock() {
                if let Some(file) = file_guard.as_mut() {
                    file.flush()?;
                }
            }
        }
        Ok(())
    }

    fn write_to_file(args: std::fmt::Arguments<'_>) {
        if let Some(logger) = LOGGER.get() {
            if let Ok(mut file_guard) = logger.lock() {
                if let Some(file) = file_guard.as_mut() {
                    if let Err(e) = writeln!(file, "{args}") {
                        eprintln!("failed to write log file: {e}");
                    }
                }
            }
        }
    }
}

// 매크로 정의
#[macro_export]
macro_rules! log {
    ($($arg:tt)*) => {{
        $crate::utils::Logger::log_fmt(format_args!($($arg)*));
    }};
}

#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::utils::Logger::log_error(&message);
    }};
}
