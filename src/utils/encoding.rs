use crate::error::{AnalyzeError, Result};
use crate::log;
use std::fs;
use std::path::Path;

/// Read the entire file into a UTF-8 `String`. Invalid UTF-8 sequences are
/// replaced with the Unicode replacement character, so stray bytes only spoil
/// the line they sit on.
pub fn read_to_string_lossy(path: &Path) -> Result<String> {
    let bytes = fs::read(path).map_err(|source| AnalyzeError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    // 유효한 UTF-8이면 복사 없이 변환
    Ok(match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => {
            log!("{}: invalid UTF-8 replaced", path.display());
            String::from_utf8_lossy(e.as_bytes()).into_owned()
        }
    })
}
