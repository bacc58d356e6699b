use serde::Serialize;
use std::io::{self, Write};

/// Pretty-print `value` as one JSON document.
pub fn write_json<W: Write, T: Serialize + ?Sized>(out: &mut W, value: &T) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)
}
