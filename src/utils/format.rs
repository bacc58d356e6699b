//! Number formatting shared by the text reports.

/// Shortest round-trip form of a float, always with a fractional part
/// (`1.0`, `918.978`), the way the reports show millisecond min/max values.
pub fn float_repr(value: f64) -> String {
    let s = value.to_string();
    if value.is_finite() && !s.contains('.') {
        format!("{s}.0")
    } else {
        s
    }
}

/// Round to two decimals for the sorted dump in milliseconds.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
