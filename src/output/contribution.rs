use crate::processors::OsdContributions;
use std::io::{self, Write};

/// Print the contribution report.
///
/// ```text
/// osd.4:
///   op_w:
///     69.99% from osd_lat
///     40.00% from bluestore_lat
/// ```
pub fn write_contributions<W: Write>(out: &mut W, results: &[OsdContributions]) -> io::Result<()> {
    for osd in results {
        writeln!(out, "osd.{}:", osd.osd)?;
        for op in &osd.ops {
            writeln!(out, "  {}:", op.op)?;

            let percents: Vec<String> = op
                .contributions
                .iter()
                .map(|c| format!("{:.2}", c.percent))
                .collect();
            let width = percents.iter().map(String::len).max().unwrap_or(0);

            for (c, percent) in op.contributions.iter().zip(&percents) {
                writeln!(out, "    {percent:>width$}% from {}", c.field)?;
            }
        }
        writeln!(out)?;
    }
    Ok(())
}
