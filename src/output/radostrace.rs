use crate::processors::ProblematicOsd;
use std::io::{self, Write};
use std::path::Path;

const RULE_WIDTH: usize = 70;

pub fn write_header<W: Write>(
    out: &mut W,
    log_file: &Path,
    osd_tree_file: &Path,
    threshold: u64,
) -> io::Result<()> {
    writeln!(out, "Analyzing log file: {}", log_file.display())?;
    writeln!(out, "OSD tree file: {}", osd_tree_file.display())?;
    writeln!(
        out,
        "Latency threshold: {} microseconds ({:.1} ms)",
        threshold,
        threshold as f64 / 1000.0
    )
}

/// Print the per-iteration picks followed by the summary table.
pub fn write_results<W: Write>(
    out: &mut W,
    problematic: &[ProblematicOsd],
    total_operations: usize,
) -> io::Result<()> {
    if problematic.is_empty() {
        return writeln!(out, "No matching entries found with the given criteria.");
    }

    let rule = "=".repeat(RULE_WIDTH);
    writeln!(out, "\n{rule}")?;
    writeln!(out, "Starting iterative analysis to identify problematic OSDs...")?;
    writeln!(out, "{rule}")?;

    for p in problematic {
        writeln!(
            out,
            "[Iteration {}] Top OSD: osd.{} ({} occurrences on {})",
            p.iteration, p.osd, p.count, p.host
        )?;
    }
    writeln!(
        out,
        "\n[Iteration {}] No more high-latency operations found.",
        problematic.len() + 1
    )?;

    write_summary(out, problematic, total_operations)
}

fn write_summary<W: Write>(
    out: &mut W,
    problematic: &[ProblematicOsd],
    total_operations: usize,
) -> io::Result<()> {
    let rule = "=".repeat(RULE_WIDTH);
    let thin_rule = "-".repeat(RULE_WIDTH);

    writeln!(out, "\n{rule}")?;
    writeln!(out, "=== SUMMARY: Problematic OSDs Identified ===")?;
    writeln!(out, "{rule}")?;
    writeln!(
        out,
        "{:<6} {:<10} {:<8} {:<20} {:<10}",
        "Rank", "OSD", "Count", "Host", "Iteration"
    )?;
    writeln!(out, "{thin_rule}")?;
    for (rank, p) in problematic.iter().enumerate() {
        writeln!(
            out,
            "{:<6} {:<10} {:<8} {:<20} {:<10}",
            rank + 1,
            format!("osd.{}", p.osd),
            p.count,
            p.host,
            p.iteration
        )?;
    }
    writeln!(out, "{thin_rule}")?;
    writeln!(out, "Total problematic OSDs identified: {}", problematic.len())?;
    writeln!(out, "Total high-latency operations analyzed: {total_operations}")?;
    writeln!(out, "{rule}")
}
