use crate::error::Result;
use crate::output::radostrace::{write_header, write_results};
use crate::parsers::radostrace::{parse_log_file, parse_osd_tree};
use crate::processors::find_problematic_osds;
use crate::utils::constants::DEFAULT_RADOSTRACE_THRESHOLD_US;
use std::io::Write;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq)]
pub struct RadostraceOptions {
    pub log_file: PathBuf,
    pub osd_tree_file: PathBuf,
    pub threshold: u64,
}

impl RadostraceOptions {
    pub fn new(log_file: impl Into<PathBuf>, osd_tree_file: impl Into<PathBuf>) -> Self {
        RadostraceOptions {
            log_file: log_file.into(),
            osd_tree_file: osd_tree_file.into(),
            threshold: DEFAULT_RADOSTRACE_THRESHOLD_US,
        }
    }
}

/// Locate the OSDs behind slow client operations.
pub fn run_radostrace<W: Write>(options: &RadostraceOptions, out: &mut W) -> Result<()> {
    write_header(out, &options.log_file, &options.osd_tree_file, options.threshold)?;

    let entries = parse_log_file(&options.log_file, options.threshold)?;
    let osd_to_host = parse_osd_tree(&options.osd_tree_file)?;
    let problematic = find_problematic_osds(&entries, &osd_to_host);

    write_results(out, &problematic, entries.len())?;
    Ok(())
}
