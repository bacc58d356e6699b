use crate::error::{AnalyzeError, Result};
use crate::log;
use crate::models::LatencyField;
use crate::output::{
    collect_statistics, write_contributions, write_json, write_sorted, write_statistics, Unit,
};
use crate::parsers::parse_file;
use crate::processors::{group_by_osd_and_op, infer_contributions};
use crate::utils::filter::{filter_data, FilterOptions};
use std::io::Write;
use std::path::PathBuf;
use std::time::Instant;

/// What to print for the selected ops. `--sort` wins over `--infer`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Statistics,
    Sort,
    Infer,
}

/// Options of one `analyze-osdtrace` run, as given on the command line.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyzeOptions {
    pub osdtrace_file: PathBuf,
    pub osd: Option<u32>,
    pub show_in_ms: bool,
    pub sort: bool,
    pub field: String,
    pub infer: bool,
    pub threshold: Option<i64>,
    pub json: bool,
}

impl AnalyzeOptions {
    pub fn new(osdtrace_file: impl Into<PathBuf>) -> Self {
        AnalyzeOptions {
            osdtrace_file: osdtrace_file.into(),
            osd: None,
            show_in_ms: false,
            sort: false,
            field: LatencyField::Final.name().to_string(),
            infer: false,
            threshold: None,
            json: false,
        }
    }

    pub fn mode(&self) -> Mode {
        if self.sort {
            Mode::Sort
        } else if self.infer {
            Mode::Infer
        } else {
            Mode::Statistics
        }
    }

    /// Check the field and threshold before touching the input file.
    pub fn validate(&self) -> Result<(LatencyField, FilterOptions)> {
        let field: LatencyField = self.field.parse()?;
        let threshold = match self.threshold {
            Some(t) if t < 0 => return Err(AnalyzeError::NegativeThreshold(t)),
            Some(t) => Some(t as u64),
            None => None,
        };
        Ok((field, FilterOptions::new(self.osd, threshold, self.infer)))
    }
}

/// Parse the trace and write the requested report to `out`.
pub fn run_osdtrace<W: Write>(options: &AnalyzeOptions, out: &mut W) -> Result<()> {
    let (field, filter) = options.validate()?;
    let unit = Unit::from_show_in_ms(options.show_in_ms);
    let total_start = Instant::now();

    let data = filter_data(parse_file(&options.osdtrace_file)?, &filter);
    log!(
        "{} ops selected (osd: {}, min lat: {} us)",
        data.len(),
        filter.osd.map_or_else(|| "all".to_string(), |osd| osd.to_string()),
        filter.min_lat
    );

    match options.mode() {
        Mode::Sort => write_sorted(out, &data, field, unit)?,
        Mode::Infer => {
            let results = infer_contributions(&data);
            if options.json {
                write_json(out, &results)?;
            } else {
                write_contributions(out, &results)?;
            }
        }
        Mode::Statistics => {
            let grouped = group_by_osd_and_op(&data, field);
            if options.json {
                write_json(out, &collect_statistics(&grouped, unit))?;
            } else {
                write_statistics(out, &grouped, unit)?;
            }
        }
    }

    log!(
        "{:?} report done, total time: {:.3} ms",
        options.mode(),
        total_start.elapsed().as_secs_f64() * 1000.0
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_precedence() {
        let mut options = AnalyzeOptions::new("osdtrace.log");
        assert_eq!(options.mode(), Mode::Statistics);
        options.infer = true;
        assert_eq!(options.mode(), Mode::Infer);
        options.sort = true;
        assert_eq!(options.mode(), Mode::Sort);
    }

    #[test]
    fn test_validate_defaults() {
        let options = AnalyzeOptions::new("osdtrace.log");
        let (field, filter) = options.validate().unwrap();
        assert_eq!(field, LatencyField::Final);
        assert_eq!(filter, FilterOptions::default());
    }

    #[test]
    fn test_validate_infer_threshold() {
        let mut options = AnalyzeOptions::new("osdtrace.log");
        options.infer = true;
        assert_eq!(options.validate().unwrap().1.min_lat, 100_000);
        options.threshold = Some(0);
        assert_eq!(options.validate().unwrap().1.min_lat, 0);
    }

    #[test]
    fn test_validate_rejects_bad_input() {
        let mut options = AnalyzeOptions::new("osdtrace.log");
        options.field = "size".to_string();
        assert!(matches!(options.validate(), Err(AnalyzeError::NotLatencyField(_))));

        let mut options = AnalyzeOptions::new("osdtrace.log");
        options.threshold = Some(-1);
        let err = options.validate().unwrap_err();
        assert!(matches!(err, AnalyzeError::NegativeThreshold(-1)));
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_invalid_field_checked_before_reading() {
        let mut options = AnalyzeOptions::new("/nonexistent/osdtrace.log");
        options.field = "pg".to_string();
        let mut out = Vec::new();
        let err = run_osdtrace(&options, &mut out).unwrap_err();
        assert!(matches!(err, AnalyzeError::NotLatencyField(_)));
        assert!(out.is_empty());
    }
}
