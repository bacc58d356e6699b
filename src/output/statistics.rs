use crate::models::{LatencyField, OpKind};
use crate::output::percentile::{calc_percentiles, format_percentiles};
use crate::processors::GroupedLatencies;
use crate::utils::constants::{MICROS_PER_MILLI, PERCENTILE_THRESHOLDS};
use crate::utils::format::float_repr;
use serde::Serialize;
use std::io::{self, Write};

/// Unit the reports are printed in. Samples are always recorded in µs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Unit {
    #[default]
    Micros,
    Millis,
}

impl Unit {
    pub fn from_show_in_ms(show_in_ms: bool) -> Self {
        if show_in_ms {
            Unit::Millis
        } else {
            Unit::Micros
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Unit::Micros => "μsec",
            Unit::Millis => "msec",
        }
    }

    pub fn scale(&self, value: f64) -> f64 {
        match self {
            Unit::Micros => value,
            Unit::Millis => value / MICROS_PER_MILLI,
        }
    }

    // µs 값은 정수 그대로, ms 값은 소수로 표시
    pub fn display(&self, micros: u64) -> String {
        match self {
            Unit::Micros => micros.to_string(),
            Unit::Millis => float_repr(self.scale(micros as f64)),
        }
    }
}

// 통계 계산을 위한 헬퍼 구조체
#[derive(Debug, Clone, PartialEq)]
pub struct LatencyStats {
    pub min: u64,
    pub max: u64,
    pub avg: f64,
    pub std_dev: f64,
    pub samples: usize,
    pub percentiles: Vec<f64>, // PERCENTILE_THRESHOLDS 순서, 이미 단위 변환됨
}

impl LatencyStats {
    /// `None` for an empty group.
    pub fn new(values: &[u64], unit: Unit) -> Option<Self> {
        let min = *values.iter().min()?;
        let max = *values.iter().max()?;
        let n = values.len();

        let sum: u128 = values.iter().map(|&v| v as u128).sum();
        let avg = sum as f64 / n as f64;
        let std_dev = if n > 1 {
            let variance = values
                .iter()
                .map(|&v| {
                    let diff = v as f64 - avg;
                    diff * diff
                })
                .sum::<f64>()
                / (n - 1) as f64;
            variance.sqrt()
        } else {
            0.0
        };

        let scaled: Vec<f64> = values.iter().map(|&v| unit.scale(v as f64)).collect();

        Some(Self {
            min,
            max,
            avg: unit.scale(avg),
            std_dev: unit.scale(std_dev),
            samples: n,
            percentiles: calc_percentiles(&scaled, &PERCENTILE_THRESHOLDS),
        })
    }
}

/// Print the per-OSD, per-op statistics report.
///
/// ```text
/// osd.22:
///   op_w lat (μsec): min=918978, max=973432, avg=941122.67, stdev=28614.68, samples=3
///   lat percentiles (μsec):
///   |   1.00th=[918978.00],  5.00th=[918978.00], 10.00th=[918978.00],
///   ...
/// ```
pub fn write_statistics<W: Write>(out: &mut W, grouped: &GroupedLatencies, unit: Unit) -> io::Result<()> {
    let field = grouped.field();
    let label = unit.label();

    for osd in grouped.osd_ids() {
        writeln!(out, "osd.{osd}:")?;
        for (op, values) in grouped.ops_of(osd) {
            let Some(stats) = LatencyStats::new(values, unit) else {
                continue;
            };
            writeln!(
                out,
                "  {op} {field} ({label}): min={}, max={}, avg={:.2}, stdev={:.2}, samples={}",
                unit.display(stats.min),
                unit.display(stats.max),
                stats.avg,
                stats.std_dev,
                stats.samples
            )?;
            writeln!(out, "  {field} percentiles ({label}):")?;
            for line in format_percentiles(&PERCENTILE_THRESHOLDS, &stats.percentiles) {
                writeln!(out, "{line}")?;
            }
            writeln!(out)?;
        }
    }
    Ok(())
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct PercentileValue {
    pub percentile: f64,
    pub value: f64,
}

/// JSON form of one statistics section.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct OpStatistics {
    pub osd: u32,
    pub op: OpKind,
    pub field: LatencyField,
    pub unit: &'static str,
    pub min: f64,
    pub max: f64,
    pub avg: f64,
    pub stdev: f64,
    pub samples: usize,
    pub percentiles: Vec<PercentileValue>,
}

pub fn collect_statistics(grouped: &GroupedLatencies, unit: Unit) -> Vec<OpStatistics> {
    let mut sections = Vec::new();
    for osd in grouped.osd_ids() {
        for (op, values) in grouped.ops_of(osd) {
            if let Some(stats) = LatencyStats::new(values, unit) {
                sections.push(OpStatistics {
                    osd,
                    op,
                    field: grouped.field(),
                    unit: unit.label(),
                    min: unit.scale(stats.min as f64),
                    max: unit.scale(stats.max as f64),
                    avg: stats.avg,
                    stdev: stats.std_dev,
                    samples: stats.samples,
                    percentiles: PERCENTILE_THRESHOLDS
                        .iter()
                        .zip(&stats.percentiles)
                        .map(|(&percentile, &value)| PercentileValue { percentile, value })
                        .collect(),
                });
            }
        }
    }
    sections
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Substage;
    use crate::parsers::parse_lines;
    use crate::processors::group_by_osd_and_op;

    const LOG: &str = "\
osd 22 pg 3.1f op_w size 4096 client 1 tid 1 throttle_lat 0 recv_lat 10 dispatch_lat 2 queue_lat 20 osd_lat 300 peers [(4, 631), (17, 702)] bluestore_lat 880 (prepare 12 aio_wait 0 (aio_size 4096) seq_wait 2 kv_commit 820) op_lat 930958
osd 22 pg 3.1f op_w size 4096 client 1 tid 2 throttle_lat 0 recv_lat 12 dispatch_lat 2 queue_lat 20 osd_lat 300 peers [(4, 631), (17, 702)] bluestore_lat 880 op_lat 973432
osd 22 pg 3.1f op_w size 4096 client 1 tid 3 throttle_lat 0 recv_lat 14 dispatch_lat 2 queue_lat 20 osd_lat 300 peers [(4, 631), (17, 702)] bluestore_lat 880 (prepare 10 aio_wait 0 (aio_size 4096) seq_wait 1 kv_commit 700) op_lat 918978
osd 6 pg 3.05 op_r size 8192 client 1 tid 4 throttle_lat 0 recv_lat 7 dispatch_lat 1 queue_lat 4 osd_lat 61 bluestore_lat 48 op_lat 1000
";

    fn render(field: LatencyField, unit: Unit) -> String {
        let grouped = group_by_osd_and_op(&parse_lines(LOG), field);
        let mut out = Vec::new();
        write_statistics(&mut out, &grouped, unit).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_latency_stats() {
        let stats = LatencyStats::new(&[918978, 930958, 973432], Unit::Micros).unwrap();
        assert_eq!(stats.min, 918978);
        assert_eq!(stats.max, 973432);
        assert_eq!(stats.samples, 3);
        assert_eq!(format!("{:.2}", stats.avg), "941122.67");
        assert_eq!(format!("{:.2}", stats.std_dev), "28614.68");
    }

    #[test]
    fn test_latency_stats_single_sample() {
        let stats = LatencyStats::new(&[1000], Unit::Millis).unwrap();
        assert_eq!(stats.std_dev, 0.0);
        assert_eq!(stats.avg, 1.0);
        assert_eq!(stats.percentiles, vec![1.0; PERCENTILE_THRESHOLDS.len()]);
        assert!(LatencyStats::new(&[], Unit::Micros).is_none());
    }

    #[test]
    fn test_write_statistics_micros() {
        let text = render(LatencyField::Final, Unit::Micros);
        let expected = "\
osd.6:
  op_r lat (μsec): min=1000, max=1000, avg=1000.00, stdev=0.00, samples=1
  lat percentiles (μsec):
  |   1.00th=[1000.00],  5.00th=[1000.00], 10.00th=[1000.00],
  |  20.00th=[1000.00], 30.00th=[1000.00], 40.00th=[1000.00],
  |  50.00th=[1000.00], 60.00th=[1000.00], 70.00th=[1000.00],
  |  80.00th=[1000.00], 90.00th=[1000.00], 95.00th=[1000.00],
  |  99.00th=[1000.00], 99.50th=[1000.00], 99.90th=[1000.00]

osd.22:
  op_w lat (μsec): min=918978, max=973432, avg=941122.67, stdev=28614.68, samples=3
  lat percentiles (μsec):
  |   1.00th=[918978.00],  5.00th=[918978.00], 10.00th=[918978.00],
  |  20.00th=[918978.00], 30.00th=[918978.00], 40.00th=[930958.00],
  |  50.00th=[930958.00], 60.00th=[930958.00], 70.00th=[973432.00],
  |  80.00th=[973432.00], 90.00th=[973432.00], 95.00th=[973432.00],
  |  99.00th=[973432.00], 99.50th=[973432.00], 99.90th=[973432.00]

";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_write_statistics_millis() {
        let text = render(LatencyField::Final, Unit::Millis);
        assert!(text.contains("  op_r lat (msec): min=1.0, max=1.0, avg=1.00, stdev=0.00, samples=1\n"));
        assert!(text.contains(
            "  op_w lat (msec): min=918.978, max=973.432, avg=941.12, stdev=28.61, samples=3\n"
        ));
        assert!(text.contains("  |   1.00th=[918.98],  5.00th=[918.98], 10.00th=[918.98],\n"));
    }

    #[test]
    fn test_write_statistics_substage_excludes_missing() {
        let text = render(LatencyField::Substage(Substage::KvCommit), Unit::Micros);
        assert!(text.starts_with("osd.6:\nosd.22:\n"));
        assert!(text.contains(
            "  op_w kv_commit (μsec): min=700, max=820, avg=760.00, stdev=84.85, samples=2\n"
        ));
        assert!(text.contains("  kv_commit percentiles (μsec):\n"));
    }

    #[test]
    fn test_collect_statistics() {
        let grouped = group_by_osd_and_op(&parse_lines(LOG), LatencyField::Recv);
        let sections = collect_statistics(&grouped, Unit::Micros);
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].osd, 6);
        assert_eq!(sections[1].op, OpKind::OpW);
        assert_eq!(sections[1].min, 10.0);
        assert_eq!(sections[1].max, 14.0);
        assert_eq!(sections[1].avg, 12.0);
        assert_eq!(sections[1].percentiles.len(), 15);
        assert_eq!(sections[1].percentiles[6], PercentileValue { percentile: 50.0, value: 12.0 });
    }
}
