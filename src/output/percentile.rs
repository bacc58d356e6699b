//! Nearest-rank percentiles and their fio-style rendering.
//!
//! Ref: <https://en.wikipedia.org/wiki/Percentile#The_nearest-rank_method>

use crate::utils::constants::NUM_PERCENTILE_PER_LINE;

/// Percentiles of `samples` for each of `thresholds`, nearest-rank method.
///
/// For `P` over `N` samples the result is the sorted sample at 1-based rank
/// `ceil(P / 100 * N)`. Empty input yields an empty result.
pub fn calc_percentiles(samples: &[f64], thresholds: &[f64]) -> Vec<f64> {
    if samples.is_empty() {
        return Vec::new();
    }
    let mut sorted = samples.to_vec();
    sorted.sort_by(f64::total_cmp);
    let n = sorted.len();

    thresholds
        .iter()
        .map(|p| {
            let rank = ((p / 100.0) * n as f64).ceil() as usize;
            sorted[rank.clamp(1, n) - 1]
        })
        .collect()
}

/// Render percentiles three per line:
///
/// ```text
///   |   1.00th=[ 131.00],  5.00th=[ 140.00], 10.00th=[ 152.00],
///   ...
///   |  99.00th=[9120.00], 99.50th=[9120.00], 99.90th=[9120.00]
/// ```
pub fn format_percentiles(thresholds: &[f64], percentiles: &[f64]) -> Vec<String> {
    let labels: Vec<String> = thresholds.iter().map(|p| format!("{p:.2}")).collect();
    let values: Vec<String> = percentiles.iter().map(|v| format!("{v:.2}")).collect();
    let label_width = labels.iter().map(String::len).max().unwrap_or(0);
    let value_width = values.iter().map(String::len).max().unwrap_or(0);

    let entries: Vec<String> = labels
        .iter()
        .zip(&values)
        .map(|(label, value)| format!(" {label:>label_width$}th=[{value:>value_width$}],"))
        .collect();

    let chunks: Vec<&[String]> = entries.chunks(NUM_PERCENTILE_PER_LINE).collect();
    let last = chunks.len().saturating_sub(1);
    chunks
        .iter()
        .enumerate()
        .map(|(i, chunk)| {
            let mut line = chunk.concat();
            if i == last {
                line.pop();
            }
            format!("  | {line}")
        })
        .collect()
}
