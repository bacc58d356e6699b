pub mod contribution;
pub mod json;
pub mod percentile;
pub mod radostrace;
pub mod sorted;
pub mod statistics;

pub use contribution::write_contributions;
pub use json::write_json;
pub use percentile::{calc_percentiles, format_percentiles};
pub use sorted::{format_op, write_sorted};
pub use statistics::{collect_statistics, write_statistics, LatencyStats, Unit};
