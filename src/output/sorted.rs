use crate::models::{LatencyField, OsdOp, Substage};
use crate::output::statistics::Unit;
use crate::utils::constants::MICROS_PER_MILLI;
use crate::utils::format::{float_repr, round2};
use std::io::{self, Write};

// ms 표시 시 소수 둘째 자리까지 반올림
fn format_latency(micros: u64, unit: Unit) -> String {
    match unit {
        Unit::Micros => micros.to_string(),
        Unit::Millis => float_repr(round2(micros as f64 / MICROS_PER_MILLI)),
    }
}

fn is_latency_detail(name: &str) -> bool {
    match Substage::from_name(name) {
        Some(stage) => stage.is_latency(),
        None => name.ends_with("lat"),
    }
}

/// Render an op back to one `key value` line. Peers and the bluestore
/// detail block keep their bracketed forms; nested detail parentheses are
/// flattened.
///
/// In milliseconds every latency is scaled, but `aio_size` is a byte count
/// and is printed as recorded. Older osdtrace analysis scripts divided it by
/// 1000 along with the substage latencies.
pub fn format_op(op: &OsdOp, unit: Unit) -> String {
    let peers = op
        .peers
        .iter()
        .map(|p| format!("({}, {})", p.peer, p.latency))
        .collect::<Vec<_>>()
        .join(", ");
    let details = op
        .bluestore_details
        .iter()
        .map(|(name, &value)| {
            if is_latency_detail(name) {
                format!("{name} {}", format_latency(value, unit))
            } else {
                format!("{name} {value}")
            }
        })
        .collect::<Vec<_>>()
        .join(" ");

    format!(
        "osd {} pg {} op {} size {} client {} tid {} throttle_lat {} recv_lat {} dispatch_lat {} \
         queue_lat {} osd_lat {} peers [{}] bluestore_lat {} ({}) lat_type {} lat {}",
        op.osd,
        op.pg,
        op.op,
        op.size,
        op.client,
        op.tid,
        format_latency(op.throttle_lat, unit),
        format_latency(op.recv_lat, unit),
        format_latency(op.dispatch_lat, unit),
        format_latency(op.queue_lat, unit),
        format_latency(op.osd_lat, unit),
        peers,
        format_latency(op.bluestore_lat, unit),
        details,
        op.lat_type.as_str(),
        format_latency(op.lat, unit),
    )
}

/// Ops in ascending order of `field`. The sort is stable, and ops without
/// the requested substage come first.
pub fn sort_by_field(data: &[OsdOp], field: LatencyField) -> Vec<&OsdOp> {
    let mut sorted: Vec<&OsdOp> = data.iter().collect();
    sorted.sort_by_key(|op| op.latency(field));
    sorted
}

pub fn write_sorted<W: Write>(
    out: &mut W,
    data: &[OsdOp],
    field: LatencyField,
    unit: Unit,
) -> io::Result<()> {
    for op in sort_by_field(data, field) {
        writeln!(out, "{}", format_op(op, unit))?;
    }
    Ok(())
}
