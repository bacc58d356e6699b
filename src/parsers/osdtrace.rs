//! Parser for the per-op latency lines printed by `osdtrace`.
//!
//! ```text
//! osd 22 pg 3.1f op_w size 4096 client 84211 tid 9 throttle_lat 2 recv_lat 14 dispatch_lat 3 queue_lat 20 osd_lat 310 peers [(4, 631), (17, 702)] bluestore_lat 880 (prepare 12 aio_wait 0 (aio_size 4096) seq_wait 2 kv_commit 820) op_lat 918978
//! osd 22 pg 3.2a subop_w size 4096 client 84211 tid 10 throttle_lat 0 recv_lat 9 dispatch_lat 2 queue_lat 11 osd_lat 140 bluestore_lat 610 (prepare 10 aio_wait 0 (aio_size 4096) seq_wait 1 kv_commit 590) subop_lat 790
//! osd 6 pg 3.05 op_r size 8192 client 84211 tid 11 throttle_lat 0 recv_lat 7 dispatch_lat 1 queue_lat 4 osd_lat 61 bluestore_lat 48 op_lat 131
//! ```

use crate::error::Result;
use crate::log;
use crate::models::{FinalLatencyKind, OsdOp, PeerLatency};
use crate::utils::encoding::read_to_string_lossy;
use indexmap::IndexMap;
use lazy_static::lazy_static;
use regex::Regex;
use std::path::Path;
use std::time::Instant;

lazy_static! {
    // peers 그룹과 bluestore 상세 그룹은 서로 독립적으로 선택적
    pub static ref OSDTRACE_RE: Regex = Regex::new(concat!(
        r"osd\s+(?P<osd>\d+)\s+",
        r"pg\s+(?P<pg>\S+)\s+",
        r"(?P<op>(?:sub)?op_[wr])\s+",
        r"size\s+(?P<size>\d+)\s+",
        r"client\s+(?P<client>\d+)\s+",
        r"tid\s+(?P<tid>\d+)\s+",
        r"throttle_lat\s+(?P<throttle_lat>\d+)\s+",
        r"recv_lat\s+(?P<recv_lat>\d+)\s+",
        r"dispatch_lat\s+(?P<dispatch_lat>\d+)\s+",
        r"queue_lat\s+(?P<queue_lat>\d+)\s+",
        r"osd_lat\s+(?P<osd_lat>\d+)\s+",
        r"(?:peers\s+(?P<peers>\[.*?\])\s+)?",
        r"bluestore_lat\s+(?P<bluestore_lat>\d+)",
        r"(?:\s*\((?P<bluestore_details>.*?)\))?",
        r"(?:\s+)?",
        r"(?P<lat_type>(?:sub)?op_lat)\s+(?P<lat>\d+)",
    ))
    .unwrap();
    static ref PEER_RE: Regex = Regex::new(r"\((\d+),\s*(\d+)\)").unwrap();
    static ref DETAIL_RE: Regex = Regex::new(r"(\w+)\s+(\d+)").unwrap();
}

// Every osdtrace op line carries this token; skips the regex for noise.
const QUICK_CHECK: &str = "bluestore_lat";

/// Parse one line. Returns `None` unless the whole grammar matches; the
/// record may be surrounded by arbitrary text.
///
/// Numbers must fit their fields (`u32` for OSD and peer ids, `u64` for
/// everything else); a line with a larger value is dropped like noise.
/// `parse_file` counts such lines in its diagnostics.
pub fn parse_line(line: &str) -> Option<OsdOp> {
    if !line.contains(QUICK_CHECK) {
        return None;
    }
    let caps = OSDTRACE_RE.captures(line)?;

    let peers = match caps.name("peers") {
        Some(m) => PEER_RE
            .captures_iter(m.as_str())
            .map(|c| {
                Some(PeerLatency {
                    peer: c[1].parse().ok()?,
                    latency: c[2].parse().ok()?,
                })
            })
            .collect::<Option<Vec<_>>>()?,
        None => Vec::new(),
    };

    let mut bluestore_details = IndexMap::new();
    if let Some(m) = caps.name("bluestore_details") {
        for c in DETAIL_RE.captures_iter(m.as_str()) {
            bluestore_details.insert(c[1].to_string(), c[2].parse().ok()?);
        }
    }

    Some(OsdOp {
        osd: caps["osd"].parse().ok()?,
        pg: caps["pg"].to_string(),
        op: caps["op"].parse().ok()?,
        size: caps["size"].parse().ok()?,
        client: caps["client"].parse().ok()?,
        tid: caps["tid"].parse().ok()?,
        throttle_lat: caps["throttle_lat"].parse().ok()?,
        recv_lat: caps["recv_lat"].parse().ok()?,
        dispatch_lat: caps["dispatch_lat"].parse().ok()?,
        queue_lat: caps["queue_lat"].parse().ok()?,
        osd_lat: caps["osd_lat"].parse().ok()?,
        peers,
        bluestore_lat: caps["bluestore_lat"].parse().ok()?,
        bluestore_details,
        lat_type: caps["lat_type"].parse::<FinalLatencyKind>().ok()?,
        lat: caps["lat"].parse().ok()?,
    })
}

/// Parse multiple lines, dropping everything that is not an op record.
pub fn parse_lines(input: &str) -> Vec<OsdOp> {
    input.lines().filter_map(parse_line).collect()
}

// 문법은 맞지만 숫자 범위를 벗어나 버려진 라인 수도 함께 반환
fn parse_lines_counting_overflow(input: &str) -> (Vec<OsdOp>, usize) {
    let mut ops = Vec::new();
    let mut overflowed = 0;
    for line in input.lines() {
        match parse_line(line) {
            Some(op) => ops.push(op),
            None if line.contains(QUICK_CHECK) && OSDTRACE_RE.is_match(line) => overflowed += 1,
            None => {}
        }
    }
    (ops, overflowed)
}

/// Read the whole file and parse it. Invalid UTF-8 only spoils the lines it
/// appears on.
pub fn parse_file(path: &Path) -> Result<Vec<OsdOp>> {
    let start_time = Instant::now();
    let content = read_to_string_lossy(path)?;

    let total_lines = content.lines().count();
    let (ops, overflowed) = parse_lines_counting_overflow(&content);

    log!(
        "Parsed {} osdtrace records ({} skipped lines) from {}, time: {:.3} ms",
        ops.len(),
        total_lines - ops.len(),
        path.display(),
        start_time.elapsed().as_secs_f64() * 1000.0
    );
    let writes = ops.iter().filter(|op| op.op.is_write()).count();
    log!("  reads: {}, writes: {}", ops.len() - writes, writes);
    if overflowed > 0 {
        log!("  {} lines dropped for out of range numbers", overflowed);
    }

    Ok(ops)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AnalyzeError;
    use crate::models::OpKind;

    const OP_W: &str = "osd 22 pg 3.1f op_w size 4096 client 84211 tid 9 throttle_lat 2 recv_lat 14 dispatch_lat 3 queue_lat 20 osd_lat 310 peers [(4, 631), (17, 702)] bluestore_lat 880 (prepare 12 aio_wait 0 (aio_size 4096) seq_wait 2 kv_commit 820) op_lat 918978";
    const SUBOP_W: &str = "osd 5 pg 3.2a subop_w size 4096 client 84211 tid 10 throttle_lat 0 recv_lat 9 dispatch_lat 2 queue_lat 11 osd_lat 140 bluestore_lat 610 (prepare 10 aio_wait 0 (aio_size 4096) seq_wait 1 kv_commit 590) subop_lat 790";
    const OP_R: &str = "osd 6 pg 3.05 op_r size 8192 client 84211 tid 11 throttle_lat 0 recv_lat 7 dispatch_lat 1 queue_lat 4 osd_lat 61 bluestore_lat 48 op_lat 131";

    #[test]
    fn test_parse_write_with_peers_and_details() {
        let op = parse_line(OP_W).unwrap();

        assert_eq!(op.osd, 22);
        assert_eq!(op.pg, "3.1f");
        assert_eq!(op.op, OpKind::OpW);
        assert_eq!(op.size, 4096);
        assert_eq!(op.client, 84211);
        assert_eq!(op.tid, 9);
        assert_eq!(op.throttle_lat, 2);
        assert_eq!(op.recv_lat, 14);
        assert_eq!(op.dispatch_lat, 3);
        assert_eq!(op.queue_lat, 20);
        assert_eq!(op.osd_lat, 310);
        assert_eq!(
            op.peers,
            vec![
                PeerLatency { peer: 4, latency: 631 },
                PeerLatency { peer: 17, latency: 702 }
            ]
        );
        assert_eq!(op.bluestore_lat, 880);
        let details: Vec<_> = op.bluestore_details.iter().map(|(k, v)| (k.as_str(), *v)).collect();
        assert_eq!(
            details,
            vec![
                ("prepare", 12),
                ("aio_wait", 0),
                ("aio_size", 4096),
                ("seq_wait", 2),
                ("kv_commit", 820)
            ]
        );
        assert_eq!(op.lat_type, FinalLatencyKind::OpLat);
        assert_eq!(op.lat, 918978);
    }

    #[test]
    fn test_parse_subop_without_peers() {
        let op = parse_line(SUBOP_W).unwrap();
        assert_eq!(op.op, OpKind::SubopW);
        assert!(op.peers.is_empty());
        assert_eq!(op.bluestore_details.get("kv_commit"), Some(&590));
        assert_eq!(op.lat_type, FinalLatencyKind::SubopLat);
        assert_eq!(op.lat, 790);
    }

    #[test]
    fn test_parse_read_without_optional_groups() {
        let op = parse_line(OP_R).unwrap();
        assert_eq!(op.op, OpKind::OpR);
        assert!(op.peers.is_empty());
        assert!(op.bluestore_details.is_empty());
        assert_eq!(op.bluestore_lat, 48);
        assert_eq!(op.lat, 131);
    }

    #[test]
    fn test_parse_peers_without_details() {
        let line = "osd 1 pg 1.0 op_w size 512 client 7 tid 1 throttle_lat 0 recv_lat 1 dispatch_lat 1 queue_lat 1 osd_lat 1 peers [(2, 30)] bluestore_lat 9 op_lat 50";
        let op = parse_line(line).unwrap();
        assert_eq!(op.peers, vec![PeerLatency { peer: 2, latency: 30 }]);
        assert!(op.bluestore_details.is_empty());
    }

    #[test]
    fn test_parse_with_surrounding_noise() {
        let line = format!("2024-05-01T10:00:00 host1 {OP_R} [delayed1 waiting for rw locks ]");
        let op = parse_line(&line).unwrap();
        assert_eq!(op.osd, 6);
        assert_eq!(op.lat, 131);
    }

    #[test]
    fn test_parse_missing_mandatory_token() {
        let line = OP_R.replace("queue_lat 4 ", "");
        assert!(parse_line(&line).is_none());
        let line = OP_R.replace(" op_lat 131", "");
        assert!(parse_line(&line).is_none());
        assert!(parse_line("Start tracing osd ops").is_none());
        assert!(parse_line("").is_none());
    }

    #[test]
    fn test_parse_lines_skips_noise() {
        let input = format!("attaching probes...\n{OP_W}\nsome other log\n{SUBOP_W}\n{OP_R}\n");
        let ops = parse_lines(&input);
        assert_eq!(ops.len(), 3);
        assert_eq!(ops[0].osd, 22);
        assert_eq!(ops[2].op, OpKind::OpR);
    }

    #[test]
    fn test_out_of_range_numbers_are_counted() {
        let huge_lat = OP_R.replace("op_lat 131", "op_lat 18446744073709551616");
        let huge_osd = OP_R.replace("osd 6 ", "osd 4294967296 ");
        assert!(parse_line(&huge_lat).is_none());
        assert!(parse_line(&huge_osd).is_none());

        let input = format!("{OP_R}\n{huge_lat}\nnoise bluestore_lat\n{huge_osd}\n");
        let (ops, overflowed) = parse_lines_counting_overflow(&input);
        assert_eq!(ops.len(), 1);
        assert_eq!(overflowed, 2);
    }

    #[test]
    fn test_parse_file_missing() {
        let err = parse_file(Path::new("/nonexistent/osdtrace.log")).unwrap_err();
        assert!(matches!(err, AnalyzeError::Read { .. }));
        assert_eq!(err.exit_code(), 2);
    }
}
