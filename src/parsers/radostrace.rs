//! Parsers for the client-side `radostrace` log and `ceph osd tree` output
//! used by the problematic OSD scan.

use crate::error::Result;
use crate::log;
use crate::utils::encoding::read_to_string_lossy;
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashMap;
use std::path::Path;

lazy_static! {
    static ref OSD_ID_RE: Regex = Regex::new(r"\d+").unwrap();
}

// 컬럼 인덱스 (0-based)
const OSD_LIST_COLUMN: usize = 5;
const LATENCY_COLUMN: usize = 8;
const MIN_COLUMNS: usize = LATENCY_COLUMN + 1;

/// OSDs acting on each operation slower than `threshold` microseconds.
pub fn parse_log_lines(input: &str, threshold: u64) -> Vec<Vec<u32>> {
    input
        .lines()
        .filter_map(|line| {
            let parts: Vec<&str> = line.split_whitespace().collect();
            if parts.len() < MIN_COLUMNS {
                return None;
            }
            let latency: u64 = parts[LATENCY_COLUMN].parse().ok()?;
            if latency < threshold {
                return None;
            }
            Some(
                OSD_ID_RE
                    .find_iter(parts[OSD_LIST_COLUMN])
                    .filter_map(|m| m.as_str().parse().ok())
                    .collect(),
            )
        })
        .collect()
}

/// Map OSD id to host name from `ceph osd tree` text.
pub fn parse_osd_tree_lines(input: &str) -> HashMap<u32, String> {
    let mut osd_to_host = HashMap::new();
    let mut current_host: Option<&str> = None;

    for line in input.lines() {
        // 빈 줄과 요약 줄은 건너뜀
        if line.trim().is_empty()
            || line.starts_with("ID")
            || line.starts_with("MIN/MAX")
            || line.starts_with("TOTAL")
        {
            continue;
        }

        if line.starts_with('-') && line.contains("host") {
            current_host = line.split_whitespace().last();
        }

        if line.contains("osd.") {
            let osd = line
                .split_whitespace()
                .find_map(|part| part.strip_prefix("osd."))
                .and_then(|id| id.split('.').next())
                .and_then(|id| id.parse::<u32>().ok());
            if let (Some(osd), Some(host)) = (osd, current_host) {
                osd_to_host.insert(osd, host.to_string());
            }
        }
    }

    osd_to_host
}

pub fn parse_log_file(path: &Path, threshold: u64) -> Result<Vec<Vec<u32>>> {
    let content = read_to_string_lossy(path)?;
    let entries = parse_log_lines(&content, threshold);
    log!(
        "Found {} operations at or above {} us in {}",
        entries.len(),
        threshold,
        path.display()
    );
    Ok(entries)
}

pub fn parse_osd_tree(path: &Path) -> Result<HashMap<u32, String>> {
    let content = read_to_string_lossy(path)?;
    let osd_to_host = parse_osd_tree_lines(&content);
    log!("Mapped {} OSDs to hosts from {}", osd_to_host.len(), path.display());
    Ok(osd_to_host)
}


#[cfg(test)]
mod tests {
    use super::*;

    const LOG: &str = "\
     pid  client     tid  pool  pg     acting      WR  size  latency  object
  212317  4151     1024     2   7e    [5,10,1]     W  4096    150123  rbd_data.1
  212317  4151     1025     2   7f    [3,5,8]      W  4096     90000  rbd_data.2
  212317  4151     1026     2   80    [8,2,5]      R  4096    100000  rbd_data.3
short line
  212317  4151     1027     2   81    [1,2,3]      R  4096       n/a  rbd_data.4
";

    const TREE: &str = "\
ID   CLASS  WEIGHT   TYPE NAME        STATUS  REWEIGHT  PRI-AFF
-1          0.29279  root default
-3          0.09760      host node-a
 1    hdd   0.04880          osd.1        up   1.00000  1.00000
 5    hdd   0.04880          osd.5        up   1.00000  1.00000
-5          0.09760      host node-b
 2    ssd   0.04880          osd.2        up   1.00000  1.00000
 8    ssd   0.04880          osd.8        up   1.00000  1.00000
";

    #[test]
    fn test_parse_log_lines_applies_threshold() {
        let entries = parse_log_lines(LOG, 100_000);
        assert_eq!(entries, vec![vec![5, 10, 1], vec![8, 2, 5]]);
    }

    #[test]
    fn test_parse_log_lines_zero_threshold_skips_bad_rows() {
        assert_eq!(parse_log_lines(LOG, 0).len(), 3);
    }

    #[test]
    fn test_parse_osd_tree() {
        let map = parse_osd_tree_lines(TREE);
        assert_eq!(map.len(), 4);
        assert_eq!(map[&1], "node-a");
        assert_eq!(map[&5], "node-a");
        assert_eq!(map[&8], "node-b");
        assert!(!map.contains_key(&10));
    }
}
