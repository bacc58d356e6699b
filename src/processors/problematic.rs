use indexmap::IndexMap;
use std::collections::HashMap;

/// One round of the problematic OSD scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProblematicOsd {
    pub osd: u32,
    pub count: usize,
    pub host: String,
    pub iteration: usize,
}

pub const UNKNOWN_HOST: &str = "Unknown";

/// Occurrences of each OSD across `entries`, in first-seen order.
pub fn count_osds_in_entries(entries: &[Vec<u32>]) -> IndexMap<u32, usize> {
    let mut counts = IndexMap::new();
    for entry in entries {
        for &osd in entry {
            *counts.entry(osd).or_insert(0) += 1;
        }
    }
    counts
}

/// Repeatedly blame the OSD seen in the most slow operations, then drop every
/// operation it took part in, until no operation is left.
pub fn find_problematic_osds(
    entries: &[Vec<u32>],
    osd_to_host: &HashMap<u32, String>,
) -> Vec<ProblematicOsd> {
    let mut problematic = Vec::new();
    let mut remaining = entries.to_vec();
    let mut iteration = 1;

    loop {
        let counts = count_osds_in_entries(&remaining);

        // 동률이면 먼저 나온 OSD 선택
        let mut top: Option<(u32, usize)> = None;
        for (&osd, &count) in &counts {
            if top.is_none_or(|(_, best)| count > best) {
                top = Some((osd, count));
            }
        }
        let Some((osd, count)) = top else {
            break;
        };

        problematic.push(ProblematicOsd {
            osd,
            count,
            host: osd_to_host
                .get(&osd)
                .cloned()
                .unwrap_or_else(|| UNKNOWN_HOST.to_string()),
            iteration,
        });

        remaining.retain(|entry| !entry.contains(&osd));
        iteration += 1;
    }

    problematic
}
