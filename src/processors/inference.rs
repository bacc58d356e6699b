use crate::log;
use crate::models::{LatencyField, OpKind, OsdOp};
use crate::utils::constants::CONTRIBUTION_CAP;
use indexmap::IndexMap;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct FieldContribution {
    pub field: LatencyField,
    pub percent: f64,
}

/// Mean contributions for one op kind, largest first.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct OpContributions {
    pub op: OpKind,
    pub contributions: Vec<FieldContribution>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct OsdContributions {
    pub osd: u32,
    pub ops: Vec<OpContributions>,
}

/// Share of `total` taken by `value`, in percent.
///
/// Sub-latencies overlap, so a single one can exceed the final latency; those
/// are reported as 99.99.
pub fn contribution(value: u64, total: u64) -> f64 {
    let percent = (value as f64 / total as f64) * 100.0;
    if percent >= 100.0 {
        CONTRIBUTION_CAP
    } else {
        percent
    }
}

/// Average contribution of every component latency to the final latency,
/// per OSD (ascending) and op kind (first seen).
pub fn infer_contributions(data: &[OsdOp]) -> Vec<OsdContributions> {
    // osd -> op -> field -> (합계, 개수)
    let mut pooled: BTreeMap<u32, IndexMap<OpKind, IndexMap<LatencyField, (f64, usize)>>> =
        BTreeMap::new();
    let mut skipped = 0usize;

    for op in data {
        if op.lat == 0 {
            skipped += 1;
            continue;
        }
        let fields = pooled.entry(op.osd).or_default().entry(op.op).or_default();
        for field in LatencyField::COMPONENTS {
            if let Some(value) = op.latency(field) {
                let slot = fields.entry(field).or_insert((0.0, 0));
                slot.0 += contribution(value, op.lat);
                slot.1 += 1;
            }
        }
    }

    if skipped > 0 {
        log!("Skipped {} ops with zero final latency", skipped);
    }

    pooled
        .into_iter()
        .map(|(osd, ops)| OsdContributions {
            osd,
            ops: ops
                .into_iter()
                .map(|(op, fields)| {
                    let mut contributions: Vec<FieldContribution> = fields
                        .into_iter()
                        .map(|(field, (sum, count))| FieldContribution {
                            field,
                            percent: sum / count as f64,
                        })
                        .collect();
                    // 안정 정렬: 같은 값이면 라인 순서 유지
                    contributions.sort_by(|a, b| b.percent.total_cmp(&a.percent));
                    OpContributions { op, contributions }
                })
                .collect(),
        })
        .collect()
}
