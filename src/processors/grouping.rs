use crate::models::{LatencyField, OpKind, OsdOp};
use std::collections::BTreeMap;

/// Samples of one latency field, per OSD and per op kind.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupedLatencies {
    field: LatencyField,
    // OSD id 순으로 정렬, 배열 인덱스는 OpKind::index()
    osds: BTreeMap<u32, [Vec<u64>; 4]>,
}

impl GroupedLatencies {
    pub fn field(&self) -> LatencyField {
        self.field
    }

    pub fn osd_ids(&self) -> impl Iterator<Item = u32> + '_ {
        self.osds.keys().copied()
    }

    pub fn samples(&self, osd: u32, op: OpKind) -> &[u64] {
        self.osds
            .get(&osd)
            .map(|groups| groups[op.index()].as_slice())
            .unwrap_or(&[])
    }

    /// Non-empty groups of one OSD, in report order.
    pub fn ops_of(&self, osd: u32) -> impl Iterator<Item = (OpKind, &[u64])> + '_ {
        OpKind::ALL
            .into_iter()
            .map(move |op| (op, self.samples(osd, op)))
            .filter(|(_, samples)| !samples.is_empty())
    }
}

/// Group ops by OSD and op kind, collecting `field` values.
///
/// Ops without the requested bluestore substage contribute nothing, but their
/// OSD is still listed.
pub fn group_by_osd_and_op(data: &[OsdOp], field: LatencyField) -> GroupedLatencies {
    let mut osds: BTreeMap<u32, [Vec<u64>; 4]> = BTreeMap::new();
    for op in data {
        let groups = osds.entry(op.osd).or_default();
        if let Some(value) = op.latency(field) {
            groups[op.op.index()].push(value);
        }
    }
    GroupedLatencies { field, osds }
}
