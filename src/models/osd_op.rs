use super::field::LatencyField;
use super::op_kind::{FinalLatencyKind, OpKind};
use indexmap::IndexMap;

/// One parsed osdtrace line. All latencies are in microseconds.
#[derive(Debug, Clone, PartialEq)]
pub struct OsdOp {
    pub osd: u32,
    pub pg: String,
    pub op: OpKind,
    pub size: u64,
    pub client: u64,
    pub tid: u64,
    pub throttle_lat: u64,
    pub recv_lat: u64,
    pub dispatch_lat: u64,
    pub queue_lat: u64,
    pub osd_lat: u64,
    pub peers: Vec<PeerLatency>, // write ops only
    pub bluestore_lat: u64,
    // (prepare .. kv_commit ..) 블록, 라인에 나타난 순서 유지
    pub bluestore_details: IndexMap<String, u64>,
    pub lat_type: FinalLatencyKind,
    pub lat: u64,
}

/// Replica round trip reported for a write op.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeerLatency {
    pub peer: u32,
    pub latency: u64,
}

impl OsdOp {
    /// Value of `field` for this op, `None` when the op carries no such
    /// bluestore substage.
    pub fn latency(&self, field: LatencyField) -> Option<u64> {
        match field {
            LatencyField::Throttle => Some(self.throttle_lat),
            LatencyField::Recv => Some(self.recv_lat),
            LatencyField::Dispatch => Some(self.dispatch_lat),
            LatencyField::Queue => Some(self.queue_lat),
            LatencyField::Osd => Some(self.osd_lat),
            LatencyField::Bluestore => Some(self.bluestore_lat),
            LatencyField::Final => Some(self.lat),
            LatencyField::Substage(stage) => self.bluestore_details.get(stage.as_str()).copied(),
        }
    }
}
