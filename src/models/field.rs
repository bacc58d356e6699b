use crate::error::AnalyzeError;
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Bluestore substages reported inside the parenthesized detail block of
/// write ops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Substage {
    Prepare,
    AioWait,
    AioSize,
    SeqWait,
    KvCommit,
}

impl Substage {
    pub const ALL: [Substage; 5] = [
        Substage::Prepare,
        Substage::AioWait,
        Substage::AioSize,
        Substage::SeqWait,
        Substage::KvCommit,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Substage::Prepare => "prepare",
            Substage::AioWait => "aio_wait",
            Substage::AioSize => "aio_size",
            Substage::SeqWait => "seq_wait",
            Substage::KvCommit => "kv_commit",
        }
    }

    pub fn from_name(name: &str) -> Option<Substage> {
        Substage::ALL.into_iter().find(|s| s.as_str() == name)
    }

    /// `aio_size` is a byte count, every other substage is a duration.
    pub fn is_latency(&self) -> bool {
        !matches!(self, Substage::AioSize)
    }
}

/// A comparison field selectable with `--field`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum LatencyField {
    Throttle,
    Recv,
    Dispatch,
    Queue,
    Osd,
    Bluestore,
    /// `op_lat` / `subop_lat`, addressed as `lat`
    #[default]
    Final,
    Substage(Substage),
}

impl LatencyField {
    /// Top-level latencies that make up an op, in trace line order.
    pub const COMPONENTS: [LatencyField; 6] = [
        LatencyField::Throttle,
        LatencyField::Recv,
        LatencyField::Dispatch,
        LatencyField::Queue,
        LatencyField::Osd,
        LatencyField::Bluestore,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            LatencyField::Throttle => "throttle_lat",
            LatencyField::Recv => "recv_lat",
            LatencyField::Dispatch => "dispatch_lat",
            LatencyField::Queue => "queue_lat",
            LatencyField::Osd => "osd_lat",
            LatencyField::Bluestore => "bluestore_lat",
            LatencyField::Final => "lat",
            LatencyField::Substage(stage) => stage.as_str(),
        }
    }

    pub fn is_substage(&self) -> bool {
        matches!(self, LatencyField::Substage(_))
    }
}

// JSON 출력에서는 로그에 나타나는 이름 그대로 사용
impl Serialize for LatencyField {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl fmt::Display for LatencyField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LatencyField {
    type Err = AnalyzeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(stage) = Substage::from_name(s) {
            return Ok(LatencyField::Substage(stage));
        }
        if !s.ends_with("lat") {
            return Err(AnalyzeError::NotLatencyField(s.to_string()));
        }
        LatencyField::COMPONENTS
            .into_iter()
            .chain(std::iter::once(LatencyField::Final))
            .find(|field| field.name() == s)
            .ok_or_else(|| AnalyzeError::UnknownLatencyField(s.to_string()))
    }
}
