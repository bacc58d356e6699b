// OpKind 열거형 정의 - osdtrace가 기록하는 op 종류
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OpKind {
    OpR,
    OpW,
    SubopR,
    SubopW,
}

impl OpKind {
    /// Report order for every per-op section.
    pub const ALL: [OpKind; 4] = [OpKind::OpR, OpKind::OpW, OpKind::SubopR, OpKind::SubopW];

    pub fn as_str(&self) -> &'static str {
        match self {
            OpKind::OpR => "op_r",
            OpKind::OpW => "op_w",
            OpKind::SubopR => "subop_r",
            OpKind::SubopW => "subop_w",
        }
    }

    // ALL 배열에서의 위치 (그룹 벡터 인덱스로 사용)
    pub fn index(&self) -> usize {
        match self {
            OpKind::OpR => 0,
            OpKind::OpW => 1,
            OpKind::SubopR => 2,
            OpKind::SubopW => 3,
        }
    }

    pub fn is_write(&self) -> bool {
        matches!(self, OpKind::OpW | OpKind::SubopW)
    }
}

impl fmt::Display for OpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OpKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "op_r" => Ok(OpKind::OpR),
            "op_w" => Ok(OpKind::OpW),
            "subop_r" => Ok(OpKind::SubopR),
            "subop_w" => Ok(OpKind::SubopW),
            _ => Err(format!("Unknown op type: {s}")),
        }
    }
}

/// Which final latency a trace line reports: client ops end in `op_lat`,
/// replica sub-ops in `subop_lat`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinalLatencyKind {
    OpLat,
    SubopLat,
}

impl FinalLatencyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FinalLatencyKind::OpLat => "op_lat",
            FinalLatencyKind::SubopLat => "subop_lat",
        }
    }
}

impl FromStr for FinalLatencyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "op_lat" => Ok(FinalLatencyKind::OpLat),
            "subop_lat" => Ok(FinalLatencyKind::SubopLat),
            _ => Err(format!("Unknown latency type: {s}")),
        }
    }
}
