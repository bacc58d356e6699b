mod field;
mod op_kind;
mod osd_op;

pub use field::{LatencyField, Substage};
pub use op_kind::{FinalLatencyKind, OpKind};
pub use osd_op::{OsdOp, PeerLatency};
