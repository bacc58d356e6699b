pub mod grouping;
pub mod inference;
pub mod problematic;

pub use grouping::{group_by_osd_and_op, GroupedLatencies};
pub use inference::{contribution, infer_contributions, OsdContributions};
pub use problematic::{find_problematic_osds, ProblematicOsd};
