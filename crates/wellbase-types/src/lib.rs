//! Core types shared across the wellbase crates: the directory tree arena,
//! decoded records, stages and aggregation results.

pub mod aggregate;
pub mod las;
pub mod node;
pub mod stage;
pub mod value;

pub use aggregate::Aggregate;
pub use las::{Curve, HeaderItem, LasDocument};
pub use node::{Node, NodeId, NodeKind, NodeView, Tree};
pub use stage::{BucketResult, Buckets, Stage, StagedRow, stage_suffix};
pub use value::{Record, Value};
