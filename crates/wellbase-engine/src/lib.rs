// Engine module - tree construction, lookup and folding over data directories
// Sits between the provider adapters (file system, decoders) and the runtime

pub mod aggregate;
pub mod builder;
pub mod enrich;
pub mod error;
pub mod index;

pub use aggregate::{Aggregator, UnmatchedStage};
pub use builder::build_tree;
pub use enrich::{enrich, flatten_by_stage, grafted_records};
pub use error::{Error, Result};
pub use index::{Found, annotate_paths, collect_leaves, find_by_name, locate, path_string};
