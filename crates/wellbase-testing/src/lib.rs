//! Testing infrastructure for wellbase.
//!
//! - `DataTree`: on-disk directory fixture backed by a temp dir
//! - `MemoryFileSystem`: in-memory `FileSystem` with a fixed enumeration order
//! - `samples`: CSV and LAS snippets used across the test suites

pub mod fixtures;
pub mod memory;
pub mod samples;

pub use fixtures::DataTree;
pub use memory::MemoryFileSystem;
