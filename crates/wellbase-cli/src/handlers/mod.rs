pub mod fields;
pub mod file;
pub mod find;
pub mod page;
pub mod stages;
pub mod tree;
pub mod wells;
