pub mod config;
pub mod error;
pub mod page;
pub mod workspace;

pub use config::{Config, resolve_workspace_path};
pub use error::{Error, Result};
pub use page::{PageData, PageEntry, PageRequest, Section};
pub use workspace::{FileData, Workspace};
