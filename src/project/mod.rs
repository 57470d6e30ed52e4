//! Loading Robot Framework files from disk
pub mod file_loader;
mod workspace_loader;

pub use file_loader::{collect_file_paths, load_and_parse, LoadError};
pub use workspace_loader::{Workspace, WorkspaceLoader};
