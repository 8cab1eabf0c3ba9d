//! Project configuration support for solresolve
//!
//! This crate owns everything the resolver reads from disk besides the
//! imported files themselves:
//! - The host file primitives ([`FileSystem`]), with an OS-backed and an
//!   in-memory implementation
//! - Remapping entries and their `prefix=target` syntax
//! - `remappings.txt` and `foundry.toml` parsing
//! - The [`ConfigLoader`] collaborator, optionally memoized per directory

pub mod config;
pub mod fs;
pub mod remapping;

pub use config::{CachedConfigLoader, ConfigLoader, FoundryConfig, FsConfigLoader, RemappingsFile};
pub use fs::{FileSystem, MemoryFileSystem, OsFileSystem};
pub use remapping::Remapping;

use thiserror::Error;

/// Errors that can occur while reading project configuration
#[derive(Error, Debug)]
pub enum ProjectError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    ConfigParse(String),

    #[error("Invalid remapping '{0}': expected exactly one '=' between a prefix and a target")]
    InvalidRemapping(String),
}

/// Result type for project operations
pub type ProjectResult<T> = Result<T, ProjectError>;
