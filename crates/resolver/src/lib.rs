//! Import resolution for solresolve
//!
//! This crate maps the raw path of a Solidity `import` to the file it names,
//! following the layouts used across the ecosystem:
//! - Plain relative paths
//! - npm packages under `node_modules`
//! - EthPM packages under `installed_contracts`
//! - Foundry remappings and the `lib/<name>/src` library convention
//!
//! Strategies are tried in that order and the first hit wins. A miss is a
//! normal outcome (`None`), never an error.

pub mod remapper;
pub mod resolver;
pub mod strategy;
pub mod walker;

pub use remapper::{ImportRemapper, apply_remappings};
pub use resolver::{PathResolver, PathResolverBuilder, strip_quotes};
pub use strategy::{ResolutionStrategy, ResolveContext, StrategyChain, StrategyKind};
pub use walker::{Ancestors, DirectoryWalker};

pub use project::Remapping;

use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

/// Errors reported by the strict resolution API
#[derive(Error, Debug)]
pub enum ResolverError {
    #[error("Failed to resolve import '{import}' from '{}'", from_file.display())]
    UnresolvedImport { import: String, from_file: PathBuf },

    #[error("Invalid import path: {0:?}")]
    InvalidImportPath(String),
}

/// Result type for resolver operations
pub type ResolverResult<T> = Result<T, ResolverError>;

/// Represents a resolved import
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedImport {
    /// Original import path as written in source (without quotes)
    pub original: String,
    /// Resolved file path, canonical where the host supports it
    pub resolved_path: PathBuf,
    /// Name of the strategy that found the file
    pub strategy: &'static str,
}
