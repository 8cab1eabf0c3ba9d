//! Foundry remappings and library convention
//!
//! At each directory from the source directory upward:
//! 1. the import is rewritten with that directory's own remappings
//!    (`remappings.txt` first, then `foundry.toml`) and probed below it;
//! 2. failing that, `<lib>/<rest>` is probed as `lib/<lib>/src/<rest>`.

use super::{ResolutionStrategy, ResolveContext, join_import};
use crate::remapper::apply_remappings;
use std::path::PathBuf;

/// Directory Foundry installs libraries into
pub const LIB_DIR: &str = "lib";
/// Source directory inside a Foundry library
pub const LIB_SRC_DIR: &str = "src";

/// Foundry-style resolution, see the module docs
#[derive(Debug, Clone, Copy, Default)]
pub struct FoundryStrategy;

/// `forge-std/Test.sol` => `lib/forge-std/src/Test.sol`.
///
/// Needs at least two non-empty segments.
pub fn default_library_path(import_path: &str) -> Option<PathBuf> {
    let segments: Vec<&str> = import_path
        .split('/')
        .filter(|segment| !segment.is_empty())
        .collect();

    match segments.as_slice() {
        [lib_name, rest @ ..] if !rest.is_empty() => Some(
            PathBuf::from(LIB_DIR)
                .join(lib_name)
                .join(LIB_SRC_DIR)
                .join(rest.join("/")),
        ),
        _ => None,
    }
}

impl ResolutionStrategy for FoundryStrategy {
    fn name(&self) -> &'static str {
        "foundry"
    }

    fn try_resolve(&self, ctx: &ResolveContext<'_>, import_path: &str) -> Option<PathBuf> {
        let fallback = default_library_path(import_path);

        for dir in ctx.ancestors() {
            let remappings = ctx.config.remappings(dir);
            let remapped = apply_remappings(&remappings, import_path);
            if remapped != import_path {
                tracing::trace!("{}: remapped '{}' to '{}'", dir.display(), import_path, remapped);
            }

            if let Some(found) = ctx.probe(join_import(dir, &remapped)) {
                return Some(found);
            }

            if let Some(found) = fallback.as_ref().and_then(|lib_path| ctx.probe(dir.join(lib_path)))
            {
                return Some(found);
            }
        }

        None
    }
}
