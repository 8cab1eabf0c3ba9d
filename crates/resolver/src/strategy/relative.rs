//! Imports relative to the importing file

use super::{ResolutionStrategy, ResolveContext, join_import};
use std::path::PathBuf;

/// Looks for the import next to the importing file. No walking.
#[derive(Debug, Clone, Copy, Default)]
pub struct RelativeStrategy;

impl ResolutionStrategy for RelativeStrategy {
    fn name(&self) -> &'static str {
        "relative"
    }

    fn try_resolve(&self, ctx: &ResolveContext<'_>, import_path: &str) -> Option<PathBuf> {
        ctx.probe(join_import(ctx.source_dir, import_path))
    }
}
