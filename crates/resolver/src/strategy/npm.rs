//! npm packages installed under `node_modules`

use super::{ResolutionStrategy, ResolveContext, join_import};
use std::path::PathBuf;

/// Package directory searched in each ancestor
pub const NODE_MODULES: &str = "node_modules";

/// Probes `<dir>/node_modules/<import>` from the source directory upward
#[derive(Debug, Clone, Copy, Default)]
pub struct NpmStrategy;

impl ResolutionStrategy for NpmStrategy {
    fn name(&self) -> &'static str {
        "npm"
    }

    fn try_resolve(&self, ctx: &ResolveContext<'_>, import_path: &str) -> Option<PathBuf> {
        ctx.ancestors()
            .find_map(|dir| ctx.probe(join_import(&dir.join(NODE_MODULES), import_path)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::test_support::Fixture;
    use project::MemoryFileSystem;
    use std::path::Path;

    #[test]
    fn test_walks_up_to_package() {
        let fixture = Fixture::new(
            MemoryFileSystem::new().with_file("/a/b/node_modules/pkg/X.sol", ""),
        );
        let ctx = fixture.ctx(Path::new("/a/b/c"));

        assert_eq!(
            NpmStrategy.try_resolve(&ctx, "pkg/X.sol"),
            Some(PathBuf::from("/a/b/node_modules/pkg/X.sol"))
        );
    }

    #[test]
    fn test_nearest_node_modules_wins() {
        let fixture = Fixture::new(
            MemoryFileSystem::new()
                .with_file("/a/node_modules/pkg/X.sol", "")
                .with_file("/a/b/node_modules/pkg/X.sol", ""),
        );
        let ctx = fixture.ctx(Path::new("/a/b/c"));

        assert_eq!(
            NpmStrategy.try_resolve(&ctx, "pkg/X.sol"),
            Some(PathBuf::from("/a/b/node_modules/pkg/X.sol"))
        );
    }

    #[test]
    fn test_missing_package() {
        let fixture = Fixture::new(MemoryFileSystem::new().with_file("/a/pkg/X.sol", ""));
        let ctx = fixture.ctx(Path::new("/a/b"));

        assert!(NpmStrategy.try_resolve(&ctx, "pkg/X.sol").is_none());
    }
}
