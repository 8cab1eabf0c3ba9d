//! EthPM packages installed under `installed_contracts`
//!
//! EthPM lays packages out as `installed_contracts/<pkg>/contracts/...`
//! while imports are written `<pkg>/...`.

use super::{ResolutionStrategy, ResolveContext, join_import};
use std::path::PathBuf;

/// Package directory searched in each ancestor
pub const INSTALLED_CONTRACTS: &str = "installed_contracts";

/// Probes `<dir>/installed_contracts/<pkg>/contracts/<rest>` from the source
/// directory upward
#[derive(Debug, Clone, Copy, Default)]
pub struct EthPmStrategy;

/// Insert `contracts/` after the first path segment: `pkg/X.sol` becomes
/// `pkg/contracts/X.sol`. Paths without a `/` are returned unchanged.
pub fn ethpm_package_path(import_path: &str) -> String {
    import_path.replacen('/', "/contracts/", 1)
}

impl ResolutionStrategy for EthPmStrategy {
    fn name(&self) -> &'static str {
        "ethpm"
    }

    fn try_resolve(&self, ctx: &ResolveContext<'_>, import_path: &str) -> Option<PathBuf> {
        let package_path = ethpm_package_path(import_path);
        ctx.ancestors().find_map(|dir| {
            ctx.probe(join_import(&dir.join(INSTALLED_CONTRACTS), &package_path))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::test_support::Fixture;
    use project::MemoryFileSystem;
    use std::path::Path;

    #[test]
    fn test_package_path_rewrite() {
        assert_eq!(ethpm_package_path("pkg/X.sol"), "pkg/contracts/X.sol");
        assert_eq!(ethpm_package_path("pkg/sub/X.sol"), "pkg/contracts/sub/X.sol");
        assert_eq!(ethpm_package_path("X.sol"), "X.sol");
    }

    #[test]
    fn test_resolves_installed_package() {
        let fixture = Fixture::new(
            MemoryFileSystem::new().with_file("/a/installed_contracts/pkg/contracts/X.sol", ""),
        );
        let ctx = fixture.ctx(Path::new("/a/b/c"));

        assert_eq!(
            EthPmStrategy.try_resolve(&ctx, "pkg/X.sol"),
            Some(PathBuf::from("/a/installed_contracts/pkg/contracts/X.sol"))
        );
    }

    #[test]
    fn test_unrewritten_layout_not_found() {
        let fixture = Fixture::new(
            MemoryFileSystem::new().with_file("/a/installed_contracts/pkg/X.sol", ""),
        );
        let ctx = fixture.ctx(Path::new("/a"));

        assert!(EthPmStrategy.try_resolve(&ctx, "pkg/X.sol").is_none());
    }
}
