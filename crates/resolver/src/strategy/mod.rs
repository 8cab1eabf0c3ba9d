//! Resolution strategies
//!
//! Each strategy encodes one ecosystem's layout. [`StrategyChain`] runs them
//! in a fixed order and stops at the first hit.

pub mod ethpm;
pub mod foundry;
pub mod npm;
pub mod relative;

pub use ethpm::EthPmStrategy;
pub use foundry::FoundryStrategy;
pub use npm::NpmStrategy;
pub use relative::RelativeStrategy;

use crate::walker::{Ancestors, DirectoryWalker};
use project::{ConfigLoader, FileSystem};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Everything a strategy may consult while resolving one import
pub struct ResolveContext<'a> {
    /// Host file primitives
    pub fs: &'a dyn FileSystem,
    /// Per-directory remapping source
    pub config: &'a dyn ConfigLoader,
    /// Ancestor walk policy
    pub walker: &'a DirectoryWalker,
    /// Directory containing the importing file
    pub source_dir: &'a Path,
}

impl<'a> ResolveContext<'a> {
    /// The source directory followed by its ancestors
    pub fn ancestors(&self) -> Ancestors<'a> {
        self.walker.ancestors(self.source_dir)
    }

    /// `candidate` if it names an existing file
    pub fn probe(&self, candidate: PathBuf) -> Option<PathBuf> {
        let found = self.fs.is_file(&candidate);
        tracing::trace!("probe {} -> {}", candidate.display(), found);
        found.then_some(candidate)
    }
}

/// Join an import path below `base`. Import paths are always taken relative
/// to the directory they are searched from, even with a leading `/`.
pub(crate) fn join_import(base: &Path, import_path: &str) -> PathBuf {
    base.join(import_path.trim_start_matches('/'))
}

/// One way of locating an imported file
pub trait ResolutionStrategy: Send + Sync {
    /// Short name reported in [`ResolvedImport::strategy`](crate::ResolvedImport)
    fn name(&self) -> &'static str;

    /// Locate `import_path`, or `None` if this strategy finds nothing
    fn try_resolve(&self, ctx: &ResolveContext<'_>, import_path: &str) -> Option<PathBuf>;
}

/// The built-in strategies, in chain order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    /// Relative to the importing file's directory
    Relative,
    /// `node_modules` packages
    Npm,
    /// `installed_contracts` packages
    EthPm,
    /// Foundry remappings and `lib/` libraries
    Foundry,
}

impl StrategyKind {
    /// All built-in strategies in the order they are tried
    pub const ALL: [StrategyKind; 4] = [
        StrategyKind::Relative,
        StrategyKind::Npm,
        StrategyKind::EthPm,
        StrategyKind::Foundry,
    ];

    pub fn name(self) -> &'static str {
        match self {
            StrategyKind::Relative => "relative",
            StrategyKind::Npm => "npm",
            StrategyKind::EthPm => "ethpm",
            StrategyKind::Foundry => "foundry",
        }
    }

    /// Parse a strategy name, accepting a few common aliases
    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "relative" | "direct" => Some(StrategyKind::Relative),
            "npm" | "node_modules" => Some(StrategyKind::Npm),
            "ethpm" | "installed_contracts" => Some(StrategyKind::EthPm),
            "foundry" | "forge" => Some(StrategyKind::Foundry),
            _ => None,
        }
    }

    /// Instantiate the strategy
    pub fn strategy(self) -> Box<dyn ResolutionStrategy> {
        match self {
            StrategyKind::Relative => Box::new(RelativeStrategy),
            StrategyKind::Npm => Box::new(NpmStrategy),
            StrategyKind::EthPm => Box::new(EthPmStrategy),
            StrategyKind::Foundry => Box::new(FoundryStrategy),
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Ordered, short-circuiting list of strategies
pub struct StrategyChain {
    strategies: Vec<Box<dyn ResolutionStrategy>>,
}

impl Default for StrategyChain {
    fn default() -> Self {
        Self::standard()
    }
}

impl StrategyChain {
    /// Relative, npm, EthPM, then Foundry
    pub fn standard() -> Self {
        Self::from_kinds(&StrategyKind::ALL)
    }

    /// A chain with no strategies; resolves nothing until extended
    pub fn empty() -> Self {
        Self {
            strategies: Vec::new(),
        }
    }

    /// The built-in strategies named in `kinds`, always in standard order
    pub fn from_kinds(kinds: &[StrategyKind]) -> Self {
        Self {
            strategies: StrategyKind::ALL
                .into_iter()
                .filter(|kind| kinds.contains(kind))
                .map(StrategyKind::strategy)
                .collect(),
        }
    }

    /// Append a strategy, tried after all existing ones
    pub fn with_strategy(mut self, strategy: impl ResolutionStrategy + 'static) -> Self {
        self.push(Box::new(strategy));
        self
    }

    pub fn push(&mut self, strategy: Box<dyn ResolutionStrategy>) {
        self.strategies.push(strategy);
    }

    /// Strategy names in the order they run
    pub fn names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }

    /// Run strategies in order; returns the first hit and who found it
    pub fn resolve(
        &self,
        ctx: &ResolveContext<'_>,
        import_path: &str,
    ) -> Option<(&'static str, PathBuf)> {
        self.strategies.iter().find_map(|strategy| {
            let found = strategy.try_resolve(ctx, import_path)?;
            tracing::debug!(
                "Resolved '{}' via {} strategy: {}",
                import_path,
                strategy.name(),
                found.display()
            );
            Some((strategy.name(), found))
        })
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::Fixture;
    use super::*;
    use project::MemoryFileSystem;

    struct Fixed(&'static str);

    impl ResolutionStrategy for Fixed {
        fn name(&self) -> &'static str {
            "fixed"
        }

        fn try_resolve(&self, _ctx: &ResolveContext<'_>, _import_path: &str) -> Option<PathBuf> {
            Some(PathBuf::from(self.0))
        }
    }

    #[test]
    fn test_standard_order() {
        assert_eq!(
            StrategyChain::default().names(),
            vec!["relative", "npm", "ethpm", "foundry"]
        );
    }

    #[test]
    fn test_from_kinds_keeps_standard_order() {
        let chain = StrategyChain::from_kinds(&[StrategyKind::Foundry, StrategyKind::Relative]);
        assert_eq!(chain.names(), vec!["relative", "foundry"]);
    }

    #[test]
    fn test_first_success_wins() {
        let fixture = Fixture::new(
            MemoryFileSystem::new()
                .with_file("/proj/src/pkg/A.sol", "")
                .with_file("/proj/src/node_modules/pkg/A.sol", ""),
        );
        let ctx = fixture.ctx(Path::new("/proj/src"));

        let (name, path) = StrategyChain::standard().resolve(&ctx, "pkg/A.sol").unwrap();
        assert_eq!(name, "relative");
        assert_eq!(path, PathBuf::from("/proj/src/pkg/A.sol"));
    }

    #[test]
    fn test_custom_strategy_runs_last() {
        let fixture = Fixture::new(MemoryFileSystem::new());
        let ctx = fixture.ctx(Path::new("/proj"));

        let chain = StrategyChain::standard().with_strategy(Fixed("/elsewhere/A.sol"));
        assert_eq!(chain.len(), 5);
        assert_eq!(
            chain.resolve(&ctx, "A.sol"),
            Some(("fixed", PathBuf::from("/elsewhere/A.sol")))
        );
    }

    #[test]
    fn test_empty_chain_resolves_nothing() {
        let fixture = Fixture::new(MemoryFileSystem::new().with_file("/proj/A.sol", ""));
        let ctx = fixture.ctx(Path::new("/proj"));

        let chain = StrategyChain::empty();
        assert!(chain.is_empty());
        assert_eq!(chain.resolve(&ctx, "A.sol"), None);
    }

    #[test]
    fn test_strategy_kind_names() {
        for kind in StrategyKind::ALL {
            assert_eq!(StrategyKind::from_name(kind.name()), Some(kind));
            assert_eq!(kind.to_string(), kind.name());
        }
        assert_eq!(StrategyKind::from_name("Forge"), Some(StrategyKind::Foundry));
        assert_eq!(StrategyKind::from_name("node_modules"), Some(StrategyKind::Npm));
        assert_eq!(StrategyKind::from_name("cargo"), None);
    }
}
