//! Path resolution for Solidity imports
//!
//! [`PathResolver`] is the entry point: give it the raw import path and the
//! file that contains the import, get back the imported file or `None`.

use crate::strategy::{ResolveContext, StrategyChain};
use crate::walker::DirectoryWalker;
use crate::{ResolvedImport, ResolverError, ResolverResult};
use project::fs::normalize;
use project::{CachedConfigLoader, ConfigLoader, FileSystem, FsConfigLoader, OsFileSystem};
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Strip the surrounding quote characters of an import literal.
///
/// One character is removed from each end; literals shorter than two
/// characters yield `None`.
pub fn strip_quotes(literal: &str) -> Option<&str> {
    let mut chars = literal.chars();
    chars.next()?;
    chars.next_back()?;
    Some(chars.as_str())
}

/// Resolves import paths to files
///
/// Holds no per-call state, so a single resolver can serve many threads.
pub struct PathResolver {
    fs: Arc<dyn FileSystem>,
    config: Arc<dyn ConfigLoader>,
    walker: DirectoryWalker,
    chain: StrategyChain,
    working_dir: Option<PathBuf>,
}

impl Default for PathResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl PathResolver {
    /// Resolver over the local file system with the standard strategies
    pub fn new() -> Self {
        Self::builder().build()
    }

    pub fn builder() -> PathResolverBuilder {
        PathResolverBuilder::default()
    }

    /// Resolve `import_path` as written in `from_file`.
    ///
    /// The importing file's directory is the starting point of every search.
    /// A relative `from_file` is taken relative to the working directory.
    /// Returns `None` for an empty import path or when no strategy finds an
    /// existing file.
    pub fn resolve(&self, import_path: &str, from_file: &Path) -> Option<ResolvedImport> {
        if import_path.is_empty() {
            return None;
        }

        let origin = self.absolute(from_file);
        let source_dir = origin.parent().unwrap_or(Path::new(""));
        let ctx = ResolveContext {
            fs: self.fs.as_ref(),
            config: self.config.as_ref(),
            walker: &self.walker,
            source_dir,
        };

        match self.chain.resolve(&ctx, import_path) {
            Some((strategy, found)) => Some(ResolvedImport {
                original: import_path.to_string(),
                resolved_path: self.fs.canonicalize(&found),
                strategy,
            }),
            None => {
                tracing::debug!(
                    "Could not resolve import '{}' in {}",
                    import_path,
                    from_file.display()
                );
                None
            }
        }
    }

    /// Anchor a relative path at the configured or current working directory
    fn absolute<'p>(&self, path: &'p Path) -> Cow<'p, Path> {
        if path.is_absolute() {
            return Cow::Borrowed(path);
        }

        let base = match &self.working_dir {
            Some(dir) => Some(dir.clone()),
            None => std::env::current_dir()
                .map_err(|e| tracing::debug!("Cannot read working directory: {}", e))
                .ok(),
        };
        match base {
            Some(base) => Cow::Owned(normalize(&base.join(path))),
            None => Cow::Borrowed(path),
        }
    }

    /// Like [`resolve`](Self::resolve), returning only the file
    pub fn resolve_path(&self, import_path: &str, from_file: &Path) -> Option<PathBuf> {
        self.resolve(import_path, from_file)
            .map(|resolved| resolved.resolved_path)
    }

    /// Resolve an import literal still wrapped in its quotes, e.g. `"./A.sol"`
    pub fn resolve_literal(&self, literal: &str, from_file: &Path) -> Option<ResolvedImport> {
        strip_quotes(literal).and_then(|import_path| self.resolve(import_path, from_file))
    }

    /// Strict variant of [`resolve`](Self::resolve) for callers that treat a
    /// miss as an error
    pub fn require(&self, import_path: &str, from_file: &Path) -> ResolverResult<ResolvedImport> {
        if import_path.is_empty() {
            return Err(ResolverError::InvalidImportPath(import_path.to_string()));
        }

        self.resolve(import_path, from_file)
            .ok_or_else(|| ResolverError::UnresolvedImport {
                import: import_path.to_string(),
                from_file: from_file.to_path_buf(),
            })
    }

    /// Resolve several imports of the same file, preserving input order
    pub fn resolve_all<'a, I>(&self, imports: I, from_file: &Path) -> Vec<(String, Option<ResolvedImport>)>
    where
        I: IntoIterator<Item = &'a str>,
    {
        imports
            .into_iter()
            .map(|import_path| (import_path.to_string(), self.resolve(import_path, from_file)))
            .collect()
    }

    /// Drop cached remappings for `dir` after its configuration changed
    pub fn invalidate_config(&self, dir: &Path) {
        self.config.invalidate(dir);
    }

    /// Drop all cached remappings
    pub fn clear_config_cache(&self) {
        self.config.clear();
    }

    /// Directory relative importing files are anchored at, when fixed
    pub fn working_dir(&self) -> Option<&Path> {
        self.working_dir.as_deref()
    }

    pub fn walker(&self) -> &DirectoryWalker {
        &self.walker
    }

    pub fn chain(&self) -> &StrategyChain {
        &self.chain
    }

    pub fn config_loader(&self) -> &Arc<dyn ConfigLoader> {
        &self.config
    }
}

/// Builder for [`PathResolver`]
#[derive(Default)]
pub struct PathResolverBuilder {
    fs: Option<Arc<dyn FileSystem>>,
    config: Option<Arc<dyn ConfigLoader>>,
    ceiling: Option<PathBuf>,
    cache_config: bool,
    chain: Option<StrategyChain>,
    working_dir: Option<PathBuf>,
}

impl PathResolverBuilder {
    /// File system to probe and to read configuration from (default: the OS)
    pub fn file_system(mut self, fs: Arc<dyn FileSystem>) -> Self {
        self.fs = Some(fs);
        self
    }

    /// Remapping source (default: [`FsConfigLoader`] over the file system)
    pub fn config_loader(mut self, config: Arc<dyn ConfigLoader>) -> Self {
        self.config = Some(config);
        self
    }

    /// Do not search above `ceiling`
    pub fn ceiling(mut self, ceiling: impl Into<PathBuf>) -> Self {
        self.ceiling = Some(ceiling.into());
        self
    }

    /// Memoize each directory's remappings across calls
    pub fn cache_config(mut self, enabled: bool) -> Self {
        self.cache_config = enabled;
        self
    }

    /// Strategies to run (default: [`StrategyChain::standard`])
    pub fn strategies(mut self, chain: StrategyChain) -> Self {
        self.chain = Some(chain);
        self
    }

    /// Anchor relative importing files at `dir` instead of the process's
    /// current directory
    pub fn working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    pub fn build(self) -> PathResolver {
        let fs: Arc<dyn FileSystem> = self.fs.unwrap_or_else(|| Arc::new(OsFileSystem));
        let loader: Arc<dyn ConfigLoader> = self
            .config
            .unwrap_or_else(|| Arc::new(FsConfigLoader::new(Arc::clone(&fs))));
        let config: Arc<dyn ConfigLoader> = if self.cache_config {
            Arc::new(CachedConfigLoader::new(loader))
        } else {
            loader
        };
        let walker = match self.ceiling {
            Some(ceiling) => DirectoryWalker::with_ceiling(ceiling),
            None => DirectoryWalker::new(),
        };

        PathResolver {
            fs,
            config,
            walker,
            chain: self.chain.unwrap_or_default(),
            working_dir: self.working_dir,
        }
    }
}
