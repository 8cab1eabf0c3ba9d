//! Remapping configuration sources
//!
//! Two files can declare remappings for a directory: `remappings.txt`
//! (line-oriented) and `foundry.toml` (TOML). [`ConfigLoader`] is the seam
//! the resolver reads them through.

pub mod cache;
pub mod foundry;
pub mod remappings_txt;

pub use cache::{CacheStats, CachedConfigLoader};
pub use foundry::FoundryConfig;
pub use remappings_txt::RemappingsFile;

use crate::fs::{FileSystem, OsFileSystem};
use crate::remapping::Remapping;
use std::path::Path;
use std::sync::Arc;

/// Source of per-directory remappings.
///
/// Lookups never fail: a missing or unreadable configuration file means the
/// directory declares no remappings.
pub trait ConfigLoader: Send + Sync {
    /// Entries of `<dir>/remappings.txt`, in file order
    fn line_remappings(&self, dir: &Path) -> Vec<Remapping>;

    /// Entries of `profile.default.remappings` in `<dir>/foundry.toml`, in
    /// array order
    fn toml_remappings(&self, dir: &Path) -> Vec<Remapping>;

    /// All remappings declared in `dir`, in priority order: `remappings.txt`
    /// entries first, then `foundry.toml` entries. Not deduplicated.
    fn remappings(&self, dir: &Path) -> Arc<[Remapping]> {
        let mut merged = self.line_remappings(dir);
        merged.extend(self.toml_remappings(dir));
        merged.into()
    }

    /// Forget anything memoized for `dir`
    fn invalidate(&self, _dir: &Path) {}

    /// Forget everything memoized
    fn clear(&self) {}
}

impl<T: ConfigLoader + ?Sized> ConfigLoader for Arc<T> {
    fn line_remappings(&self, dir: &Path) -> Vec<Remapping> {
        (**self).line_remappings(dir)
    }

    fn toml_remappings(&self, dir: &Path) -> Vec<Remapping> {
        (**self).toml_remappings(dir)
    }

    fn remappings(&self, dir: &Path) -> Arc<[Remapping]> {
        (**self).remappings(dir)
    }

    fn invalidate(&self, dir: &Path) {
        (**self).invalidate(dir)
    }

    fn clear(&self) {
        (**self).clear()
    }
}

/// [`ConfigLoader`] reading configuration files through a [`FileSystem`]
#[derive(Clone)]
pub struct FsConfigLoader {
    fs: Arc<dyn FileSystem>,
}

impl Default for FsConfigLoader {
    fn default() -> Self {
        Self::new(Arc::new(OsFileSystem))
    }
}

impl FsConfigLoader {
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }

    /// The file system this loader reads from
    pub fn file_system(&self) -> &Arc<dyn FileSystem> {
        &self.fs
    }
}

impl ConfigLoader for FsConfigLoader {
    fn line_remappings(&self, dir: &Path) -> Vec<Remapping> {
        match RemappingsFile::load(self.fs.as_ref(), dir) {
            Ok(file) => file.into_remappings(),
            Err(e) => {
                tracing::debug!(
                    "Ignoring {} in {}: {}",
                    remappings_txt::REMAPPINGS_FILE,
                    dir.display(),
                    e
                );
                Vec::new()
            }
        }
    }

    fn toml_remappings(&self, dir: &Path) -> Vec<Remapping> {
        match FoundryConfig::load(self.fs.as_ref(), dir) {
            Ok(config) => config.remappings,
            Err(e) => {
                tracing::debug!(
                    "Ignoring {} in {}: {}",
                    foundry::FOUNDRY_CONFIG_FILE,
                    dir.display(),
                    e
                );
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::MemoryFileSystem;

    fn loader(fs: MemoryFileSystem) -> FsConfigLoader {
        FsConfigLoader::new(Arc::new(fs))
    }

    #[test]
    fn test_merge_order_txt_before_toml() {
        let fs = MemoryFileSystem::new()
            .with_file("/proj/remappings.txt", "a/=lib/a-txt/\nb/=lib/b/\n")
            .with_file(
                "/proj/foundry.toml",
                "[profile.default]\nremappings = [\"a/=lib/a-toml/\", \"c/=lib/c/\"]\n",
            );

        let merged = loader(fs).remappings(Path::new("/proj"));
        assert_eq!(
            merged.as_ref(),
            &[
                Remapping::new("a/", "lib/a-txt/"),
                Remapping::new("b/", "lib/b/"),
                Remapping::new("a/", "lib/a-toml/"),
                Remapping::new("c/", "lib/c/"),
            ]
        );
    }

    #[test]
    fn test_missing_files_yield_nothing() {
        let loader = loader(MemoryFileSystem::new());
        assert!(loader.line_remappings(Path::new("/proj")).is_empty());
        assert!(loader.toml_remappings(Path::new("/proj")).is_empty());
        assert!(loader.remappings(Path::new("/proj")).is_empty());
    }

    #[test]
    fn test_invalid_toml_is_not_fatal() {
        let fs = MemoryFileSystem::new()
            .with_file("/proj/remappings.txt", "forge-std/=lib/forge-std/src/")
            .with_file("/proj/foundry.toml", "[profile.default\nremappings = [");

        let merged = loader(fs).remappings(Path::new("/proj"));
        assert_eq!(
            merged.as_ref(),
            &[Remapping::new("forge-std/", "lib/forge-std/src/")]
        );
    }

    #[test]
    fn test_directories_are_independent() {
        let fs = MemoryFileSystem::new()
            .with_file("/proj/remappings.txt", "x/=outer/")
            .with_file("/proj/sub/remappings.txt", "x/=inner/");
        let loader = loader(fs);

        assert_eq!(
            loader.remappings(Path::new("/proj/sub")).as_ref(),
            &[Remapping::new("x/", "inner/")]
        );
        assert_eq!(
            loader.remappings(Path::new("/proj")).as_ref(),
            &[Remapping::new("x/", "outer/")]
        );
    }
}
