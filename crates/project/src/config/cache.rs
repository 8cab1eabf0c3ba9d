//! Per-directory memoization of merged remappings
//!
//! The Foundry strategy asks for the remappings of every ancestor directory
//! it visits, for every import. Wrapping a loader in [`CachedConfigLoader`]
//! parses each directory's configuration once until it is invalidated.

use crate::config::ConfigLoader;
use crate::remapping::Remapping;
use dashmap::DashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Cache hit/miss counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
}

/// [`ConfigLoader`] decorator that memoizes [`ConfigLoader::remappings`]
pub struct CachedConfigLoader<L> {
    inner: L,
    cache: DashMap<PathBuf, Arc<[Remapping]>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl<L: ConfigLoader> CachedConfigLoader<L> {
    pub fn new(inner: L) -> Self {
        Self {
            inner,
            cache: DashMap::new(),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    pub fn inner(&self) -> &L {
        &self.inner
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: self.cache.len(),
        }
    }
}

impl<L: ConfigLoader> ConfigLoader for CachedConfigLoader<L> {
    fn line_remappings(&self, dir: &Path) -> Vec<Remapping> {
        self.inner.line_remappings(dir)
    }

    fn toml_remappings(&self, dir: &Path) -> Vec<Remapping> {
        self.inner.toml_remappings(dir)
    }

    fn remappings(&self, dir: &Path) -> Arc<[Remapping]> {
        if let Some(entry) = self.cache.get(dir) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return Arc::clone(entry.value());
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        let merged = self.inner.remappings(dir);
        self.cache.insert(dir.to_path_buf(), Arc::clone(&merged));
        merged
    }

    fn invalidate(&self, dir: &Path) {
        if self.cache.remove(dir).is_some() {
            tracing::trace!("Invalidated cached remappings for {}", dir.display());
        }
    }

    fn clear(&self) {
        self.cache.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Loader that counts how often each directory is read
    #[derive(Default)]
    struct CountingLoader {
        reads: Mutex<Vec<PathBuf>>,
        target: Mutex<String>,
    }

    impl ConfigLoader for CountingLoader {
        fn line_remappings(&self, dir: &Path) -> Vec<Remapping> {
            self.reads.lock().unwrap().push(dir.to_path_buf());
            vec![Remapping::new("x/", self.target.lock().unwrap().clone())]
        }

        fn toml_remappings(&self, _dir: &Path) -> Vec<Remapping> {
            Vec::new()
        }
    }

    #[test]
    fn test_second_lookup_is_served_from_cache() {
        let cached = CachedConfigLoader::new(CountingLoader::default());

        let first = cached.remappings(Path::new("/proj"));
        let second = cached.remappings(Path::new("/proj"));

        assert_eq!(first, second);
        assert_eq!(cached.inner().reads.lock().unwrap().len(), 1);
        assert_eq!(
            cached.stats(),
            CacheStats {
                hits: 1,
                misses: 1,
                entries: 1
            }
        );
    }

    #[test]
    fn test_invalidate_rereads_directory() {
        let cached = CachedConfigLoader::new(CountingLoader::default());
        *cached.inner().target.lock().unwrap() = "old/".to_string();
        assert_eq!(cached.remappings(Path::new("/proj"))[0].target, "old/");

        *cached.inner().target.lock().unwrap() = "new/".to_string();
        assert_eq!(cached.remappings(Path::new("/proj"))[0].target, "old/");

        cached.invalidate(Path::new("/proj"));
        assert_eq!(cached.remappings(Path::new("/proj"))[0].target, "new/");
    }

    #[test]
    fn test_clear() {
        let cached = CachedConfigLoader::new(CountingLoader::default());
        cached.remappings(Path::new("/a"));
        cached.remappings(Path::new("/b"));
        assert_eq!(cached.stats().entries, 2);

        cached.clear();
        assert_eq!(cached.stats().entries, 0);
    }
}
