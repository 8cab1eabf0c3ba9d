//! Import remapping for Solidity projects
//!
//! Remappings are tried in declaration order and the first one whose prefix
//! occurs anywhere in the import path wins. Every occurrence of that prefix
//! is then replaced by its target. Matching is deliberately not anchored to
//! the start of the path and no longest-match ordering is applied.

use project::Remapping;

/// Apply the first matching remapping to `import_path`.
///
/// Returns the path unchanged when no prefix occurs in it. Entries with an
/// empty prefix are skipped.
pub fn apply_remappings(remappings: &[Remapping], import_path: &str) -> String {
    match find_match(remappings, import_path) {
        Some(remapping) => import_path.replace(remapping.prefix.as_str(), &remapping.target),
        None => import_path.to_string(),
    }
}

fn find_match<'a>(remappings: &'a [Remapping], import_path: &str) -> Option<&'a Remapping> {
    remappings
        .iter()
        .filter(|remapping| remapping.is_active())
        .find(|remapping| import_path.contains(remapping.prefix.as_str()))
}

/// Ordered remapping list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportRemapper {
    /// Remappings in priority order (first declared first)
    remappings: Vec<Remapping>,
}

impl ImportRemapper {
    /// Create a new import remapper with the given remappings
    pub fn new(remappings: impl IntoIterator<Item = Remapping>) -> Self {
        Self {
            remappings: remappings.into_iter().collect(),
        }
    }

    /// Apply remappings to an import path
    ///
    /// Returns the remapped path, or the original path if no remapping matches.
    pub fn remap(&self, import_path: &str) -> String {
        apply_remappings(&self.remappings, import_path)
    }

    /// The remapping [`remap`](Self::remap) would apply, if any
    pub fn matching(&self, import_path: &str) -> Option<&Remapping> {
        find_match(&self.remappings, import_path)
    }

    /// Check if an import path matches any remapping
    pub fn has_remapping(&self, import_path: &str) -> bool {
        self.matching(import_path).is_some()
    }

    /// Get all remappings
    pub fn remappings(&self) -> &[Remapping] {
        &self.remappings
    }

    /// Add a remapping with the lowest priority
    pub fn add_remapping(&mut self, remapping: Remapping) {
        self.remappings.push(remapping);
    }
}
