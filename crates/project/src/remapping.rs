//! Import remapping entries
//!
//! A remapping is written `prefix=target`, both in `remappings.txt` lines and
//! in the `remappings` array of `foundry.toml`.

use crate::ProjectError;
use std::fmt;
use std::str::FromStr;

/// A single `(prefix, target)` rewrite rule.
///
/// Parsed entries always carry a non-empty prefix. Entries built by hand with
/// an empty prefix are kept but never match an import path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Remapping {
    /// Text searched for in the import path
    pub prefix: String,
    /// Replacement text
    pub target: String,
}

impl Remapping {
    pub fn new(prefix: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            target: target.into(),
        }
    }

    /// Parse a `prefix=target` entry, returning `None` for malformed input.
    ///
    /// The entry must contain exactly one `=`, and both sides must be
    /// non-empty once trimmed. This is the `remappings.txt` line rule.
    pub fn parse(entry: &str) -> Option<Self> {
        entry.parse().ok()
    }

    /// Parse an entry of the `foundry.toml` `remappings` array.
    ///
    /// Same split as [`parse`](Self::parse), but the target may be empty so
    /// `"src/="` strips the prefix from matching imports.
    pub fn parse_config_entry(entry: &str) -> Option<Self> {
        let (prefix, target) = split_entry(entry)?;
        if prefix.is_empty() {
            return None;
        }
        Some(Self::new(prefix, target))
    }

    /// Whether this entry can ever match an import path
    pub fn is_active(&self) -> bool {
        !self.prefix.is_empty()
    }
}

/// Split on `=` into exactly two trimmed parts
fn split_entry(entry: &str) -> Option<(&str, &str)> {
    let mut parts = entry.split('=');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(prefix), Some(target), None) => Some((prefix.trim(), target.trim())),
        _ => None,
    }
}

impl FromStr for Remapping {
    type Err = ProjectError;

    fn from_str(entry: &str) -> Result<Self, Self::Err> {
        match split_entry(entry) {
            Some((prefix, target)) if !prefix.is_empty() && !target.is_empty() => {
                Ok(Self::new(prefix, target))
            }
            _ => Err(ProjectError::InvalidRemapping(entry.to_string())),
        }
    }
}

impl fmt::Display for Remapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.prefix, self.target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_remapping() {
        let remapping = Remapping::parse("forge-std/=lib/forge-std/src/").unwrap();
        assert_eq!(remapping.prefix, "forge-std/");
        assert_eq!(remapping.target, "lib/forge-std/src/");
    }

    #[test]
    fn test_parse_trims_both_sides() {
        let remapping = Remapping::parse("  @oz/ =  lib/openzeppelin/ ").unwrap();
        assert_eq!(remapping, Remapping::new("@oz/", "lib/openzeppelin/"));
    }

    #[test]
    fn test_parse_rejects_malformed_entries() {
        assert!(Remapping::parse("invalid_no_equals").is_none());
        assert!(Remapping::parse("a=b=c").is_none());
        assert!(Remapping::parse("=lib/x/").is_none());
        assert!(Remapping::parse("x/=").is_none());
        assert!(Remapping::parse("   ").is_none());
    }

    #[test]
    fn test_config_entry_allows_empty_target() {
        assert_eq!(
            Remapping::parse_config_entry(" src/ = "),
            Some(Remapping::new("src/", ""))
        );
        assert_eq!(
            Remapping::parse_config_entry("ds-test/=lib/ds-test/src/"),
            Remapping::parse("ds-test/=lib/ds-test/src/")
        );
        assert!(Remapping::parse_config_entry("=lib/x/").is_none());
        assert!(Remapping::parse_config_entry("a=b=c").is_none());
        assert!(Remapping::parse_config_entry("no_equals").is_none());
    }

    #[test]
    fn test_hand_built_empty_prefix_is_inactive() {
        assert!(!Remapping::new("", "lib/").is_active());
        assert!(Remapping::new("x/", "").is_active());
    }

    #[test]
    fn test_from_str_error() {
        let err = "a=b=c".parse::<Remapping>().unwrap_err();
        assert!(matches!(err, ProjectError::InvalidRemapping(ref s) if s == "a=b=c"));
    }

    #[test]
    fn test_display() {
        let remapping = Remapping::new("ds-test/", "lib/ds-test/src/");
        assert_eq!(remapping.to_string(), "ds-test/=lib/ds-test/src/");
    }
}
