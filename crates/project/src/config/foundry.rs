//! Foundry configuration parser
//!
//! Reads the `remappings` array of the default profile in `foundry.toml`.
//! Every other key of the file is ignored.

use crate::fs::FileSystem;
use crate::remapping::Remapping;
use crate::{ProjectError, ProjectResult};
use serde::Deserialize;
use std::path::Path;

/// File name looked up in each directory
pub const FOUNDRY_CONFIG_FILE: &str = "foundry.toml";

/// The parts of `foundry.toml` that affect import resolution
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FoundryConfig {
    /// `profile.default.remappings`, in array order
    pub remappings: Vec<Remapping>,
}

/// Raw TOML structure for foundry.toml
#[derive(Debug, Deserialize)]
struct FoundryToml {
    profile: Option<ProfileSection>,
}

#[derive(Debug, Deserialize)]
struct ProfileSection {
    default: Option<ProfileConfig>,
}

#[derive(Debug, Deserialize)]
struct ProfileConfig {
    // Kept as raw values so a stray non-string element does not reject the
    // whole array.
    remappings: Option<Vec<toml::Value>>,
}

impl FoundryConfig {
    /// Load `<dir>/foundry.toml`. A missing file is an empty configuration;
    /// unreadable or invalid files are errors.
    pub fn load(fs: &dyn FileSystem, dir: &Path) -> ProjectResult<Self> {
        let config_path = dir.join(FOUNDRY_CONFIG_FILE);
        if !fs.is_file(&config_path) {
            return Ok(Self::default());
        }

        let content = fs.read_to_string(&config_path)?;
        let config = Self::parse(&content).map_err(|e| {
            ProjectError::ConfigParse(format!(
                "Failed to parse {}: {}",
                config_path.display(),
                e
            ))
        })?;

        tracing::trace!(
            "Loaded {} remapping(s) from {}",
            config.remappings.len(),
            config_path.display()
        );
        Ok(config)
    }

    /// Parse `foundry.toml` contents
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        let raw: FoundryToml = toml::from_str(content)?;

        let entries = raw
            .profile
            .and_then(|profile| profile.default)
            .and_then(|default| default.remappings)
            .unwrap_or_default();

        Ok(Self {
            remappings: parse_remappings(&entries),
        })
    }
}

/// Turn `"prefix=target"` strings into remappings, dropping anything else.
/// An empty target is allowed here, unlike in `remappings.txt`.
fn parse_remappings(entries: &[toml::Value]) -> Vec<Remapping> {
    entries
        .iter()
        .filter_map(toml::Value::as_str)
        .filter_map(|entry| {
            let entry = entry.trim_matches('"');
            let remapping = Remapping::parse_config_entry(entry);
            if remapping.is_none() {
                tracing::debug!("Invalid remapping format: {}", entry);
            }
            remapping
        })
        .collect()
}
