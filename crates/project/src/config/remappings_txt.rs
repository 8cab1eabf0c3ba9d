//! `remappings.txt` parser
//!
//! One `prefix=target` entry per line. Blank lines and `#` comments are
//! ignored; malformed lines are skipped.

use crate::ProjectResult;
use crate::fs::FileSystem;
use crate::remapping::Remapping;
use std::path::Path;

/// File name looked up in each directory
pub const REMAPPINGS_FILE: &str = "remappings.txt";

/// Parsed contents of a `remappings.txt` file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemappingsFile {
    remappings: Vec<Remapping>,
    skipped: usize,
}

impl RemappingsFile {
    /// Load `<dir>/remappings.txt`. A missing file is an empty result.
    pub fn load(fs: &dyn FileSystem, dir: &Path) -> ProjectResult<Self> {
        let path = dir.join(REMAPPINGS_FILE);
        if !fs.is_file(&path) {
            return Ok(Self::default());
        }

        let content = fs.read_to_string(&path)?;
        let file = Self::parse(&content);
        if file.skipped > 0 {
            tracing::debug!(
                "Skipped {} malformed line(s) in {}",
                file.skipped,
                path.display()
            );
        }
        Ok(file)
    }

    /// Parse file contents. Lines may end in `\n`, `\r\n` or `\r`.
    pub fn parse(content: &str) -> Self {
        let mut file = Self::default();

        for line in content.split(['\r', '\n']) {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            match Remapping::parse(line) {
                Some(remapping) => file.remappings.push(remapping),
                None => {
                    tracing::debug!("Invalid remapping format: {}", line);
                    file.skipped += 1;
                }
            }
        }

        file
    }

    /// Remappings in file order
    pub fn remappings(&self) -> &[Remapping] {
        &self.remappings
    }

    pub fn into_remappings(self) -> Vec<Remapping> {
        self.remappings
    }

    /// Number of non-blank, non-comment lines that did not parse
    pub fn skipped(&self) -> usize {
        self.skipped
    }
}
