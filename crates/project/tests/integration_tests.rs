//! Integration tests for remapping discovery in realistic project layouts

use project::{CachedConfigLoader, ConfigLoader, FsConfigLoader, Remapping};
use std::path::Path;
use tempfile::TempDir;

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, content).unwrap();
}

/// A Foundry monorepo: the root declares shared remappings, one package
/// declares its own in foundry.toml only
fn create_monorepo() -> TempDir {
    let temp = TempDir::new().unwrap();
    let root = temp.path();

    write(
        root,
        "remappings.txt",
        "# shared\nforge-std/=lib/forge-std/src/\n\n@openzeppelin/=lib/openzeppelin-contracts/\n",
    );
    write(
        root,
        "foundry.toml",
        r#"
[profile.default]
src = "src"
out = "out"
libs = ["lib"]
remappings = ["solmate/=lib/solmate/src/"]

[profile.default.fuzz]
runs = 256
"#,
    );
    write(
        root,
        "packages/vault/foundry.toml",
        r#"
[profile.default]
remappings = [
    "@openzeppelin/=../../lib/openzeppelin-contracts/",
    "not a remapping",
]
"#,
    );

    temp
}

#[test]
fn test_root_remappings_in_priority_order() {
    let temp = create_monorepo();
    let loader = FsConfigLoader::default();

    let remappings = loader.remappings(temp.path());
    assert_eq!(
        remappings.as_ref(),
        &[
            Remapping::new("forge-std/", "lib/forge-std/src/"),
            Remapping::new("@openzeppelin/", "lib/openzeppelin-contracts/"),
            Remapping::new("solmate/", "lib/solmate/src/"),
        ]
    );
}

#[test]
fn test_package_remappings_do_not_inherit_from_root() {
    let temp = create_monorepo();
    let loader = FsConfigLoader::default();

    let package = temp.path().join("packages/vault");
    assert!(loader.line_remappings(&package).is_empty());
    assert_eq!(
        loader.toml_remappings(&package),
        vec![Remapping::new("@openzeppelin/", "../../lib/openzeppelin-contracts/")]
    );

    // Directories with no configuration at all
    assert!(loader.remappings(&temp.path().join("packages")).is_empty());
}

#[test]
fn test_cached_loader_matches_uncached() {
    let temp = create_monorepo();
    let uncached = FsConfigLoader::default();
    let cached = CachedConfigLoader::new(FsConfigLoader::default());

    for dir in [temp.path().to_path_buf(), temp.path().join("packages/vault")] {
        assert_eq!(cached.remappings(&dir), uncached.remappings(&dir));
        assert_eq!(cached.remappings(&dir), uncached.remappings(&dir));
    }

    let stats = cached.stats();
    assert_eq!(stats.misses, 2);
    assert_eq!(stats.hits, 2);
    assert_eq!(stats.entries, 2);
}
