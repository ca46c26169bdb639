//! Shared helpers for xcode-test-project integration tests.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use tracing_subscriber::EnvFilter;

/// Installs a test-writer subscriber so teardown errors show up in test output.
///
/// Safe to call from every test; only the first call installs anything.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_test_writer()
        .try_init();
}

/// A path under the system temp dir that does not exist yet.
pub fn unique_missing_dir() -> PathBuf {
    let name = format!(
        "xcode_test_{}",
        &uuid::Uuid::new_v4().to_string().replace('-', "")[..8]
    );
    std::env::temp_dir().join(name)
}

/// Names of the top-level entries of `dir`, sorted.
pub fn top_level_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

/// Asserts that every file below `expected` exists below `actual` with the
/// same bytes.
pub fn assert_tree_copied(expected: &Path, actual: &Path) {
    for entry in std::fs::read_dir(expected).unwrap() {
        let entry = entry.unwrap();
        let from = entry.path();
        let to = actual.join(entry.file_name());
        if from.is_dir() {
            assert!(to.is_dir(), "missing directory {}", to.display());
            assert_tree_copied(&from, &to);
        } else {
            let want = std::fs::read(&from).unwrap();
            let got = std::fs::read(&to)
                .unwrap_or_else(|e| panic!("missing file {}: {e}", to.display()));
            assert_eq!(want, got, "contents differ for {}", to.display());
        }
    }
}

/// Builds a small fixture source with one file and one nested directory.
pub fn small_fixture(root: &Path) -> PathBuf {
    let source = root.join("fixture");
    std::fs::create_dir_all(source.join("App.xcodeproj")).unwrap();
    std::fs::write(source.join("App.xcodeproj/project.pbxproj"), "// !$*UTF8*$!").unwrap();
    std::fs::write(source.join("README"), "fixture").unwrap();
    source
}

/// Builds a fixture source holding one small file per name.
pub fn flat_fixture(root: &Path, names: &[&str]) -> PathBuf {
    let source = root.join("flat_fixture");
    std::fs::create_dir_all(&source).unwrap();
    for name in names {
        std::fs::write(source.join(name), *name).unwrap();
    }
    source
}
