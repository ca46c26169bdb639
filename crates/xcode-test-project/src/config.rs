//! Where the fixture comes from and how scratch directories are named.
//!
//! The defaults point at the fixture bundled with this crate, and
//! [`crate::XcodeTestProject::new`] always uses them. Two environment
//! variables are read by [`FixtureConfig::from_env`]; they only take effect
//! when that config is passed to [`crate::XcodeTestProject::from_config`]:
//!
//! - `XCODE_TEST_PROJECT_FIXTURES` - alternative fixture source directory
//! - `XCODE_TEST_PROJECT_TEMP_PREFIX` - prefix for generated temp directories
//!
//! # Example
//!
//! ```no_run
//! use xcode_test_project::config::FixtureConfig;
//! use xcode_test_project::XcodeTestProject;
//!
//! let config = FixtureConfig::from_env();
//! let project = XcodeTestProject::from_config(&config).unwrap();
//! println!("Working dir: {}", project.project_dir().display());
//! ```

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Environment variable overriding the fixture source directory.
pub const FIXTURE_SOURCE_ENV: &str = "XCODE_TEST_PROJECT_FIXTURES";

/// Environment variable overriding the temp directory prefix.
pub const TEMP_PREFIX_ENV: &str = "XCODE_TEST_PROJECT_TEMP_PREFIX";

/// Prefix used for temp directories created by [`crate::XcodeTestProject::new`].
pub const DEFAULT_TEMP_PREFIX: &str = "ProjectGeneratorRuleProject";

/// Returns the fixture directory bundled with this crate.
pub fn bundled_fixture_source() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("resources")
        .join("xcodeProject")
}

/// Provisioner configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FixtureConfig {
    /// Directory whose top-level entries are copied on setup.
    pub fixture_source: PathBuf,

    /// Prefix for generated temp directories.
    pub temp_prefix: String,
}

impl Default for FixtureConfig {
    fn default() -> Self {
        Self {
            fixture_source: bundled_fixture_source(),
            temp_prefix: DEFAULT_TEMP_PREFIX.to_string(),
        }
    }
}

impl FixtureConfig {
    /// Defaults, overridden by the environment variables this module documents.
    ///
    /// Empty values are ignored.
    pub fn from_env() -> Self {
        Self::from_vars(
            std::env::var_os(FIXTURE_SOURCE_ENV),
            std::env::var_os(TEMP_PREFIX_ENV),
        )
    }

    fn from_vars(source: Option<OsString>, prefix: Option<OsString>) -> Self {
        let mut config = Self::default();
        if let Some(source) = source.filter(|s| !s.is_empty()) {
            config.fixture_source = PathBuf::from(source);
        }
        if let Some(prefix) = prefix.filter(|p| !p.is_empty()) {
            config.temp_prefix = prefix.to_string_lossy().into_owned();
        }
        config
    }

    /// Load config from a JSON file. Missing fields take their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }
}
