//! # xcode-test-project
//!
//! Test helper that provisions a fixture Xcode project into a scratch
//! directory before a test and removes it afterwards.
//!
//! The fixture bundled under `resources/xcodeProject` contains an app target,
//! its project bundle, a workspace and a shared scheme, all named
//! `xcodebuildPluginTest`.
//!
//! ## Modules
//!
//! - [`project`] - The provisioner and its scoped teardown guard
//! - [`config`] - Fixture source location and temp dir naming
//! - [`files`] - Recursive copy and forced delete
//! - [`error`] - Error type for setup and re-pointing
//!
//! ## Example
//!
//! ```no_run
//! use xcode_test_project::XcodeTestProject;
//!
//! let mut project = XcodeTestProject::new().unwrap();
//! project
//!     .run(|project| {
//!         assert!(project.xcode_project().exists());
//!         println!("scheme: {}", project.scheme_name());
//!     })
//!     .unwrap();
//! ```

pub mod config;
pub mod error;
pub mod files;
pub mod project;

pub use config::FixtureConfig;
pub use error::{FixtureError, Result};
pub use project::{ProvisionedProject, XcodeTestProject, PROJECT_NAME};
