//! The fixture provisioner.
//!
//! An [`XcodeTestProject`] owns a working directory. [`before`](XcodeTestProject::before)
//! copies every top-level entry of the fixture source into it and remembers
//! what it copied; [`after`](XcodeTestProject::after) deletes those entries
//! again. Teardown is best-effort: failures are logged, never returned, so a
//! cleanup problem cannot turn a passing test into a failing one.
//!
//! Prefer the scoped forms, which guarantee teardown on every exit path:
//!
//! - [`XcodeTestProject::run`] wraps a closure
//! - [`XcodeTestProject::setup`] returns a guard that tears down on drop

use std::ops::Deref;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use tracing::{debug, error, info};

use crate::config::{bundled_fixture_source, FixtureConfig};
use crate::error::{FixtureError, Result};
use crate::files;

/// Base name shared by the fixture's project, workspace and scheme.
pub const PROJECT_NAME: &str = "xcodebuildPluginTest";

/// A fixture Xcode project provisioned into a working directory.
#[derive(Debug)]
pub struct XcodeTestProject {
    project_dir: PathBuf,
    fixture_source: PathBuf,
    file_list: Vec<PathBuf>,
    /// Set when the working directory was generated; removed on drop.
    _owned_temp: Option<TempDir>,
}

impl XcodeTestProject {
    /// Creates a provisioner backed by a fresh temp directory.
    ///
    /// # Errors
    ///
    /// - [`FixtureError::Io`] if the temp directory cannot be created
    pub fn new() -> Result<Self> {
        Self::from_config(&FixtureConfig::default())
    }

    /// Creates a provisioner that copies into `project_dir`.
    ///
    /// The directory is used as-is and need not exist yet. It is never
    /// removed by the provisioner.
    pub fn with_project_dir(project_dir: impl Into<PathBuf>) -> Self {
        Self {
            project_dir: project_dir.into(),
            fixture_source: bundled_fixture_source(),
            file_list: Vec::new(),
            _owned_temp: None,
        }
    }

    /// Creates a provisioner backed by a fresh temp directory named with the
    /// config's prefix, copying from the config's fixture source.
    pub fn from_config(config: &FixtureConfig) -> Result<Self> {
        let temp = tempfile::Builder::new()
            .prefix(&config.temp_prefix)
            .tempdir()?;
        debug!(dir = %temp.path().display(), "created working directory");
        Ok(Self {
            project_dir: temp.path().to_path_buf(),
            fixture_source: config.fixture_source.clone(),
            file_list: Vec::new(),
            _owned_temp: Some(temp),
        })
    }

    /// Replaces the directory the fixture is copied from.
    pub fn with_fixture_source(mut self, fixture_source: impl Into<PathBuf>) -> Self {
        self.fixture_source = fixture_source.into();
        self
    }

    /// The working directory.
    pub fn project_dir(&self) -> &Path {
        &self.project_dir
    }

    /// Path of the `.xcodeproj` bundle inside the working directory.
    ///
    /// Pure path construction; the bundle only exists after setup.
    pub fn xcode_project(&self) -> PathBuf {
        self.project_dir.join(format!("{PROJECT_NAME}.xcodeproj"))
    }

    /// Path of the `.xcworkspace` bundle inside the working directory.
    pub fn xcode_workspace(&self) -> PathBuf {
        self.project_dir.join(format!("{PROJECT_NAME}.xcworkspace"))
    }

    /// The shared scheme defined by the fixture.
    pub fn scheme_name(&self) -> &'static str {
        PROJECT_NAME
    }

    /// Paths copied by the last setup that teardown has not removed yet.
    pub fn tracked_files(&self) -> &[PathBuf] {
        &self.file_list
    }

    /// The directory whose entries are copied on setup.
    pub fn fixture_source(&self) -> &Path {
        &self.fixture_source
    }

    /// Points the provisioner at a different working directory.
    ///
    /// When both the current and the new directory exist, everything in the
    /// current one is copied into the new one first. Otherwise only the
    /// reference changes. Tracked files are left alone, so call this before
    /// [`before`](Self::before).
    ///
    /// # Errors
    ///
    /// - [`FixtureError::Copy`] if the contents cannot be copied; the working
    ///   directory is unchanged in that case
    pub fn set_project_dir(&mut self, project_dir: impl Into<PathBuf>) -> Result<()> {
        let project_dir = project_dir.into();
        if self.project_dir.is_dir()
            && project_dir.is_dir()
            && !same_dir(&self.project_dir, &project_dir)
        {
            debug!(
                from = %self.project_dir.display(),
                to = %project_dir.display(),
                "copying working directory contents"
            );
            files::copy_dir_contents(&self.project_dir, &project_dir)?;
        }
        self.project_dir = project_dir;
        Ok(())
    }

    /// Copies the fixture into the working directory.
    ///
    /// Entries copied before a failure stay tracked so that
    /// [`after`](Self::after) still removes them.
    ///
    /// # Errors
    ///
    /// - [`FixtureError::MissingSource`] if the fixture source is not a directory
    /// - [`FixtureError::Io`] if the fixture source cannot be listed
    /// - [`FixtureError::Copy`] if an entry cannot be copied
    pub fn before(&mut self) -> Result<()> {
        if !self.fixture_source.is_dir() {
            return Err(FixtureError::MissingSource(self.fixture_source.clone()));
        }

        for entry in std::fs::read_dir(&self.fixture_source)? {
            let entry = entry?;
            let copied = files::copy_to_directory(&entry.path(), &self.project_dir)?;
            self.file_list.push(copied);
        }

        info!(
            dir = %self.project_dir.display(),
            entries = self.file_list.len(),
            "provisioned fixture project"
        );
        Ok(())
    }

    /// Removes every tracked path and clears the list.
    ///
    /// Never fails: a path that cannot be removed is logged at `error` level
    /// through `tracing` and skipped. The crate installs no subscriber, so
    /// install one (for example `tracing_subscriber::fmt().with_test_writer()`)
    /// to see those failures in test output.
    pub fn after(&mut self) {
        let count = self.file_list.len();
        let mut failed = 0;
        for path in self.file_list.drain(..) {
            if let Err(e) = files::force_delete(&path) {
                failed += 1;
                error!(path = %path.display(), error = %e, "fixture cleanup failed");
            }
        }
        info!(
            dir = %self.project_dir.display(),
            removed = count - failed,
            failed,
            "cleaned up fixture project"
        );
    }

    /// Runs `body` between setup and teardown.
    ///
    /// Teardown runs whether `body` returns or panics, and also after a
    /// failed setup (removing whatever was copied). `body` only runs when
    /// setup succeeded.
    pub fn run<T>(&mut self, body: impl FnOnce(&XcodeTestProject) -> T) -> Result<T> {
        let guard = Teardown(self);
        guard.0.before()?;
        Ok(body(&*guard.0))
    }

    /// Runs setup and returns a guard that tears down when dropped.
    ///
    /// If setup fails, partially copied entries are removed before the
    /// error is returned.
    pub fn setup(self) -> Result<ProvisionedProject> {
        let mut provisioned = ProvisionedProject { project: self };
        provisioned.project.before()?;
        Ok(provisioned)
    }
}

/// A provisioned project; runs [`XcodeTestProject::after`] on drop.
#[derive(Debug)]
pub struct ProvisionedProject {
    project: XcodeTestProject,
}

impl Deref for ProvisionedProject {
    type Target = XcodeTestProject;

    fn deref(&self) -> &Self::Target {
        &self.project
    }
}

impl Drop for ProvisionedProject {
    fn drop(&mut self) {
        self.project.after();
    }
}

struct Teardown<'a>(&'a mut XcodeTestProject);

impl Drop for Teardown<'_> {
    fn drop(&mut self) {
        self.0.after();
    }
}

fn same_dir(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
