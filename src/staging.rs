//! # Staging Area
//!
//! Each invocation presents the tool with a private directory under the
//! output root, holding hard links to exactly the selected inputs. Several
//! workers may share one output root; the random directory name keeps their
//! file sets apart without locking.
//!
//! [`StagingArea`] is a guard: [`StagingArea::release`] removes the directory
//! and reports failures, and dropping an unreleased guard removes it
//! best-effort, so early returns and panics cannot leave it behind.

use crate::error::{Result, WorkerError};
use crate::models::InputArtifact;
use std::collections::HashMap;
use std::ffi::OsString;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use uuid::Uuid;

#[derive(Debug)]
pub struct StagingArea {
    path: PathBuf,
    released: bool,
}

impl StagingArea {
    /// Create `<root>/<random-hex>`. The root itself must already exist.
    pub fn acquire(root: &Path) -> Result<Self> {
        let path = root.join(Uuid::new_v4().simple().to_string());

        fs::create_dir(&path).map_err(|e| WorkerError::staging("create", &path, e))?;

        debug!(staging_dir = %path.display(), "Staging directory created");

        Ok(Self {
            path,
            released: false,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Hard-link every artifact into the staging directory under its base
    /// filename. Returns the link paths in input order.
    ///
    /// Two artifacts sharing a base filename fail the call when
    /// `detect_collisions` is set; otherwise the later artifact replaces the
    /// earlier link.
    pub fn populate(&self, artifacts: &[InputArtifact], detect_collisions: bool) -> Result<Vec<PathBuf>> {
        let mut seen: HashMap<OsString, &Path> = HashMap::with_capacity(artifacts.len());
        let mut links = Vec::with_capacity(artifacts.len());

        for artifact in artifacts {
            let name = artifact.base_name().ok_or_else(|| {
                WorkerError::staging("link", &artifact.path, "input path has no file name")
            })?;
            let link = self.path.join(name);

            if let Some(previous) = seen.insert(name.to_os_string(), &artifact.path) {
                if previous == artifact.path {
                    debug!(source = %artifact.path.display(), "Input listed twice, already staged");
                    continue;
                }

                if detect_collisions {
                    return Err(WorkerError::staging(
                        "link",
                        &link,
                        format!(
                            "'{}' and '{}' share the same file name",
                            previous.display(),
                            artifact.path.display()
                        ),
                    ));
                }

                warn!(
                    link = %link.display(),
                    replaced = %previous.display(),
                    source = %artifact.path.display(),
                    "Input file name collision, replacing earlier link"
                );
                fs::remove_file(&link).map_err(|e| WorkerError::staging("unlink", &link, e))?;
                links.retain(|existing| existing != &link);
            }

            fs::hard_link(&artifact.path, &link).map_err(|e| WorkerError::staging("link", &link, e))?;
            links.push(link);
        }

        debug!(
            staging_dir = %self.path.display(),
            link_count = links.len(),
            "Staging directory populated"
        );

        Ok(links)
    }

    /// Remove the staging directory and everything in it
    pub fn release(mut self) -> Result<()> {
        self.released = true;
        release_path(&self.path)
    }
}

impl Drop for StagingArea {
    fn drop(&mut self) {
        if !self.released {
            if let Err(e) = release_path(&self.path) {
                warn!(
                    staging_dir = %self.path.display(),
                    error = %e,
                    "Failed to remove staging directory on drop"
                );
            }
        }
    }
}

/// Recursively remove a staging directory; already-absent is success
pub fn release_path(path: &Path) -> Result<()> {
    match fs::remove_dir_all(path) {
        Ok(()) => {
            debug!(staging_dir = %path.display(), "Staging directory removed");
            Ok(())
        }
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(WorkerError::staging("remove", path, e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::os::unix::fs::MetadataExt;
    use tempfile::TempDir;

    fn write_input(dir: &Path, name: &str, body: &str) -> InputArtifact {
        let path = dir.join(name);
        fs::write(&path, body).unwrap();
        InputArtifact::new(path)
    }

    #[test]
    fn test_acquire_creates_unique_directories() {
        let root = TempDir::new().unwrap();
        let first = StagingArea::acquire(root.path()).unwrap();
        let second = StagingArea::acquire(root.path()).unwrap();

        assert!(first.path().is_dir());
        assert!(second.path().is_dir());
        assert_ne!(first.path(), second.path());
        assert_eq!(first.path().parent(), Some(root.path()));
    }

    #[test]
    fn test_acquire_fails_for_missing_root() {
        let root = TempDir::new().unwrap();
        let err = StagingArea::acquire(&root.path().join("missing")).unwrap_err();
        assert_eq!(err.error_code(), "STAGING_FAILURE");
    }

    #[test]
    fn test_populate_links_share_inode() {
        let root = TempDir::new().unwrap();
        let inputs = TempDir::new_in(root.path()).unwrap();
        let artifacts = vec![
            write_input(inputs.path(), "Security.evtx", "security"),
            write_input(inputs.path(), "System.evtx", "system"),
            write_input(inputs.path(), "Application.evtx", "application"),
        ];

        let staging = StagingArea::acquire(root.path()).unwrap();
        let links = staging.populate(&artifacts, true).unwrap();

        assert_eq!(links.len(), 3);
        assert_eq!(fs::read_dir(staging.path()).unwrap().count(), 3);
        for (artifact, link) in artifacts.iter().zip(&links) {
            let source = fs::metadata(&artifact.path).unwrap();
            let linked = fs::metadata(link).unwrap();
            assert_eq!(source.ino(), linked.ino());
            assert_eq!(source.dev(), linked.dev());
        }
    }

    #[test]
    fn test_populate_rejects_name_collision() {
        let root = TempDir::new().unwrap();
        let a = TempDir::new_in(root.path()).unwrap();
        let b = TempDir::new_in(root.path()).unwrap();
        let artifacts = vec![
            write_input(a.path(), "Security.evtx", "host-a"),
            write_input(b.path(), "Security.evtx", "host-b"),
        ];

        let staging = StagingArea::acquire(root.path()).unwrap();
        let err = staging.populate(&artifacts, true).unwrap_err();

        assert!(err.to_string().contains("share the same file name"));
    }

    #[test]
    fn test_populate_links_repeated_input_once() {
        let root = TempDir::new().unwrap();
        let inputs = TempDir::new_in(root.path()).unwrap();
        let artifact = write_input(inputs.path(), "Security.evtx", "security");

        let staging = StagingArea::acquire(root.path()).unwrap();
        let links = staging.populate(&[artifact.clone(), artifact], true).unwrap();

        assert_eq!(links.len(), 1);
        assert_eq!(fs::read_dir(staging.path()).unwrap().count(), 1);
        assert_eq!(fs::read_to_string(&links[0]).unwrap(), "security");
    }

    #[test]
    fn test_populate_last_wins_without_detection() {
        let root = TempDir::new().unwrap();
        let a = TempDir::new_in(root.path()).unwrap();
        let b = TempDir::new_in(root.path()).unwrap();
        let artifacts = vec![
            write_input(a.path(), "Security.evtx", "host-a"),
            write_input(b.path(), "Security.evtx", "host-b"),
        ];

        let staging = StagingArea::acquire(root.path()).unwrap();
        let links = staging.populate(&artifacts, false).unwrap();

        assert_eq!(links.len(), 1);
        assert_eq!(fs::read_to_string(&links[0]).unwrap(), "host-b");
    }

    #[test]
    fn test_release_removes_links_but_not_sources() {
        let root = TempDir::new().unwrap();
        let inputs = TempDir::new_in(root.path()).unwrap();
        let artifact = write_input(inputs.path(), "Security.evtx", "security");

        let staging = StagingArea::acquire(root.path()).unwrap();
        staging.populate(std::slice::from_ref(&artifact), true).unwrap();
        let path = staging.path().to_path_buf();

        staging.release().unwrap();

        assert!(!path.exists());
        assert_eq!(fs::read_to_string(&artifact.path).unwrap(), "security");
    }

    #[test]
    fn test_drop_removes_directory() {
        let root = TempDir::new().unwrap();
        let path = {
            let staging = StagingArea::acquire(root.path()).unwrap();
            staging.path().to_path_buf()
        };
        assert!(!path.exists());
    }

    #[test]
    fn test_release_path_is_idempotent() {
        let root = TempDir::new().unwrap();
        let staging = StagingArea::acquire(root.path()).unwrap();
        let path = staging.path().to_path_buf();

        staging.release().unwrap();
        release_path(&path).unwrap();
        release_path(&path).unwrap();
    }
}
