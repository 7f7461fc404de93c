//! Syncing generated sources to the output directory.
//!
//! Every generated file is compared with what is already on disk. Files whose
//! contents already match are left untouched, so regeneration only rewrites
//! what changed and `validate` can name each stale or missing file.

use std::fmt;
use std::fs;
use std::io::ErrorKind;

use tracing::{debug, trace};

use crate::error::{CliResult, WriteError};
use crate::generator::GeneratedFile;

/// How the file on disk compares with freshly generated contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileStatus {
    /// On disk with identical contents.
    Current,
    /// On disk with different contents.
    Stale,
    /// Not on disk.
    Missing,
}

impl FileStatus {
    /// Compare a generated file with its counterpart on disk.
    pub fn of(file: &GeneratedFile) -> Result<Self, WriteError> {
        match fs::read(&file.path) {
            Ok(existing) if existing == file.contents.as_bytes() => Ok(Self::Current),
            Ok(_) => Ok(Self::Stale),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Self::Missing),
            Err(e) => Err(WriteError::ReadFile {
                path: file.path.clone(),
                source: e,
            }),
        }
    }

    pub fn is_current(&self) -> bool {
        matches!(self, Self::Current)
    }
}

impl fmt::Display for FileStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Current => "up-to-date",
            Self::Stale => "stale",
            Self::Missing => "missing",
        })
    }
}

/// What syncing one file did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// The file did not exist and was written.
    Created,
    /// The file existed with other contents and was rewritten.
    Updated,
    /// The file already matched and was not touched.
    Unchanged,
    /// Dry run: nothing was written; carries what a real run would find.
    Planned(FileStatus),
}

impl SyncOutcome {
    /// Check if the file was written to disk.
    pub fn wrote(&self) -> bool {
        matches!(self, Self::Created | Self::Updated)
    }
}

/// Writes generated files whose contents differ from the disk.
#[derive(Debug, Clone, Copy)]
pub struct OutputSync {
    dry_run: bool,
}

impl OutputSync {
    /// Create a syncer; a dry run only reports what would change.
    pub fn new(dry_run: bool) -> Self {
        Self { dry_run }
    }

    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Bring one file on disk in line with its generated contents.
    pub fn sync(&self, file: &GeneratedFile) -> CliResult<SyncOutcome> {
        let status = FileStatus::of(file)?;
        trace!(path = %file.path.display(), %status, "compared with disk");

        if self.dry_run {
            return Ok(SyncOutcome::Planned(status));
        }
        let outcome = match status {
            FileStatus::Current => return Ok(SyncOutcome::Unchanged),
            FileStatus::Stale => SyncOutcome::Updated,
            FileStatus::Missing => SyncOutcome::Created,
        };

        if let Some(parent) = file.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| WriteError::CreateDir {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }
        fs::write(&file.path, &file.contents).map_err(|e| WriteError::WriteFile {
            path: file.path.clone(),
            source: e,
        })?;
        debug!(
            path = %file.path.display(),
            language = %file.language,
            bytes = file.contents.len(),
            ?outcome,
            "synced file"
        );
        Ok(outcome)
    }

    /// Sync every file in order, stopping at the first failure.
    pub fn sync_all(&self, files: &[GeneratedFile]) -> CliResult<Vec<SyncOutcome>> {
        files.iter().map(|file| self.sync(file)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn go_file(dir: &TempDir, name: &str, contents: &str) -> GeneratedFile {
        GeneratedFile {
            language: "go".to_string(),
            path: dir.path().join(name),
            contents: contents.to_string(),
        }
    }

    #[test]
    fn test_create_then_unchanged_then_updated() {
        let dir = TempDir::new().unwrap();
        let sync = OutputSync::new(false);
        let file = go_file(&dir, "shop/order.go", "package shop\n");

        assert_eq!(sync.sync(&file).unwrap(), SyncOutcome::Created);
        assert_eq!(std::fs::read_to_string(&file.path).unwrap(), "package shop\n");
        assert_eq!(sync.sync(&file).unwrap(), SyncOutcome::Unchanged);

        let changed = go_file(&dir, "shop/order.go", "package store\n");
        assert_eq!(sync.sync(&changed).unwrap(), SyncOutcome::Updated);
        assert_eq!(std::fs::read_to_string(&file.path).unwrap(), "package store\n");
    }

    #[test]
    fn test_unchanged_file_is_not_rewritten() {
        let dir = TempDir::new().unwrap();
        let file = go_file(&dir, "order.go", "package shop\n");
        std::fs::write(&file.path, &file.contents).unwrap();
        let before = std::fs::metadata(&file.path).unwrap().modified().unwrap();

        let outcome = OutputSync::new(false).sync(&file).unwrap();
        assert!(!outcome.wrote());
        assert_eq!(std::fs::metadata(&file.path).unwrap().modified().unwrap(), before);
    }

    #[test]
    fn test_status_of_file() {
        let dir = TempDir::new().unwrap();
        let file = go_file(&dir, "order.go", "package shop\n");
        assert_eq!(FileStatus::of(&file).unwrap(), FileStatus::Missing);

        std::fs::write(&file.path, "package old\n").unwrap();
        assert_eq!(FileStatus::of(&file).unwrap(), FileStatus::Stale);

        std::fs::write(&file.path, &file.contents).unwrap();
        assert!(FileStatus::of(&file).unwrap().is_current());
    }

    #[test]
    fn test_dry_run_reports_without_writing() {
        let dir = TempDir::new().unwrap();
        let sync = OutputSync::new(true);
        assert!(sync.is_dry_run());

        let fresh = go_file(&dir, "nested/order.go", "package shop\n");
        let outcome = sync.sync(&fresh).unwrap();
        assert_eq!(outcome, SyncOutcome::Planned(FileStatus::Missing));
        assert!(!outcome.wrote());
        assert!(!dir.path().join("nested").exists());

        let stale = go_file(&dir, "status.go", "package shop\n");
        std::fs::write(&stale.path, "package old\n").unwrap();
        assert_eq!(sync.sync(&stale).unwrap(), SyncOutcome::Planned(FileStatus::Stale));
        assert_eq!(std::fs::read_to_string(&stale.path).unwrap(), "package old\n");
    }

    #[test]
    fn test_directory_in_place_of_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let file = go_file(&dir, "order.go", "package shop\n");
        std::fs::create_dir(&file.path).unwrap();

        let err = OutputSync::new(false).sync(&file).unwrap_err();
        assert!(err.to_string().contains("order.go"));
    }

    #[test]
    fn test_status_labels() {
        assert_eq!(FileStatus::Current.to_string(), "up-to-date");
        assert_eq!(FileStatus::Stale.to_string(), "stale");
        assert_eq!(FileStatus::Missing.to_string(), "missing");
    }
}
