//! File-storage collaborator.
//!
//! Galley files are copied into managed storage scoped by journal and
//! submission; the importer only sees the returned `FileRef`.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::error::{FolioError, Result};

/// What role a stored file plays in the workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilePurpose {
    Submission,
    Review,
    Proof,
    Production,
}

impl std::fmt::Display for FilePurpose {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            FilePurpose::Submission => "submission",
            FilePurpose::Review => "review",
            FilePurpose::Proof => "proof",
            FilePurpose::Production => "production",
        };
        write!(f, "{s}")
    }
}

/// Reference to a file in managed storage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileRef {
    pub id: i64,
    pub path: PathBuf,
    pub original_name: String,
}

pub trait FileStore {
    /// Copies `source` into managed storage under (journal, submission)
    /// scope, tagged with a purpose, the uploading user, a genre key, and
    /// the galley it belongs to.
    #[allow(clippy::too_many_arguments)]
    fn copy_submission_file(
        &self,
        source: &Path,
        journal_id: i64,
        submission_id: i64,
        purpose: FilePurpose,
        uploader_id: i64,
        genre_key: &str,
        galley_id: i64,
    ) -> Result<FileRef>;
}

/// Filesystem-backed file store. Files land under
/// `<root>/journals/<journal>/submissions/<submission>/` with a
/// uuid-prefixed managed name so repeated imports never collide.
pub struct FsFileStore {
    root: PathBuf,
    next_id: Mutex<i64>,
}

impl FsFileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            next_id: Mutex::new(1),
        }
    }

    fn assign_id(&self) -> i64 {
        let mut next = self.next_id.lock().unwrap();
        let id = *next;
        *next += 1;
        id
    }
}

impl FileStore for FsFileStore {
    fn copy_submission_file(
        &self,
        source: &Path,
        journal_id: i64,
        submission_id: i64,
        purpose: FilePurpose,
        uploader_id: i64,
        genre_key: &str,
        galley_id: i64,
    ) -> Result<FileRef> {
        if !source.is_file() {
            return Err(FolioError::FileNotFound(source.display().to_string()));
        }

        let original_name = source
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "file".to_string());

        let dir = self
            .root
            .join("journals")
            .join(journal_id.to_string())
            .join("submissions")
            .join(submission_id.to_string());
        fs::create_dir_all(&dir)?;

        let managed_name = format!("{}-{}", Uuid::new_v4(), original_name);
        let dest = dir.join(managed_name);
        fs::copy(source, &dest)?;

        let id = self.assign_id();
        debug!(
            file = id,
            %purpose,
            genre = genre_key,
            uploader = uploader_id,
            galley = galley_id,
            "stored submission file"
        );

        Ok(FileRef {
            id,
            path: dest,
            original_name,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn copies_into_scoped_directory() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("fulltext.pdf");
        File::create(&source).unwrap().write_all(b"%PDF-1.4").unwrap();

        let store = FsFileStore::new(dir.path().join("managed"));
        let file = store
            .copy_submission_file(&source, 1, 7, FilePurpose::Proof, 2, "SUBMISSION", 3)
            .unwrap();

        assert_eq!(file.original_name, "fulltext.pdf");
        assert!(file.path.starts_with(dir.path().join("managed/journals/1/submissions/7")));
        assert_eq!(fs::read(&file.path).unwrap(), b"%PDF-1.4");
    }

    #[test]
    fn file_ids_increment() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("fulltext.pdf");
        File::create(&source).unwrap();

        let store = FsFileStore::new(dir.path().join("managed"));
        let a = store
            .copy_submission_file(&source, 1, 1, FilePurpose::Proof, 1, "SUBMISSION", 1)
            .unwrap();
        let b = store
            .copy_submission_file(&source, 1, 1, FilePurpose::Proof, 1, "SUBMISSION", 1)
            .unwrap();
        assert_eq!(b.id, a.id + 1);
    }

    #[test]
    fn missing_source_is_an_error() {
        let dir = TempDir::new().unwrap();
        let store = FsFileStore::new(dir.path());
        let result = store.copy_submission_file(
            &dir.path().join("nope.pdf"),
            1,
            1,
            FilePurpose::Proof,
            1,
            "SUBMISSION",
            1,
        );
        assert!(matches!(result, Err(FolioError::FileNotFound(_))));
    }
}
