//! Filesystem-backed document store.
//!
//! All documents live as regular files directly under a single root
//! directory fixed at construction time. The store never recurses and never
//! caches content; every operation goes straight to the filesystem.
//!
//! Concurrent writes to the same name race at the filesystem level
//! (last write wins). That is an accepted property of the design, not a
//! gap to paper over with locking.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::StoreError;

/// A store of plain-text and markdown documents under one root directory.
#[derive(Debug, Clone)]
pub struct DocumentStore {
    root: PathBuf,
}

impl DocumentStore {
    /// Open a store rooted at `root`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the directory cannot be created.
    pub async fn open(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        tokio::fs::create_dir_all(&root).await?;
        Ok(Self { root })
    }

    /// The active root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// List the names of all documents directly under the root.
    ///
    /// Directories and non-UTF-8 names are excluded. Enumeration order is
    /// whatever the filesystem returns; callers must not depend on it.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the root cannot be read.
    pub async fn list(&self) -> Result<Vec<String>, StoreError> {
        let mut names = Vec::new();
        let mut entries = tokio::fs::read_dir(&self.root).await?;
        while let Some(entry) = entries.next_entry().await? {
            if entry.file_type().await?.is_file() {
                if let Ok(name) = entry.file_name().into_string() {
                    names.push(name);
                }
            }
        }
        Ok(names)
    }

    /// Check whether a regular file with exactly this name exists.
    pub async fn exists(&self, name: &str) -> bool {
        let Ok(path) = self.resolve(name) else {
            return false;
        };
        tokio::fs::metadata(&path)
            .await
            .map(|m| m.is_file())
            .unwrap_or(false)
    }

    /// Read a document's raw bytes.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if the file is absent or unreadable.
    pub async fn read(&self, name: &str) -> Result<Vec<u8>, StoreError> {
        let path = self.resolve(name)?;
        tokio::fs::read(&path).await.map_err(|err| {
            tracing::debug!(name, error = %err, "document read failed");
            StoreError::NotFound {
                name: name.to_owned(),
            }
        })
    }

    /// Write a document, creating it if absent or fully replacing its
    /// content otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] on a permission or disk error.
    pub async fn write(&self, name: &str, content: &[u8]) -> Result<(), StoreError> {
        let path = self.resolve(name)?;
        tokio::fs::write(&path, content).await?;
        Ok(())
    }

    /// Delete a document. Irreversible.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if the file is absent, or
    /// [`StoreError::Io`] on any other filesystem error.
    pub async fn delete(&self, name: &str) -> Result<(), StoreError> {
        let path = self.resolve(name)?;
        tokio::fs::remove_file(&path).await.map_err(|err| {
            if err.kind() == ErrorKind::NotFound {
                StoreError::NotFound {
                    name: name.to_owned(),
                }
            } else {
                StoreError::Io(err)
            }
        })
    }

    /// Normalize a submitted document name.
    ///
    /// Trims surrounding whitespace and appends `.txt` when the trimmed
    /// value carries no extension.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidName`] if the trimmed value is empty or
    /// would escape the store root.
    pub fn normalize_name(raw: &str) -> Result<String, StoreError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(StoreError::InvalidName {
                reason: "A name is required.".to_owned(),
            });
        }
        validate_segment(trimmed)?;

        if trimmed.contains('.') {
            Ok(trimmed.to_owned())
        } else {
            Ok(format!("{trimmed}.txt"))
        }
    }

    /// Resolve a name to its path under the root, refusing anything that is
    /// not a single plain path segment.
    fn resolve(&self, name: &str) -> Result<PathBuf, StoreError> {
        validate_segment(name)?;
        Ok(self.root.join(name))
    }
}

/// Reject names that could traverse outside the store root.
///
/// The original service passed submitted names straight into a path join;
/// here separators, parent references, and null bytes are refused outright.
fn validate_segment(name: &str) -> Result<(), StoreError> {
    if name.is_empty() {
        return Err(StoreError::InvalidName {
            reason: "A name is required.".to_owned(),
        });
    }
    if name.contains('/') || name.contains('\\') || name.contains('\0') {
        return Err(StoreError::InvalidName {
            reason: "Name must not contain path separators.".to_owned(),
        });
    }
    if name == "." || name == ".." {
        return Err(StoreError::InvalidName {
            reason: "Name must not reference a directory.".to_owned(),
        });
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    async fn make_store() -> (tempfile::TempDir, DocumentStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = DocumentStore::open(dir.path()).await.unwrap();
        (dir, store)
    }

    #[tokio::test]
    async fn write_then_read_round_trips() {
        let (_dir, store) = make_store().await;
        store.write("history.txt", b"1993 - Yukihiro").await.unwrap();
        let bytes = store.read("history.txt").await.unwrap();
        assert_eq!(bytes, b"1993 - Yukihiro");
    }

    #[tokio::test]
    async fn write_fully_replaces_content() {
        let (_dir, store) = make_store().await;
        store.write("changes.txt", b"old content that is long").await.unwrap();
        store.write("changes.txt", b"new").await.unwrap();
        assert_eq!(store.read("changes.txt").await.unwrap(), b"new");
    }

    #[tokio::test]
    async fn read_missing_is_not_found() {
        let (_dir, store) = make_store().await;
        let err = store.read("ghost.txt").await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound { name } if name == "ghost.txt"));
    }

    #[tokio::test]
    async fn list_excludes_directories() {
        let (dir, store) = make_store().await;
        store.write("about.md", b"").await.unwrap();
        store.write("changes.txt", b"").await.unwrap();
        std::fs::create_dir(dir.path().join("subdir")).unwrap();

        let mut names = store.list().await.unwrap();
        names.sort();
        assert_eq!(names, vec!["about.md", "changes.txt"]);
    }

    #[tokio::test]
    async fn exists_reflects_regular_files_only() {
        let (dir, store) = make_store().await;
        store.write("a.txt", b"").await.unwrap();
        std::fs::create_dir(dir.path().join("d")).unwrap();

        assert!(store.exists("a.txt").await);
        assert!(!store.exists("d").await);
        assert!(!store.exists("missing.txt").await);
    }

    #[tokio::test]
    async fn delete_removes_file() {
        let (_dir, store) = make_store().await;
        store.write("doomed.txt", b"x").await.unwrap();
        store.delete("doomed.txt").await.unwrap();
        assert!(!store.exists("doomed.txt").await);
    }

    #[tokio::test]
    async fn delete_missing_is_not_found() {
        let (_dir, store) = make_store().await;
        let err = store.delete("missing.txt").await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[test]
    fn normalize_trims_and_appends_txt() {
        assert_eq!(
            DocumentStore::normalize_name("  notes  ").unwrap(),
            "notes.txt"
        );
        assert_eq!(DocumentStore::normalize_name("about.md").unwrap(), "about.md");
    }

    #[test]
    fn normalize_rejects_empty_names() {
        assert!(matches!(
            DocumentStore::normalize_name("   "),
            Err(StoreError::InvalidName { .. })
        ));
        assert!(matches!(
            DocumentStore::normalize_name(""),
            Err(StoreError::InvalidName { .. })
        ));
    }

    #[test]
    fn normalize_rejects_traversal() {
        for bad in ["../escape", "a/b.txt", "..", "a\\b", "nul\0.txt"] {
            assert!(
                matches!(
                    DocumentStore::normalize_name(bad),
                    Err(StoreError::InvalidName { .. })
                ),
                "expected {bad:?} to be rejected"
            );
        }
    }

    #[tokio::test]
    async fn traversal_names_never_reach_the_filesystem() {
        let dir = tempfile::tempdir().unwrap();
        let store = DocumentStore::open(dir.path().join("data")).await.unwrap();
        std::fs::write(dir.path().join("outside.txt"), b"x").unwrap();

        assert!(store.read("../outside.txt").await.is_err());
        assert!(store.write("../outside.txt", b"y").await.is_err());
        assert!(!store.exists("../outside.txt").await);
        assert_eq!(std::fs::read(dir.path().join("outside.txt")).unwrap(), b"x");
    }
}
