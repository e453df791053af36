//! Local tree traversal
//!
//! The walker keeps an explicit stack of `(directory, key prefix)` pairs and
//! hands out one file at a time, so the caller drives the pace and can stop
//! at the first error. Each directory is listed exactly once.

use std::collections::VecDeque;
use std::path::{Path, PathBuf};

use tokio::fs;

use crate::error::{Error, Result};
use crate::filter::IgnoreFilter;

/// One entry of a directory listing, with the file type taken without
/// following symlinks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalFileEntry {
    pub name: String,
    /// Path relative to the walk root
    pub relative_path: PathBuf,
    pub absolute_path: PathBuf,
    pub is_directory: bool,
    pub is_symlink: bool,
    pub is_file: bool,
}

/// A regular file selected for reconciliation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalFile {
    pub relative_path: PathBuf,
    pub absolute_path: PathBuf,
    /// Remote key: key prefix of the directory plus the file name
    pub key: String,
}

#[derive(Debug)]
struct PendingDir {
    relative_path: PathBuf,
    key_prefix: String,
}

/// Depth-first walker over a local directory tree
#[derive(Debug)]
pub struct TreeWalker<'a> {
    root: PathBuf,
    filter: &'a IgnoreFilter,
    pending_dirs: Vec<PendingDir>,
    pending_files: VecDeque<LocalFile>,
}

impl<'a> TreeWalker<'a> {
    /// Walk `root`, keying its files under `key_prefix` (empty or ending in `/`)
    pub fn new(root: impl Into<PathBuf>, key_prefix: impl Into<String>, filter: &'a IgnoreFilter) -> Self {
        Self {
            root: root.into(),
            filter,
            pending_dirs: vec![PendingDir {
                relative_path: PathBuf::new(),
                key_prefix: key_prefix.into(),
            }],
            pending_files: VecDeque::new(),
        }
    }

    /// Next file to reconcile, or `None` once the tree is exhausted
    pub async fn next_file(&mut self) -> Result<Option<LocalFile>> {
        loop {
            if let Some(file) = self.pending_files.pop_front() {
                return Ok(Some(file));
            }

            let Some(dir) = self.pending_dirs.pop() else {
                return Ok(None);
            };
            self.scan(dir).await?;
        }
    }

    async fn scan(&mut self, dir: PendingDir) -> Result<()> {
        tracing::debug!("Processing directory {}", self.root.join(&dir.relative_path).display());

        let entries = list_directory(&self.root, &dir.relative_path).await?;
        let mut subdirs = Vec::new();

        for entry in entries {
            if entry.is_symlink {
                tracing::debug!("Skipping symlink {}", entry.absolute_path.display());
                continue;
            }

            if entry.is_directory {
                if self.filter.should_descend(&entry.name) {
                    subdirs.push(PendingDir {
                        key_prefix: format!("{}{}/", dir.key_prefix, entry.name),
                        relative_path: entry.relative_path,
                    });
                }
                continue;
            }

            if !entry.is_file {
                tracing::debug!("Skipping special file {}", entry.absolute_path.display());
                continue;
            }

            if self.filter.should_skip_file(&entry.name) {
                continue;
            }

            self.pending_files.push_back(LocalFile {
                key: format!("{}{}", dir.key_prefix, entry.name),
                relative_path: entry.relative_path,
                absolute_path: entry.absolute_path,
            });
        }

        // Reversed so the first subdirectory in name order is popped first
        self.pending_dirs.extend(subdirs.into_iter().rev());
        Ok(())
    }
}

/// List the immediate entries of `root/relative`, sorted by name.
///
/// Names that are not valid UTF-8 cannot become object keys and are skipped.
pub async fn list_directory(root: &Path, relative: &Path) -> Result<Vec<LocalFileEntry>> {
    let dir = root.join(relative);
    let mut read_dir = fs::read_dir(&dir)
        .await
        .map_err(|e| Error::filesystem(&dir, e))?;

    let mut entries = Vec::new();
    while let Some(entry) = read_dir
        .next_entry()
        .await
        .map_err(|e| Error::filesystem(&dir, e))?
    {
        let absolute_path = entry.path();
        let file_type = entry
            .file_type()
            .await
            .map_err(|e| Error::filesystem(&absolute_path, e))?;

        let Some(name) = entry.file_name().to_str().map(str::to_string) else {
            tracing::warn!("Skipping {}: name is not valid UTF-8", absolute_path.display());
            continue;
        };

        entries.push(LocalFileEntry {
            relative_path: relative.join(&name),
            absolute_path,
            name,
            is_directory: file_type.is_dir(),
            is_symlink: file_type.is_symlink(),
            is_file: file_type.is_file(),
        });
    }

    entries.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(entries)
}
