//! Run configuration
//!
//! A [`SyncConfig`] is built once per run and passed by reference to every
//! component; nothing in the core keeps its own copy of the flags.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::traits::Visibility;

/// Separator appended to a non-empty remote key prefix
pub const KEY_SEPARATOR: char = '/';

/// Immutable configuration for one sync run
#[derive(Debug, Clone)]
pub struct SyncConfig {
    bucket: String,
    local_root: PathBuf,
    recursive: bool,
    include_unknown_mime_types: bool,
    ignore_names: HashSet<String>,
    remote_prefix: String,
    dry_run: bool,
    visibility: Visibility,
}

impl SyncConfig {
    /// Start building a configuration for `bucket` and `local_root`
    pub fn builder(bucket: impl Into<String>, local_root: impl Into<PathBuf>) -> SyncConfigBuilder {
        SyncConfigBuilder::new(bucket, local_root)
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    pub fn local_root(&self) -> &Path {
        &self.local_root
    }

    pub fn recursive(&self) -> bool {
        self.recursive
    }

    pub fn include_unknown_mime_types(&self) -> bool {
        self.include_unknown_mime_types
    }

    pub fn ignore_names(&self) -> &HashSet<String> {
        &self.ignore_names
    }

    /// Remote key prefix, empty or ending in `/`
    pub fn remote_prefix(&self) -> &str {
        &self.remote_prefix
    }

    pub fn dry_run(&self) -> bool {
        self.dry_run
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }
}

/// Builder for [`SyncConfig`]
#[derive(Debug, Clone)]
pub struct SyncConfigBuilder {
    bucket: String,
    local_root: PathBuf,
    recursive: bool,
    include_unknown_mime_types: bool,
    ignore_names: HashSet<String>,
    remote_prefix: String,
    dry_run: bool,
}

impl SyncConfigBuilder {
    pub fn new(bucket: impl Into<String>, local_root: impl Into<PathBuf>) -> Self {
        Self {
            bucket: bucket.into(),
            local_root: local_root.into(),
            recursive: false,
            include_unknown_mime_types: false,
            ignore_names: HashSet::new(),
            remote_prefix: String::new(),
            dry_run: false,
        }
    }

    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    pub fn include_unknown_mime_types(mut self, include: bool) -> Self {
        self.include_unknown_mime_types = include;
        self
    }

    /// Add names from a comma-separated list such as `node_modules,Thumbs.db`
    pub fn ignore_list(mut self, list: &str) -> Self {
        self.ignore_names.extend(parse_ignore_list(list));
        self
    }

    /// Add a single name to the ignore set
    pub fn ignore(mut self, name: impl Into<String>) -> Self {
        self.ignore_names.insert(name.into());
        self
    }

    pub fn remote_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.remote_prefix = prefix.into();
        self
    }

    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Validate required values and normalize the prefix
    pub fn build(self) -> Result<SyncConfig> {
        if self.bucket.trim().is_empty() {
            return Err(Error::Config("Must specify bucket".to_string()));
        }
        if self.local_root.as_os_str().is_empty() {
            return Err(Error::Config("Must specify directory".to_string()));
        }

        let remote_prefix = normalize_prefix(&self.remote_prefix);
        if !remote_prefix.is_empty() {
            tracing::debug!(prefix = %remote_prefix, "Using remote key prefix");
        }

        Ok(SyncConfig {
            bucket: self.bucket,
            local_root: self.local_root,
            recursive: self.recursive,
            include_unknown_mime_types: self.include_unknown_mime_types,
            ignore_names: self.ignore_names,
            remote_prefix,
            dry_run: self.dry_run,
            visibility: Visibility::Private,
        })
    }
}

/// Append the key separator to a non-empty prefix that lacks one
pub fn normalize_prefix(prefix: &str) -> String {
    if prefix.is_empty() || prefix.ends_with(KEY_SEPARATOR) {
        prefix.to_string()
    } else {
        format!("{prefix}{KEY_SEPARATOR}")
    }
}

/// Split a comma-separated ignore list, dropping blank entries
pub fn parse_ignore_list(list: &str) -> impl Iterator<Item = String> + '_ {
    list.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
}
