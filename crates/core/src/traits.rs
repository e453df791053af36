//! Object store abstraction
//!
//! The reconciliation core only needs two remote operations: a paginated
//! listing and a put. Keeping them behind a trait keeps the core free of any
//! SDK and lets tests run against an in-memory store.

use async_trait::async_trait;

use crate::error::Result;

/// Default page size for listings
pub const DEFAULT_MAX_KEYS: i32 = 1000;

/// One entry of a remote listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteObject {
    /// Full key in the bucket, prefix included
    pub key: String,
    /// Entity tag exactly as returned by the store, quotes included
    pub etag: String,
}

impl RemoteObject {
    pub fn new(key: impl Into<String>, etag: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            etag: etag.into(),
        }
    }
}

/// Options for a single listing request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListOptions {
    /// Only list keys starting with this prefix
    pub prefix: Option<String>,
    /// Group keys by this delimiter; `None` lists every key flat
    pub delimiter: Option<String>,
    /// Start listing after this key
    pub marker: Option<String>,
    /// Maximum entries in one page
    pub max_keys: i32,
}

impl Default for ListOptions {
    fn default() -> Self {
        Self {
            prefix: None,
            delimiter: None,
            marker: None,
            max_keys: DEFAULT_MAX_KEYS,
        }
    }
}

/// One page of a listing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListResult {
    pub entries: Vec<RemoteObject>,
    /// More entries follow this page
    pub truncated: bool,
}

/// Access control applied to uploaded objects.
///
/// Uploads are always private.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    #[default]
    Private,
}

impl Visibility {
    pub fn as_str(&self) -> &'static str {
        match self {
            Visibility::Private => "private",
        }
    }
}

/// Remote operations consumed by the sync core
///
/// Implementations are bound to one bucket.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Fetch one page of the bucket listing
    async fn list_objects(&self, options: ListOptions) -> Result<ListResult>;

    /// Write `data` under `key`, replacing any existing object
    async fn put_object(
        &self,
        key: &str,
        data: Vec<u8>,
        content_type: &str,
        visibility: Visibility,
    ) -> Result<()>;
}
