//! s3upload-core: reconciliation core for the s3upload CLI
//!
//! This crate decides which local files need to be pushed to a bucket:
//! - Remote index built from a paginated listing
//! - Ignore rules and local tree traversal
//! - Entity-tag comparison and content type resolution
//! - The sequential sync run tying them together
//!
//! It depends on no S3 SDK; the store is reached through [`ObjectStore`].

pub mod config;
pub mod content_type;
pub mod decide;
pub mod error;
pub mod filter;
pub mod index;
pub mod sync;
pub mod traits;
pub mod walk;

pub use config::{SyncConfig, SyncConfigBuilder, normalize_prefix};
pub use content_type::ContentTypeResolver;
pub use decide::{SyncDecision, UploadDecider, etag_for};
pub use error::{Error, Result};
pub use filter::IgnoreFilter;
pub use index::RemoteIndex;
pub use sync::{SyncSummary, Syncer};
pub use traits::{ListOptions, ListResult, ObjectStore, RemoteObject, Visibility};
pub use walk::{LocalFile, LocalFileEntry, TreeWalker};
