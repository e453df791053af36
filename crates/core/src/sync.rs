//! The sync run
//!
//! [`Syncer::run`] is the single entry point: it snapshots the bucket, walks
//! the local tree and uploads what differs, one file at a time. The first
//! error ends the run; uploads already made stay in place.

use serde::Serialize;
use tokio::fs;

use crate::config::SyncConfig;
use crate::content_type::ContentTypeResolver;
use crate::decide::{SyncDecision, UploadDecider};
use crate::error::{Error, Result};
use crate::filter::IgnoreFilter;
use crate::index::RemoteIndex;
use crate::traits::ObjectStore;
use crate::walk::{LocalFile, TreeWalker};

/// Counters for a completed run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SyncSummary {
    /// Files uploaded (or that would have been, in a dry run)
    pub uploaded: usize,
    /// Files identical to their remote copy
    pub unchanged: usize,
    /// Files that needed an upload but have no known content type
    pub unknown_type: usize,
    pub bytes_uploaded: u64,
    pub dry_run: bool,
}

/// Pushes a local tree to an object store
pub struct Syncer<'a, S: ObjectStore + ?Sized> {
    store: &'a S,
    config: &'a SyncConfig,
}

impl<'a, S: ObjectStore + ?Sized> Syncer<'a, S> {
    pub fn new(store: &'a S, config: &'a SyncConfig) -> Self {
        Self { store, config }
    }

    /// Run one full sync.
    ///
    /// The remote listing is complete before the first local file is read.
    pub async fn run(&self) -> Result<SyncSummary> {
        tracing::debug!("Listing objects in bucket {}", self.config.bucket());
        let index = RemoteIndex::build(self.store, self.config.remote_prefix()).await?;
        tracing::debug!("Remote index holds {} objects", index.len());

        let filter = IgnoreFilter::from_config(self.config);
        let decider = UploadDecider::new(&index);
        let resolver = ContentTypeResolver::new(self.config.include_unknown_mime_types());
        let mut walker = TreeWalker::new(
            self.config.local_root(),
            self.config.remote_prefix(),
            &filter,
        );

        let mut summary = SyncSummary {
            dry_run: self.config.dry_run(),
            ..Default::default()
        };

        while let Some(file) = walker.next_file().await? {
            self.process_file(&file, &decider, &resolver, &mut summary)
                .await?;
        }

        Ok(summary)
    }

    async fn process_file(
        &self,
        file: &LocalFile,
        decider: &UploadDecider<'_>,
        resolver: &ContentTypeResolver,
        summary: &mut SyncSummary,
    ) -> Result<()> {
        let data = fs::read(&file.absolute_path)
            .await
            .map_err(|e| Error::filesystem(&file.absolute_path, e))?;

        if decider.decide(&file.key, &data) == SyncDecision::Skip {
            summary.unchanged += 1;
            return Ok(());
        }

        let Some(content_type) = resolver.resolve(&file.key) else {
            tracing::debug!("Unknown content type, not uploading {}", file.key);
            summary.unknown_type += 1;
            return Ok(());
        };

        let size = data.len() as u64;
        if self.config.dry_run() {
            tracing::info!("Would upload {} ({content_type})", file.key);
        } else {
            self.store
                .put_object(&file.key, data, content_type, self.config.visibility())
                .await?;
            tracing::info!("Uploaded {}", file.key);
        }

        summary.uploaded += 1;
        summary.bytes_uploaded += size;
        Ok(())
    }
}
