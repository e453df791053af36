//! upload command - Push a local directory to a bucket
//!
//! Uploads files that are missing from the bucket or whose content differs,
//! and leaves identical objects untouched.

use clap::Args;
use s3upload_core::{SyncConfig, SyncSummary, Syncer};
use s3upload_s3::{DEFAULT_REGION, S3Client, S3Settings};
use serde::Serialize;
use std::path::PathBuf;

use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

/// Push a local directory to an S3 bucket
#[derive(Args, Debug)]
pub struct UploadArgs {
    /// S3 bucket name
    #[arg(long, allow_hyphen_values = true)]
    pub bucket: String,

    /// Local directory
    #[arg(long, allow_hyphen_values = true)]
    pub dir: PathBuf,

    /// Recurse into sub-directories
    #[arg(long)]
    pub recursive: bool,

    /// Upload files with unknown mime types
    #[arg(long)]
    pub include_unknown_mime_types: bool,

    /// Comma-separated list of files/directories to ignore
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    pub ignore: String,

    /// Prefix for S3 objects
    #[arg(long = "s3-prefix", default_value = "", allow_hyphen_values = true)]
    pub s3_prefix: String,

    /// AWS region of the bucket
    #[arg(long, env = "S3UPLOAD_REGION", default_value = DEFAULT_REGION)]
    pub region: String,

    /// Endpoint URL for S3-compatible storage
    #[arg(long, env = "S3UPLOAD_ENDPOINT")]
    pub endpoint_url: Option<String>,

    /// Dry run (show what would be uploaded without uploading)
    #[arg(short = 'n', long)]
    pub dry_run: bool,
}

impl UploadArgs {
    fn sync_config(&self) -> s3upload_core::Result<SyncConfig> {
        SyncConfig::builder(&self.bucket, &self.dir)
            .recursive(self.recursive)
            .include_unknown_mime_types(self.include_unknown_mime_types)
            .ignore_list(&self.ignore)
            .remote_prefix(&self.s3_prefix)
            .dry_run(self.dry_run)
            .build()
    }

    fn s3_settings(&self) -> S3Settings {
        S3Settings {
            bucket: self.bucket.clone(),
            region: self.region.clone(),
            endpoint_url: self.endpoint_url.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
struct UploadOutput {
    bucket: String,
    prefix: String,
    dir: String,
    #[serde(flatten)]
    summary: SyncSummary,
}

/// Execute the upload command
pub async fn execute(args: UploadArgs, output_config: OutputConfig) -> ExitCode {
    let formatter = Formatter::new(output_config);

    let config = match args.sync_config() {
        Ok(c) => c,
        Err(e) => {
            formatter.error(&e.to_string());
            return ExitCode::from_error(&e);
        }
    };

    let client = match S3Client::new(args.s3_settings()).await {
        Ok(c) => c,
        Err(e) => {
            formatter.error(&format!("Failed to create S3 client: {e}"));
            return ExitCode::from_error(&e);
        }
    };

    let summary = match Syncer::new(&client, &config).run().await {
        Ok(s) => s,
        Err(e) => {
            formatter.error(&format!("Sync failed: {e}"));
            return ExitCode::from_error(&e);
        }
    };
    tracing::debug!(?summary, "Sync finished");

    if formatter.is_json() {
        formatter.json(&UploadOutput {
            bucket: config.bucket().to_string(),
            prefix: config.remote_prefix().to_string(),
            dir: config.local_root().display().to_string(),
            summary,
        });
    } else {
        let target = format!("{}/{}", config.bucket(), config.remote_prefix());
        formatter.success(&format!(
            "{} -> {}: {}",
            config.local_root().display(),
            formatter.style_name(&target),
            summary_line(&summary, &formatter)
        ));
        if summary.dry_run {
            formatter.warning("Dry run: no objects were written");
        }
    }

    ExitCode::Success
}

fn summary_line(summary: &SyncSummary, formatter: &Formatter) -> String {
    let size = formatter.style_size(&humansize::format_size(
        summary.bytes_uploaded,
        humansize::BINARY,
    ));
    let verb = if summary.dry_run {
        "to upload"
    } else {
        "uploaded"
    };

    let mut line = format!(
        "{} {verb} ({size}), {} unchanged",
        summary.uploaded, summary.unchanged
    );
    if summary.unknown_type > 0 {
        line.push_str(&format!(
            ", {} skipped (unknown content type)",
            summary.unknown_type
        ));
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain() -> Formatter {
        Formatter::new(OutputConfig {
            no_color: true,
            ..Default::default()
        })
    }

    fn args() -> UploadArgs {
        UploadArgs {
            bucket: "site-bucket".to_string(),
            dir: PathBuf::from("/srv/www"),
            recursive: true,
            include_unknown_mime_types: false,
            ignore: "node_modules,.DS_Store".to_string(),
            s3_prefix: "backups".to_string(),
            region: DEFAULT_REGION.to_string(),
            endpoint_url: None,
            dry_run: false,
        }
    }

    #[test]
    fn test_sync_config_from_args() {
        let config = args().sync_config().unwrap();
        assert_eq!(config.bucket(), "site-bucket");
        assert_eq!(config.remote_prefix(), "backups/");
        assert!(config.recursive());
        assert!(config.ignore_names().contains("node_modules"));
        assert!(config.ignore_names().contains(".DS_Store"));
    }

    #[test]
    fn test_s3_settings_from_args() {
        let mut a = args();
        a.endpoint_url = Some("http://localhost:9000".to_string());
        let settings = a.s3_settings();
        assert_eq!(settings.bucket, "site-bucket");
        assert_eq!(settings.region, "ap-southeast-2");
        assert_eq!(settings.endpoint_url.as_deref(), Some("http://localhost:9000"));
    }

    #[test]
    fn test_summary_line() {
        let summary = SyncSummary {
            uploaded: 3,
            unchanged: 5,
            unknown_type: 0,
            bytes_uploaded: 2048,
            dry_run: false,
        };
        assert_eq!(
            summary_line(&summary, &plain()),
            "3 uploaded (2 KiB), 5 unchanged"
        );
    }

    #[test]
    fn test_summary_line_dry_run_with_unknown_types() {
        let summary = SyncSummary {
            uploaded: 1,
            unchanged: 0,
            unknown_type: 2,
            bytes_uploaded: 0,
            dry_run: true,
        };
        assert_eq!(
            summary_line(&summary, &plain()),
            "1 to upload (0 B), 0 unchanged, 2 skipped (unknown content type)"
        );
    }

    #[test]
    fn test_upload_output_json() {
        let output = UploadOutput {
            bucket: "site-bucket".to_string(),
            prefix: "backups/".to_string(),
            dir: "/srv/www".to_string(),
            summary: SyncSummary {
                uploaded: 2,
                unchanged: 7,
                unknown_type: 1,
                bytes_uploaded: 4096,
                dry_run: false,
            },
        };
        insta::assert_json_snapshot!(output, @r###"
        {
          "bucket": "site-bucket",
          "prefix": "backups/",
          "dir": "/srv/www",
          "uploaded": 2,
          "unchanged": 7,
          "unknown_type": 1,
          "bytes_uploaded": 4096,
          "dry_run": false
        }
        "###);
    }
}
