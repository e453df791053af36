//! s3upload-s3: S3 SDK adapter for s3upload
//!
//! Implements the `ObjectStore` trait from s3upload-core on top of aws-sdk-s3.

mod client;

pub use client::{DEFAULT_REGION, S3Client, S3Settings};
