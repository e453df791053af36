//! S3 client implementation
//!
//! Wraps aws-sdk-s3 and implements the ObjectStore trait from s3upload-core.

use async_trait::async_trait;
use aws_credential_types::provider::ProvideCredentials;
use aws_sdk_s3::error::{ProvideErrorMetadata, SdkError};
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::ObjectCannedAcl;

use s3upload_core::{Error, ListOptions, ListResult, ObjectStore, RemoteObject, Result, Visibility};

/// Region used when none is configured
pub const DEFAULT_REGION: &str = "ap-southeast-2";

/// Error codes that mean the request was not authorized
const AUTH_ERROR_CODES: &[&str] = &[
    "AccessDenied",
    "InvalidAccessKeyId",
    "SignatureDoesNotMatch",
    "ExpiredToken",
    "InvalidToken",
];

/// Connection settings for one bucket
#[derive(Debug, Clone)]
pub struct S3Settings {
    pub bucket: String,
    pub region: String,
    /// Custom endpoint for S3-compatible stores; enables path-style addressing
    pub endpoint_url: Option<String>,
}

impl S3Settings {
    pub fn new(bucket: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            region: DEFAULT_REGION.to_string(),
            endpoint_url: None,
        }
    }
}

/// S3 client bound to a single bucket
pub struct S3Client {
    inner: aws_sdk_s3::Client,
    bucket: String,
}

impl S3Client {
    /// Create a client, resolving credentials from the environment up front.
    ///
    /// Credentials come from the default AWS provider chain (environment,
    /// profile, instance metadata). Failing to resolve them is an auth error.
    pub async fn new(settings: S3Settings) -> Result<Self> {
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(aws_config::Region::new(settings.region.clone()));

        if let Some(endpoint) = &settings.endpoint_url {
            loader = loader.endpoint_url(endpoint);
        }

        let config = loader.load().await;

        let provider = config
            .credentials_provider()
            .ok_or_else(|| Error::Auth("No credentials provider available".to_string()))?;
        provider
            .provide_credentials()
            .await
            .map_err(|e| Error::Auth(format!("Failed to resolve credentials: {e}")))?;

        let s3_config = aws_sdk_s3::config::Builder::from(&config)
            .force_path_style(settings.endpoint_url.is_some())
            .build();

        tracing::debug!(
            bucket = %settings.bucket,
            region = %settings.region,
            endpoint = settings.endpoint_url.as_deref().unwrap_or("default"),
            "S3 client ready"
        );

        Ok(Self {
            inner: aws_sdk_s3::Client::from_conf(s3_config),
            bucket: settings.bucket,
        })
    }

    /// Format AWS SDK error into a detailed error message
    fn format_sdk_error<E: std::fmt::Display>(error: &SdkError<E>) -> String {
        match error {
            SdkError::ServiceError(service_err) => {
                let err = service_err.err();
                let meta = service_err.raw();
                let mut msg = format!("Service error: {}", err);
                if let Some(code) = meta.headers().get("x-amz-error-code")
                    && let Ok(code_str) = std::str::from_utf8(code.as_bytes())
                {
                    msg.push_str(&format!(" (code: {})", code_str));
                }
                msg
            }
            SdkError::ConstructionFailure(err) => {
                format!("Request construction failed: {:?}", err)
            }
            SdkError::TimeoutError(_) => "Request timeout".to_string(),
            SdkError::DispatchFailure(err) => {
                format!("Network dispatch error: {:?}", err)
            }
            SdkError::ResponseError(err) => {
                format!("Response error: {:?}", err)
            }
            _ => error.to_string(),
        }
    }

    fn map_sdk_error<E>(&self, error: &SdkError<E>, context: &str) -> Error
    where
        E: ProvideErrorMetadata + std::fmt::Display,
    {
        let code = error.as_service_error().and_then(|e| e.code());
        error_for_code(code, &self.bucket, format!("{context}: {}", Self::format_sdk_error(error)))
    }
}

/// Classify a failed request by its S3 error code
fn error_for_code(code: Option<&str>, bucket: &str, message: String) -> Error {
    match code {
        Some(code) if AUTH_ERROR_CODES.contains(&code) => Error::Auth(message),
        Some("NoSuchBucket") => Error::Network(format!("Bucket not found: {bucket} ({message})")),
        _ => Error::Network(message),
    }
}

fn canned_acl(visibility: Visibility) -> ObjectCannedAcl {
    match visibility {
        Visibility::Private => ObjectCannedAcl::Private,
    }
}

#[async_trait]
impl ObjectStore for S3Client {
    async fn list_objects(&self, options: ListOptions) -> Result<ListResult> {
        let mut request = self
            .inner
            .list_objects()
            .bucket(&self.bucket)
            .max_keys(options.max_keys);

        if let Some(prefix) = &options.prefix {
            request = request.prefix(prefix);
        }

        if let Some(delimiter) = &options.delimiter {
            request = request.delimiter(delimiter);
        }

        if let Some(marker) = &options.marker {
            request = request.marker(marker);
        }

        let response = request
            .send()
            .await
            .map_err(|e| self.map_sdk_error(&e, "List objects failed"))?;

        // ETags are kept verbatim, quotes included, to compare with local digests
        let entries = response
            .contents()
            .iter()
            .filter_map(|object| {
                let key = object.key()?;
                Some(RemoteObject::new(key, object.e_tag().unwrap_or_default()))
            })
            .collect();

        Ok(ListResult {
            entries,
            truncated: response.is_truncated().unwrap_or(false),
        })
    }

    async fn put_object(
        &self,
        key: &str,
        data: Vec<u8>,
        content_type: &str,
        visibility: Visibility,
    ) -> Result<()> {
        tracing::debug!(key, content_type, acl = visibility.as_str(), "Putting object");
        self.inner
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(data))
            .content_type(content_type)
            .acl(canned_acl(visibility))
            .send()
            .await
            .map_err(|e| self.map_sdk_error(&e, &format!("Upload of {key} failed")))?;

        Ok(())
    }
}
