//! Process exit codes

use s3upload_core::Error;

/// Exit code returned by the s3upload binary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    Success = 0,
    UsageError = 2,
    NetworkError = 3,
    AuthError = 4,
    FilesystemError = 5,
}

impl ExitCode {
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Exit code for a run that ended with `error`
    pub fn from_error(error: &Error) -> Self {
        match error {
            Error::Config(_) => ExitCode::UsageError,
            Error::Auth(_) => ExitCode::AuthError,
            Error::Network(_) => ExitCode::NetworkError,
            Error::Filesystem { .. } => ExitCode::FilesystemError,
        }
    }
}
