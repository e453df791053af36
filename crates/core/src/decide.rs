//! Upload decisions from content fingerprints

use md5::{Digest, Md5};

use crate::index::RemoteIndex;

/// Outcome of comparing a local file with the remote index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncDecision {
    UploadRequired,
    Skip,
}

/// Entity tag the store reports for a single-part upload of `data`:
/// the lowercase hex MD5 digest wrapped in double quotes.
pub fn etag_for(data: &[u8]) -> String {
    let digest = Md5::digest(data);
    format!("\"{}\"", hex::encode(digest))
}

/// Compares local content against a [`RemoteIndex`] snapshot
#[derive(Debug, Clone, Copy)]
pub struct UploadDecider<'a> {
    index: &'a RemoteIndex,
}

impl<'a> UploadDecider<'a> {
    pub fn new(index: &'a RemoteIndex) -> Self {
        Self { index }
    }

    /// Decide whether `data` must be uploaded under `key`.
    ///
    /// A key missing from the index needs an upload and is not hashed.
    pub fn decide(&self, key: &str, data: &[u8]) -> SyncDecision {
        let Some(remote_etag) = self.index.etag(key) else {
            tracing::debug!("Not found in bucket: {key}");
            return SyncDecision::UploadRequired;
        };

        let local_etag = etag_for(data);
        if local_etag != remote_etag {
            tracing::debug!(
                "Need to upload {key}: expected ETag = {local_etag}, actual = {remote_etag}"
            );
            return SyncDecision::UploadRequired;
        }

        tracing::debug!("Identical file, no upload required: {key}");
        SyncDecision::Skip
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::RemoteObject;

    fn index(entries: &[(&str, &str)]) -> RemoteIndex {
        entries
            .iter()
            .map(|(k, e)| RemoteObject::new(*k, *e))
            .collect()
    }

    #[test]
    fn test_etag_format() {
        assert_eq!(etag_for(b""), "\"d41d8cd98f00b204e9800998ecf8427e\"");
        assert_eq!(etag_for(b"hello"), "\"5d41402abc4b2a76b9719d911017c592\"");
    }

    #[test]
    fn test_absent_key_requires_upload() {
        let idx = index(&[]);
        let decider = UploadDecider::new(&idx);
        assert_eq!(decider.decide("new.txt", b"anything"), SyncDecision::UploadRequired);
        assert_eq!(decider.decide("empty.txt", b""), SyncDecision::UploadRequired);
    }

    #[test]
    fn test_matching_etag_skips() {
        let idx = index(&[("hello.txt", "\"5d41402abc4b2a76b9719d911017c592\"")]);
        let decider = UploadDecider::new(&idx);
        assert_eq!(decider.decide("hello.txt", b"hello"), SyncDecision::Skip);
    }

    #[test]
    fn test_differing_etag_requires_upload() {
        let idx = index(&[("hello.txt", "\"5d41402abc4b2a76b9719d911017c592\"")]);
        let decider = UploadDecider::new(&idx);
        assert_eq!(decider.decide("hello.txt", b"hello!"), SyncDecision::UploadRequired);
    }

    #[test]
    fn test_comparison_is_exact() {
        // Unquoted, uppercase and multipart tags never match a local digest
        let idx = index(&[
            ("a", "5d41402abc4b2a76b9719d911017c592"),
            ("b", "\"5D41402ABC4B2A76B9719D911017C592\""),
            ("c", "\"5d41402abc4b2a76b9719d911017c592-2\""),
        ]);
        let decider = UploadDecider::new(&idx);
        for key in ["a", "b", "c"] {
            assert_eq!(decider.decide(key, b"hello"), SyncDecision::UploadRequired);
        }
    }
}
