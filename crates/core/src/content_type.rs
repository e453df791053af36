//! Content type resolution for uploads

/// Content type used for unknown extensions when they are allowed
pub const OCTET_STREAM: &str = "application/octet-stream";

/// IANA-registered top-level media types. Guesses outside these
/// (`chemical/x-xyz`, `x-conference/..`) count as unknown.
const REGISTERED_TOP_LEVEL: &[&str] = &[
    "application",
    "audio",
    "font",
    "image",
    "message",
    "model",
    "multipart",
    "text",
    "video",
];

/// Maps file names to the content type sent with the upload
#[derive(Debug, Clone, Copy, Default)]
pub struct ContentTypeResolver {
    include_unknown: bool,
}

impl ContentTypeResolver {
    pub fn new(include_unknown: bool) -> Self {
        Self { include_unknown }
    }

    /// Content type for `file_name`, from its extension.
    ///
    /// `None` means the file must not be uploaded: its type is unknown and
    /// unknown types were not enabled.
    pub fn resolve(&self, file_name: &str) -> Option<&'static str> {
        let known = mime_guess::from_path(file_name)
            .iter_raw()
            .find(|content_type| is_registered(content_type));
        match known {
            Some(content_type) => Some(content_type),
            None if self.include_unknown => Some(OCTET_STREAM),
            None => None,
        }
    }
}

fn is_registered(content_type: &str) -> bool {
    content_type
        .split_once('/')
        .is_some_and(|(top, _)| REGISTERED_TOP_LEVEL.contains(&top))
}
