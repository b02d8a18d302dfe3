//! Import input and transcript text acquisition.
//!
//! An export reaches the pipeline either as pasted/plain transcript text or
//! as a zip archive. [`ChatFile`] keeps the two apart, and [`file_to_text`]
//! turns either into transcript text.
//!
//! Acquisition failures stop here: [`file_to_text`] reports them through a
//! [`Notifier`] and yields empty text (see [`recover_to_empty`]), so parsing
//! always receives a string. Callers that handle the failure themselves use
//! [`try_file_to_text`].

use crate::archive::{ArchiveHandle, read_chat_file};
use crate::error::{AcquisitionError, ChatsiftError, Result};
use crate::notify::Notifier;

/// Leading bytes of a zip local file header, empty archive, and spanned archive.
const ZIP_SIGNATURES: [&[u8]; 3] = [b"PK\x03\x04", b"PK\x05\x06", b"PK\x07\x08"];

/// A chat export as handed to the import pipeline.
#[derive(Debug, Clone)]
pub enum ChatFile {
    /// Transcript text, e.g. pasted or read from a `.txt` export.
    Raw(String),
    /// A zip export holding the transcript and its media.
    Archived(ArchiveHandle),
}

impl ChatFile {
    /// Wraps transcript text.
    pub fn raw(text: impl Into<String>) -> Self {
        ChatFile::Raw(text.into())
    }

    /// Wraps zip bytes. Nothing is read until the transcript is needed.
    pub fn archive(bytes: impl Into<std::sync::Arc<[u8]>>) -> Self {
        ChatFile::Archived(ArchiveHandle::new(bytes))
    }

    /// Returns `true` for archived exports.
    pub fn is_archive(&self) -> bool {
        matches!(self, ChatFile::Archived(_))
    }
}

impl From<String> for ChatFile {
    fn from(text: String) -> Self {
        ChatFile::Raw(text)
    }
}

impl From<&str> for ChatFile {
    fn from(text: &str) -> Self {
        ChatFile::Raw(text.to_owned())
    }
}

/// Classifies file contents as an archive or a transcript.
///
/// Returns `Ok(None)` for empty input. Bytes starting with a zip signature
/// become [`ChatFile::Archived`]; anything else must be UTF-8 text.
///
/// # Example
///
/// ```rust
/// use chatsift::source::{ChatFile, extract_file};
///
/// let file = extract_file(b"[1/15/24, 10:30 AM] Alice: hi".to_vec())?;
/// assert!(matches!(file, Some(ChatFile::Raw(_))));
///
/// assert!(extract_file(Vec::new())?.is_none());
/// # Ok::<(), chatsift::ChatsiftError>(())
/// ```
pub fn extract_file(bytes: Vec<u8>) -> Result<Option<ChatFile>> {
    if bytes.is_empty() {
        return Ok(None);
    }

    if ZIP_SIGNATURES.iter().any(|sig| bytes.starts_with(sig)) {
        return Ok(Some(ChatFile::archive(bytes)));
    }

    let text = String::from_utf8(bytes).map_err(|source| ChatsiftError::Utf8 {
        context: "transcript file".to_string(),
        source,
    })?;
    let text = match text.strip_prefix('\u{FEFF}') {
        Some(stripped) => stripped.to_owned(),
        None => text,
    };
    Ok(Some(ChatFile::Raw(text)))
}

/// Turns an acquisition result into text, reporting failures.
///
/// On error the notifier receives the error's message and the error itself,
/// and the result is an empty string.
pub fn recover_to_empty(
    result: std::result::Result<String, AcquisitionError>,
    notifier: &dyn Notifier,
) -> String {
    result.unwrap_or_else(|err| {
        notifier.notify(&err.to_string(), Some(&err));
        String::new()
    })
}

async fn acquire_text(file: Option<&ChatFile>) -> std::result::Result<String, AcquisitionError> {
    match file {
        None => Ok(String::new()),
        Some(ChatFile::Raw(text)) => Ok(text.clone()),
        Some(ChatFile::Archived(archive)) => read_chat_file(archive).await,
    }
}

/// Returns the transcript text of an export.
///
/// - no file: empty text
/// - [`ChatFile::Raw`]: the text unchanged
/// - [`ChatFile::Archived`]: the resolved transcript entry, or empty text
///   after notifying when it cannot be found or decoded
pub async fn file_to_text(file: Option<&ChatFile>, notifier: &dyn Notifier) -> String {
    recover_to_empty(acquire_text(file).await, notifier)
}

/// Like [`file_to_text`], but returns acquisition failures instead of
/// reporting them.
///
/// # Errors
///
/// Returns [`ChatsiftError::Acquisition`] when the archive has no transcript
/// or cannot be decoded.
pub async fn try_file_to_text(file: Option<&ChatFile>) -> Result<String> {
    Ok(acquire_text(file).await?)
}
