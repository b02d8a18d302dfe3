//! Normalized message record produced by the import pipeline.
//!
//! A [`Message`] is what the rest of an application works with once a chat
//! export has been imported: a stable position `index`, an absolute `date`,
//! an optional `author`, the `message` text and, for archived exports, an
//! optional [`Attachment`] reference.
//!
//! # Examples
//!
//! ```
//! use chatsift::Message;
//! use chrono::{TimeZone, Utc};
//!
//! let date = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap();
//! let msg = Message::new(0, date, Some("Alice"), "Hello!");
//!
//! assert_eq!(msg.author(), Some("Alice"));
//! assert!(!msg.is_system());
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// A file referenced by a message in an archived export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    /// Name of the media file inside the export archive.
    pub file_name: String,
}

impl Attachment {
    /// Creates an attachment reference.
    pub fn new(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
        }
    }
}

/// A message with its original parse position.
///
/// `index` is assigned once, in transcript order, and is never reused;
/// filtering keeps it untouched so callers can always map a message back to
/// its place in the full conversation.
///
/// `author` is `None` for system notices (group created, encryption notice,
/// ...). It is never `Some("")`: [`Message::new`] normalizes blank authors to
/// `None`.
///
/// # Serialization
///
/// ```
/// use chatsift::Message;
/// use chrono::{TimeZone, Utc};
///
/// let date = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap();
/// let msg = Message::new(3, date, None::<String>, "Alice created group");
/// let json = serde_json::to_string(&msg)?;
///
/// assert!(json.contains("\"author\":null"));
/// assert!(!json.contains("attachment"));
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Zero-based position in the parsed transcript.
    pub index: usize,

    /// When the message was sent.
    pub date: DateTime<Utc>,

    /// Who sent the message; `None` for system notices.
    #[serde(default, deserialize_with = "deserialize_author")]
    pub author: Option<String>,

    /// Text content. Multiline messages keep their `\n` separators.
    pub message: String,

    /// Media reference, only resolved for archived exports.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub attachment: Option<Attachment>,
}

/// Reads an author, mapping blank names to `None` like [`Message::new`].
fn deserialize_author<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let author = Option::<String>::deserialize(deserializer)?;
    Ok(author.filter(|a| !a.trim().is_empty()))
}

impl Message {
    /// Creates a message without an attachment.
    pub fn new<A: Into<String>>(
        index: usize,
        date: DateTime<Utc>,
        author: Option<A>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            index,
            date,
            author: author.map(Into::into).filter(|a| !a.trim().is_empty()),
            message: message.into(),
            attachment: None,
        }
    }

    /// Builder method to set the attachment.
    #[must_use]
    pub fn with_attachment(mut self, attachment: Attachment) -> Self {
        self.attachment = Some(attachment);
        self
    }

    /// Returns the author, if any.
    pub fn author(&self) -> Option<&str> {
        self.author.as_deref()
    }

    /// Returns the message text.
    pub fn text(&self) -> &str {
        &self.message
    }

    /// Returns `true` if this message has no author.
    pub fn is_system(&self) -> bool {
        self.author.is_none()
    }
}
