//! Transcript grammar seam.
//!
//! The import pipeline does not interpret chat-log lines itself; it hands
//! the transcript text to a [`TranscriptGrammar`] and works with the
//! [`ParsedMessage`] records it returns. The crate ships
//! [`WhatsAppParser`](crate::parsers::WhatsAppParser); other export formats
//! plug in by implementing the trait.
//!
//! # Example Implementation
//!
//! ```rust
//! use chatsift::config::ParseOptions;
//! use chatsift::error::Result;
//! use chatsift::parser::{ParsedMessage, TranscriptGrammar};
//! use chrono::Utc;
//!
//! struct OneLinePerMessage;
//!
//! impl TranscriptGrammar for OneLinePerMessage {
//!     fn name(&self) -> &'static str {
//!         "OneLine"
//!     }
//!
//!     fn parse_str(&self, text: &str, _options: ParseOptions) -> Result<Vec<ParsedMessage>> {
//!         Ok(text
//!             .lines()
//!             .map(|line| ParsedMessage::new(Utc::now(), None, line))
//!             .collect())
//!     }
//! }
//! ```

use chrono::{DateTime, Utc};

use crate::config::ParseOptions;
use crate::error::Result;
use crate::message::{Attachment, Message};

/// One record as produced by a grammar, before the pipeline numbers it.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedMessage {
    /// When the message was sent.
    pub date: DateTime<Utc>,
    /// Author, or `None` for system lines.
    pub author: Option<String>,
    /// Message text.
    pub message: String,
    /// Attachment reference, when attachment parsing was requested.
    pub attachment: Option<Attachment>,
}

impl ParsedMessage {
    /// Creates a record without an attachment.
    pub fn new(date: DateTime<Utc>, author: Option<String>, message: impl Into<String>) -> Self {
        Self {
            date,
            author,
            message: message.into(),
            attachment: None,
        }
    }

    /// Attaches a file reference.
    #[must_use]
    pub fn with_attachment(mut self, attachment: Attachment) -> Self {
        self.attachment = Some(attachment);
        self
    }

    /// Converts into a [`Message`] at the given position.
    pub fn into_message(self, index: usize) -> Message {
        let message = Message::new(index, self.date, self.author, self.message);
        match self.attachment {
            Some(attachment) => message.with_attachment(attachment),
            None => message,
        }
    }
}

/// A line grammar for one chat export format.
///
/// Implementations must return records in transcript order and must return
/// an empty vector for empty text. Text that cannot be interpreted is an
/// error ([`ChatsiftError::Parse`](crate::ChatsiftError::Parse) or
/// [`ChatsiftError::InvalidFormat`](crate::ChatsiftError::InvalidFormat)),
/// never a silently empty result.
pub trait TranscriptGrammar: Send + Sync {
    /// Returns the human-readable name of this grammar.
    fn name(&self) -> &'static str;

    /// Parses transcript text into ordered records.
    fn parse_str(&self, text: &str, options: ParseOptions) -> Result<Vec<ParsedMessage>>;
}
