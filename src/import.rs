//! The import pipeline: export in, indexed messages out.
//!
//! [`messages_from_file`] composes the stages:
//!
//! 1. [`file_to_text`](crate::source::file_to_text) gets transcript text,
//!    turning acquisition failures into a notification and empty text
//! 2. [`parse_transcript`] runs the grammar and assigns positions
//! 3. [`replace_encryption_message_author`] clears the fabricated author of
//!    the encryption notice
//!
//! Parse failures propagate to the caller.
//!
//! # Example
//!
//! ```rust
//! use chatsift::import::messages_from_file;
//! use chatsift::notify::TracingNotifier;
//! use chatsift::source::ChatFile;
//!
//! # async fn example() -> chatsift::Result<()> {
//! let file = ChatFile::raw("[1/15/24, 10:30 AM] Alice: Hello\n[1/15/24, 10:31 AM] Bob: Hi");
//! let messages = messages_from_file(Some(&file), &TracingNotifier).await?;
//!
//! assert_eq!(messages.len(), 2);
//! assert_eq!(messages[1].index, 1);
//! # Ok(())
//! # }
//! ```
//!
//! Imports are independent: each call owns its archive handle and messages.
//! A caller that starts a newer import is responsible for ignoring the
//! results of older ones.

use tracing::debug;

use crate::Message;
use crate::config::ParseOptions;
use crate::core::redact::replace_encryption_message_author;
use crate::error::Result;
use crate::notify::Notifier;
use crate::parser::TranscriptGrammar;
use crate::parsers::WhatsAppParser;
use crate::source::{ChatFile, file_to_text};

/// Parses transcript text into messages indexed by position.
///
/// Attachment references are resolved only when `is_from_archive` is set,
/// since pasted text has no media next to it. Empty text gives no messages.
///
/// # Errors
///
/// Returns whatever the grammar rejects the text with, typically
/// [`ChatsiftError::Parse`](crate::ChatsiftError::Parse) or
/// [`ChatsiftError::InvalidFormat`](crate::ChatsiftError::InvalidFormat).
pub fn parse_transcript<G>(grammar: &G, text: &str, is_from_archive: bool) -> Result<Vec<Message>>
where
    G: TranscriptGrammar + ?Sized,
{
    let options = ParseOptions::new().with_parse_attachments(is_from_archive);
    let parsed = grammar.parse_str(text, options)?;

    debug!(
        grammar = grammar.name(),
        messages = parsed.len(),
        attachments = is_from_archive,
        "transcript parsed"
    );

    Ok(parsed
        .into_iter()
        .enumerate()
        .map(|(index, msg)| msg.into_message(index))
        .collect())
}

/// Imports an export with a caller-chosen grammar.
///
/// Acquisition failures reach `notifier` and result in `Ok(vec![])`.
pub async fn messages_from_file_with<G>(
    file: Option<&ChatFile>,
    grammar: &G,
    notifier: &dyn Notifier,
) -> Result<Vec<Message>>
where
    G: TranscriptGrammar + ?Sized,
{
    let text = file_to_text(file, notifier).await;
    let is_from_archive = file.is_some_and(ChatFile::is_archive);

    let messages = parse_transcript(grammar, &text, is_from_archive)?;
    Ok(replace_encryption_message_author(messages))
}

/// Imports a WhatsApp export, reading timestamps in local time.
pub async fn messages_from_file(file: Option<&ChatFile>, notifier: &dyn Notifier) -> Result<Vec<Message>> {
    messages_from_file_with(file, &WhatsAppParser::new(), notifier).await
}
