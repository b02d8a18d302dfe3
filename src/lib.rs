//! # Chatsift
//!
//! A Rust library for importing WhatsApp chat exports into an indexed,
//! date-filterable message list.
//!
//! ## Overview
//!
//! An export arrives either as a zip archive (transcript plus media) or as
//! the transcript text itself. Chatsift:
//!
//! - finds the transcript inside the archive, even when it is not named
//!   `_chat.txt`
//! - parses the free-form transcript into [`Message`] records
//! - clears the fake author some exports put on the encryption notice
//! - derives participants and filters by inclusive calendar-day ranges
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use chatsift::prelude::*;
//!
//! # async fn example(bytes: Vec<u8>) -> Result<()> {
//! let file = extract_file(bytes)?;
//! let messages = messages_from_file(file.as_ref(), &TracingNotifier).await?;
//!
//! let participants = participants_from_messages(&messages);
//! let june = DateRange::from_date_inputs("2024-06-01", "2024-06-30")?;
//! let in_june = june.filter(&messages);
//!
//! println!("{} participants, {} messages in June", participants.len(), in_june.len());
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Failing to get the transcript out of an archive is not an error for the
//! caller: the [`Notifier`](notify::Notifier) hears about it and the import
//! yields no messages. Transcript text that cannot be parsed and malformed
//! date inputs are returned as [`ChatsiftError`].
//!
//! ## Module Structure
//!
//! - [`source`] - [`ChatFile`](source::ChatFile), [`extract_file`](source::extract_file), [`file_to_text`](source::file_to_text), [`try_file_to_text`](source::try_file_to_text)
//! - [`archive`] - transcript lookup inside zip exports
//! - [`import`] - [`messages_from_file`](import::messages_from_file) and the grammar adapter
//! - [`parser`] - the [`TranscriptGrammar`](parser::TranscriptGrammar) seam
//! - [`parsers`] - [`WhatsAppParser`](parsers::WhatsAppParser)
//! - [`parsing`] - header, date order and attachment helpers for the grammar
//! - [`core`] - redaction, participants, date boundaries and filtering
//! - [`config`] - [`ParseOptions`](config::ParseOptions), [`WhatsAppConfig`](config::WhatsAppConfig)
//! - [`notify`] - the failure sink and its stock implementations
//! - [`error`] - [`ChatsiftError`], [`AcquisitionError`](error::AcquisitionError), [`Result`]
//! - [`prelude`] - Convenient re-exports

pub mod archive;
pub mod config;
pub mod core;
pub mod error;
pub mod import;
pub mod message;
pub mod notify;
pub mod parser;
pub mod parsers;
pub mod parsing;
pub mod source;

// Re-export the main types at the crate root for convenience
pub use error::{ChatsiftError, Result};
pub use message::Message;

/// Convenient re-exports for common usage.
///
/// Import everything you need with a single line:
///
/// ```rust
/// use chatsift::prelude::*;
/// ```
pub mod prelude {
    // Message model
    pub use crate::Message;
    pub use crate::message::Attachment;

    // Error types
    pub use crate::error::{AcquisitionError, ChatsiftError, Result};

    // Input and pipeline
    pub use crate::import::{messages_from_file, messages_from_file_with, parse_transcript};
    pub use crate::source::{ChatFile, extract_file, file_to_text, try_file_to_text};

    // Notification sinks
    pub use crate::notify::{Notifier, SilentNotifier, TracingNotifier};

    // Grammar
    pub use crate::config::{DateOrder, ParseOptions, WhatsAppConfig};
    pub use crate::parser::{ParsedMessage, TranscriptGrammar};
    pub use crate::parsers::WhatsAppParser;

    // Derived views
    pub use crate::core::{
        BoundaryKind, DateRange, convert_date_input_string_into_date, extract_start_end_dates,
        filter_messages_by_date, iso_date_string, participants_from_messages,
        replace_encryption_message_author,
    };
}
