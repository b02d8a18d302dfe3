//! Configuration types for transcript parsing.
//!
//! - [`ParseOptions`] - per-call flags handed to a
//!   [`TranscriptGrammar`](crate::parser::TranscriptGrammar)
//! - [`WhatsAppConfig`] - settings of the built-in WhatsApp grammar
//!
//! # Example
//!
//! ```rust
//! use chatsift::config::{DateOrder, WhatsAppConfig};
//! use chatsift::parsers::WhatsAppParser;
//!
//! let config = WhatsAppConfig::new().with_date_order(DateOrder::DayFirst);
//! let parser = WhatsAppParser::with_config(config);
//! ```

use serde::{Deserialize, Serialize};

/// Flags for a single grammar invocation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseOptions {
    /// Resolve attachment placeholders into
    /// [`Attachment`](crate::message::Attachment) references.
    ///
    /// Only archived exports ship the media files, so the import pipeline
    /// enables this for archives and leaves it off for pasted text.
    pub parse_attachments: bool,
}

impl ParseOptions {
    /// Creates options with every flag off.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether attachments are parsed.
    #[must_use]
    pub fn with_parse_attachments(mut self, enabled: bool) -> Self {
        self.parse_attachments = enabled;
        self
    }
}

/// Order of the numeric components in a transcript date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateOrder {
    /// `15/01/2024`
    DayFirst,
    /// `1/15/2024`
    MonthFirst,
    /// `2024-01-15`
    YearFirst,
}

/// Configuration for the WhatsApp transcript grammar.
///
/// WhatsApp writes dates in the device locale, so the same export can read
/// `1/2/24` as January 2nd or February 1st. By default the parser infers the
/// order from the whole transcript; set [`date_order`](Self::date_order) to
/// skip inference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WhatsAppConfig {
    /// Force a date order instead of inferring it (default: `None`)
    pub date_order: Option<DateOrder>,

    /// Strip U+200E/U+200F marks from authors and message starts (default: true)
    pub strip_directional_marks: bool,
}

impl Default for WhatsAppConfig {
    fn default() -> Self {
        Self {
            date_order: None,
            strip_directional_marks: true,
        }
    }
}

impl WhatsAppConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Forces the date order.
    #[must_use]
    pub fn with_date_order(mut self, order: DateOrder) -> Self {
        self.date_order = Some(order);
        self
    }

    /// Sets whether directional marks are stripped.
    #[must_use]
    pub fn with_strip_directional_marks(mut self, strip: bool) -> Self {
        self.strip_directional_marks = strip;
        self
    }
}
