//! Post-processing and derived views over parsed messages.
//!
//! This module contains:
//! - [`redact`] - Clearing the fabricated author of the encryption notice
//! - [`participants`] - Distinct authors in first-seen order
//! - [`filter`] - Calendar-day boundaries and date-range filtering
//! - [`calendar`] - Wall-clock/instant conversions shared by the parser and filters
//!
//! # Quick Start
//!
//! ```rust
//! use chatsift::core::{
//!     DateRange, participants_from_messages, replace_encryption_message_author,
//!     extract_start_end_dates, filter_messages_by_date, iso_date_string,
//! };
//! ```

pub mod calendar;
pub mod filter;
pub mod participants;
pub mod redact;

pub use filter::{
    BoundaryKind, DateRange, boundary_date, convert_date_input_string_into_date,
    convert_date_input_string_into_date_in, extract_start_end_dates, filter_messages_by_date,
    iso_date_string, iso_date_string_in,
};
pub use participants::participants_from_messages;
pub use redact::{ENCRYPTION_NOTICE_MARKER, ENCRYPTION_NOTICE_WINDOW, replace_encryption_message_author};

// Re-export Message from the crate root
pub use crate::Message;
