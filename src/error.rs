//! Error types for chatsift.
//!
//! Two layers of errors exist:
//!
//! - [`AcquisitionError`] covers everything that can go wrong while getting
//!   transcript text out of an export (missing transcript, corrupt archive,
//!   undecodable entry). The import pipeline absorbs these at the boundary
//!   between acquisition and parsing, so they never reach the message model.
//! - [`ChatsiftError`] covers everything that propagates to the caller:
//!   malformed transcripts, malformed date inputs, undecodable raw input.

use std::io;
use std::string::FromUtf8Error;

use thiserror::Error;

/// A specialized [`Result`] type for chatsift operations.
///
/// # Example
///
/// ```rust
/// use chatsift::error::Result;
/// use chatsift::Message;
///
/// fn my_function() -> Result<Vec<Message>> {
///     Ok(vec![])
/// }
/// ```
pub type Result<T> = std::result::Result<T, ChatsiftError>;

/// The error type for operations whose failures reach the caller.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ChatsiftError {
    /// The transcript text could not be interpreted by the grammar.
    #[error("Failed to parse {format} transcript{}: {source}", line.map(|l| format!(" (line {l})")).unwrap_or_default())]
    Parse {
        /// The grammar that rejected the text (e.g., "WhatsApp TXT")
        format: &'static str,
        /// The underlying parse error
        #[source]
        source: ParseErrorKind,
        /// One-based line number, if the failure is tied to a line
        line: Option<usize>,
    },

    /// The text doesn't look like the expected export format at all.
    #[error("Invalid {format} format: {message}")]
    InvalidFormat {
        /// The format that was expected
        format: &'static str,
        /// Description of what's wrong
        message: String,
    },

    /// A date input string could not be read as a calendar date.
    #[error("Invalid date '{input}'. Expected format: {expected}")]
    InvalidDate {
        /// The invalid date string that was provided
        input: String,
        /// Expected format description
        expected: &'static str,
    },

    /// Raw input bytes were neither an archive nor valid UTF-8 text.
    #[error("UTF-8 encoding error in {context}: {source}")]
    Utf8 {
        /// Description of where the error occurred
        context: String,
        /// The underlying UTF-8 error
        #[source]
        source: FromUtf8Error,
    },

    /// Transcript acquisition failed, returned by
    /// [`try_file_to_text`](crate::source::try_file_to_text).
    #[error(transparent)]
    Acquisition(#[from] AcquisitionError),
}

/// Kinds of parse errors that can occur.
#[derive(Debug, Error)]
pub enum ParseErrorKind {
    /// A header matched but its date or time is not a real instant
    #[error("invalid timestamp '{0}'")]
    Timestamp(String),
    /// Regex/pattern matching error
    #[error("{0}")]
    Pattern(String),
}

/// Failures while locating or decoding the transcript inside an export.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AcquisitionError {
    /// The archive has no entry that looks like a chat transcript.
    #[error("No txt files found in archive")]
    NoTranscriptFound,

    /// The archive is corrupt or the selected entry could not be decoded.
    #[error("Failed to read archive{}: {source}", entry.as_ref().map(|e| format!(" entry '{e}'")).unwrap_or_default())]
    ArchiveDecodeFailure {
        /// The entry being decoded, if the failure happened past the index
        entry: Option<String>,
        /// The underlying decode error
        #[source]
        source: DecodeErrorKind,
    },
}

/// Kinds of archive decode errors.
#[derive(Debug, Error)]
pub enum DecodeErrorKind {
    /// The zip container itself is malformed
    #[error("{0}")]
    Zip(#[from] zip::result::ZipError),
    /// Reading the entry stream failed
    #[error("{0}")]
    Io(#[from] io::Error),
    /// The entry is not UTF-8 text
    #[error("{0}")]
    Utf8(#[from] FromUtf8Error),
    /// The background decode task did not complete
    #[error("{0}")]
    Task(#[from] tokio::task::JoinError),
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl ChatsiftError {
    /// Creates a parse error for the WhatsApp grammar.
    pub fn whatsapp_parse(message: impl Into<String>, line: Option<usize>) -> Self {
        ChatsiftError::Parse {
            format: "WhatsApp TXT",
            source: ParseErrorKind::Pattern(message.into()),
            line,
        }
    }

    /// Creates a timestamp parse error for the WhatsApp grammar.
    pub fn whatsapp_timestamp(raw: impl Into<String>, line: usize) -> Self {
        ChatsiftError::Parse {
            format: "WhatsApp TXT",
            source: ParseErrorKind::Timestamp(raw.into()),
            line: Some(line),
        }
    }

    /// Creates an invalid format error.
    pub fn invalid_format(format: &'static str, message: impl Into<String>) -> Self {
        ChatsiftError::InvalidFormat {
            format,
            message: message.into(),
        }
    }

    /// Creates an invalid date error.
    pub fn invalid_date(input: impl Into<String>) -> Self {
        ChatsiftError::InvalidDate {
            input: input.into(),
            expected: "YYYY-MM-DD",
        }
    }

    /// Returns `true` if this is a parse error.
    pub fn is_parse(&self) -> bool {
        matches!(self, ChatsiftError::Parse { .. })
    }

    /// Returns `true` if this is an invalid format error.
    pub fn is_invalid_format(&self) -> bool {
        matches!(self, ChatsiftError::InvalidFormat { .. })
    }

    /// Returns `true` if this is a date-related error.
    pub fn is_invalid_date(&self) -> bool {
        matches!(self, ChatsiftError::InvalidDate { .. })
    }
}

impl AcquisitionError {
    /// Creates a decode failure that happened while indexing the archive.
    pub fn corrupt(source: impl Into<DecodeErrorKind>) -> Self {
        AcquisitionError::ArchiveDecodeFailure {
            entry: None,
            source: source.into(),
        }
    }

    /// Creates a decode failure for a specific entry.
    pub fn entry(name: impl Into<String>, source: impl Into<DecodeErrorKind>) -> Self {
        AcquisitionError::ArchiveDecodeFailure {
            entry: Some(name.into()),
            source: source.into(),
        }
    }

    /// Returns `true` if no transcript-like entry was found.
    pub fn is_no_transcript(&self) -> bool {
        matches!(self, AcquisitionError::NoTranscriptFound)
    }

    /// Returns `true` if the archive or entry could not be decoded.
    pub fn is_decode_failure(&self) -> bool {
        matches!(self, AcquisitionError::ArchiveDecodeFailure { .. })
    }
}
