//! Filter messages by calendar date range.
//!
//! Date inputs are calendar days (`YYYY-MM-DD`) in local time, while messages
//! carry instants. [`boundary_date`] turns a day into the first or last
//! instant it covers, and [`filter_messages_by_date`] keeps messages between
//! two instants, both ends inclusive.
//!
//! # Boundaries
//!
//! | Kind | Instant |
//! |------|---------|
//! | [`BoundaryKind::Start`] | end of the previous day + 1 ms (local midnight) |
//! | [`BoundaryKind::End`] | start of the next day - 1 ms |
//!
//! Both are computed from day boundaries in the target time zone, so a day
//! that is 23 or 25 hours long because of DST is covered exactly.
//!
//! # Example
//!
//! ```
//! use chatsift::Message;
//! use chatsift::core::filter::DateRange;
//! use chrono::{TimeZone, Utc};
//!
//! # fn main() -> chatsift::Result<()> {
//! let messages = vec![
//!     Message::new(0, Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap(), Some("Alice"), "Old"),
//!     Message::new(1, Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap(), Some("Alice"), "New"),
//! ];
//!
//! let range = DateRange::from_date_inputs_in("2024-06-01", "2024-12-31", &Utc)?;
//! let filtered = range.filter(&messages);
//! assert_eq!(filtered.len(), 1);
//! assert_eq!(filtered[0].message, "New");
//! assert_eq!(filtered[0].index, 1);
//! # Ok(())
//! # }
//! ```

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Local, NaiveDate, TimeDelta, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use super::calendar::{end_of_day, local_date, start_of_day};
use crate::Message;
use crate::error::{ChatsiftError, Result};

const DATE_INPUT_FORMAT: &str = "%Y-%m-%d";

/// Which end of a calendar day a boundary marks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoundaryKind {
    /// Earliest instant of the day.
    Start,
    /// Latest instant of the day.
    End,
}

impl FromStr for BoundaryKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "start" => Ok(BoundaryKind::Start),
            "end" => Ok(BoundaryKind::End),
            _ => Err(format!("Unknown boundary kind: {s}. Expected: start, end")),
        }
    }
}

impl fmt::Display for BoundaryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryKind::Start => write!(f, "start"),
            BoundaryKind::End => write!(f, "end"),
        }
    }
}

/// Returns the first or last instant of `date` in `tz`.
///
/// # Errors
///
/// Returns [`ChatsiftError::InvalidDate`] when the boundary falls outside
/// the representable range (the first or last supported day).
pub fn boundary_date<Tz: TimeZone>(kind: BoundaryKind, date: NaiveDate, tz: &Tz) -> Result<DateTime<Utc>> {
    let boundary = match kind {
        BoundaryKind::Start => date
            .pred_opt()
            .and_then(|prev| end_of_day(prev, tz))
            .and_then(|end| end.checked_add_signed(TimeDelta::milliseconds(1)))
            .or_else(|| start_of_day(date, tz)),
        BoundaryKind::End => end_of_day(date, tz),
    };

    boundary.ok_or_else(|| ChatsiftError::invalid_date(date.format(DATE_INPUT_FORMAT).to_string()))
}

/// Parses a `YYYY-MM-DD` input and returns its boundary in local time.
///
/// # Errors
///
/// Returns [`ChatsiftError::InvalidDate`] if `input` is not a valid date.
///
/// # Example
///
/// ```
/// use chatsift::core::filter::{BoundaryKind, convert_date_input_string_into_date};
///
/// let start = convert_date_input_string_into_date(BoundaryKind::Start, "2023-06-10")?;
/// let end = convert_date_input_string_into_date(BoundaryKind::End, "2023-06-10")?;
/// assert!(start < end);
///
/// assert!(convert_date_input_string_into_date(BoundaryKind::Start, "10/06/2023").is_err());
/// # Ok::<(), chatsift::ChatsiftError>(())
/// ```
pub fn convert_date_input_string_into_date(kind: BoundaryKind, input: &str) -> Result<DateTime<Utc>> {
    convert_date_input_string_into_date_in(kind, input, &Local)
}

/// Parses a `YYYY-MM-DD` input and returns its boundary in `tz`.
pub fn convert_date_input_string_into_date_in<Tz: TimeZone>(
    kind: BoundaryKind,
    input: &str,
    tz: &Tz,
) -> Result<DateTime<Utc>> {
    let date = NaiveDate::parse_from_str(input.trim(), DATE_INPUT_FORMAT)
        .map_err(|_| ChatsiftError::invalid_date(input))?;
    boundary_date(kind, date, tz)
}

/// Inclusive range of instants.
///
/// A range whose start is after its end is empty; the ends are never swapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    /// First instant included.
    pub start: DateTime<Utc>,
    /// Last instant included.
    pub end: DateTime<Utc>,
}

impl DateRange {
    /// Creates a range from two instants.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// Builds the range covering two `YYYY-MM-DD` inputs in local time.
    ///
    /// # Errors
    ///
    /// Returns [`ChatsiftError::InvalidDate`] if either input is malformed.
    pub fn from_date_inputs(start: &str, end: &str) -> Result<Self> {
        Self::from_date_inputs_in(start, end, &Local)
    }

    /// Builds the range covering two `YYYY-MM-DD` inputs in `tz`.
    pub fn from_date_inputs_in<Tz: TimeZone>(start: &str, end: &str, tz: &Tz) -> Result<Self> {
        Ok(Self {
            start: convert_date_input_string_into_date_in(BoundaryKind::Start, start, tz)?,
            end: convert_date_input_string_into_date_in(BoundaryKind::End, end, tz)?,
        })
    }

    /// Returns `true` if `instant` lies within the range.
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant <= self.end
    }

    /// Returns `true` if no instant can satisfy the range.
    pub fn is_empty(&self) -> bool {
        self.start > self.end
    }

    /// Keeps the messages dated within the range.
    pub fn filter(&self, messages: &[Message]) -> Vec<Message> {
        if self.is_empty() {
            return Vec::new();
        }
        messages
            .iter()
            .filter(|msg| self.contains(msg.date))
            .cloned()
            .collect()
    }
}

/// Keeps messages with `start <= date <= end`.
///
/// Order and `index` of kept messages are unchanged.
pub fn filter_messages_by_date(messages: &[Message], start: DateTime<Utc>, end: DateTime<Utc>) -> Vec<Message> {
    DateRange::new(start, end).filter(messages)
}

/// Dates of the first and last message.
///
/// Both ends are the current instant when there are no messages.
pub fn extract_start_end_dates(messages: &[Message]) -> DateRange {
    match (messages.first(), messages.last()) {
        (Some(first), Some(last)) => DateRange::new(first.date, last.date),
        _ => {
            let now = Utc::now();
            DateRange::new(now, now)
        }
    }
}

/// Renders the local calendar date of `instant` as `YYYY-MM-DD`.
pub fn iso_date_string(instant: DateTime<Utc>) -> String {
    iso_date_string_in(instant, &Local)
}

/// Renders the calendar date of `instant` in `tz` as `YYYY-MM-DD`.
pub fn iso_date_string_in<Tz: TimeZone>(instant: DateTime<Utc>, tz: &Tz) -> String {
    local_date(instant, tz).format(DATE_INPUT_FORMAT).to_string()
}
