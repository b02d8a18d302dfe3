//! Line-level building blocks of the WhatsApp transcript grammar.
//!
//! WhatsApp exports vary by platform and locale:
//! - iOS: `[1/15/24, 10:30:45 AM] Sender: Message`
//! - iOS (EU): `[15.01.24, 10:30:45] Sender: Message`
//! - Android: `15/01/2024, 10:30 - Sender: Message`
//! - Android (RU): `26.10.2025, 20:40 - Sender: Message`
//!
//! All of them share one header shape, matched by [`parse_header`]. The
//! meaning of the numeric date groups is decided per transcript by
//! [`infer_date_order`].

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::DateOrder;
use crate::message::Attachment;

/// Header of a message line: date, time, then the body after `] ` or ` - `.
static HEADER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[\x{200E}\x{200F}]*\[?(\d{1,4})([-/.])\s?(\d{1,4})[-/.]\s?(\d{1,4})[,.]?\s\D*?(\d{1,2})[.:](\d{2})(?:[.:](\d{2}))?(?:\s?([AaPp])\.?\s?[Mm]\.?)?\]?(?:\s-|:)?\s(.+)$",
    )
    .unwrap()
});

// <attached: 00000042-PHOTO-2020-06-07-15-13-20.jpg>
static IOS_ATTACHMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"<attached: ([^>]+)>").unwrap());

// IMG-20200607-WA0001.jpg (file attached)
static ANDROID_ATTACHMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^[\x{200E}]?(.+?\.\w+) \(file attached\)").unwrap());

const DIRECTIONAL_MARKS: [char; 2] = ['\u{200E}', '\u{200F}'];

/// Numeric date groups as written, before the order is known.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawDate {
    /// The three groups in written order.
    pub parts: [u32; 3],
    /// Digit count of the first group (4 means year-first).
    pub first_width: usize,
    /// Separator between the groups.
    pub separator: char,
}

/// Clock time as written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawTime {
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
    /// `Some('a')` / `Some('p')` for 12-hour clocks.
    pub meridiem: Option<char>,
}

/// A recognized message header line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageHeader<'a> {
    pub date: RawDate,
    pub time: RawTime,
    /// Date and time text, for error messages.
    pub stamp: &'a str,
    /// Everything after the header: `author: text` or a system notice.
    pub body: &'a str,
}

/// Matches a line against the header grammar.
///
/// Returns `None` for continuation lines.
pub fn parse_header(line: &str) -> Option<MessageHeader<'_>> {
    let caps = HEADER.captures(line)?;
    let number = |i: usize| caps.get(i).and_then(|m| m.as_str().parse::<u32>().ok());

    let first = caps.get(1)?;
    let date = RawDate {
        parts: [number(1)?, number(3)?, number(4)?],
        first_width: first.as_str().len(),
        separator: caps.get(2)?.as_str().chars().next()?,
    };

    let time = RawTime {
        hour: number(5)?,
        minute: number(6)?,
        second: number(7).unwrap_or(0),
        meridiem: caps
            .get(8)
            .and_then(|m| m.as_str().chars().next())
            .map(|c| c.to_ascii_lowercase()),
    };

    let body = caps.get(9)?;
    let stamp = line[first.start()..body.start()]
        .trim_end()
        .trim_end_matches(['-', ']', ':'])
        .trim_end();

    Some(MessageHeader {
        date,
        time,
        stamp,
        body: body.as_str(),
    })
}

/// Decides how to read the numeric date groups of a whole transcript.
///
/// Rules, in order:
/// 1. a four-digit first group means year-first
/// 2. any first group above 12 means day-first
/// 3. any second group above 12 means month-first
/// 4. the group that changes more often between consecutive headers is the day
/// 5. `/` separators default to month-first, `.` and `-` to day-first
pub fn infer_date_order<'a, I>(dates: I) -> DateOrder
where
    I: IntoIterator<Item = &'a RawDate>,
{
    let dates: Vec<&RawDate> = dates.into_iter().collect();

    if dates.iter().any(|d| d.first_width == 4) {
        return DateOrder::YearFirst;
    }
    if dates.iter().any(|d| d.parts[0] > 12) {
        return DateOrder::DayFirst;
    }
    if dates.iter().any(|d| d.parts[1] > 12) {
        return DateOrder::MonthFirst;
    }

    let (mut first_changes, mut second_changes) = (0usize, 0usize);
    for pair in dates.windows(2) {
        if pair[0].parts[0] != pair[1].parts[0] {
            first_changes += 1;
        }
        if pair[0].parts[1] != pair[1].parts[1] {
            second_changes += 1;
        }
    }
    if first_changes > second_changes {
        return DateOrder::DayFirst;
    }
    if second_changes > first_changes {
        return DateOrder::MonthFirst;
    }

    match dates.first().map(|d| d.separator) {
        Some('/') => DateOrder::MonthFirst,
        _ => DateOrder::DayFirst,
    }
}

/// Builds the wall-clock timestamp of a header.
///
/// Two-digit years are read as 20YY. Returns `None` when the groups do not
/// form a real date or time.
pub fn build_timestamp(date: &RawDate, time: &RawTime, order: DateOrder) -> Option<NaiveDateTime> {
    let [a, b, c] = date.parts;
    let (year, month, day) = match order {
        DateOrder::DayFirst => (c, b, a),
        DateOrder::MonthFirst => (c, a, b),
        DateOrder::YearFirst => (a, b, c),
    };
    let year = if year < 100 { 2000 + year } else { year };

    let hour = match time.meridiem {
        Some('a') if time.hour == 12 => 0,
        Some('p') if time.hour < 12 => time.hour + 12,
        _ => time.hour,
    };

    let date = NaiveDate::from_ymd_opt(i32::try_from(year).ok()?, month, day)?;
    let time = NaiveTime::from_hms_opt(hour, time.minute, time.second)?;
    Some(date.and_time(time))
}

/// Splits a header body into author and text.
///
/// A body without `": "`, or with a blank part before it, is a system notice.
pub fn split_author(body: &str) -> (Option<&str>, &str) {
    match body.split_once(": ") {
        Some((author, text)) if !author.trim().is_empty() => (Some(author.trim()), text),
        _ => (None, body),
    }
}

/// Removes left-to-right / right-to-left marks around a string.
pub fn strip_directional_marks(s: &str) -> &str {
    s.trim_matches(DIRECTIONAL_MARKS)
}

/// Finds the attachment placeholder in a message, if any.
pub fn parse_attachment(message: &str) -> Option<Attachment> {
    IOS_ATTACHMENT
        .captures(message)
        .or_else(|| ANDROID_ATTACHMENT.captures(message))
        .and_then(|caps| caps.get(1))
        .map(|m| Attachment::new(m.as_str().trim()))
}
