//! Wall-clock to instant conversions in an arbitrary time zone.
//!
//! Transcripts and date inputs are both written in local wall-clock time,
//! while messages carry absolute instants. Everything that crosses that line
//! goes through here so DST gaps and folds are handled the same way.

use chrono::{DateTime, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, TimeZone, Utc};

/// Resolves a wall-clock time in `tz` to an instant.
///
/// An ambiguous time (DST fold) resolves to the earlier instant. A time that
/// does not exist (DST gap) is moved forward by one hour.
pub fn resolve_local<Tz: TimeZone>(tz: &Tz, naive: NaiveDateTime) -> Option<DateTime<Utc>> {
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => Some(dt.with_timezone(&Utc)),
        LocalResult::Ambiguous(earliest, _) => Some(earliest.with_timezone(&Utc)),
        LocalResult::None => {
            let shifted = naive.checked_add_signed(TimeDelta::hours(1))?;
            tz.from_local_datetime(&shifted)
                .earliest()
                .map(|dt| dt.with_timezone(&Utc))
        }
    }
}

/// First instant of `date` in `tz`.
pub fn start_of_day<Tz: TimeZone>(date: NaiveDate, tz: &Tz) -> Option<DateTime<Utc>> {
    resolve_local(tz, date.and_time(NaiveTime::MIN))
}

/// Last millisecond of `date` in `tz`: one millisecond before the next day starts.
pub fn end_of_day<Tz: TimeZone>(date: NaiveDate, tz: &Tz) -> Option<DateTime<Utc>> {
    let next = start_of_day(date.succ_opt()?, tz)?;
    next.checked_sub_signed(TimeDelta::milliseconds(1))
}

/// Calendar date of `instant` as seen in `tz`.
pub fn local_date<Tz: TimeZone>(instant: DateTime<Utc>, tz: &Tz) -> NaiveDate {
    instant.with_timezone(tz).date_naive()
}
