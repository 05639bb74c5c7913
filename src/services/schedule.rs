//! Past/upcoming classification of shows relative to a reference instant.
//!
//! A show is past when it started strictly before `now` and upcoming when it
//! starts strictly after. A show starting exactly at `now` is neither.

use chrono::{DateTime, TimeZone, Utc};
use serde::Serialize;

/// Display format for show start times in listings.
pub const START_TIME_FORMAT: &str = "%m/%d/%Y, %H:%M:%S";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ShowTiming {
    Past,
    Now,
    Upcoming,
}

pub fn classify<Tz: TimeZone>(start_time: &DateTime<Tz>, now: DateTime<Utc>) -> ShowTiming {
    let start = start_time.with_timezone(&Utc);
    match start.cmp(&now) {
        std::cmp::Ordering::Less => ShowTiming::Past,
        std::cmp::Ordering::Equal => ShowTiming::Now,
        std::cmp::Ordering::Greater => ShowTiming::Upcoming,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partitioned<T> {
    pub past: Vec<T>,
    pub upcoming: Vec<T>,
}

/// Splits `items` into past and upcoming buckets, dropping anything that
/// starts exactly at `now`. Input order is kept within each bucket.
pub fn partition<T, Tz, F>(
    items: impl IntoIterator<Item = T>,
    now: DateTime<Utc>,
    start_of: F,
) -> Partitioned<T>
where
    Tz: TimeZone,
    F: Fn(&T) -> DateTime<Tz>,
{
    let mut past = Vec::new();
    let mut upcoming = Vec::new();

    for item in items {
        match classify(&start_of(&item), now) {
            ShowTiming::Past => past.push(item),
            ShowTiming::Upcoming => upcoming.push(item),
            ShowTiming::Now => {}
        }
    }

    Partitioned { past, upcoming }
}

pub fn count_upcoming<'a, Tz>(
    start_times: impl IntoIterator<Item = &'a DateTime<Tz>>,
    now: DateTime<Utc>,
) -> u64
where
    Tz: TimeZone + 'a,
{
    start_times
        .into_iter()
        .filter(|start| classify(*start, now) == ShowTiming::Upcoming)
        .count() as u64
}

pub fn format_start_time<Tz>(start_time: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    start_time.format(START_TIME_FORMAT).to_string()
}
