// Date ranges for trending searches
use crate::{Error, Result};
use chrono::{DateTime, Duration, NaiveTime, SecondsFormat, TimeZone};
use std::fmt;
use std::str::FromStr;

/// How far back a trending search looks
///
/// Month and year are fixed day counts (30 and 364), not calendar math.
/// That's how the range has always been computed, so leave it alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrendWindow {
    Day,
    Week,
    Month,
    Year,
}

impl TrendWindow {
    pub fn days(&self) -> i64 {
        match self {
            TrendWindow::Day => 1,
            TrendWindow::Week => 6,
            TrendWindow::Month => 30,
            TrendWindow::Year => 364,
        }
    }

    pub fn offset(&self) -> Duration {
        Duration::hours(24 * self.days())
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TrendWindow::Day => "day",
            TrendWindow::Week => "week",
            TrendWindow::Month => "month",
            TrendWindow::Year => "year",
        }
    }
}

impl FromStr for TrendWindow {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "day" => Ok(TrendWindow::Day),
            "week" => Ok(TrendWindow::Week),
            "month" => Ok(TrendWindow::Month),
            "year" => Ok(TrendWindow::Year),
            other => Err(Error::InvalidWindow(other.to_string())),
        }
    }
}

impl fmt::Display for TrendWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Midnight of `now`'s calendar day, in `now`'s own timezone
///
/// An ambiguous midnight (clocks turned back over it) resolves to the
/// earlier of the two instants. When midnight is skipped by a DST gap, the
/// day starts at the first local minute that does exist.
pub fn start_of_day<Tz: TimeZone>(now: &DateTime<Tz>) -> DateTime<Tz> {
    let tz = now.timezone();
    let mut local = now.date_naive().and_time(NaiveTime::MIN);

    while local <= now.naive_local() {
        if let Some(start) = local.and_local_timezone(tz.clone()).earliest() {
            return start;
        }
        local += Duration::minutes(1);
    }

    // Gap ended off a minute boundary and `now` is still inside that minute
    now.clone()
}

/// Build `<method>:<from>..<today>` for the search query
///
/// Pure: the same inputs always give the same string.
pub fn resolve_range<Tz>(method: &str, window: &str, now: &DateTime<Tz>) -> Result<String>
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let window: TrendWindow = window.parse()?;

    let today = start_of_day(now);
    let from = today.clone() - window.offset();

    Ok(format!(
        "{}:{}..{}",
        method,
        from.to_rfc3339_opts(SecondsFormat::AutoSi, true),
        today.to_rfc3339_opts(SecondsFormat::AutoSi, true)
    ))
}
