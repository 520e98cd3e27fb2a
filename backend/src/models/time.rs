//! Time normalization: local wall-clock time → Julian Day.

use chrono::{DateTime, Duration, LocalResult, NaiveDateTime, Offset, TimeZone, Timelike, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Expected literal layout for request date-times.
pub const LOCAL_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Julian Day of the Unix epoch, 1970-01-01 00:00:00 UTC.
pub const UNIX_EPOCH_JD: f64 = 2440587.5;

/// Julian Day representation.
/// JD 0 = 4713-01-01 12:00:00 BCE (proleptic Julian calendar), day boundaries at UTC noon.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct JulianDay(qtty::Days);

impl JulianDay {
    /// Create a new JD value.
    pub fn new<V: Into<qtty::Days>>(v: V) -> Self {
        Self(v.into())
    }

    /// Raw JD value as f64.
    pub fn value(&self) -> f64 {
        self.0.value()
    }

    /// Days elapsed since J2000.0 (2000-01-01 12:00 TT, taken here on the UTC scale).
    pub fn days_since_j2000(&self) -> f64 {
        self.value() - 2451545.0
    }

    /// Convert to chrono DateTime<Utc>, rounded to the nearest second.
    pub fn to_datetime(&self) -> DateTime<Utc> {
        let secs = ((self.value() - UNIX_EPOCH_JD) * 86400.0).round() as i64;
        DateTime::from_timestamp(secs, 0).unwrap_or(DateTime::UNIX_EPOCH)
    }

    /// Create from chrono DateTime<Utc>.
    ///
    /// The integer part comes from the UTC calendar date, the fraction from
    /// the UTC time of day.
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        let days = dt
            .date_naive()
            .signed_duration_since(DateTime::UNIX_EPOCH.date_naive())
            .num_days() as f64;
        let hours = dt.hour() as f64 + dt.minute() as f64 / 60.0 + dt.second() as f64 / 3600.0;
        Self::new(UNIX_EPOCH_JD + days + hours / 24.0)
    }
}

impl From<f64> for JulianDay {
    fn from(v: f64) -> Self {
        JulianDay::new(v)
    }
}

/// Parse an IANA timezone name.
pub fn parse_timezone(name: &str) -> ChartResult<Tz> {
    name.parse::<Tz>()
        .map_err(|_| ChartError::UnknownTimezone {
            name: name.to_string(),
        })
}

/// Parse a `YYYY-MM-DD HH:MM` literal into a naive wall-clock time.
pub fn parse_local_datetime(input: &str) -> ChartResult<NaiveDateTime> {
    NaiveDateTime::parse_from_str(input.trim(), LOCAL_DATETIME_FORMAT)
        .map_err(|e| ChartError::parse(input, format!("expected YYYY-MM-DD HH:MM ({})", e)))
}

/// Interpret a wall-clock time in `tz` and return the UTC instant.
///
/// Ambiguous times (clocks set back) take the standard-time reading, which
/// is the later of the two instants. Times skipped by a forward jump use the
/// offset that was in force before the jump.
pub fn localize(naive: NaiveDateTime, tz: Tz) -> DateTime<Utc> {
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => dt.with_timezone(&Utc),
        LocalResult::Ambiguous(_, later) => later.with_timezone(&Utc),
        LocalResult::None => {
            let before = tz
                .offset_from_utc_datetime(&(naive - Duration::hours(24)))
                .fix()
                .local_minus_utc();
            Utc.from_utc_datetime(&(naive - Duration::seconds(before as i64)))
        }
    }
}

/// Convert a local date-time literal in the named timezone to a Julian Day.
pub fn normalize(local_datetime: &str, timezone_name: &str) -> ChartResult<JulianDay> {
    let naive = parse_local_datetime(local_datetime)?;
    let tz = parse_timezone(timezone_name)?;
    let utc = localize(naive, tz);
    log::debug!(
        "normalized '{}' in {} to {} UTC",
        local_datetime,
        timezone_name,
        utc.format("%Y-%m-%d %H:%M")
    );
    Ok(JulianDay::from_datetime(utc))
}

/// Wall-clock time in the named timezone for an instant.
pub fn to_local(instant: JulianDay, timezone_name: &str) -> ChartResult<NaiveDateTime> {
    let tz = parse_timezone(timezone_name)?;
    Ok(instant.to_datetime().with_timezone(&tz).naive_local())
}

#[cfg(test)]
#[path = "time_tests.rs"]
mod time_tests;
