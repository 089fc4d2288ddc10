use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, TimeZone, Utc};

use crate::domain::validation::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// A point in time normalized to UTC, as used by scheduling and date-range
/// queries.
///
/// Heterogeneous inputs (ISO-8601 with offset, `YYYY-MM-DD HH:MM:SS`, bare
/// dates, native `chrono` values) are coerced into a single canonical
/// instant. The wire form is always the millisecond-precision ISO-8601 UTC
/// string produced by [`ScheduledDate::to_iso8601`].
pub struct ScheduledDate(DateTime<Utc>);

impl ScheduledDate {
    /// Field name used by Solapi (`scheduledDate`).
    pub const FIELD: &'static str = "scheduledDate";

    /// Wrap an already-native date/time value, converting to UTC.
    pub fn from_datetime<Tz: TimeZone>(value: DateTime<Tz>) -> Self {
        Self(value.with_timezone(&Utc))
    }

    /// Parse a date string into a canonical UTC instant.
    ///
    /// Accepted forms, tried in order:
    /// - full ISO-8601 / RFC 3339 with offset (`2024-05-01T09:30:00+09:00`),
    /// - `YYYY-MM-DD HH:MM:SS`, read as UTC,
    /// - bare `YYYY-MM-DD`, read as midnight UTC.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }

        if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
            return Ok(Self(parsed.with_timezone(&Utc)));
        }

        if let Ok(parsed) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S") {
            return Ok(Self(parsed.and_utc()));
        }

        if let Ok(parsed) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
            // Bare dates mean the start of that day.
            let midnight = parsed
                .and_hms_opt(0, 0, 0)
                .ok_or_else(|| ValidationError::InvalidDate {
                    input: trimmed.to_owned(),
                })?;
            return Ok(Self(midnight.and_utc()));
        }

        Err(ValidationError::InvalidDate {
            input: trimmed.to_owned(),
        })
    }

    /// The canonical UTC instant.
    pub fn as_datetime(&self) -> DateTime<Utc> {
        self.0
    }

    /// Millisecond-precision ISO-8601 UTC string (`2024-05-01T00:30:00.000Z`).
    pub fn to_iso8601(&self) -> String {
        self.0.to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}

impl std::str::FromStr for ScheduledDate {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for ScheduledDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_iso8601())
    }
}
