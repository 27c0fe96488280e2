// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Field-level validation shared by the API surface and the import pipeline.

use crate::error::DomainError;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

/// Durations longer than a full day are rejected as data-entry errors.
pub const MAX_DURATION_MINUTES: u32 = 1440;

/// Validates a blocker name.
///
/// # Errors
///
/// Returns an error if the name is empty or whitespace-only.
pub fn validate_blocker_name(name: &str) -> Result<(), DomainError> {
    if name.trim().is_empty() {
        return Err(DomainError::InvalidName(String::from(
            "name must not be empty",
        )));
    }
    Ok(())
}

/// Validates an event duration.
///
/// # Errors
///
/// Returns an error if the duration is zero or exceeds 24 hours.
pub const fn validate_duration_minutes(minutes: u32) -> Result<(), DomainError> {
    if minutes == 0 || minutes > MAX_DURATION_MINUTES {
        return Err(DomainError::InvalidDuration { minutes });
    }
    Ok(())
}

/// Validates an IANA timezone name.
///
/// # Errors
///
/// Returns an error if the name is not a known IANA timezone.
pub fn validate_timezone(timezone: &str) -> Result<(), DomainError> {
    timezone
        .parse::<Tz>()
        .map(|_| ())
        .map_err(|_| DomainError::InvalidTimezone(timezone.to_string()))
}

/// Parses a date and time in an organization's timezone into an absolute
/// instant.
///
/// The date is `YYYY-MM-DD`; the time is `HH:MM`, with `HH:MM:SS` accepted
/// as a fallback. The timezone must be a valid IANA name. A local time made
/// ambiguous by a DST transition resolves to the earlier instant; a local
/// time skipped by a transition is an error.
///
/// # Errors
///
/// Returns an error if the date, time, or timezone cannot be parsed, or if
/// the local time does not exist in the given timezone.
pub fn parse_local_instant(date: &str, time: &str, timezone: &str) -> Result<DateTime<Utc>, DomainError> {
    let tz: Tz = timezone
        .parse::<Tz>()
        .map_err(|_| DomainError::InvalidTimezone(timezone.to_string()))?;

    let naive_date: NaiveDate =
        NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d").map_err(|error| {
            DomainError::DateTimeParse {
                value: date.to_string(),
                error: error.to_string(),
            }
        })?;

    let trimmed_time: &str = time.trim();
    let naive_time: NaiveTime = NaiveTime::parse_from_str(trimmed_time, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(trimmed_time, "%H:%M:%S"))
        .map_err(|error| DomainError::DateTimeParse {
            value: time.to_string(),
            error: error.to_string(),
        })?;

    let naive: NaiveDateTime = naive_date.and_time(naive_time);
    tz.from_local_datetime(&naive).earliest().map_or_else(
        || {
            Err(DomainError::DateTimeParse {
                value: format!("{date} {time}"),
                error: format!("local time does not exist in {timezone}"),
            })
        },
        |localized| Ok(localized.with_timezone(&Utc)),
    )
}
