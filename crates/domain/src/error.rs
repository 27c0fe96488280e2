// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A blocker window has `end <= start`.
    InvalidWindow {
        /// The offending start instant (RFC 3339).
        start: String,
        /// The offending end instant (RFC 3339).
        end: String,
    },
    /// A blocker name is empty or invalid.
    InvalidName(String),
    /// A blocker kind string is not recognized.
    InvalidKind(String),
    /// An applicability string is not recognized.
    InvalidApplicability(String),
    /// Stored scope columns disagree with the stored applicability.
    ScopeFieldMismatch {
        /// The stored applicability value.
        applicability: String,
        /// What was wrong with the accompanying id columns.
        detail: String,
    },
    /// An event type string is not recognized.
    InvalidEventKind(String),
    /// A home/away value is not recognized.
    InvalidHomeAway(String),
    /// An event duration is out of range.
    InvalidDuration {
        /// The offending duration in minutes.
        minutes: u32,
    },
    /// A date or time string could not be parsed.
    DateTimeParse {
        /// The offending input.
        value: String,
        /// The parsing error message.
        error: String,
    },
    /// A timezone name is not a known IANA timezone.
    InvalidTimezone(String),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidWindow { start, end } => {
                write!(f, "Invalid window: end ({end}) must be after start ({start})")
            }
            Self::InvalidName(msg) => write!(f, "Invalid name: {msg}"),
            Self::InvalidKind(value) => write!(f, "Unknown blocker kind: {value}"),
            Self::InvalidApplicability(value) => {
                write!(f, "Unknown applicability: {value}")
            }
            Self::ScopeFieldMismatch {
                applicability,
                detail,
            } => {
                write!(f, "Scope fields inconsistent for '{applicability}': {detail}")
            }
            Self::InvalidEventKind(value) => write!(f, "Unknown event type: {value}"),
            Self::InvalidHomeAway(value) => write!(f, "Unknown home/away value: {value}"),
            Self::InvalidDuration { minutes } => {
                write!(f, "Invalid duration: {minutes} minutes")
            }
            Self::DateTimeParse { value, error } => {
                write!(f, "Failed to parse date/time '{value}': {error}")
            }
            Self::InvalidTimezone(value) => write!(f, "Unknown timezone: {value}"),
        }
    }
}

impl std::error::Error for DomainError {}
