use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Identifiers are opaque: the service hands out integers today, but nothing here relies on that.
///
/// Integral JSON floats (`1.0`) decode as [`Id::Number`]; any other number keeps its decimal
/// spelling as [`Id::Text`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum Id {
    Number(i64),
    Text(String),
}

impl<'de> Deserialize<'de> for Id {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Integer(i64),
            Float(f64),
            Text(String),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Integer(n) => Id::Number(n),
            Raw::Float(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => Id::Number(f as i64),
            Raw::Float(f) => Id::Text(f.to_string()),
            Raw::Text(s) => Id::Text(s),
        })
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Id::Number(n) => write!(f, "{n}"),
            Id::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for Id {
    fn from(n: i64) -> Self {
        Id::Number(n)
    }
}

/// A party. Never edited locally; any change means fetching it again.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: Id,
    #[serde(default)]
    pub name: String,
    /// ISO-8601 timestamp, kept as the service sent it.
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub description: String,
}

impl Event {
    /// The calendar-date part of `date`.
    pub fn day(&self) -> &str {
        match self.date.char_indices().nth(10) {
            Some((end, _)) => &self.date[..end],
            None => &self.date,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Guest {
    pub id: Id,
    #[serde(default)]
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rsvp {
    pub id: Id,
    pub guest_id: Id,
    pub event_id: Id,
}

/// Body of the create call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewEvent {
    pub name: String,
    pub description: String,
    pub date: String,
    pub location: String,
}

/// Raw values of the add-event form, as typed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EventForm {
    pub name: String,
    pub description: String,
    pub date: String,
    pub location: String,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum FormError {
    #[error("invalid date {0:?}")]
    InvalidDate(String),
}

impl TryFrom<EventForm> for NewEvent {
    type Error = FormError;

    fn try_from(form: EventForm) -> Result<Self, Self::Error> {
        Ok(NewEvent {
            date: normalize_date(&form.date)?,
            name: form.name,
            description: form.description,
            location: form.location,
        })
    }
}

/// Turns a date input value into a full UTC timestamp with millisecond precision.
///
/// A bare calendar date (what `<input type="date">` produces) is taken as midnight UTC, so
/// `2025-09-14` becomes `2025-09-14T00:00:00.000Z`. Full RFC 3339 timestamps are converted to UTC.
pub fn normalize_date(input: &str) -> Result<String, FormError> {
    let input = input.trim();
    let invalid = || FormError::InvalidDate(input.to_string());
    let timestamp = match NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        Ok(date) => date.and_hms_opt(0, 0, 0).ok_or_else(invalid)?.and_utc(),
        Err(_) => DateTime::parse_from_rfc3339(input)
            .map_err(|_| invalid())?
            .with_timezone(&Utc),
    };
    Ok(timestamp.to_rfc3339_opts(SecondsFormat::Millis, true))
}
