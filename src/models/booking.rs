//! Booking types

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::str::FromStr;

use super::{lenient_count, null_as_default, optional_string_or_number};

/// A single table booking
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Booking {
    #[serde(deserialize_with = "optional_string_or_number", alias = "_id")]
    pub id: Option<String>,
    #[serde(alias = "customer", deserialize_with = "null_as_default")]
    pub customer_name: String,
    /// Booking date as sent by the API (usually `YYYY-MM-DD` or RFC 3339)
    #[serde(deserialize_with = "null_as_default")]
    pub date: String,
    #[serde(deserialize_with = "null_as_default")]
    pub time: String,
    #[serde(deserialize_with = "lenient_count")]
    pub party_size: u32,
    pub special_requests: Option<String>,
    #[serde(deserialize_with = "status_or_unknown")]
    pub status: BookingStatus,
}

impl Booking {
    /// Calendar date of the booking, if the API sent a parseable one
    pub fn parsed_date(&self) -> Option<chrono::NaiveDate> {
        let raw = self.date.trim();
        chrono::NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .or_else(|| {
                chrono::DateTime::parse_from_rfc3339(raw)
                    .ok()
                    .map(|dt| dt.date_naive())
            })
    }
}

/// Lifecycle state of a booking
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    #[default]
    Pending,
    Confirmed,
    Cancelled,
    Completed,
    #[serde(rename = "no-show")]
    NoShow,
    /// Any status this client does not know about
    #[serde(other)]
    Unknown,
}

impl BookingStatus {
    /// Known statuses in display order
    pub fn all() -> &'static [BookingStatus] {
        &[
            BookingStatus::Pending,
            BookingStatus::Confirmed,
            BookingStatus::Cancelled,
            BookingStatus::Completed,
            BookingStatus::NoShow,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Cancelled => "cancelled",
            BookingStatus::Completed => "completed",
            BookingStatus::NoShow => "no-show",
            BookingStatus::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// Error returned when a status string is not recognised
#[derive(Debug, Clone, thiserror::Error)]
#[error("Unknown booking status: {0}")]
pub struct ParseStatusError(pub String);

impl FromStr for BookingStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(BookingStatus::Pending),
            "confirmed" => Ok(BookingStatus::Confirmed),
            "cancelled" | "canceled" => Ok(BookingStatus::Cancelled),
            "completed" => Ok(BookingStatus::Completed),
            "no-show" | "noshow" | "no_show" => Ok(BookingStatus::NoShow),
            other => Err(ParseStatusError(other.to_string())),
        }
    }
}

/// A status sent as `null` or in an unexpected shape is `Unknown`; a
/// missing one falls back to the default.
fn status_or_unknown<'de, D>(deserializer: D) -> Result<BookingStatus, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s.parse().unwrap_or(BookingStatus::Unknown),
        _ => BookingStatus::Unknown,
    })
}

/// Response of `GET /booking/{id}/dashboard`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct BookingDashboard {
    #[serde(deserialize_with = "null_as_default")]
    pub bookings: Vec<Booking>,
    #[serde(deserialize_with = "lenient_count")]
    pub total_bookings: u64,
    #[serde(deserialize_with = "lenient_count")]
    pub confirmed_count: u64,
    #[serde(deserialize_with = "lenient_count")]
    pub pending_count: u64,
    #[serde(deserialize_with = "lenient_count")]
    pub cancelled_count: u64,
}
