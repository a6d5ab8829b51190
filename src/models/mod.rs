//! Wire types for the dashboard API
//!
//! - `dashboard`: restaurant snapshot (headline figures and time series)
//! - `analytics`: monthly stats, deal comparison, monthly ratings
//! - `booking`: bookings and the booking dashboard summary
//!
//! Every field carries a serde default so a partial payload decodes into a
//! zero-filled value instead of failing the whole response. Fields sent as
//! `null` decode the same way as missing ones, and counts accept floats or
//! numeric strings.

mod analytics;
mod booking;
mod dashboard;

pub use analytics::{
    DayPerformance, DealComparison, DealPerformance, DealRatings, MonthRating, MonthlyRatings,
    MonthlyStats,
};
pub use booking::{Booking, BookingDashboard, BookingStatus, ParseStatusError};
pub use dashboard::{DashboardSnapshot, DayBookings, MonthlyRevenue};

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Accept a label sent either as a string (`"Jan"`) or a number (`1`)
pub(crate) fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Null => String::new(),
        other => other.to_string(),
    })
}

/// Same as [`string_or_number`] for optional identifiers
pub(crate) fn optional_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(other) => Some(other.to_string()),
    })
}

/// Treat an explicit `null` like a missing field
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

fn numeric(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|v| v.is_finite())
}

/// Monetary or ratio figure; `null` and non-numeric input decode as 0
pub(crate) fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(numeric(&value).unwrap_or(0.0))
}

/// Non-negative count. Floats are rounded, negatives clamp to 0, and `null`
/// or non-numeric input decodes as 0.
pub(crate) fn lenient_count<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: TryFrom<u64>,
{
    let value = Value::deserialize(deserializer)?;
    let count = match &value {
        Value::Number(n) if n.is_u64() => n.as_u64().unwrap_or(0),
        other => numeric(other).map(|v| v.max(0.0).round() as u64).unwrap_or(0),
    };
    T::try_from(count).map_err(|_| D::Error::custom(format!("count {} out of range", count)))
}
