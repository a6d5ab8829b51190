//! Analytics payloads: monthly stats, deal comparison and monthly ratings

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{
    lenient_count, lenient_f64, null_as_default, optional_string_or_number, string_or_number,
};
use crate::aggregate::parse_rating;

/// Headline analytics for the current month
///
/// Returned by `GET /restaurant/{id}/analytics`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct MonthlyStats {
    #[serde(deserialize_with = "lenient_count")]
    pub active_deals_count: u64,
    #[serde(deserialize_with = "lenient_count")]
    pub total_redemptions: u64,
    #[serde(deserialize_with = "lenient_f64")]
    pub total_revenue: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub avg_redemption_rate: f64,
}

/// Response of `GET /restaurant/{id}/dealComparison`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DealComparison {
    #[serde(deserialize_with = "null_as_default")]
    pub deals: Vec<DealPerformance>,
}

/// One deal with its per-day booking series
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct DealPerformance {
    #[serde(deserialize_with = "optional_string_or_number", alias = "_id")]
    pub id: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub performance: Vec<DayPerformance>,
}

/// Bookings for one day label of a deal's series
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct DayPerformance {
    #[serde(deserialize_with = "string_or_number")]
    pub day: String,
    #[serde(deserialize_with = "lenient_count")]
    pub total_bookings: u64,
}

/// Response of `GET /restaurant/{id}/monthlyRating`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MonthlyRatings {
    #[serde(deserialize_with = "null_as_default")]
    pub deals: Vec<DealRatings>,
}

/// One deal's ratings, index-aligned to calendar months
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct DealRatings {
    #[serde(deserialize_with = "optional_string_or_number", alias = "_id")]
    pub id: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(alias = "ratings", deserialize_with = "null_as_default")]
    pub monthly_ratings: Vec<MonthRating>,
}

/// Average rating of a deal for one month
///
/// The API sends `avgRating` as either a number or a numeric string; the raw
/// value is kept and parsed on demand.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct MonthRating {
    #[serde(deserialize_with = "string_or_number")]
    pub month: String,
    pub avg_rating: Value,
}

impl MonthRating {
    /// The rating if present and usable; zero, non-numeric and non-finite
    /// values yield `None`.
    pub fn rating(&self) -> Option<f64> {
        parse_rating(&self.avg_rating)
    }
}
