//! Restaurant dashboard snapshot

use serde::{Deserialize, Serialize};

use super::{lenient_count, lenient_f64, null_as_default, string_or_number};

/// Aggregate figures and time series for one restaurant
///
/// Returned by `GET /restaurant/dashboard`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct DashboardSnapshot {
    #[serde(deserialize_with = "lenient_f64")]
    pub total_revenue: f64,
    #[serde(deserialize_with = "lenient_count")]
    pub active_deals: u64,
    #[serde(deserialize_with = "lenient_count")]
    pub bookings_today: u64,
    #[serde(deserialize_with = "lenient_f64")]
    pub average_rating: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub monthly_revenue: Vec<MonthlyRevenue>,
    #[serde(deserialize_with = "null_as_default")]
    pub bookings_by_day_of_week: Vec<DayBookings>,
}

/// Revenue for one month, labelled by the API
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct MonthlyRevenue {
    #[serde(deserialize_with = "string_or_number")]
    pub month: String,
    #[serde(deserialize_with = "lenient_f64")]
    pub revenue: f64,
}

/// Booking count for one day of the week
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct DayBookings {
    #[serde(deserialize_with = "string_or_number")]
    pub day_of_week: String,
    #[serde(deserialize_with = "lenient_count")]
    pub bookings: u64,
}
