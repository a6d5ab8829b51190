//! Chart and table shaping
//!
//! Pure functions that turn API payloads into render-ready rows:
//!
//! - [`ratings`]: 12-month average rating series and yearly figure
//! - [`comparison`]: two-deal booking comparison rows
//! - [`dashboard`]: zero-filled revenue / weekday series and overview cards
//! - [`bookings`]: booking filtering, pagination and status breakdown
//!
//! All series are fixed-length with zero-fill; nothing here mutates its
//! input or performs I/O.

pub mod bookings;
pub mod comparison;
pub mod dashboard;
pub mod ratings;

pub use bookings::{paginate, status_breakdown, BookingFilter, Page, StatusSlice};
pub use comparison::{build_comparison_chart, build_comparison_rows, ComparisonChart, ComparisonRow};
pub use dashboard::{
    bookings_by_weekday_series, build_overview, monthly_revenue_series, DashboardOverview,
    OverviewCards, SeriesPoint,
};
pub use ratings::{aggregate_monthly_ratings, parse_rating, RatingPoint, RatingSummary};

/// Month labels used for every 12-month series
pub const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Weekday labels used for every 7-day series, Monday first
pub const WEEKDAY_LABELS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// Round to two decimal places
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round2() {
        assert_eq!(round2(4.256), 4.26);
        assert_eq!(round2(4.254), 4.25);
        assert_eq!(round2(3.0), 3.0);
        assert_eq!(round2(0.0), 0.0);
    }
}
