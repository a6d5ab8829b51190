//! Dashboard overview shaping
//!
//! Turns a [`DashboardSnapshot`] into the overview cards and the two
//! fixed-length series the overview charts draw: revenue by month (12 rows)
//! and bookings by weekday (7 rows). Buckets the API omitted are zero-filled.

use chrono::{DateTime, Datelike, Month, NaiveDate, Weekday};
use serde::Serialize;

use super::{round2, MONTH_LABELS, WEEKDAY_LABELS};
use crate::models::{DashboardSnapshot, DayBookings, MonthlyRevenue};

/// One labelled point of a chart series
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SeriesPoint {
    pub label: &'static str,
    pub value: f64,
}

/// Headline figures shown above the charts
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OverviewCards {
    pub total_revenue: f64,
    pub active_deals: u64,
    pub bookings_today: u64,
    pub average_rating: f64,
}

/// Everything the overview page renders
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardOverview {
    pub cards: OverviewCards,
    pub monthly_revenue: Vec<SeriesPoint>,
    pub bookings_by_day: Vec<SeriesPoint>,
}

impl Default for DashboardOverview {
    fn default() -> Self {
        Self {
            cards: OverviewCards::default(),
            monthly_revenue: zero_series(&MONTH_LABELS),
            bookings_by_day: zero_series(&WEEKDAY_LABELS),
        }
    }
}

fn zero_series(labels: &[&'static str]) -> Vec<SeriesPoint> {
    labels
        .iter()
        .map(|&label| SeriesPoint { label, value: 0.0 })
        .collect()
}

/// Resolve a month label to a zero-based index
///
/// Accepts month numbers (`3`), `YYYY-MM` keys, full dates (`YYYY-MM-DD`
/// or RFC 3339) and English names or abbreviations in any case.
fn month_index(label: &str) -> Option<usize> {
    let label = label.trim();

    if let Ok(n) = label.parse::<usize>() {
        return (1..=12).contains(&n).then(|| n - 1);
    }

    let date = NaiveDate::parse_from_str(label, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(label).ok().map(|dt| dt.date_naive()));
    if let Some(date) = date {
        return Some(date.month0() as usize);
    }

    if let Some((_, month)) = label.split_once('-') {
        if let Ok(n) = month.parse::<usize>() {
            return (1..=12).contains(&n).then(|| n - 1);
        }
    }

    label
        .parse::<Month>()
        .ok()
        .map(|m| m.number_from_month() as usize - 1)
}

/// Resolve a weekday name to a Monday-first index
fn weekday_index(label: &str) -> Option<usize> {
    label
        .trim()
        .parse::<Weekday>()
        .ok()
        .map(|d| d.num_days_from_monday() as usize)
}

/// Revenue per calendar month, January first
pub fn monthly_revenue_series(entries: &[MonthlyRevenue]) -> Vec<SeriesPoint> {
    let mut series = zero_series(&MONTH_LABELS);

    for entry in entries {
        match month_index(&entry.month) {
            Some(idx) => series[idx].value += entry.revenue,
            None => tracing::debug!(month = %entry.month, "dropping unrecognised month label"),
        }
    }

    for point in &mut series {
        point.value = round2(point.value);
    }

    series
}

/// Bookings per weekday, Monday first
pub fn bookings_by_weekday_series(entries: &[DayBookings]) -> Vec<SeriesPoint> {
    let mut series = zero_series(&WEEKDAY_LABELS);

    for entry in entries {
        match weekday_index(&entry.day_of_week) {
            Some(idx) => series[idx].value += entry.bookings as f64,
            None => tracing::debug!(day = %entry.day_of_week, "dropping unrecognised weekday label"),
        }
    }

    series
}

/// Build the overview page from a snapshot
pub fn build_overview(snapshot: &DashboardSnapshot) -> DashboardOverview {
    DashboardOverview {
        cards: OverviewCards {
            total_revenue: round2(snapshot.total_revenue),
            active_deals: snapshot.active_deals,
            bookings_today: snapshot.bookings_today,
            average_rating: round2(snapshot.average_rating),
        },
        monthly_revenue: monthly_revenue_series(&snapshot.monthly_revenue),
        bookings_by_day: bookings_by_weekday_series(&snapshot.bookings_by_day_of_week),
    }
}
