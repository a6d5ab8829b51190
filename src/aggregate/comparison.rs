//! Deal comparison chart rows
//!
//! Compares the first two deals side by side. Rows follow the first deal's
//! day labels in source order; the second deal is matched by index, not by
//! label.

use serde::Serialize;

use crate::models::DealPerformance;

/// Number of deals shown on the comparison chart
const COMPARED_DEALS: usize = 2;

/// One day of the comparison chart
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct ComparisonRow {
    pub day: String,
    pub deal1: u64,
    pub deal2: u64,
}

/// Rows plus the legend for each series
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct ComparisonChart {
    /// Titles of the compared deals, `deal1` first
    pub series: Vec<String>,
    pub rows: Vec<ComparisonRow>,
}

/// Build comparison rows for the first two deals
pub fn build_comparison_rows(deals: &[DealPerformance]) -> Vec<ComparisonRow> {
    let selected = &deals[..deals.len().min(COMPARED_DEALS)];

    let Some(first) = selected.first() else {
        return Vec::new();
    };

    let bookings_at = |deal: Option<&DealPerformance>, idx: usize| -> u64 {
        deal.and_then(|d| d.performance.get(idx))
            .map(|p| p.total_bookings)
            .unwrap_or(0)
    };

    first
        .performance
        .iter()
        .enumerate()
        .map(|(idx, entry)| ComparisonRow {
            day: entry.day.clone(),
            deal1: entry.total_bookings,
            deal2: bookings_at(selected.get(1), idx),
        })
        .collect()
}

/// Build the full chart: rows and series legends
pub fn build_comparison_chart(deals: &[DealPerformance]) -> ComparisonChart {
    ComparisonChart {
        series: deals
            .iter()
            .take(COMPARED_DEALS)
            .map(|d| d.title.clone())
            .collect(),
        rows: build_comparison_rows(deals),
    }
}
