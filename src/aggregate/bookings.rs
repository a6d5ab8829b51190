//! Bookings table shaping: filtering, pagination and status breakdown

use serde::Serialize;

use crate::models::{Booking, BookingStatus};

/// Filter applied to the bookings table
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookingFilter {
    /// Keep only bookings with this status
    pub status: Option<BookingStatus>,
    /// Case-insensitive match against customer name or special requests
    pub search: Option<String>,
}

impl BookingFilter {
    pub fn status(mut self, status: BookingStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn search(mut self, query: impl Into<String>) -> Self {
        self.search = Some(query.into());
        self
    }

    /// Whether a booking passes this filter
    pub fn matches(&self, booking: &Booking) -> bool {
        if let Some(status) = self.status {
            if booking.status != status {
                return false;
            }
        }

        match self.search.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(query) => {
                let query = query.to_lowercase();
                booking.customer_name.to_lowercase().contains(&query)
                    || booking
                        .special_requests
                        .as_deref()
                        .map(|r| r.to_lowercase().contains(&query))
                        .unwrap_or(false)
            }
        }
    }

    /// Bookings that pass the filter, in source order
    pub fn apply<'a>(&self, bookings: &'a [Booking]) -> Vec<&'a Booking> {
        bookings.iter().filter(|b| self.matches(b)).collect()
    }
}

/// One page of a table
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based page number actually served
    pub page: usize,
    pub per_page: usize,
    pub total_items: usize,
    pub total_pages: usize,
}

/// Slice `items` into a page
///
/// `page` is 1-based and clamped into range; a `per_page` of 0 is treated
/// as 1. An empty input yields page 1 of 1 with no items.
pub fn paginate<T: Clone>(items: &[T], page: usize, per_page: usize) -> Page<T> {
    let per_page = per_page.max(1);
    let total_items = items.len();
    let total_pages = total_items.div_ceil(per_page).max(1);
    let page = page.clamp(1, total_pages);

    let start = (page - 1) * per_page;
    let end = (start + per_page).min(total_items);

    Page {
        items: items[start..end].to_vec(),
        page,
        per_page,
        total_items,
        total_pages,
    }
}

/// Pie-chart slice: how many bookings have a given status
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct StatusSlice {
    pub status: BookingStatus,
    pub count: u64,
}

/// Count bookings per known status, in display order, zero-filled
///
/// Bookings with an unrecognised status are not counted.
pub fn status_breakdown(bookings: &[Booking]) -> Vec<StatusSlice> {
    BookingStatus::all()
        .iter()
        .map(|&status| StatusSlice {
            status,
            count: bookings.iter().filter(|b| b.status == status).count() as u64,
        })
        .collect()
}
