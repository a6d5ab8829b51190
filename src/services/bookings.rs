//! Booking service

use std::sync::Arc;

use super::{fetch_typed, require_id, segment};
use crate::client::{ClientResult, Transport};
use crate::context::RestaurantId;
use crate::models::BookingDashboard;

/// Fetches bookings for a restaurant
#[derive(Clone)]
pub struct BookingService {
    transport: Arc<dyn Transport>,
    restaurant_id: Option<RestaurantId>,
}

impl BookingService {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            restaurant_id: None,
        }
    }

    pub fn set_restaurant_id(&mut self, id: Option<RestaurantId>) {
        self.restaurant_id = id;
    }

    pub fn restaurant_id(&self) -> Option<&RestaurantId> {
        self.restaurant_id.as_ref()
    }

    /// `GET /booking/{id}/dashboard`
    pub async fn fetch_booking_dashboard(
        &self,
        restaurant_id: Option<&RestaurantId>,
    ) -> ClientResult<BookingDashboard> {
        let id = require_id(restaurant_id, self.restaurant_id.as_ref())?;
        tracing::debug!(restaurant_id = %id, "fetching bookings");

        let path = format!("booking/{}/dashboard", segment(id));
        fetch_typed(self.transport.as_ref(), &path, &[]).await
    }
}
