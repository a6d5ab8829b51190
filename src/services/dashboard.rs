//! Restaurant dashboard service

use std::sync::Arc;

use super::{fetch_typed, require_id};
use crate::client::{ClientResult, Transport};
use crate::context::RestaurantId;
use crate::models::DashboardSnapshot;

/// Fetches the restaurant dashboard snapshot
#[derive(Clone)]
pub struct DashboardService {
    transport: Arc<dyn Transport>,
    restaurant_id: Option<RestaurantId>,
}

impl DashboardService {
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

    /// `GET /restaurant/dashboard`
    ///
    /// The route carries no path parameter, so the restaurant is passed as
    /// the `restaurantId` query parameter.
    pub async fn fetch_dashboard(
        &self,
        restaurant_id: Option<&RestaurantId>,
    ) -> ClientResult<DashboardSnapshot> {
        let id = require_id(restaurant_id, self.restaurant_id.as_ref())?;
        tracing::debug!(restaurant_id = %id, "fetching dashboard snapshot");

        fetch_typed(
            self.transport.as_ref(),
            "restaurant/dashboard",
            &[("restaurantId", id.as_str())],
        )
        .await
    }
}
