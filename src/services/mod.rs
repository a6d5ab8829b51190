//! Data-access services
//!
//! One service per domain area, each over a shared [`Transport`]:
//!
//! - [`DashboardService`]: restaurant snapshot
//! - [`AnalyticsService`]: monthly stats, deal comparison, monthly ratings
//! - [`BookingService`]: booking dashboard
//!
//! Every service carries its own fallback restaurant id (set with
//! `set_restaurant_id`). A fetch uses the explicit id when given, else the
//! fallback; with neither it fails with [`ClientError::IdentifierRequired`]
//! before the transport is touched. Every call issues a fresh request.

mod analytics;
mod bookings;
mod dashboard;

pub use analytics::AnalyticsService;
pub use bookings::BookingService;
pub use dashboard::DashboardService;

use serde::de::DeserializeOwned;
use std::sync::Arc;

use crate::client::{ClientError, ClientResult, Transport};
use crate::context::RestaurantId;

/// Pick the identifier for a call: explicit first, then the fallback
pub(crate) fn require_id<'a>(
    explicit: Option<&'a RestaurantId>,
    fallback: Option<&'a RestaurantId>,
) -> ClientResult<&'a RestaurantId> {
    explicit.or(fallback).ok_or(ClientError::IdentifierRequired)
}

/// GET a path and decode the body into `T`
pub(crate) async fn fetch_typed<T: DeserializeOwned>(
    transport: &dyn Transport,
    path: &str,
    query: &[(&str, &str)],
) -> ClientResult<T> {
    let body = transport.get_json(path, query).await?;
    Ok(serde_json::from_value(body)?)
}

/// Percent-encode an identifier for use as a path segment
pub(crate) fn segment(id: &RestaurantId) -> String {
    urlencoding::encode(id.as_str()).into_owned()
}

/// All three services over one transport
#[derive(Clone)]
pub struct Services {
    pub dashboard: DashboardService,
    pub analytics: AnalyticsService,
    pub bookings: BookingService,
}

impl Services {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            dashboard: DashboardService::new(Arc::clone(&transport)),
            analytics: AnalyticsService::new(Arc::clone(&transport)),
            bookings: BookingService::new(transport),
        }
    }

    /// Set the same fallback id on every service
    pub fn set_restaurant_id(&mut self, id: Option<RestaurantId>) {
        self.dashboard.set_restaurant_id(id.clone());
        self.analytics.set_restaurant_id(id.clone());
        self.bookings.set_restaurant_id(id);
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_id_prefers_explicit() {
        let a = RestaurantId::new("a").unwrap();
        let b = RestaurantId::new("b").unwrap();

        assert_eq!(require_id(Some(&a), Some(&b)).unwrap(), &a);
        assert_eq!(require_id(None, Some(&b)).unwrap(), &b);
        assert!(matches!(
            require_id(None, None),
            Err(ClientError::IdentifierRequired)
        ));
    }

    #[test]
    fn test_segment_encodes() {
        let id = RestaurantId::new("a b/c").unwrap();
        assert_eq!(segment(&id), "a%20b%2Fc");
    }

    #[test]
    fn test_services_share_fallback() {
        let transport: Arc<dyn Transport> = Arc::new(testing::FakeTransport::new());
        let mut services = Services::new(transport);
        let id = RestaurantId::new("r-1").unwrap();

        services.set_restaurant_id(Some(id.clone()));
        assert_eq!(services.dashboard.restaurant_id(), Some(&id));
        assert_eq!(services.analytics.restaurant_id(), Some(&id));
        assert_eq!(services.bookings.restaurant_id(), Some(&id));
    }
}
