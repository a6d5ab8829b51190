//! Restaurant analytics service

use std::sync::Arc;

use super::{fetch_typed, require_id, segment};
use crate::client::{ClientResult, Transport};
use crate::context::RestaurantId;
use crate::models::{DealComparison, MonthlyRatings, MonthlyStats};

/// Fetches analytics for a restaurant: monthly stats, deal comparison and
/// monthly ratings
#[derive(Clone)]
pub struct AnalyticsService {
    transport: Arc<dyn Transport>,
    restaurant_id: Option<RestaurantId>,
}

impl AnalyticsService {
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

    fn path(&self, restaurant_id: Option<&RestaurantId>, endpoint: &str) -> ClientResult<String> {
        let id = require_id(restaurant_id, self.restaurant_id.as_ref())?;
        tracing::debug!(restaurant_id = %id, endpoint, "fetching analytics");
        Ok(format!("restaurant/{}/{}", segment(id), endpoint))
    }

    /// `GET /restaurant/{id}/analytics`
    pub async fn fetch_monthly_stats(
        &self,
        restaurant_id: Option<&RestaurantId>,
    ) -> ClientResult<MonthlyStats> {
        let path = self.path(restaurant_id, "analytics")?;
        fetch_typed(self.transport.as_ref(), &path, &[]).await
    }

    /// `GET /restaurant/{id}/dealComparison`
    pub async fn fetch_deal_comparison(
        &self,
        restaurant_id: Option<&RestaurantId>,
    ) -> ClientResult<DealComparison> {
        let path = self.path(restaurant_id, "dealComparison")?;
        fetch_typed(self.transport.as_ref(), &path, &[]).await
    }

    /// `GET /restaurant/{id}/monthlyRating`
    pub async fn fetch_monthly_rating(
        &self,
        restaurant_id: Option<&RestaurantId>,
    ) -> ClientResult<MonthlyRatings> {
        let path = self.path(restaurant_id, "monthlyRating")?;
        fetch_typed(self.transport.as_ref(), &path, &[]).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::ClientError;
    use crate::services::testing::FakeTransport;
    use serde_json::json;

    fn id(s: &str) -> RestaurantId {
        RestaurantId::new(s).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_monthly_stats() {
        let fake = Arc::new(FakeTransport::new().route(
            "restaurant/r1/analytics",
            json!({"activeDealsCount": 2, "totalRedemptions": 40, "totalRevenue": 812.5, "avgRedemptionRate": 0.4}),
        ));
        let service = AnalyticsService::new(fake);

        let stats = service.fetch_monthly_stats(Some(&id("r1"))).await.unwrap();
        assert_eq!(stats.active_deals_count, 2);
        assert_eq!(stats.total_redemptions, 40);
        assert_eq!(stats.total_revenue, 812.5);
    }

    #[tokio::test]
    async fn test_fetch_deal_comparison() {
        let fake = Arc::new(FakeTransport::new().route(
            "restaurant/r1/dealComparison",
            json!({"deals": [{"title": "A", "performance": [{"day": "Mon", "totalBookings": 5}]}]}),
        ));
        let mut service = AnalyticsService::new(fake);
        service.set_restaurant_id(Some(id("r1")));

        let cmp = service.fetch_deal_comparison(None).await.unwrap();
        assert_eq!(cmp.deals[0].title, "A");
    }

    #[tokio::test]
    async fn test_fetch_monthly_rating() {
        let fake = Arc::new(FakeTransport::new().route(
            "restaurant/r1/monthlyRating",
            json!({"deals": [{"title": "A", "monthlyRatings": [{"month": "Jan", "avgRating": "4.0"}]}]}),
        ));
        let service = AnalyticsService::new(fake);

        let ratings = service.fetch_monthly_rating(Some(&id("r1"))).await.unwrap();
        assert_eq!(ratings.deals[0].monthly_ratings[0].rating(), Some(4.0));
    }

    #[tokio::test]
    async fn test_explicit_id_overrides_fallback() {
        let fake = Arc::new(FakeTransport::new().route("restaurant/live/analytics", json!({})));
        let mut service = AnalyticsService::new(fake.clone());
        service.set_restaurant_id(Some(id("stale")));

        service.fetch_monthly_stats(Some(&id("live"))).await.unwrap();
        assert_eq!(fake.calls(), vec!["restaurant/live/analytics"]);
    }

    #[tokio::test]
    async fn test_all_operations_require_id() {
        let fake = Arc::new(FakeTransport::new());
        let service = AnalyticsService::new(fake.clone());

        assert!(matches!(
            service.fetch_monthly_stats(None).await,
            Err(ClientError::IdentifierRequired)
        ));
        assert!(matches!(
            service.fetch_deal_comparison(None).await,
            Err(ClientError::IdentifierRequired)
        ));
        assert!(matches!(
            service.fetch_monthly_rating(None).await,
            Err(ClientError::IdentifierRequired)
        ));
        assert!(fake.calls().is_empty());
    }

    #[tokio::test]
    async fn test_id_is_percent_encoded() {
        let fake = Arc::new(FakeTransport::new().route("restaurant/a%2Fb/analytics", json!({})));
        let service = AnalyticsService::new(fake.clone());

        service.fetch_monthly_stats(Some(&id("a/b"))).await.unwrap();
        assert_eq!(fake.calls(), vec!["restaurant/a%2Fb/analytics"]);
    }

    #[tokio::test]
    async fn test_shape_mismatch_is_parse_error() {
        let fake = Arc::new(
            FakeTransport::new().route("restaurant/r1/dealComparison", json!({"deals": "none"})),
        );
        let service = AnalyticsService::new(fake);

        let err = service
            .fetch_deal_comparison(Some(&id("r1")))
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Parse(_)));
    }
}
