//! Concrete dashboard panels
//!
//! Each constructor wires a service call to its reshaping step. Only the
//! bookings table surfaces fetch errors; every other panel degrades to its
//! zero state.

use futures_util::FutureExt;
use std::sync::Arc;

use super::panel::{FailurePolicy, Loader, Panel};
use crate::aggregate::{
    aggregate_monthly_ratings, build_comparison_chart, build_overview, ComparisonChart,
    DashboardOverview, RatingSummary,
};
use crate::context::{IdentifierStore, RestaurantContext, RestaurantId};
use crate::models::{BookingDashboard, MonthlyStats};
use crate::services::Services;

/// Overview cards and the revenue / weekday charts
pub fn overview_panel(
    context: &RestaurantContext,
    store: Arc<dyn IdentifierStore>,
    services: &Services,
) -> Panel<DashboardOverview> {
    let service = services.dashboard.clone();
    let loader: Loader<DashboardOverview> = Arc::new(move |id: RestaurantId| {
        let service = service.clone();
        async move {
            service
                .fetch_dashboard(Some(&id))
                .await
                .map(|snapshot| build_overview(&snapshot))
        }
        .boxed()
    });

    Panel::spawn("overview", context, store, FailurePolicy::Degrade, loader)
}

/// Monthly analytics stat cards
pub fn stats_panel(
    context: &RestaurantContext,
    store: Arc<dyn IdentifierStore>,
    services: &Services,
) -> Panel<MonthlyStats> {
    let service = services.analytics.clone();
    let loader: Loader<MonthlyStats> = Arc::new(move |id: RestaurantId| {
        let service = service.clone();
        async move { service.fetch_monthly_stats(Some(&id)).await }.boxed()
    });

    Panel::spawn("stats", context, store, FailurePolicy::Degrade, loader)
}

/// Two-deal booking comparison chart
pub fn comparison_panel(
    context: &RestaurantContext,
    store: Arc<dyn IdentifierStore>,
    services: &Services,
) -> Panel<ComparisonChart> {
    let service = services.analytics.clone();
    let loader: Loader<ComparisonChart> = Arc::new(move |id: RestaurantId| {
        let service = service.clone();
        async move {
            service
                .fetch_deal_comparison(Some(&id))
                .await
                .map(|comparison| build_comparison_chart(&comparison.deals))
        }
        .boxed()
    });

    Panel::spawn("comparison", context, store, FailurePolicy::Degrade, loader)
}

/// 12-month rating chart and yearly average
pub fn ratings_panel(
    context: &RestaurantContext,
    store: Arc<dyn IdentifierStore>,
    services: &Services,
) -> Panel<RatingSummary> {
    let service = services.analytics.clone();
    let loader: Loader<RatingSummary> = Arc::new(move |id: RestaurantId| {
        let service = service.clone();
        async move {
            service
                .fetch_monthly_rating(Some(&id))
                .await
                .map(|ratings| aggregate_monthly_ratings(&ratings.deals))
        }
        .boxed()
    });

    Panel::spawn("ratings", context, store, FailurePolicy::Degrade, loader)
}

/// Bookings table; shows an error banner on failure and retries on refresh
pub fn bookings_panel(
    context: &RestaurantContext,
    store: Arc<dyn IdentifierStore>,
    services: &Services,
) -> Panel<BookingDashboard> {
    let service = services.bookings.clone();
    let loader: Loader<BookingDashboard> = Arc::new(move |id: RestaurantId| {
        let service = service.clone();
        async move { service.fetch_booking_dashboard(Some(&id)).await }.boxed()
    });

    Panel::spawn("bookings", context, store, FailurePolicy::Surface, loader)
}

/// Every panel of the dashboard, bound to one context
pub struct DashboardView {
    pub overview: Panel<DashboardOverview>,
    pub stats: Panel<MonthlyStats>,
    pub comparison: Panel<ComparisonChart>,
    pub ratings: Panel<RatingSummary>,
    pub bookings: Panel<BookingDashboard>,
}

impl DashboardView {
    pub fn spawn(
        context: &RestaurantContext,
        store: Arc<dyn IdentifierStore>,
        services: &Services,
    ) -> Self {
        Self {
            overview: overview_panel(context, Arc::clone(&store), services),
            stats: stats_panel(context, Arc::clone(&store), services),
            comparison: comparison_panel(context, Arc::clone(&store), services),
            ratings: ratings_panel(context, Arc::clone(&store), services),
            bookings: bookings_panel(context, store, services),
        }
    }

    /// Wait for every panel to finish loading
    pub async fn settled(&self) {
        self.overview.settled().await;
        self.stats.settled().await;
        self.comparison.settled().await;
        self.ratings.settled().await;
        self.bookings.settled().await;
    }

    /// Re-fetch every panel
    pub fn refresh(&self) {
        self.overview.refresh();
        self.stats.refresh();
        self.comparison.refresh();
        self.ratings.refresh();
        self.bookings.refresh();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::Transport;
    use crate::context::MemoryStore;
    use crate::services::testing::FakeTransport;
    use serde_json::json;
    use std::time::Duration;

    fn fake_api() -> Arc<FakeTransport> {
        Arc::new(
            FakeTransport::new()
                .route(
                    "restaurant/dashboard?restaurantId=r1",
                    json!({
                        "totalRevenue": 1200.0,
                        "activeDeals": 3,
                        "monthlyRevenue": [{"month": "Feb", "revenue": 300.0}],
                        "bookingsByDayOfWeek": [{"dayOfWeek": "Fri", "bookings": 8}]
                    }),
                )
                .route(
                    "restaurant/r1/analytics",
                    json!({"activeDealsCount": 3, "totalRedemptions": 17}),
                )
                .route(
                    "restaurant/r1/dealComparison",
                    json!({"deals": [
                        {"title": "A", "performance": [{"day": "Mon", "totalBookings": 5}]},
                        {"title": "B", "performance": [{"day": "Mon", "totalBookings": 3}]}
                    ]}),
                )
                .route(
                    "restaurant/r1/monthlyRating",
                    json!({"deals": [
                        {"title": "A", "monthlyRatings": [{"month": "Jan", "avgRating": "4.0"}]},
                        {"title": "B", "monthlyRatings": [{"month": "Jan", "avgRating": 5}]}
                    ]}),
                ),
        )
    }

    async fn settle(view: &DashboardView) {
        tokio::time::timeout(Duration::from_secs(5), view.settled())
            .await
            .expect("view did not settle");
    }

    #[tokio::test]
    async fn test_full_view_loads_and_reshapes() {
        let fake = fake_api();
        let transport: Arc<dyn Transport> = fake.clone();
        let services = Services::new(transport);
        let ctx = RestaurantContext::new(RestaurantId::new("r1"));
        let view = DashboardView::spawn(&ctx, Arc::new(MemoryStore::default()), &services);

        settle(&view).await;

        let overview = view.overview.state().data;
        assert_eq!(overview.cards.total_revenue, 1200.0);
        assert_eq!(overview.monthly_revenue[1].value, 300.0);
        assert_eq!(overview.bookings_by_day[4].value, 8.0);

        assert_eq!(view.stats.state().data.total_redemptions, 17);

        let chart = view.comparison.state().data;
        assert_eq!(chart.rows.len(), 1);
        assert_eq!((chart.rows[0].deal1, chart.rows[0].deal2), (5, 3));

        let ratings = view.ratings.state().data;
        assert_eq!(ratings.monthly[0].avg_rating, 4.5);
        assert_eq!(ratings.yearly_average, 4.5);

        // No bookings route: the table surfaces the failure
        let bookings = view.bookings.state();
        assert!(bookings.error.is_some());
        assert!(bookings.data.bookings.is_empty());
    }

    #[tokio::test]
    async fn test_bookings_refresh_recovers() {
        let fake = fake_api();
        let transport: Arc<dyn Transport> = fake.clone();
        let services = Services::new(transport);
        let ctx = RestaurantContext::new(RestaurantId::new("r1"));
        let panel = bookings_panel(&ctx, Arc::new(MemoryStore::default()), &services);

        let state = tokio::time::timeout(Duration::from_secs(5), panel.settled())
            .await
            .unwrap();
        assert!(state.error.is_some());

        fake.set_route(
            "booking/r1/dashboard",
            json!({"bookings": [{"customerName": "Ada", "status": "confirmed"}], "totalBookings": 1}),
        );
        panel.refresh();

        let mut rx = panel.subscribe();
        let state = tokio::time::timeout(Duration::from_secs(5), async {
            rx.wait_for(|s| !s.loading && s.error.is_none())
                .await
                .map(|s| s.clone())
        })
        .await
        .unwrap()
        .unwrap();
        assert_eq!(state.data.total_bookings, 1);
        assert_eq!(state.data.bookings[0].customer_name, "Ada");
    }

    #[tokio::test]
    async fn test_no_identifier_means_no_requests() {
        let fake = fake_api();
        let transport: Arc<dyn Transport> = fake.clone();
        let services = Services::new(transport);
        let ctx = RestaurantContext::default();
        let view = DashboardView::spawn(&ctx, Arc::new(MemoryStore::default()), &services);

        settle(&view).await;

        assert!(fake.calls().is_empty());
        assert_eq!(view.overview.state().data, DashboardOverview::default());
        assert_eq!(view.ratings.state().data, RatingSummary::default());
        assert_eq!(view.bookings.state().error, None);
    }
}
