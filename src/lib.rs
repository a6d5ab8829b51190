//! # Dinedash
//!
//! Restaurant-operator dashboard client. Fetches revenue, deal analytics,
//! ratings and bookings for one restaurant from a remote dashboard API and
//! reshapes them into render-ready chart series and tables.
//!
//! ## Modules
//!
//! - [`client`]: HTTP transport and client errors
//! - [`models`]: API response types
//! - [`services`]: Dashboard, analytics and booking data access
//! - [`aggregate`]: Chart-row builders, rating aggregation, booking filters
//! - [`context`]: Selected restaurant and its persisted fallback
//! - [`view`]: Live panels that follow the selected restaurant
//! - [`render`]: Table / JSON / CSV output
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use dinedash::*;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let transport = HttpTransport::new(HttpTransportConfig::default())?;
//!     let services = Services::new(Arc::new(transport));
//!
//!     let context = RestaurantContext::new(RestaurantId::new("r1"));
//!     let view = DashboardView::spawn(&context, Arc::new(MemoryStore::default()), &services);
//!     view.settled().await;
//!
//!     let ratings = view.ratings.state().data;
//!     println!("Yearly average rating: {:.2}", ratings.yearly_average);
//!
//!     // Switching restaurant supersedes any in-flight fetch
//!     context.set(RestaurantId::new("r2"));
//!     Ok(())
//! }
//! ```

pub mod aggregate;
pub mod client;
pub mod config;
pub mod context;
pub mod models;
pub mod render;
pub mod services;
pub mod view;

pub use aggregate::{
    aggregate_monthly_ratings, build_comparison_chart, build_comparison_rows, build_overview,
    paginate, parse_rating, status_breakdown, BookingFilter, ComparisonChart, ComparisonRow,
    DashboardOverview, Page, RatingPoint, RatingSummary,
};

pub use client::{ClientError, ClientResult, HttpTransport, HttpTransportConfig, Transport};

pub use config::{Config, ConfigError, LoggingConfig};

pub use context::{
    resolve_identifier, resolve_identifier_async, FileStore, IdentifierStore, MemoryStore,
    RestaurantContext, RestaurantId, StoreError,
};

pub use models::{
    Booking, BookingDashboard, BookingStatus, DashboardSnapshot, DealComparison, DealPerformance,
    DealRatings, MonthlyRatings, MonthlyStats,
};

pub use services::{AnalyticsService, BookingService, DashboardService, Services};

pub use view::{DashboardView, FailurePolicy, Panel, PanelState};
