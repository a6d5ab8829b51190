//! Live dashboard panels
//!
//! A [`Panel`] is the view-model behind one card, chart or table. It follows
//! a [`RestaurantContext`](crate::context::RestaurantContext), fetches
//! whenever the effective restaurant changes, reshapes the response and
//! publishes [`PanelState`] over a watch channel.
//!
//! Cancellation is structural: an identifier change or refresh drops the
//! in-flight fetch, and dropping the panel stops its task and closes its
//! publish gate, so no state is published after disposal.

mod panel;
mod panels;

pub use panel::{FailurePolicy, Loader, Panel, PanelState};
pub use panels::{
    bookings_panel, comparison_panel, overview_panel, ratings_panel, stats_panel, DashboardView,
};
