//! Dashboard API Client
//!
//! HTTP plumbing shared by every data-access service.
//!
//! ## Architecture
//!
//! - **Transport**: trait for issuing a GET and returning the JSON body
//! - **HttpTransport**: `reqwest`-backed transport against the dashboard API
//! - **ClientError**: errors surfaced by transports and services
//!
//! Services never talk to `reqwest` directly, so views and tests can swap the
//! transport for an in-memory one.

mod error;
mod transport;

pub use error::{ClientError, ClientResult};
pub use transport::{HttpTransport, HttpTransportConfig, Transport};
