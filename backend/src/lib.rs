//! User directory library modules.
//!
//! The server side follows a ports-and-adapters layout: `domain` owns the
//! user model and ports, `inbound` exposes them over HTTP, and `outbound`
//! stores them in PostgreSQL or memory. `client` holds the typed API client
//! and the UI state controller that drive the service from the other end.

pub mod client;
pub mod config;
pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
