//! Signed ingestion endpoints.
//!
//! Every inbound ingestion call must carry a valid HMAC signature
//! (see `crate::signature`). The routes here only translate verification
//! outcomes into the HTTP contract:
//!
//! - `POST /api/ingest/events`: verifies the request headers and returns
//!   `202 Accepted` with an ack, or `401` with
//!   `{"error":"unauthorized","reason":...}` where the reason is
//!   deliberately coarse — which component of the signature was wrong is
//!   logged server-side only.
//!
//! - `GET /api/ingest/health`: unauthenticated liveness probe.

use actix_web::web::{get, post, scope};
use actix_web::Scope;

mod events;
mod health;

const API_PATH: &str = "/api/ingest";

/// Configures and returns the Actix scope for ingestion routes.
pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("/events", post().to(events::process))
        .route("/health", get().to(health::process))
}
