//! API route definitions.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers;
use crate::AppState;

/// Create API routes
pub fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        // Health check
        .route("/health", get(handlers::health))
        // Commitment and proofs
        .route("/api/root", get(handlers::root))
        .route("/api/proof/:index", get(handlers::proof_by_index))
        .route("/api/proof/account/:account", get(handlers::proof_by_account))
        .route("/api/verify", post(handlers::verify))
}
