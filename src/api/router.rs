use axum::{
    Router, middleware,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use super::handlers::{
    AppState, approve_booking, cancel_booking, get_booking_by_id, list_bookings, login,
    reject_booking, require_auth, submit_booking,
};

/// Creates the API router with all booking management endpoints
///
/// Command endpoints (Write operations, bearer token required):
/// - POST /bookings - Submit a new booking request
/// - POST /bookings/:id/approve - Approve a pending booking
/// - POST /bookings/:id/reject - Reject a pending or approved booking
/// - POST /bookings/:id/cancel - Cancel an approved booking
///
/// Query endpoints (Read operations):
/// - GET /bookings - List bookings with optional status/venue filters
/// - GET /bookings/:id - Get booking details
///
/// Authentication:
/// - POST /auth/login - Exchange credentials for a bearer token
pub fn create_router(state: Arc<AppState>) -> Router {
    // Write operations are gated behind bearer token authentication
    let protected_routes = Router::new()
        .route("/bookings", post(submit_booking))
        .route("/bookings/:id/approve", post(approve_booking))
        .route("/bookings/:id/reject", post(reject_booking))
        .route("/bookings/:id/cancel", post(cancel_booking))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    Router::new()
        // Health check endpoint
        .route("/health", get(health_check))
        // Authentication endpoint
        .route("/auth/login", post(login))
        // Query endpoints (Read operations)
        .route("/bookings", get(list_bookings))
        .route("/bookings/:id", get(get_booking_by_id))
        .merge(protected_routes)
        // Add tracing middleware
        .layer(TraceLayer::new_for_http())
        // Add application state
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
