mod handlers;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::booking::BookingService;

pub fn create_router(service: BookingService) -> Router {
    let api = Router::new()
        // Fulfillment (conversational front end)
        .route("/fulfillment", post(handlers::fulfill))
        // Bookings (external listing view)
        .route("/bookings", get(handlers::list_bookings))
        // Catalog (external catalog process)
        .route("/rooms", get(handlers::list_rooms))
        .route("/rooms", post(handlers::create_room))
        .route("/staff", get(handlers::list_staff))
        .route("/staff", post(handlers::create_staff))
        // Health
        .route("/health", get(handlers::health));

    Router::new()
        .nest("/api/v1", api)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(service)
}
