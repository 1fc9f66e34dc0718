use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::booking::BookingService;
use crate::models::*;

// ============================================================
// Error Handling
// ============================================================

/// Log an internal error and return a sanitized response to the client.
/// The full error is logged server-side for debugging, but clients only
/// see a generic message to avoid leaking internal details.
fn internal_error(e: impl std::fmt::Display) -> (StatusCode, String) {
    tracing::error!("Internal error: {}", e);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "Internal server error".to_string(),
    )
}

// ============================================================
// Health
// ============================================================

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

// ============================================================
// Fulfillment
// ============================================================

/// Intent dispatch for the conversational layer.
///
/// Always replies 200: the fulfillment state inside the body carries
/// success or failure, the way the upstream dialog layer expects it.
pub async fn fulfill(
    State(service): State<BookingService>,
    Json(request): Json<FulfillmentRequest>,
) -> Json<FulfillmentResponse> {
    Json(service.fulfill(&request))
}

// ============================================================
// Bookings
// ============================================================

pub async fn list_bookings(
    State(service): State<BookingService>,
) -> Result<Json<Vec<Booking>>, (StatusCode, String)> {
    service
        .db()
        .get_all_bookings()
        .map(Json)
        .map_err(internal_error)
}

// ============================================================
// Catalog
// ============================================================

pub async fn list_rooms(
    State(service): State<BookingService>,
) -> Result<Json<Vec<Room>>, (StatusCode, String)> {
    service.db().get_all_rooms().map(Json).map_err(internal_error)
}

pub async fn create_room(
    State(service): State<BookingService>,
    Json(input): Json<CreateRoomInput>,
) -> Result<(StatusCode, Json<Room>), (StatusCode, String)> {
    service
        .db()
        .create_room(input)
        .map(|r| (StatusCode::CREATED, Json(r)))
        .map_err(internal_error)
}

pub async fn list_staff(
    State(service): State<BookingService>,
) -> Result<Json<Vec<StaffMember>>, (StatusCode, String)> {
    service.db().get_all_staff().map(Json).map_err(internal_error)
}

pub async fn create_staff(
    State(service): State<BookingService>,
    Json(input): Json<CreateStaffInput>,
) -> Result<(StatusCode, Json<StaffMember>), (StatusCode, String)> {
    service
        .db()
        .create_staff(input)
        .map(|s| (StatusCode::CREATED, Json(s)))
        .map_err(internal_error)
}
