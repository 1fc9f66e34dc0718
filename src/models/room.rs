use serde::{Deserialize, Serialize};

/// A bookable meeting room.
///
/// Rooms are reference data maintained by an external catalog process; the
/// booking core only ever reads them. Ids are caller-supplied strings so
/// the catalog can keep its own naming scheme.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    pub id: String,
    pub name: String,
}

/// Input for registering a room. A UUID is generated when `id` is omitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRoomInput {
    pub id: Option<String>,
    pub name: String,
}
