use serde::{Deserialize, Serialize};

/// A person who can be booked into meetings.
///
/// Same lifecycle as [`super::Room`]: maintained externally, read-only to
/// the booking core.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaffMember {
    pub id: String,
    pub full_name: String,
}

/// Input for registering a staff member. A UUID is generated when `id` is
/// omitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateStaffInput {
    pub id: Option<String>,
    pub full_name: String,
}
