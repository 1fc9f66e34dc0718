use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::TimeOfDay;

/// A confirmed reservation of a room for a time interval on a date.
///
/// The interval is half-open: `[start_time, end_time)`, so a booking ending
/// exactly when another starts does not conflict with it. Bookings are
/// created only by the booking service after every conflict check has
/// passed, and are never mutated afterwards; removal is an administrative
/// operation outside this service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub id: Uuid,
    pub room_id: String,
    pub date: NaiveDate,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
    /// Resolved staff ids, in the order the caller listed them.
    pub attendees: Vec<String>,
    pub created_at: DateTime<Utc>,
}
