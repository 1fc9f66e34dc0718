use std::collections::HashMap;

use anyhow::anyhow;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::TimeOfDay;
use crate::error::BookingError;

/// An intent payload as delivered by the upstream conversational layer.
///
/// The upstream service has already done intent recognition and slot
/// extraction; this is its output, verbatim. Slot values are kept as raw
/// JSON because the upstream layer is not consistent about types (numbers
/// sometimes arrive as strings and vice versa).
#[derive(Debug, Clone, Deserialize)]
pub struct FulfillmentRequest {
    pub intent: String,
    #[serde(default)]
    pub slots: HashMap<String, Value>,
}

/// Whether a request was satisfied from the caller's perspective.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum FulfillmentState {
    Fulfilled,
    Failed,
}

/// The reply handed back to the conversational layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FulfillmentResponse {
    pub state: FulfillmentState,
    pub message: String,
}

impl FulfillmentResponse {
    pub fn fulfilled(message: impl Into<String>) -> Self {
        Self {
            state: FulfillmentState::Fulfilled,
            message: message.into(),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            state: FulfillmentState::Failed,
            message: message.into(),
        }
    }
}

/// A validated BookMeeting intent, ready for the booking engine.
#[derive(Debug, Clone)]
pub struct BookMeetingRequest {
    /// Free-text room name, resolved against the catalog later.
    pub room: String,
    pub date: NaiveDate,
    pub start_time: TimeOfDay,
    pub duration_minutes: u16,
    /// Comma-separated attendee names as uttered, possibly empty.
    pub attendees: String,
}

impl BookMeetingRequest {
    pub fn from_slots(slots: &HashMap<String, Value>) -> Result<Self, BookingError> {
        let room = require(slots, "Room")?;
        let date = parse_date("MeetingDate", &require(slots, "MeetingDate")?)?;
        let start_time = parse_time("MeetingTime", &require(slots, "MeetingTime")?)?;
        let duration_minutes = parse_duration(&require(slots, "Duration")?)?;
        let attendees = slot_text(slots, "Attendees").unwrap_or_default();

        Ok(Self {
            room,
            date,
            start_time,
            duration_minutes,
            attendees,
        })
    }

    /// Attendee names split on commas with surrounding whitespace trimmed.
    /// An absent or empty slot yields an empty list: a meeting with no
    /// attendees is valid.
    pub fn attendee_names(&self) -> Vec<&str> {
        self.attendees
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .collect()
    }
}

/// A validated CheckAvailability intent.
#[derive(Debug, Clone)]
pub struct CheckAvailabilityRequest {
    pub room: String,
    pub date: NaiveDate,
    pub start_time: TimeOfDay,
}

impl CheckAvailabilityRequest {
    pub fn from_slots(slots: &HashMap<String, Value>) -> Result<Self, BookingError> {
        Ok(Self {
            room: require(slots, "Room")?,
            date: parse_date("CheckDate", &require(slots, "CheckDate")?)?,
            start_time: parse_time("CheckTime", &require(slots, "CheckTime")?)?,
        })
    }
}

/// Scalar slot value as trimmed text; `None` when absent, empty, or not a
/// scalar.
fn slot_text(slots: &HashMap<String, Value>, name: &str) -> Option<String> {
    let text = match slots.get(name)? {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    (!text.is_empty()).then_some(text)
}

fn require(slots: &HashMap<String, Value>, name: &'static str) -> Result<String, BookingError> {
    slot_text(slots, name).ok_or(BookingError::MissingSlot(name))
}

fn parse_date(name: &str, raw: &str) -> Result<NaiveDate, BookingError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|e| BookingError::Internal(anyhow!("malformed {name} slot {raw:?}: {e}")))
}

fn parse_time(name: &str, raw: &str) -> Result<TimeOfDay, BookingError> {
    raw.parse()
        .map_err(|e| BookingError::Internal(anyhow!("malformed {name} slot: {e}")))
}

fn parse_duration(raw: &str) -> Result<u16, BookingError> {
    let minutes: u16 = raw
        .parse()
        .map_err(|e| BookingError::Internal(anyhow!("malformed Duration slot {raw:?}: {e}")))?;
    if minutes == 0 {
        return Err(BookingError::Internal(anyhow!(
            "Duration must be a positive number of minutes"
        )));
    }
    Ok(minutes)
}
