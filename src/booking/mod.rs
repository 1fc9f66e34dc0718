//! The booking conflict-resolution engine.
//!
//! [`BookingService`] orchestrates a booking attempt end to end: fuzzy
//! entity resolution ([`resolver`]), interval conflict checks
//! ([`availability`]), and the atomic write. [`fallback`] answers intents
//! nothing else recognizes.

pub mod availability;
pub mod fallback;
pub mod resolver;

use std::sync::{Arc, Mutex, MutexGuard, TryLockError};
use std::time::{Duration, Instant};

use anyhow::anyhow;
use chrono::Utc;
use rand::Rng;
use uuid::Uuid;

use crate::db::Database;
use crate::error::BookingError;
use crate::models::*;

use availability::ResourceKey;
use resolver::EntityKind;

/// Tunables for the booking service, read from the environment.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Budget for one booking attempt, covering lock acquisition and the
    /// conflict-checked write (ROOMDESK_REQUEST_TIMEOUT_MS).
    pub request_timeout: Duration,
    /// Probe length for availability checks that name no duration
    /// (ROOMDESK_PROBE_MINUTES).
    pub probe_minutes: u16,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_millis(2000),
            probe_minutes: 30,
        }
    }
}

impl ServiceConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let request_timeout = std::env::var("ROOMDESK_REQUEST_TIMEOUT_MS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .map(Duration::from_millis)
            .unwrap_or(defaults.request_timeout);

        let probe_minutes = std::env::var("ROOMDESK_PROBE_MINUTES")
            .ok()
            .and_then(|s| s.parse::<u16>().ok())
            .unwrap_or(defaults.probe_minutes);

        Self {
            request_timeout,
            probe_minutes,
        }
    }
}

/// Orchestrates booking attempts against an injected store.
///
/// Clones share the same store handle and the same booking lock, so every
/// clone's check-and-write serializes against all the others.
#[derive(Clone)]
pub struct BookingService {
    db: Database,
    config: ServiceConfig,
    /// Advisory lock closing the scan-then-write race: held from the room
    /// availability re-check through the insert. Service-wide rather than
    /// per-room because the attendee no-double-booking invariant spans
    /// rooms on the same date.
    booking_slot: Arc<Mutex<()>>,
}

impl BookingService {
    pub fn new(db: Database, config: ServiceConfig) -> Self {
        Self {
            db,
            config,
            booking_slot: Arc::new(Mutex::new(())),
        }
    }

    /// Read-only store access for external collaborators (the listing view
    /// and the catalog process).
    pub fn db(&self) -> &Database {
        &self.db
    }

    /// Service boundary for the conversational layer: dispatch on the
    /// intent name and map the outcome to a fulfillment reply. Business
    /// errors become `Failed` replies with their own message; unexpected
    /// errors are logged in full here and surfaced generically.
    pub fn fulfill(&self, request: &FulfillmentRequest) -> FulfillmentResponse {
        self.fulfill_with(request, &mut rand::thread_rng())
    }

    /// [`Self::fulfill`] with a caller-supplied randomness source for the
    /// fallback draw.
    pub fn fulfill_with<R: Rng + ?Sized>(
        &self,
        request: &FulfillmentRequest,
        rng: &mut R,
    ) -> FulfillmentResponse {
        match request.intent.as_str() {
            "BookMeeting" => {
                let deadline = Instant::now() + self.config.request_timeout;
                match BookMeetingRequest::from_slots(&request.slots)
                    .and_then(|req| self.book_meeting(&req, deadline))
                {
                    Ok(confirmation) => FulfillmentResponse::fulfilled(confirmation),
                    Err(e) => self.failure_reply(e),
                }
            }
            "CheckAvailability" => match CheckAvailabilityRequest::from_slots(&request.slots)
                .and_then(|req| Ok((self.check_availability(&req)?, req)))
            {
                Ok((true, req)) => FulfillmentResponse::fulfilled(format!(
                    "Room {} is available at {}.",
                    req.room, req.start_time
                )),
                Ok((false, _)) => {
                    FulfillmentResponse::failed("Room not available at the requested time.")
                }
                Err(e) => self.failure_reply(e),
            },
            other => {
                tracing::debug!(intent = other, "unrecognized intent, falling back");
                FulfillmentResponse::failed(fallback::respond(rng))
            }
        }
    }

    /// Book a meeting: resolve the room, then, holding the booking lock,
    /// re-check room availability, resolve attendees, check each
    /// attendee's calendar, and commit.
    ///
    /// The checks run in that order, so a request with several problems
    /// reports the first one: room resolution, room conflict, attendee
    /// resolution, attendee conflict. Nothing is written unless every
    /// check passes.
    pub fn book_meeting(
        &self,
        request: &BookMeetingRequest,
        deadline: Instant,
    ) -> Result<String, BookingError> {
        let attendee_names = request.attendee_names();

        let rooms = self.db.get_all_rooms()?;
        let room = resolver::resolve(EntityKind::Room, &request.room, &rooms)
            .ok_or_else(|| BookingError::RoomNotFound(request.room.clone()))?;

        let end_time = request
            .start_time
            .advance(request.duration_minutes)
            .ok_or_else(|| {
                BookingError::Internal(anyhow!(
                    "meeting starting at {} for {} minutes would run past midnight",
                    request.start_time,
                    request.duration_minutes
                ))
            })?;

        let _slot = self.acquire_booking_slot(deadline)?;

        // Availability against the latest state, now that no other booking
        // can land between the check and our insert.
        let room_bookings = self.db.get_bookings_for_room(&room.id, request.date)?;
        if !availability::is_free(
            ResourceKey::Room(&room.id),
            request.date,
            request.start_time,
            request.duration_minutes,
            &room_bookings,
        ) {
            return Err(BookingError::RoomConflict);
        }

        let staff_catalog = self.db.get_all_staff()?;
        let mut attendees: Vec<String> = Vec::with_capacity(attendee_names.len());
        let mut attendee_labels = Vec::with_capacity(attendee_names.len());
        for name in &attendee_names {
            let member = resolver::resolve(EntityKind::Staff, name, &staff_catalog)
                .ok_or_else(|| BookingError::StaffNotFound(name.to_string()))?;
            // A name uttered twice is one attendee.
            if !attendees.contains(&member.id) {
                attendees.push(member.id.clone());
                attendee_labels.push(member.full_name.clone());
            }
        }

        let day_bookings = self.db.get_bookings_on_date(request.date)?;
        for staff_id in &attendees {
            if !availability::is_free(
                ResourceKey::Staff(staff_id),
                request.date,
                request.start_time,
                request.duration_minutes,
                &day_bookings,
            ) {
                return Err(BookingError::StaffConflict(staff_id.clone()));
            }
        }

        let booking = Booking {
            id: Uuid::new_v4(),
            room_id: room.id.clone(),
            date: request.date,
            start_time: request.start_time,
            end_time,
            attendees,
            created_at: Utc::now(),
        };
        self.db.insert_booking(&booking)?;

        tracing::info!(
            booking_id = %booking.id,
            room = %room.name,
            date = %booking.date,
            start = %booking.start_time,
            "booking committed"
        );

        Ok(confirmation_message(&room.name, &booking, &attendee_labels))
    }

    /// Answer free/busy for a room at a time, using the configured probe
    /// duration. Pure read; nothing is persisted.
    pub fn check_availability(
        &self,
        request: &CheckAvailabilityRequest,
    ) -> Result<bool, BookingError> {
        let rooms = self.db.get_all_rooms()?;
        let room = resolver::resolve(EntityKind::Room, &request.room, &rooms)
            .ok_or_else(|| BookingError::RoomNotFound(request.room.clone()))?;

        let existing = self.db.get_bookings_for_room(&room.id, request.date)?;
        Ok(availability::is_free(
            ResourceKey::Room(&room.id),
            request.date,
            request.start_time,
            self.config.probe_minutes,
            &existing,
        ))
    }

    fn failure_reply(&self, error: BookingError) -> FulfillmentResponse {
        if let BookingError::Internal(e) = &error {
            tracing::error!(error = ?e, "booking request failed unexpectedly");
            return FulfillmentResponse::failed(
                "Something went wrong on our side. Please try again later.",
            );
        }
        FulfillmentResponse::failed(error.to_string())
    }

    /// Acquire the booking lock, backing off exponentially until the
    /// deadline. Elapsing the deadline fails the attempt with `Timeout`
    /// before anything is written.
    fn acquire_booking_slot(&self, deadline: Instant) -> Result<MutexGuard<'_, ()>, BookingError> {
        let mut backoff = Duration::from_millis(5);
        loop {
            match self.booking_slot.try_lock() {
                Ok(guard) => return Ok(guard),
                Err(TryLockError::WouldBlock) => {}
                Err(TryLockError::Poisoned(_)) => panic!("booking lock poisoned"),
            }
            if Instant::now() + backoff > deadline {
                return Err(BookingError::Timeout);
            }
            std::thread::sleep(backoff);
            backoff = (backoff * 2).min(Duration::from_millis(100));
        }
    }
}

fn confirmation_message(room_name: &str, booking: &Booking, attendee_names: &[String]) -> String {
    if attendee_names.is_empty() {
        format!(
            "Booking confirmed for room {} at {} on {}.",
            room_name, booking.start_time, booking.date
        )
    } else {
        format!(
            "Booking confirmed for room {} at {} on {} with attendees: {}.",
            room_name,
            booking.start_time,
            booking.date,
            attendee_names.join(", ")
        )
    }
}
