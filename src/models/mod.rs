//! Domain models for roomdesk.
//!
//! # Core Concepts
//!
//! ## Reference Data
//!
//! - [`Room`]: a bookable meeting room. Maintained by an external catalog
//!   process; the booking core only reads it.
//! - [`StaffMember`]: a person who can attend meetings. Same lifecycle as
//!   [`Room`].
//!
//! ## Reservations
//!
//! - [`Booking`]: a confirmed, immutable reservation of a room for a
//!   half-open time interval on a date, with zero or more attendees.
//! - [`TimeOfDay`]: minute-of-day clock time. Interval math runs on plain
//!   integers; `HH:MM` strings exist only at the boundary.
//!
//! ## Fulfillment
//!
//! - [`FulfillmentRequest`] / [`FulfillmentResponse`]: the wire shapes
//!   exchanged with the upstream conversational layer, plus the validated
//!   per-intent requests ([`BookMeetingRequest`], [`CheckAvailabilityRequest`]).

mod booking;
mod request;
mod room;
mod staff;
mod time;

pub use booking::*;
pub use request::*;
pub use room::*;
pub use staff::*;
pub use time::*;
