use thiserror::Error;

/// Every way a booking attempt can fail.
///
/// All variants except [`BookingError::Internal`] are expected business
/// outcomes: they end the current attempt with a user-facing message and
/// need no retry by the caller. `Internal` is logged in full at the service
/// boundary and surfaced as a generic message only.
#[derive(Debug, Error)]
pub enum BookingError {
    #[error("Room {0} not found.")]
    RoomNotFound(String),

    #[error("Staff {0} not found.")]
    StaffNotFound(String),

    #[error("Room already booked. Suggest another slot.")]
    RoomConflict,

    #[error("Staff member {0} is already booked.")]
    StaffConflict(String),

    #[error("I'm missing the {0} for that request.")]
    MissingSlot(&'static str),

    #[error("The booking system is busy right now. Please try again.")]
    Timeout,

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}
