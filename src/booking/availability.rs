use chrono::NaiveDate;

use crate::models::{Booking, TimeOfDay};

/// The resource whose calendar is being probed: one room, or one staff
/// member across every room.
#[derive(Debug, Clone, Copy)]
pub enum ResourceKey<'a> {
    Room(&'a str),
    Staff(&'a str),
}

/// Half-open interval overlap: `[s1, e1)` and `[s2, e2)` collide iff
/// `s1 < e2 && s2 < e1`.
///
/// This is the only correct form of the test. Checking whether either
/// endpoint falls inside the other interval misses the case where one
/// interval strictly contains the other. Adjacent intervals (one ending
/// exactly when the other starts) do not collide.
pub fn overlaps(s1: TimeOfDay, e1: TimeOfDay, s2: TimeOfDay, e2: TimeOfDay) -> bool {
    s1 < e2 && s2 < e1
}

/// Whether `key` is free for `duration_minutes` starting at `start` on
/// `date`, judged against the supplied booking snapshot.
///
/// An interval that would run past midnight is never free. Pure query: the
/// caller is responsible for evaluating it inside the same atomic unit as
/// any write that depends on the answer.
pub fn is_free(
    key: ResourceKey<'_>,
    date: NaiveDate,
    start: TimeOfDay,
    duration_minutes: u16,
    existing: &[Booking],
) -> bool {
    let Some(end) = start.advance(duration_minutes) else {
        return false;
    };

    !existing.iter().any(|booking| {
        booking.date == date
            && occupies(booking, key)
            && overlaps(booking.start_time, booking.end_time, start, end)
    })
}

fn occupies(booking: &Booking, key: ResourceKey<'_>) -> bool {
    match key {
        ResourceKey::Room(id) => booking.room_id == id,
        ResourceKey::Staff(id) => booking.attendees.iter().any(|a| a == id),
    }
}
