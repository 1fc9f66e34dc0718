use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// A clock time expressed as minutes since midnight.
///
/// All interval arithmetic in the booking engine happens on this integer
/// form; `HH:MM` strings are parsed and formatted only at the boundary.
/// The value `24:00` (1440 minutes) is permitted solely as the exclusive
/// end of a booking that runs up to midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay(u16);

pub const MINUTES_PER_DAY: u16 = 24 * 60;

#[derive(Debug, Error)]
#[error("invalid time of day: {0:?}")]
pub struct ParseTimeError(String);

impl TimeOfDay {
    pub const MIDNIGHT: TimeOfDay = TimeOfDay(0);

    pub fn from_minutes(minutes: u16) -> Option<Self> {
        (minutes <= MINUTES_PER_DAY).then_some(Self(minutes))
    }

    pub fn minutes(self) -> u16 {
        self.0
    }

    /// The end of an interval starting here, or `None` when the interval
    /// would run past midnight.
    pub fn advance(self, duration_minutes: u16) -> Option<Self> {
        self.0
            .checked_add(duration_minutes)
            .and_then(Self::from_minutes)
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.0 / 60, self.0 % 60)
    }
}

impl FromStr for TimeOfDay {
    type Err = ParseTimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseTimeError(s.to_string());
        let (hh, mm) = s.split_once(':').ok_or_else(err)?;
        let hours: u16 = hh.parse().map_err(|_| err())?;
        let minutes: u16 = mm.parse().map_err(|_| err())?;
        if hours > 24 || minutes > 59 || (hours == 24 && minutes != 0) || mm.len() != 2 {
            return Err(err());
        }
        Ok(Self(hours * 60 + minutes))
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_formats_round_trip() {
        let t: TimeOfDay = "09:05".parse().unwrap();
        assert_eq!(t.minutes(), 9 * 60 + 5);
        assert_eq!(t.to_string(), "09:05");
    }

    #[test]
    fn accepts_midnight_end() {
        let t: TimeOfDay = "24:00".parse().unwrap();
        assert_eq!(t.minutes(), MINUTES_PER_DAY);
        assert_eq!(t.to_string(), "24:00");
    }

    #[test]
    fn rejects_malformed_input() {
        for bad in ["", "9:5", "25:00", "12:60", "24:01", "noon", "12-30"] {
            assert!(bad.parse::<TimeOfDay>().is_err(), "accepted {bad:?}");
        }
    }

    #[test]
    fn advance_stops_at_midnight() {
        let t: TimeOfDay = "23:30".parse().unwrap();
        assert_eq!(t.advance(30), Some(TimeOfDay(MINUTES_PER_DAY)));
        assert_eq!(t.advance(31), None);
    }
}
