mod schema;

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use chrono::NaiveDate;
use rusqlite::Connection;
use uuid::Uuid;

use crate::models::*;

pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    pub fn open(path: PathBuf) -> Result<Self> {
        let parent = path
            .parent()
            .ok_or_else(|| anyhow::anyhow!("Database path has no parent directory"))?;
        std::fs::create_dir_all(parent)?;
        let conn = Connection::open(&path)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn open_default() -> Result<Self> {
        let dirs = directories::ProjectDirs::from("", "", "roomdesk")
            .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
        let db_path = dirs.data_dir().join("roomdesk.db");
        Self::open(db_path)
    }

    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn migrate(&self) -> Result<()> {
        let conn = self.conn.lock().expect("database lock poisoned");
        schema::run_migrations(&conn)
    }

    // ============================================================
    // Room catalog operations
    // ============================================================

    pub fn get_all_rooms(&self) -> Result<Vec<Room>> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let mut stmt = conn.prepare("SELECT id, name FROM rooms ORDER BY name")?;

        let rooms = stmt
            .query_map([], |row| {
                Ok(Room {
                    id: row.get(0)?,
                    name: row.get(1)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(rooms)
    }

    pub fn create_room(&self, input: CreateRoomInput) -> Result<Room> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let id = input.id.unwrap_or_else(|| Uuid::new_v4().to_string());

        conn.execute(
            "INSERT INTO rooms (id, name) VALUES (?, ?)",
            (&id, &input.name),
        )?;

        Ok(Room {
            id,
            name: input.name,
        })
    }

    // ============================================================
    // Staff catalog operations
    // ============================================================

    pub fn get_all_staff(&self) -> Result<Vec<StaffMember>> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let mut stmt = conn.prepare("SELECT id, full_name FROM staff ORDER BY full_name")?;

        let staff = stmt
            .query_map([], |row| {
                Ok(StaffMember {
                    id: row.get(0)?,
                    full_name: row.get(1)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(staff)
    }

    pub fn create_staff(&self, input: CreateStaffInput) -> Result<StaffMember> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let id = input.id.unwrap_or_else(|| Uuid::new_v4().to_string());

        conn.execute(
            "INSERT INTO staff (id, full_name) VALUES (?, ?)",
            (&id, &input.full_name),
        )?;

        Ok(StaffMember {
            id,
            full_name: input.full_name,
        })
    }

    // ============================================================
    // Booking operations
    // ============================================================

    pub fn get_all_bookings(&self) -> Result<Vec<Booking>> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let mut stmt = conn.prepare(
            "SELECT id, room_id, date, start_min, end_min, attendees, created_at
             FROM bookings ORDER BY date, start_min",
        )?;

        let bookings = stmt
            .query_map([], map_booking_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(bookings)
    }

    /// Confirmed bookings for one room on one date.
    pub fn get_bookings_for_room(&self, room_id: &str, date: NaiveDate) -> Result<Vec<Booking>> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let mut stmt = conn.prepare(
            "SELECT id, room_id, date, start_min, end_min, attendees, created_at
             FROM bookings WHERE room_id = ? AND date = ? ORDER BY start_min",
        )?;

        let bookings = stmt
            .query_map((room_id, date.to_string()), map_booking_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(bookings)
    }

    /// Every confirmed booking on a date, across all rooms. Attendee
    /// double-booking checks scan this set.
    pub fn get_bookings_on_date(&self, date: NaiveDate) -> Result<Vec<Booking>> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let mut stmt = conn.prepare(
            "SELECT id, room_id, date, start_min, end_min, attendees, created_at
             FROM bookings WHERE date = ? ORDER BY start_min",
        )?;

        let bookings = stmt
            .query_map([date.to_string()], map_booking_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(bookings)
    }

    pub fn insert_booking(&self, booking: &Booking) -> Result<()> {
        let conn = self.conn.lock().expect("database lock poisoned");

        conn.execute(
            "INSERT INTO bookings (id, room_id, date, start_min, end_min, attendees, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
            (
                booking.id.to_string(),
                &booking.room_id,
                booking.date.to_string(),
                booking.start_time.minutes(),
                booking.end_time.minutes(),
                serde_json::to_string(&booking.attendees)?,
                booking.created_at.to_rfc3339(),
            ),
        )?;

        Ok(())
    }
}

impl Clone for Database {
    fn clone(&self) -> Self {
        Self {
            conn: self.conn.clone(),
        }
    }
}

fn map_booking_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Booking> {
    let attendees_json: String = row.get(5)?;
    Ok(Booking {
        id: parse_uuid(row.get::<_, String>(0)?),
        room_id: row.get(1)?,
        date: parse_date(row.get::<_, String>(2)?),
        start_time: parse_minutes(row.get::<_, i64>(3)?),
        end_time: parse_minutes(row.get::<_, i64>(4)?),
        attendees: serde_json::from_str(&attendees_json).unwrap_or_default(),
        created_at: parse_datetime(row.get::<_, String>(6)?),
    })
}

fn parse_uuid(s: String) -> Uuid {
    Uuid::parse_str(&s).unwrap_or_else(|_| Uuid::nil())
}

fn parse_date(s: String) -> NaiveDate {
    s.parse().unwrap_or_default()
}

fn parse_minutes(v: i64) -> TimeOfDay {
    u16::try_from(v)
        .ok()
        .and_then(TimeOfDay::from_minutes)
        .unwrap_or(TimeOfDay::MIDNIGHT)
}

fn parse_datetime(s: String) -> chrono::DateTime<chrono::Utc> {
    chrono::DateTime::parse_from_rfc3339(&s)
        .map(|dt| dt.with_timezone(&chrono::Utc))
        .unwrap_or_else(|_| chrono::Utc::now())
}
