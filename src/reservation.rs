// Reservation flow: validates one booking attempt against a room and
// derives the record handed to the sink

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::catalog::Room;

pub const DATE_INPUT_FORMAT: &str = "%Y-%m-%d";
pub const DATE_DISPLAY_FORMAT: &str = "%b %d, %Y";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateField {
    CheckIn,
    CheckOut,
}

impl fmt::Display for DateField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateField::CheckIn => f.write_str("check-in"),
            DateField::CheckOut => f.write_str("check-out"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReservationError {
    #[error("Room is not available")]
    RoomUnavailable,

    #[error("Invalid {0} date")]
    InvalidDate(DateField),

    #[error("Invalid date range: check-out must be after check-in")]
    InvalidDateRange,

    #[error("Invalid guest name")]
    InvalidGuestName,
}

impl ReservationError {
    /// Message shown to the guest at the prompt that caused the failure.
    pub fn user_message(&self) -> String {
        match self {
            ReservationError::RoomUnavailable => {
                "Room is not available. Please choose another room.".to_string()
            }
            ReservationError::InvalidDate(field) => format!(
                "Invalid {} date. Please enter a valid date in the format YYYY-MM-DD.",
                field
            ),
            ReservationError::InvalidDateRange => {
                "Invalid date range. Check-out date must be after the check-in date.".to_string()
            }
            ReservationError::InvalidGuestName => {
                "Invalid guest name. Please enter a valid name.".to_string()
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationRecord {
    // Display details of the room at booking time, e.g. "Suite ($200/night)"
    pub room: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub guest_name: String,
    pub nights: u32,
    pub total_cost: u64,
}

// This is the exact block appended to the reservation file
impl fmt::Display for ReservationRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Reservation Details:")?;
        writeln!(f, "Room: {}", self.room)?;
        writeln!(f, "Check-In: {}", format_date(self.check_in))?;
        writeln!(f, "Check-Out: {}", format_date(self.check_out))?;
        writeln!(f, "Guest Name: {}", self.guest_name)?;
        write!(f, "Total Cost: ${}", self.total_cost)
    }
}

/// Parses a calendar date in strict `YYYY-MM-DD` form.
///
/// chrono on its own accepts unpadded fields and signed years, so the shape
/// is checked first: ten ASCII characters, dashes at positions 4 and 7,
/// digits everywhere else.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let bytes = text.as_bytes();
    if bytes.len() != 10 {
        return None;
    }
    let shape_ok = bytes.iter().enumerate().all(|(i, b)| match i {
        4 | 7 => *b == b'-',
        _ => b.is_ascii_digit(),
    });
    if !shape_ok {
        return None;
    }
    NaiveDate::parse_from_str(text, DATE_INPUT_FORMAT).ok()
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_DISPLAY_FORMAT).to_string()
}

/// Validates a reservation attempt and, when every check passes, marks the
/// room unavailable and returns the record.
///
/// Checks run in a fixed order (availability, check-in, check-out, range,
/// guest name) and the first failure is returned. The room is untouched on
/// every error path.
pub fn attempt_reservation(
    room: &mut Room,
    check_in_text: &str,
    check_out_text: &str,
    guest_name: &str,
) -> Result<ReservationRecord, ReservationError> {
    let record = validate(room, check_in_text, check_out_text, guest_name).map_err(|e| {
        warn!(room = %room, error = %e, "reservation attempt rejected");
        e
    })?;

    room.mark_unavailable();
    info!(
        room = %room,
        guest = %record.guest_name,
        nights = record.nights,
        total_cost = record.total_cost,
        "reservation committed"
    );
    Ok(record)
}

fn validate(
    room: &Room,
    check_in_text: &str,
    check_out_text: &str,
    guest_name: &str,
) -> Result<ReservationRecord, ReservationError> {
    if !room.available {
        return Err(ReservationError::RoomUnavailable);
    }

    let check_in =
        parse_date(check_in_text).ok_or(ReservationError::InvalidDate(DateField::CheckIn))?;
    let check_out =
        parse_date(check_out_text).ok_or(ReservationError::InvalidDate(DateField::CheckOut))?;

    // Zero nights is rejected along with negative ones
    let nights = (check_out - check_in).num_days();
    if nights <= 0 {
        return Err(ReservationError::InvalidDateRange);
    }
    // Any span between two NaiveDates fits in u32
    let nights = u32::try_from(nights).map_err(|_| ReservationError::InvalidDateRange)?;

    if guest_name.trim().is_empty() {
        return Err(ReservationError::InvalidGuestName);
    }

    Ok(ReservationRecord {
        room: room.details(),
        check_in,
        check_out,
        guest_name: guest_name.to_string(),
        nights,
        total_cost: u64::from(nights) * u64::from(room.rate),
    })
}
