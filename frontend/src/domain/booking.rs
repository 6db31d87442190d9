//! Seat booking submissions and their local validation.

use serde::Deserialize;
use serde_json::{Value, json};

use super::catalogue::is_truthy;

/// Message returned when a booking is rejected before reaching the backend.
pub const INVALID_BOOKING_MESSAGE: &str = "invalid booking data";

/// Raw JSON body posted to the booking confirmation endpoint.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct BookingSubmission {
    /// Show being booked, as sent by the seat picker.
    #[serde(rename = "showId", default)]
    pub show_id: Option<Value>,
    /// Selected seats.
    #[serde(default)]
    pub seats: Option<Value>,
}

/// Reasons a booking never reaches the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum BookingValidationError {
    /// `showId` was absent or falsy.
    #[error("show identifier is missing")]
    MissingShow,
    /// `seats` was absent, not a list, or empty.
    #[error("no seats selected")]
    NoSeats,
}

/// A validated booking ready to forward.
#[derive(Debug, Clone, PartialEq)]
pub struct SeatBooking {
    show_id: Value,
    seats: Vec<Value>,
}

impl SeatBooking {
    /// Validate a submission.
    ///
    /// # Examples
    /// ```
    /// use frontend::domain::{BookingSubmission, BookingValidationError, SeatBooking};
    /// use serde_json::json;
    ///
    /// let empty = BookingSubmission { show_id: Some(json!("s1")), seats: Some(json!([])) };
    /// assert_eq!(SeatBooking::try_new(empty), Err(BookingValidationError::NoSeats));
    /// ```
    pub fn try_new(submission: BookingSubmission) -> Result<Self, BookingValidationError> {
        let show_id = submission
            .show_id
            .filter(is_truthy)
            .ok_or(BookingValidationError::MissingShow)?;
        let seats = match submission.seats {
            Some(Value::Array(seats)) if !seats.is_empty() => seats,
            _ => return Err(BookingValidationError::NoSeats),
        };
        Ok(Self { show_id, seats })
    }

    /// Show identifier, exactly as submitted.
    pub fn show_id(&self) -> &Value {
        &self.show_id
    }

    /// Seats joined with commas; strings are written without quotes.
    pub fn seat_list(&self) -> String {
        self.seats
            .iter()
            .map(|seat| match seat {
                Value::String(text) => text.clone(),
                other => other.to_string(),
            })
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Body for `POST /api/book-seats`.
    pub fn payload(&self, user_email: &str) -> Value {
        json!({
            "showId": self.show_id,
            "userEmail": user_email,
            "seats": self.seat_list(),
        })
    }
}
