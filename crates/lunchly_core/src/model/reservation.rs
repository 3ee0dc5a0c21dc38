//! Reservation domain model.
//!
//! # Responsibility
//! - Represent one party booking for a customer.
//! - Validate guest count, start time and customer ownership on every write.
//! - Convert raw form text into typed field values.
//!
//! # Invariants
//! - `num_guests >= 1` at all times.
//! - `start_at` has a calendar year in `1..=9999` so it round-trips through
//!   the store text encoding.
//! - `customer_id` never changes once set.
//! - A failed setter leaves the reservation exactly as it was.

use crate::model::customer::CustomerId;
use crate::model::notes::normalize_notes;
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use serde::Serialize;
use thiserror::Error;

/// Store-assigned reservation identifier.
pub type ReservationId = i64;

/// Smallest party size accepted for a reservation.
pub const MIN_GUESTS: i64 = 1;

const MIN_START_YEAR: i32 = 1;
const MAX_START_YEAR: i32 = 9999;

const START_AT_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

/// Field-level validation failure for reservations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReservationValidationError {
    /// Party size below `MIN_GUESTS`.
    #[error("Must have at least 1 guest! (got {0})")]
    NumGuestsTooSmall(i64),
    /// Party size text is not an integer.
    #[error("Not a valid number of guests: `{0}`")]
    InvalidNumGuests(String),
    /// Start time is unparseable or outside the storable range.
    #[error("Not a valid startAt: `{0}`")]
    InvalidStartAt(String),
    /// Attempt to move a reservation to another customer.
    #[error("Cannot change customer ID from {current} to {attempted}")]
    CustomerIdChanged {
        current: CustomerId,
        attempted: CustomerId,
    },
}

pub type ValidationResult<T> = Result<T, ReservationValidationError>;

/// A reservation for a party.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    id: Option<ReservationId>,
    customer_id: CustomerId,
    num_guests: i64,
    start_at: NaiveDateTime,
    notes: String,
}

impl Reservation {
    /// Creates a transient reservation after validating every field.
    pub fn new(
        customer_id: CustomerId,
        num_guests: i64,
        start_at: NaiveDateTime,
        notes: Option<&str>,
    ) -> ValidationResult<Self> {
        validate_num_guests(num_guests)?;
        validate_start_at(&start_at)?;
        Ok(Self {
            id: None,
            customer_id,
            num_guests,
            start_at,
            notes: normalize_notes(notes),
        })
    }

    /// Rebuilds a persisted reservation, applying the same validation as `new`.
    pub(crate) fn from_persisted(
        id: ReservationId,
        customer_id: CustomerId,
        num_guests: i64,
        start_at: NaiveDateTime,
        notes: Option<String>,
    ) -> ValidationResult<Self> {
        let mut reservation = Self::new(customer_id, num_guests, start_at, notes.as_deref())?;
        reservation.id = Some(id);
        Ok(reservation)
    }

    /// Store id, or `None` while transient.
    pub fn id(&self) -> Option<ReservationId> {
        self.id
    }

    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    pub fn customer_id(&self) -> CustomerId {
        self.customer_id
    }

    pub fn num_guests(&self) -> i64 {
        self.num_guests
    }

    pub fn start_at(&self) -> NaiveDateTime {
        self.start_at
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }

    /// Re-asserts the owning customer.
    ///
    /// Same id is a no-op; any other id fails with `CustomerIdChanged`.
    pub fn set_customer_id(&mut self, customer_id: CustomerId) -> ValidationResult<()> {
        if self.customer_id != customer_id {
            return Err(ReservationValidationError::CustomerIdChanged {
                current: self.customer_id,
                attempted: customer_id,
            });
        }
        Ok(())
    }

    pub fn set_num_guests(&mut self, num_guests: i64) -> ValidationResult<()> {
        validate_num_guests(num_guests)?;
        self.num_guests = num_guests;
        Ok(())
    }

    pub fn set_start_at(&mut self, start_at: NaiveDateTime) -> ValidationResult<()> {
        validate_start_at(&start_at)?;
        self.start_at = start_at;
        Ok(())
    }

    /// Replaces notes, coercing missing/empty input to `""`.
    pub fn set_notes(&mut self, notes: Option<&str>) {
        self.notes = normalize_notes(notes);
    }

    /// Replaces the three editable fields as one unit.
    ///
    /// Every value is validated before anything is assigned, so on error the
    /// reservation keeps all of its previous field values.
    pub fn apply_edit(
        &mut self,
        num_guests: i64,
        start_at: NaiveDateTime,
        notes: Option<&str>,
    ) -> ValidationResult<()> {
        validate_num_guests(num_guests)?;
        validate_start_at(&start_at)?;
        self.num_guests = num_guests;
        self.start_at = start_at;
        self.notes = normalize_notes(notes);
        Ok(())
    }

    /// Human-readable start time, e.g. `June 1st 2024, 3:00 pm`.
    pub fn formatted_start_at(&self) -> String {
        format_start_at(&self.start_at)
    }

    pub(crate) fn assign_id(&mut self, id: ReservationId) {
        self.id = Some(id);
    }
}

fn validate_num_guests(num_guests: i64) -> ValidationResult<()> {
    if num_guests < MIN_GUESTS {
        return Err(ReservationValidationError::NumGuestsTooSmall(num_guests));
    }
    Ok(())
}

fn validate_start_at(start_at: &NaiveDateTime) -> ValidationResult<()> {
    if !(MIN_START_YEAR..=MAX_START_YEAR).contains(&start_at.year()) {
        return Err(ReservationValidationError::InvalidStartAt(
            start_at.to_string(),
        ));
    }
    Ok(())
}

/// Parses a guest count submitted as text.
///
/// # Errors
/// - `InvalidNumGuests` when the text is not an integer.
/// - `NumGuestsTooSmall` when the integer is below `MIN_GUESTS`.
pub fn parse_num_guests(raw: &str) -> ValidationResult<i64> {
    let trimmed = raw.trim();
    let num_guests = trimmed
        .parse::<i64>()
        .map_err(|_| ReservationValidationError::InvalidNumGuests(trimmed.to_string()))?;
    validate_num_guests(num_guests)?;
    Ok(num_guests)
}

/// Parses a start time submitted as text.
///
/// Accepts RFC 3339 (the wall-clock part is kept, the offset dropped),
/// `YYYY-MM-DD HH:MM[:SS[.fff]]`, the `T`-separated `datetime-local` shape,
/// and a bare `YYYY-MM-DD` meaning midnight.
pub fn parse_start_at(raw: &str) -> ValidationResult<NaiveDateTime> {
    let trimmed = raw.trim();
    let invalid = || ReservationValidationError::InvalidStartAt(trimmed.to_string());
    if trimmed.is_empty() {
        return Err(invalid());
    }

    let parsed = DateTime::parse_from_rfc3339(trimmed)
        .map(|value| value.naive_local())
        .ok()
        .or_else(|| {
            START_AT_FORMATS
                .iter()
                .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
        })
        .or_else(|| {
            NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
        .ok_or_else(invalid)?;

    validate_start_at(&parsed)?;
    Ok(parsed)
}

/// Formats a start time as `MonthName DayOrdinal Year, h:mm am/pm`.
pub fn format_start_at(value: &NaiveDateTime) -> String {
    let day = value.day();
    format!(
        "{} {}{} {}, {}",
        value.format("%B"),
        day,
        ordinal_suffix(day),
        value.format("%Y"),
        value.format("%-I:%M %P")
    )
}

fn ordinal_suffix(day: u32) -> &'static str {
    match (day % 10, day % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    }
}

#[cfg(test)]
mod tests {
    use super::{
        format_start_at, ordinal_suffix, parse_num_guests, parse_start_at, Reservation,
        ReservationValidationError,
    };
    use chrono::{NaiveDate, NaiveDateTime};

    fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(year, month, day)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    #[test]
    fn new_rejects_zero_guests() {
        let err = Reservation::new(1, 0, at(2024, 6, 1, 15, 0), None).unwrap_err();
        assert_eq!(err, ReservationValidationError::NumGuestsTooSmall(0));
    }

    #[test]
    fn new_rejects_out_of_range_year() {
        let far_future = at(10_000, 1, 1, 0, 0);
        let err = Reservation::new(1, 2, far_future, None).unwrap_err();
        assert!(matches!(err, ReservationValidationError::InvalidStartAt(_)));
    }

    #[test]
    fn failed_num_guests_assignment_keeps_previous_value() {
        let mut reservation = Reservation::new(1, 4, at(2024, 6, 1, 15, 0), None).unwrap();
        assert!(reservation.set_num_guests(-3).is_err());
        assert_eq!(reservation.num_guests(), 4);
    }

    #[test]
    fn customer_id_is_write_once() {
        let mut reservation = Reservation::new(7, 2, at(2024, 6, 1, 15, 0), None).unwrap();
        reservation.set_customer_id(7).unwrap();

        let err = reservation.set_customer_id(8).unwrap_err();
        assert_eq!(
            err,
            ReservationValidationError::CustomerIdChanged {
                current: 7,
                attempted: 8
            }
        );
        assert_eq!(reservation.customer_id(), 7);
    }

    #[test]
    fn apply_edit_is_all_or_nothing() {
        let original_start = at(2024, 6, 1, 15, 0);
        let mut reservation =
            Reservation::new(1, 2, original_start, Some("birthday")).unwrap();

        let err = reservation
            .apply_edit(0, at(2024, 7, 4, 19, 30), Some("moved"))
            .unwrap_err();
        assert_eq!(err, ReservationValidationError::NumGuestsTooSmall(0));
        assert_eq!(reservation.num_guests(), 2);
        assert_eq!(reservation.start_at(), original_start);
        assert_eq!(reservation.notes(), "birthday");

        reservation
            .apply_edit(6, at(2024, 7, 4, 19, 30), None)
            .unwrap();
        assert_eq!(reservation.num_guests(), 6);
        assert_eq!(reservation.start_at(), at(2024, 7, 4, 19, 30));
        assert_eq!(reservation.notes(), "");
    }

    #[test]
    fn formats_start_at_with_ordinal_and_twelve_hour_clock() {
        assert_eq!(format_start_at(&at(2024, 6, 1, 15, 0)), "June 1st 2024, 3:00 pm");
        assert_eq!(
            format_start_at(&at(2023, 12, 22, 0, 5)),
            "December 22nd 2023, 12:05 am"
        );
        assert_eq!(format_start_at(&at(2024, 3, 13, 11, 45)), "March 13th 2024, 11:45 am");
    }

    #[test]
    fn ordinal_suffix_handles_teens() {
        let suffixes: Vec<_> = [1, 2, 3, 4, 11, 12, 13, 21, 22, 23, 31]
            .into_iter()
            .map(ordinal_suffix)
            .collect();
        assert_eq!(
            suffixes,
            ["st", "nd", "rd", "th", "th", "th", "th", "st", "nd", "rd", "st"]
        );
    }

    #[test]
    fn parse_start_at_accepts_form_shapes() {
        let expected = at(2024, 6, 1, 15, 0);
        assert_eq!(parse_start_at("2024-06-01T15:00").unwrap(), expected);
        assert_eq!(parse_start_at("2024-06-01 15:00:00").unwrap(), expected);
        assert_eq!(parse_start_at("2024-06-01T15:00:00-07:00").unwrap(), expected);
        assert_eq!(parse_start_at("2024-06-01").unwrap(), at(2024, 6, 1, 0, 0));
    }

    #[test]
    fn parse_start_at_rejects_garbage_and_impossible_dates() {
        for raw in ["", "   ", "tomorrow", "2024-02-30 10:00", "2024-13-01"] {
            let err = parse_start_at(raw).unwrap_err();
            assert!(
                matches!(err, ReservationValidationError::InvalidStartAt(_)),
                "`{raw}` should be rejected"
            );
        }
    }

    #[test]
    fn parse_num_guests_validates_text_and_range() {
        assert_eq!(parse_num_guests(" 4 ").unwrap(), 4);
        assert!(matches!(
            parse_num_guests("four"),
            Err(ReservationValidationError::InvalidNumGuests(_))
        ));
        assert_eq!(
            parse_num_guests("0"),
            Err(ReservationValidationError::NumGuestsTooSmall(0))
        );
    }
}
