//! Submission validation
//!
//! Checks a raw [`ReservationCreate`] before a record is built. Checks run in
//! a fixed order and stop at the first failure:
//!
//! 1. required fields (name, phone, party_size, date, time) non-empty after trim
//! 2. party size is an integer in `MIN_PARTY_SIZE..=MAX_PARTY_SIZE`
//! 3. date is `YYYY-MM-DD` and not before today
//!
//! Capacity is not checked here; the manager does that under its lock right
//! before inserting.

use chrono::NaiveDate;
use shared::models::{MAX_PARTY_SIZE, MIN_PARTY_SIZE, ReservationCreate, ReservationType};
use thiserror::Error;

use crate::utils::time::DATE_FORMAT;

/// Why a field was rejected
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationReason {
    MissingField,
    InvalidPartySize,
    InvalidDate,
    DateInPast { today: NaiveDate },
}

impl std::fmt::Display for ValidationReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField => f.write_str("must not be empty"),
            Self::InvalidPartySize => write!(
                f,
                "must be a whole number between {MIN_PARTY_SIZE} and {MAX_PARTY_SIZE}"
            ),
            Self::InvalidDate => f.write_str("must be a date in YYYY-MM-DD format"),
            Self::DateInPast { today } => write!(f, "must be today ({today}) or later"),
        }
    }
}

/// Rejected submission
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {reason}")]
pub struct ValidationError {
    pub field: &'static str,
    pub reason: ValidationReason,
}

impl ValidationError {
    fn new(field: &'static str, reason: ValidationReason) -> Self {
        Self { field, reason }
    }
}

/// Submission that passed every check, with trimmed text and parsed values
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedReservation {
    pub name: String,
    pub phone: String,
    pub party_size: u32,
    pub date: NaiveDate,
    pub time: String,
    pub reservation_type: ReservationType,
}

fn required<'a>(value: &'a str, field: &'static str) -> Result<&'a str, ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::new(field, ValidationReason::MissingField));
    }
    Ok(value)
}

/// Validate `request` against the business date `today`
pub fn validate(
    request: &ReservationCreate,
    today: NaiveDate,
) -> Result<ValidatedReservation, ValidationError> {
    let name = required(&request.name, "name")?;
    let phone = required(&request.phone, "phone")?;
    let party_size = required(&request.party_size, "party_size")?;
    let date = required(&request.date, "date")?;
    let time = required(&request.time, "time")?;

    let party_size = party_size
        .parse::<u32>()
        .ok()
        .filter(|n| (MIN_PARTY_SIZE..=MAX_PARTY_SIZE).contains(n))
        .ok_or_else(|| ValidationError::new("party_size", ValidationReason::InvalidPartySize))?;

    let date = NaiveDate::parse_from_str(date, DATE_FORMAT)
        .map_err(|_| ValidationError::new("date", ValidationReason::InvalidDate))?;
    if date < today {
        return Err(ValidationError::new(
            "date",
            ValidationReason::DateInPast { today },
        ));
    }

    Ok(ValidatedReservation {
        name: name.to_string(),
        phone: phone.to_string(),
        party_size,
        date,
        time: time.to_string(),
        reservation_type: request.reservation_type,
    })
}
