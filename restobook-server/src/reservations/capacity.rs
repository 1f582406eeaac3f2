//! Daily capacity accounting
//!
//! Pure functions over a snapshot of the book. Only reservations with a bound
//! table consume capacity; pending ones do not.

use chrono::NaiveDate;
use shared::models::{DayAvailability, Reservation, TOTAL_TABLES};

use crate::utils::time::days_from;

/// Days shown by the week-ahead availability list (today included)
pub const WEEK_DAYS: u32 = 7;

/// Reservations on `date` that hold a table
pub fn assigned_count(reservations: &[Reservation], date: NaiveDate) -> usize {
    reservations
        .iter()
        .filter(|r| r.date == date && r.table.is_assigned())
        .count()
}

/// Tables still free on `date`, never negative
pub fn available(reservations: &[Reservation], date: NaiveDate) -> u8 {
    let used = assigned_count(reservations, date);
    usize::from(TOTAL_TABLES).saturating_sub(used) as u8
}

/// Availability for `WEEK_DAYS` consecutive dates starting at `start`
pub fn week_availability(reservations: &[Reservation], start: NaiveDate) -> Vec<DayAvailability> {
    days_from(start, WEEK_DAYS)
        .map(|date| DayAvailability {
            date,
            available: available(reservations, date),
        })
        .collect()
}
