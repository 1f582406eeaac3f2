//! Unified error codes for the RestoBook workspace
//!
//! This module defines all error codes used by the reservation server and its clients.
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 7xxx: Reservation / table errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility (Rust, TypeScript, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Required field missing
    RequiredField = 7,

    // ==================== 1xxx: Auth ====================
    /// Invalid credentials (username/password)
    InvalidCredentials = 1002,

    // ==================== 2xxx: Permission ====================
    /// Staff role required
    StaffRequired = 2002,

    // ==================== 7xxx: Reservation ====================
    /// Reservation not found
    ReservationNotFound = 7001,
    /// Party size outside 1..=20
    InvalidPartySize = 7002,
    /// Date unparseable or in the past
    InvalidDate = 7003,
    /// No tables left to book on the date
    CapacityExceeded = 7004,
    /// Every table on the date is already assigned
    NoTableAvailable = 7005,
    /// Nothing to export
    NothingToExport = 7006,

    // ==================== 94xx: Storage ====================
    /// Storage write failed
    StorageWriteFailed = 9401,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::RequiredField => "Required field is missing",

            // Auth
            ErrorCode::InvalidCredentials => "Invalid username or password",

            // Permission
            ErrorCode::StaffRequired => "Staff role is required",

            // Reservation
            ErrorCode::ReservationNotFound => "Reservation not found",
            ErrorCode::InvalidPartySize => "Party size must be between 1 and 20",
            ErrorCode::InvalidDate => "Date must be a valid YYYY-MM-DD date, today or later",
            ErrorCode::CapacityExceeded => "All tables for that day are fully booked",
            ErrorCode::NoTableAvailable => "No free table left on that day",
            ErrorCode::NothingToExport => "There are no reservations to export",

            // Storage
            ErrorCode::StorageWriteFailed => "Failed to persist reservations",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            7 => Ok(ErrorCode::RequiredField),

            // Auth
            1002 => Ok(ErrorCode::InvalidCredentials),

            // Permission
            2002 => Ok(ErrorCode::StaffRequired),

            // Reservation
            7001 => Ok(ErrorCode::ReservationNotFound),
            7002 => Ok(ErrorCode::InvalidPartySize),
            7003 => Ok(ErrorCode::InvalidDate),
            7004 => Ok(ErrorCode::CapacityExceeded),
            7005 => Ok(ErrorCode::NoTableAvailable),
            7006 => Ok(ErrorCode::NothingToExport),

            // Storage
            9401 => Ok(ErrorCode::StorageWriteFailed),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_values() {
        assert_eq!(ErrorCode::Success.code(), 0);
        assert_eq!(ErrorCode::ValidationFailed.code(), 2);
        assert_eq!(ErrorCode::RequiredField.code(), 7);

        assert_eq!(ErrorCode::InvalidCredentials.code(), 1002);
        assert_eq!(ErrorCode::StaffRequired.code(), 2002);

        assert_eq!(ErrorCode::ReservationNotFound.code(), 7001);
        assert_eq!(ErrorCode::InvalidPartySize.code(), 7002);
        assert_eq!(ErrorCode::InvalidDate.code(), 7003);
        assert_eq!(ErrorCode::CapacityExceeded.code(), 7004);
        assert_eq!(ErrorCode::NoTableAvailable.code(), 7005);

        assert_eq!(ErrorCode::StorageWriteFailed.code(), 9401);
    }

    #[test]
    fn test_is_success() {
        assert!(ErrorCode::Success.is_success());
        assert!(!ErrorCode::Unknown.is_success());
        assert!(!ErrorCode::CapacityExceeded.is_success());
    }

    #[test]
    fn test_try_from_every_variant() {
        let all = [
            ErrorCode::Success,
            ErrorCode::Unknown,
            ErrorCode::ValidationFailed,
            ErrorCode::NotFound,
            ErrorCode::RequiredField,
            ErrorCode::InvalidCredentials,
            ErrorCode::StaffRequired,
            ErrorCode::ReservationNotFound,
            ErrorCode::InvalidPartySize,
            ErrorCode::InvalidDate,
            ErrorCode::CapacityExceeded,
            ErrorCode::NoTableAvailable,
            ErrorCode::NothingToExport,
            ErrorCode::StorageWriteFailed,
        ];
        for code in all {
            assert_eq!(ErrorCode::try_from(code.code()), Ok(code));
        }
    }

    #[test]
    fn test_try_from_invalid() {
        assert_eq!(ErrorCode::try_from(999), Err(InvalidErrorCode(999)));
        assert_eq!(ErrorCode::try_from(4001), Err(InvalidErrorCode(4001)));
    }

    #[test]
    fn test_serialize() {
        let json = serde_json::to_string(&ErrorCode::CapacityExceeded).unwrap();
        assert_eq!(json, "7004");

        let code: ErrorCode = serde_json::from_str("7005").unwrap();
        assert_eq!(code, ErrorCode::NoTableAvailable);
    }
}
