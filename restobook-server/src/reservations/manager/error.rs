use super::super::allocator::NoTableAvailable;
use super::super::storage::StorageError;
use super::super::validator::{ValidationError, ValidationReason};
use chrono::NaiveDate;
use shared::error::{AppError, ErrorCode};
use std::path::PathBuf;
use thiserror::Error;

/// Manager errors
#[derive(Debug, Error)]
pub enum ManagerError {
    #[error("Invalid submission: {0}")]
    Validation(#[from] ValidationError),

    #[error("All tables are booked on {date}")]
    CapacityExceeded { date: NaiveDate },

    #[error("No table available on {date}")]
    NoTableAvailable { date: NaiveDate },

    #[error("Reservation not found: {0}")]
    ReservationNotFound(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Export to {path} failed: {source}")]
    Export {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type ManagerResult<T> = Result<T, ManagerError>;

impl From<NoTableAvailable> for ManagerError {
    fn from(err: NoTableAvailable) -> Self {
        Self::NoTableAvailable { date: err.date }
    }
}

/// 将校验失败原因映射为错误码（前端负责本地化）
fn validation_code(reason: &ValidationReason) -> ErrorCode {
    match reason {
        ValidationReason::MissingField => ErrorCode::RequiredField,
        ValidationReason::InvalidPartySize => ErrorCode::InvalidPartySize,
        ValidationReason::InvalidDate | ValidationReason::DateInPast { .. } => {
            ErrorCode::InvalidDate
        }
    }
}

impl From<ManagerError> for AppError {
    fn from(err: ManagerError) -> Self {
        match err {
            ManagerError::Validation(e) => {
                AppError::invalid_field(validation_code(&e.reason), e.field, e.reason.to_string())
            }
            ManagerError::CapacityExceeded { date } => {
                AppError::new(ErrorCode::CapacityExceeded).with_detail("date", date.to_string())
            }
            ManagerError::NoTableAvailable { date } => {
                AppError::new(ErrorCode::NoTableAvailable).with_detail("date", date.to_string())
            }
            ManagerError::ReservationNotFound(id) => {
                AppError::new(ErrorCode::ReservationNotFound).with_detail("id", id)
            }
            ManagerError::Storage(e) => {
                tracing::error!(error = %e, "Reservation storage failure");
                AppError::storage(e.to_string())
            }
            ManagerError::Export { path, source } => {
                tracing::error!(path = %path.display(), error = %source, "CSV export failed");
                AppError::storage(format!("Export failed: {source}"))
                    .with_detail("path", path.display().to_string())
            }
        }
    }
}
