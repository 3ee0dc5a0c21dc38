//! Error taxonomy returned by customer/reservation services.
//!
//! # Invariants
//! - Validation failures are raised before any store access.
//! - Not-found failures always map to status 404.
//! - Store failures pass through unchanged; services never retry them.

use crate::model::customer::CustomerId;
use crate::model::reservation::{ReservationId, ReservationValidationError};
use crate::repo::RepoError;
use thiserror::Error;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// A lookup by id or by name matched zero rows.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotFoundError {
    #[error("No such customer: {0}")]
    Customer(CustomerId),
    #[error("No such reservation: {0}")]
    Reservation(ReservationId),
    #[error("Please enter a valid first/last name.")]
    CustomerName(String),
}

impl NotFoundError {
    pub const STATUS: u16 = 404;

    pub fn status(&self) -> u16 {
        Self::STATUS
    }
}

/// Service-level failure handed to presentation callers.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Field value rejected by an entity invariant.
    #[error(transparent)]
    Validation(#[from] ReservationValidationError),
    /// Target row does not exist.
    #[error(transparent)]
    NotFound(#[from] NotFoundError),
    /// Persistence-layer failure.
    #[error(transparent)]
    Store(#[from] RepoError),
}

impl ServiceError {
    /// HTTP-style status a presentation layer can respond with.
    ///
    /// - `Validation` -> 400
    /// - `NotFound` -> 404
    /// - `Store` -> 500
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) => 400,
            Self::NotFound(err) => err.status(),
            Self::Store(_) => 500,
        }
    }
}
