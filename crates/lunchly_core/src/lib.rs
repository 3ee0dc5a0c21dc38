//! Core domain logic for Lunchly, a restaurant customer/reservation book.
//! This crate is the single source of truth for business invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::customer::{Customer, CustomerId};
pub use model::reservation::{
    format_start_at, parse_num_guests, parse_start_at, Reservation, ReservationId,
    ReservationValidationError,
};
pub use repo::customer_repo::{BestCustomer, CustomerRepository, SqliteCustomerRepository};
pub use repo::reservation_repo::{ReservationRepository, SqliteReservationRepository};
pub use repo::{RepoError, RepoResult};
pub use service::customer_service::{CustomerService, BEST_CUSTOMERS_LIMIT};
pub use service::error::{NotFoundError, ServiceError, ServiceResult};
pub use service::reservation_service::ReservationService;

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
