//! Restaurant domain model.
//!
//! # Responsibility
//! - Define the `Customer` and `Reservation` entities handed to callers.
//! - Own field-level invariants so every construction and mutation path
//!   validates the same way.
//!
//! # Invariants
//! - Entities carry `id = None` until the store has assigned one.
//! - `notes` is never absent; missing or empty input becomes `""`.

pub mod customer;
pub mod notes;
pub mod reservation;
