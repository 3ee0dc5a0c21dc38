//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into the customer and reservation
//!   operations presentation callers use.
//! - Keep callers decoupled from storage details.
//!
//! # Invariants
//! - Errors propagate to the caller unchanged in kind; services never log,
//!   swallow or retry them.

pub mod customer_service;
pub mod error;
pub mod reservation_service;
