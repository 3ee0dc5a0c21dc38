//! Reservation use-case service.
//!
//! # Responsibility
//! - Load, save, edit and delete reservations through the repository.
//! - Translate missing rows into `NotFoundError::Reservation`.
//!
//! # Invariants
//! - `edit_reservation` validates every field before touching the entity or
//!   the store.
//! - `delete` consumes the reservation, so a deleted instance cannot be saved
//!   or edited again.
//! - Services never take locks or open transactions of their own.

use crate::model::customer::CustomerId;
use crate::model::reservation::{Reservation, ReservationId};
use crate::repo::reservation_repo::ReservationRepository;
use crate::repo::RepoError;
use crate::service::error::{NotFoundError, ServiceError, ServiceResult};
use chrono::{Local, NaiveDateTime};
use log::debug;

/// Use-case service wrapper for reservation operations.
pub struct ReservationService<R: ReservationRepository> {
    repo: R,
}

impl<R: ReservationRepository> ReservationService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// All reservations owned by `customer_id`, earliest first.
    pub fn get_reservations_for_customer(
        &self,
        customer_id: CustomerId,
    ) -> ServiceResult<Vec<Reservation>> {
        Ok(self.repo.list_reservations_for_customer(customer_id)?)
    }

    pub fn get_by_id(&self, id: ReservationId) -> ServiceResult<Reservation> {
        self.repo
            .get_reservation(id)?
            .ok_or(ServiceError::NotFound(NotFoundError::Reservation(id)))
    }

    /// Inserts a transient reservation or updates a persisted one.
    ///
    /// # Side effects
    /// - On first save, assigns the store id to `reservation`.
    ///
    /// # Errors
    /// - `NotFound` when a persisted reservation's row no longer exists.
    pub fn save(&self, reservation: &mut Reservation) -> ServiceResult<ReservationId> {
        match reservation.id() {
            None => {
                let id = self.repo.insert_reservation(reservation)?;
                reservation.assign_id(id);
                debug!(
                    "event=reservation_save module=service status=ok mode=insert reservation_id={} customer_id={}",
                    id,
                    reservation.customer_id()
                );
                Ok(id)
            }
            Some(id) => {
                self.repo
                    .update_reservation(id, reservation)
                    .map_err(|err| match err {
                        RepoError::NotFound { .. } => NotFoundError::Reservation(id).into(),
                        other => ServiceError::Store(other),
                    })?;
                debug!(
                    "event=reservation_save module=service status=ok mode=update reservation_id={id}"
                );
                Ok(id)
            }
        }
    }

    /// Builds and saves a new reservation in one step.
    ///
    /// A missing `start_at` books the party for the current local time.
    pub fn create_reservation(
        &self,
        customer_id: CustomerId,
        num_guests: i64,
        start_at: Option<NaiveDateTime>,
        notes: Option<&str>,
    ) -> ServiceResult<Reservation> {
        let start_at = start_at.unwrap_or_else(|| Local::now().naive_local());
        let mut reservation = Reservation::new(customer_id, num_guests, start_at, notes)?;
        self.save(&mut reservation)?;
        Ok(reservation)
    }

    /// Replaces guest count, start time and notes, then persists.
    ///
    /// On a validation error nothing is assigned and nothing is written.
    pub fn edit_reservation(
        &self,
        reservation: &mut Reservation,
        num_guests: i64,
        start_at: NaiveDateTime,
        notes: Option<&str>,
    ) -> ServiceResult<()> {
        reservation.apply_edit(num_guests, start_at, notes)?;
        self.save(reservation)?;
        Ok(())
    }

    /// Removes the reservation's row.
    ///
    /// Deleting a transient reservation, or one whose row is already gone,
    /// succeeds without changing the store.
    pub fn delete(&self, reservation: Reservation) -> ServiceResult<()> {
        let Some(id) = reservation.id() else {
            debug!("event=reservation_delete module=service status=skipped reason=transient");
            return Ok(());
        };

        let removed = self.repo.delete_reservation(id)?;
        debug!(
            "event=reservation_delete module=service status=ok reservation_id={id} removed={removed}"
        );
        Ok(())
    }
}
