//! Customer use-case service.
//!
//! # Responsibility
//! - Provide customer list/get/save/search entry points.
//! - Compute the "best customers" ranking.
//! - Delegate reservation lookups to `ReservationService`.
//!
//! # Invariants
//! - Name search uses only the first two whitespace-separated tokens.
//! - The ranking never returns more than `BEST_CUSTOMERS_LIMIT` rows.

use crate::model::customer::{Customer, CustomerId};
use crate::model::reservation::Reservation;
use crate::repo::customer_repo::{BestCustomer, CustomerRepository};
use crate::repo::reservation_repo::ReservationRepository;
use crate::repo::RepoError;
use crate::service::error::{NotFoundError, ServiceError, ServiceResult};
use crate::service::reservation_service::ReservationService;
use log::debug;

/// Maximum number of rows returned by `get_best_customers`.
pub const BEST_CUSTOMERS_LIMIT: u32 = 10;

/// Customer service facade over repository implementations.
pub struct CustomerService<C: CustomerRepository, R: ReservationRepository> {
    repo: C,
    reservations: ReservationService<R>,
}

impl<C: CustomerRepository, R: ReservationRepository> CustomerService<C, R> {
    /// Creates a service using the provided repository and the reservation
    /// service it delegates to.
    pub fn new(repo: C, reservations: ReservationService<R>) -> Self {
        Self { repo, reservations }
    }

    /// The reservation service this customer service delegates to.
    pub fn reservations(&self) -> &ReservationService<R> {
        &self.reservations
    }

    /// All customers ordered by last name, then first name.
    pub fn list_all(&self) -> ServiceResult<Vec<Customer>> {
        Ok(self.repo.list_customers()?)
    }

    pub fn get_by_id(&self, id: CustomerId) -> ServiceResult<Customer> {
        self.repo
            .get_customer(id)?
            .ok_or(ServiceError::NotFound(NotFoundError::Customer(id)))
    }

    /// Reservations belonging to `customer`; empty while it is transient.
    pub fn get_reservations(&self, customer: &Customer) -> ServiceResult<Vec<Reservation>> {
        match customer.id() {
            Some(id) => self.reservations.get_reservations_for_customer(id),
            None => Ok(Vec::new()),
        }
    }

    /// Inserts a transient customer or updates a persisted one.
    ///
    /// # Side effects
    /// - On first save, assigns the store id to `customer`.
    ///
    /// # Errors
    /// - `NotFound` when a persisted customer's row no longer exists.
    pub fn save(&self, customer: &mut Customer) -> ServiceResult<CustomerId> {
        match customer.id() {
            None => {
                let id = self.repo.insert_customer(customer)?;
                customer.assign_id(id);
                debug!("event=customer_save module=service status=ok mode=insert customer_id={id}");
                Ok(id)
            }
            Some(id) => {
                self.repo
                    .update_customer(id, customer)
                    .map_err(|err| match err {
                        RepoError::NotFound { .. } => NotFoundError::Customer(id).into(),
                        other => ServiceError::Store(other),
                    })?;
                debug!("event=customer_save module=service status=ok mode=update customer_id={id}");
                Ok(id)
            }
        }
    }

    /// Builds and saves a new customer in one step.
    pub fn create_customer(
        &self,
        first_name: &str,
        last_name: &str,
        phone: Option<&str>,
        notes: Option<&str>,
    ) -> ServiceResult<Customer> {
        let mut customer = Customer::new(first_name, last_name, phone, notes);
        self.save(&mut customer)?;
        Ok(customer)
    }

    /// Loads customer `id`, replaces its editable fields and saves it.
    pub fn update_details(
        &self,
        id: CustomerId,
        first_name: &str,
        last_name: &str,
        phone: Option<&str>,
        notes: Option<&str>,
    ) -> ServiceResult<Customer> {
        let mut customer = self.get_by_id(id)?;
        customer.first_name = first_name.to_string();
        customer.last_name = last_name.to_string();
        customer.set_phone(phone);
        customer.set_notes(notes);
        self.save(&mut customer)?;
        Ok(customer)
    }

    /// Resolves `"First Last"` to a customer id by exact match.
    ///
    /// # Errors
    /// - `NotFound` when fewer than two name tokens are given or no customer
    ///   matches both names.
    pub fn get_id_by_name(&self, full_name: &str) -> ServiceResult<CustomerId> {
        let not_found = || ServiceError::NotFound(NotFoundError::CustomerName(full_name.to_string()));
        let (first_name, last_name) = split_full_name(full_name).ok_or_else(not_found)?;

        self.repo
            .find_customer_id_by_name(first_name, last_name)?
            .ok_or_else(not_found)
    }

    /// Up to ten customers with the most reservations, busiest first.
    pub fn get_best_customers(&self) -> ServiceResult<Vec<BestCustomer>> {
        Ok(self.repo.list_best_customers(BEST_CUSTOMERS_LIMIT)?)
    }
}

/// Splits search text into `(first_name, last_name)`.
///
/// Runs of whitespace count as one separator and surrounding whitespace is
/// ignored. Tokens after the second are dropped, so middle names and
/// multi-word surnames cannot be matched.
pub fn split_full_name(full_name: &str) -> Option<(&str, &str)> {
    let mut tokens = full_name.split_whitespace();
    let first_name = tokens.next()?;
    let last_name = tokens.next()?;
    Some((first_name, last_name))
}
