//! Customer repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD-style APIs over the `customers` table.
//! - Own the name lookup and the "best customers" aggregation query.
//!
//! # Invariants
//! - Customer listing is deterministic: `last_name, first_name, id`.
//! - Best-customer ranking only includes customers with at least one
//!   reservation, ordered by count descending then id ascending.
//! - Row-to-entity conversion happens only in `map_customer_row`.

use crate::model::customer::{Customer, CustomerId};
use crate::repo::schema::ensure_connection_ready;
use crate::repo::{RepoError, RepoResult};
use rusqlite::{params, Connection, OptionalExtension, Row};
use serde::Serialize;

const CUSTOMER_SELECT_SQL: &str = "SELECT
    id,
    first_name,
    last_name,
    phone,
    notes
FROM customers";

const CUSTOMER_COLUMNS: &[&str] = &["id", "first_name", "last_name", "phone", "notes"];

/// Read model for the reservation-count ranking.
///
/// Carries display fields only; it is not a full `Customer`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BestCustomer {
    pub id: CustomerId,
    pub first_name: String,
    pub last_name: String,
    pub num_reservations: i64,
}

/// Repository interface for customer persistence.
pub trait CustomerRepository {
    /// Inserts a new row and returns the store-generated id.
    fn insert_customer(&self, customer: &Customer) -> RepoResult<CustomerId>;
    /// Overwrites all mutable columns of row `id`.
    fn update_customer(&self, id: CustomerId, customer: &Customer) -> RepoResult<()>;
    fn get_customer(&self, id: CustomerId) -> RepoResult<Option<Customer>>;
    fn list_customers(&self) -> RepoResult<Vec<Customer>>;
    /// Exact, case-sensitive match on both name columns; lowest id wins.
    fn find_customer_id_by_name(
        &self,
        first_name: &str,
        last_name: &str,
    ) -> RepoResult<Option<CustomerId>>;
    fn list_best_customers(&self, limit: u32) -> RepoResult<Vec<BestCustomer>>;
}

/// SQLite-backed customer repository.
pub struct SqliteCustomerRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCustomerRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, "customers", CUSTOMER_COLUMNS)?;
        Ok(Self { conn })
    }
}

impl CustomerRepository for SqliteCustomerRepository<'_> {
    fn insert_customer(&self, customer: &Customer) -> RepoResult<CustomerId> {
        self.conn.execute(
            "INSERT INTO customers (first_name, last_name, phone, notes)
             VALUES (?1, ?2, ?3, ?4);",
            params![
                customer.first_name.as_str(),
                customer.last_name.as_str(),
                customer.phone.as_deref(),
                customer.notes(),
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn update_customer(&self, id: CustomerId, customer: &Customer) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE customers
             SET
                first_name = ?1,
                last_name = ?2,
                phone = ?3,
                notes = ?4
             WHERE id = ?5;",
            params![
                customer.first_name.as_str(),
                customer.last_name.as_str(),
                customer.phone.as_deref(),
                customer.notes(),
                id,
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "customer",
                id,
            });
        }

        Ok(())
    }

    fn get_customer(&self, id: CustomerId) -> RepoResult<Option<Customer>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{CUSTOMER_SELECT_SQL} WHERE id = ?1;"))?;

        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(map_customer_row(row)?));
        }

        Ok(None)
    }

    fn list_customers(&self) -> RepoResult<Vec<Customer>> {
        let mut stmt = self.conn.prepare(&format!(
            "{CUSTOMER_SELECT_SQL} ORDER BY last_name ASC, first_name ASC, id ASC;"
        ))?;

        let mut rows = stmt.query([])?;
        let mut customers = Vec::new();
        while let Some(row) = rows.next()? {
            customers.push(map_customer_row(row)?);
        }

        Ok(customers)
    }

    fn find_customer_id_by_name(
        &self,
        first_name: &str,
        last_name: &str,
    ) -> RepoResult<Option<CustomerId>> {
        let id = self
            .conn
            .query_row(
                "SELECT id
                 FROM customers
                 WHERE first_name = ?1
                   AND last_name = ?2
                 ORDER BY id ASC
                 LIMIT 1;",
                params![first_name, last_name],
                |row| row.get(0),
            )
            .optional()?;
        Ok(id)
    }

    fn list_best_customers(&self, limit: u32) -> RepoResult<Vec<BestCustomer>> {
        let mut stmt = self.conn.prepare(
            "SELECT
                c.id AS id,
                c.first_name AS first_name,
                c.last_name AS last_name,
                COUNT(r.id) AS num_reservations
             FROM reservations r
             INNER JOIN customers c ON c.id = r.customer_id
             GROUP BY c.id, c.first_name, c.last_name
             ORDER BY num_reservations DESC, c.id ASC
             LIMIT ?1;",
        )?;

        let mut rows = stmt.query([i64::from(limit)])?;
        let mut ranking = Vec::new();
        while let Some(row) = rows.next()? {
            ranking.push(BestCustomer {
                id: row.get("id")?,
                first_name: row.get("first_name")?,
                last_name: row.get("last_name")?,
                num_reservations: row.get("num_reservations")?,
            });
        }

        Ok(ranking)
    }
}

/// Converts one `customers` row into a persisted `Customer`.
fn map_customer_row(row: &Row<'_>) -> RepoResult<Customer> {
    Ok(Customer::from_persisted(
        row.get("id")?,
        row.get("first_name")?,
        row.get("last_name")?,
        row.get("phone")?,
        row.get("notes")?,
    ))
}
