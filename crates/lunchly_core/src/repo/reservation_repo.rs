//! Reservation repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD APIs over the `reservations` table.
//! - Keep timestamp encoding (`chrono` <-> SQLite text) inside the store
//!   boundary.
//!
//! # Invariants
//! - Rows that violate reservation invariants surface as `InvalidData`.
//! - Deleting a missing id removes zero rows and is not an error.
//! - Per-customer listing is ordered by `start_at ASC, id ASC`.

use crate::model::customer::CustomerId;
use crate::model::reservation::{Reservation, ReservationId};
use crate::repo::schema::ensure_connection_ready;
use crate::repo::{RepoError, RepoResult};
use chrono::NaiveDateTime;
use rusqlite::{params, Connection, Row};

const RESERVATION_SELECT_SQL: &str = "SELECT
    id,
    customer_id,
    num_guests,
    start_at,
    notes
FROM reservations";

const RESERVATION_COLUMNS: &[&str] = &["id", "customer_id", "num_guests", "start_at", "notes"];

/// Repository interface for reservation persistence.
pub trait ReservationRepository {
    /// Inserts a new row and returns the store-generated id.
    fn insert_reservation(&self, reservation: &Reservation) -> RepoResult<ReservationId>;
    /// Overwrites all columns of row `id`.
    fn update_reservation(&self, id: ReservationId, reservation: &Reservation) -> RepoResult<()>;
    fn get_reservation(&self, id: ReservationId) -> RepoResult<Option<Reservation>>;
    fn list_reservations_for_customer(
        &self,
        customer_id: CustomerId,
    ) -> RepoResult<Vec<Reservation>>;
    /// Removes row `id`, returning how many rows were deleted (0 or 1).
    fn delete_reservation(&self, id: ReservationId) -> RepoResult<usize>;
}

/// SQLite-backed reservation repository.
pub struct SqliteReservationRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteReservationRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, "reservations", RESERVATION_COLUMNS)?;
        Ok(Self { conn })
    }
}

impl ReservationRepository for SqliteReservationRepository<'_> {
    fn insert_reservation(&self, reservation: &Reservation) -> RepoResult<ReservationId> {
        self.conn.execute(
            "INSERT INTO reservations (customer_id, num_guests, start_at, notes)
             VALUES (?1, ?2, ?3, ?4);",
            params![
                reservation.customer_id(),
                reservation.num_guests(),
                reservation.start_at(),
                reservation.notes(),
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn update_reservation(&self, id: ReservationId, reservation: &Reservation) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE reservations
             SET
                customer_id = ?1,
                num_guests = ?2,
                start_at = ?3,
                notes = ?4
             WHERE id = ?5;",
            params![
                reservation.customer_id(),
                reservation.num_guests(),
                reservation.start_at(),
                reservation.notes(),
                id,
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "reservation",
                id,
            });
        }

        Ok(())
    }

    fn get_reservation(&self, id: ReservationId) -> RepoResult<Option<Reservation>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{RESERVATION_SELECT_SQL} WHERE id = ?1;"))?;

        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(map_reservation_row(row)?));
        }

        Ok(None)
    }

    fn list_reservations_for_customer(
        &self,
        customer_id: CustomerId,
    ) -> RepoResult<Vec<Reservation>> {
        let mut stmt = self.conn.prepare(&format!(
            "{RESERVATION_SELECT_SQL}
             WHERE customer_id = ?1
             ORDER BY start_at ASC, id ASC;"
        ))?;

        let mut rows = stmt.query([customer_id])?;
        let mut reservations = Vec::new();
        while let Some(row) = rows.next()? {
            reservations.push(map_reservation_row(row)?);
        }

        Ok(reservations)
    }

    fn delete_reservation(&self, id: ReservationId) -> RepoResult<usize> {
        let removed = self
            .conn
            .execute("DELETE FROM reservations WHERE id = ?1;", [id])?;
        Ok(removed)
    }
}

/// Converts one `reservations` row into a persisted `Reservation`.
fn map_reservation_row(row: &Row<'_>) -> RepoResult<Reservation> {
    let id: ReservationId = row.get("id")?;
    let start_at = row
        .get::<_, NaiveDateTime>("start_at")
        .map_err(|err| match err {
            rusqlite::Error::FromSqlConversionFailure(..) | rusqlite::Error::InvalidColumnType(..) => {
                RepoError::InvalidData(format!(
                    "invalid start_at in reservations row {id}: {err}"
                ))
            }
            other => RepoError::from(other),
        })?;

    Reservation::from_persisted(
        id,
        row.get("customer_id")?,
        row.get("num_guests")?,
        start_at,
        row.get("notes")?,
    )
    .map_err(|err| RepoError::InvalidData(format!("reservations row {id}: {err}")))
}
