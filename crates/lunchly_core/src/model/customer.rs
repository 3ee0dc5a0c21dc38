//! Customer domain model.
//!
//! # Responsibility
//! - Represent one restaurant customer, transient or persisted.
//! - Derive the display/search full name.
//!
//! # Invariants
//! - `notes` is always a string; falsy input is stored as `""`.
//! - `id` is only assigned by the store on first save and never changes.
//! - A blank phone is represented as `None`.

use crate::model::notes::normalize_notes;
use serde::Serialize;

/// Store-assigned customer identifier.
pub type CustomerId = i64;

/// A customer of the restaurant.
///
/// Serialized with camelCase attribute names for presentation callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    id: Option<CustomerId>,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    notes: String,
}

impl Customer {
    /// Creates a transient customer that has not been saved yet.
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        phone: Option<&str>,
        notes: Option<&str>,
    ) -> Self {
        Self {
            id: None,
            first_name: first_name.into(),
            last_name: last_name.into(),
            phone: normalize_phone(phone),
            notes: normalize_notes(notes),
        }
    }

    /// Rebuilds a persisted customer from stored column values.
    pub(crate) fn from_persisted(
        id: CustomerId,
        first_name: String,
        last_name: String,
        phone: Option<String>,
        notes: Option<String>,
    ) -> Self {
        Self {
            id: Some(id),
            first_name,
            last_name,
            phone: normalize_phone(phone.as_deref()),
            notes: normalize_notes(notes.as_deref()),
        }
    }

    /// Store id, or `None` while transient.
    pub fn id(&self) -> Option<CustomerId> {
        self.id
    }

    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }

    /// Replaces notes, coercing missing/empty input to `""`.
    pub fn set_notes(&mut self, notes: Option<&str>) {
        self.notes = normalize_notes(notes);
    }

    pub fn set_phone(&mut self, phone: Option<&str>) {
        self.phone = normalize_phone(phone);
    }

    /// `"{first_name} {last_name}"`, the shape accepted by name search.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub(crate) fn assign_id(&mut self, id: CustomerId) {
        self.id = Some(id);
    }
}

fn normalize_phone(phone: Option<&str>) -> Option<String> {
    phone
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}
