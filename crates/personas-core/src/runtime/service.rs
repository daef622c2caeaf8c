// crates/personas-core/src/runtime/service.rs
// ============================================================================
// Module: Persona Service
// Description: CRUD orchestration between the HTTP boundary and a store.
// Purpose: Expose find-all, find-by-id, save, and delete over any store.
// Dependencies: crate::core, crate::interfaces
// ============================================================================

//! ## Overview
//! [`PersonaService`] is a pass-through over a [`PersonaStore`]. The only
//! decision it makes is in [`PersonaService::save`]: a record without an id is
//! inserted, a record with an id is written in place.
//!
//! A missing record is never an error here; lookups return `None` and deletes
//! of unknown ids succeed.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::Persona;
use crate::core::PersonaId;
use crate::core::PersonaRecord;
use crate::interfaces::PersonaStore;
use crate::interfaces::StoreError;

// ============================================================================
// SECTION: Service
// ============================================================================

/// Persona CRUD service over a store backend.
#[derive(Debug, Clone)]
pub struct PersonaService<S> {
    /// Store backing the service.
    store: S,
}

impl<S> PersonaService<S>
where
    S: PersonaStore,
{
    /// Creates a service over the provided store.
    #[must_use]
    pub const fn new(store: S) -> Self {
        Self {
            store,
        }
    }

    /// Returns every stored persona.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the store fails.
    pub fn find_all(&self) -> Result<Vec<Persona>, StoreError> {
        self.store.list()
    }

    /// Returns the persona with the given id, or `None` when absent.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the store fails.
    pub fn find_by_id(&self, id: PersonaId) -> Result<Option<Persona>, StoreError> {
        self.store.get(id)
    }

    /// Persists a record, inserting when it has no id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the record cannot be persisted.
    pub fn save(&self, record: &PersonaRecord) -> Result<Persona, StoreError> {
        record.id.map_or_else(
            || self.store.insert(&record.fields),
            |id| self.store.update(id, &record.fields),
        )
    }

    /// Deletes the persona with the given id; unknown ids are a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the store fails.
    pub fn delete(&self, id: PersonaId) -> Result<(), StoreError> {
        self.store.delete(id)
    }
}
