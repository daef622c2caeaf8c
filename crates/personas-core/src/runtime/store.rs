// crates/personas-core/src/runtime/store.rs
// ============================================================================
// Module: Personas In-Memory Store
// Description: In-memory persona store and shared store wrapper.
// Purpose: Provide a deterministic store without external dependencies.
// Dependencies: crate::core, crate::interfaces
// ============================================================================

//! ## Overview
//! This module provides an in-memory [`PersonaStore`] for tests and
//! `memory`-backed deployments, and a clonable [`SharedPersonaStore`] wrapper
//! over any backend. Ids are assigned from a monotonic counter and are never
//! reused after deletion.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::Mutex;

use crate::core::Persona;
use crate::core::PersonaFields;
use crate::core::PersonaId;
use crate::interfaces::PersonaStore;
use crate::interfaces::StoreError;

// ============================================================================
// SECTION: In-Memory Store
// ============================================================================

/// Record table guarded by the in-memory store mutex.
#[derive(Debug, Default)]
struct PersonaTable {
    /// Records keyed by id.
    records: BTreeMap<PersonaId, Persona>,
    /// Highest id handed out so far.
    last_id: i64,
}

/// In-memory persona store.
#[derive(Debug, Default, Clone)]
pub struct InMemoryPersonaStore {
    /// Record table protected by a mutex.
    table: Arc<Mutex<PersonaTable>>,
}

impl InMemoryPersonaStore {
    /// Creates an empty in-memory persona store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl PersonaStore for InMemoryPersonaStore {
    fn insert(&self, fields: &PersonaFields) -> Result<Persona, StoreError> {
        let pnombre = required_name(fields)?;
        let mut guard = self
            .table
            .lock()
            .map_err(|_| StoreError::Store("persona store mutex poisoned".to_string()))?;
        let next = guard
            .last_id
            .checked_add(1)
            .ok_or_else(|| StoreError::Corrupt("persona id overflow".to_string()))?;
        guard.last_id = next;
        let persona = Persona {
            id: PersonaId::new(next),
            pnombre,
            edad: fields.edad,
        };
        guard.records.insert(persona.id, persona.clone());
        drop(guard);
        Ok(persona)
    }

    fn get(&self, id: PersonaId) -> Result<Option<Persona>, StoreError> {
        let guard = self
            .table
            .lock()
            .map_err(|_| StoreError::Store("persona store mutex poisoned".to_string()))?;
        Ok(guard.records.get(&id).cloned())
    }

    fn list(&self) -> Result<Vec<Persona>, StoreError> {
        let guard = self
            .table
            .lock()
            .map_err(|_| StoreError::Store("persona store mutex poisoned".to_string()))?;
        Ok(guard.records.values().cloned().collect())
    }

    fn delete(&self, id: PersonaId) -> Result<(), StoreError> {
        self.table
            .lock()
            .map_err(|_| StoreError::Store("persona store mutex poisoned".to_string()))?
            .records
            .remove(&id);
        Ok(())
    }

    fn update(&self, id: PersonaId, fields: &PersonaFields) -> Result<Persona, StoreError> {
        let pnombre = required_name(fields)?;
        let persona = Persona {
            id,
            pnombre,
            edad: fields.edad,
        };
        let mut guard = self
            .table
            .lock()
            .map_err(|_| StoreError::Store("persona store mutex poisoned".to_string()))?;
        guard.last_id = guard.last_id.max(id.get());
        guard.records.insert(id, persona.clone());
        drop(guard);
        Ok(persona)
    }
}

// ============================================================================
// SECTION: Shared Store Wrapper
// ============================================================================

/// Shared persona store backed by an `Arc` trait object.
#[derive(Clone)]
pub struct SharedPersonaStore {
    /// Inner store implementation.
    inner: Arc<dyn PersonaStore + Send + Sync>,
}

impl SharedPersonaStore {
    /// Wraps a persona store in a shared, clonable wrapper.
    #[must_use]
    pub fn from_store(store: impl PersonaStore + Send + Sync + 'static) -> Self {
        Self {
            inner: Arc::new(store),
        }
    }

    /// Wraps an existing shared store.
    #[must_use]
    pub const fn new(store: Arc<dyn PersonaStore + Send + Sync>) -> Self {
        Self {
            inner: store,
        }
    }
}

impl PersonaStore for SharedPersonaStore {
    fn insert(&self, fields: &PersonaFields) -> Result<Persona, StoreError> {
        self.inner.insert(fields)
    }

    fn get(&self, id: PersonaId) -> Result<Option<Persona>, StoreError> {
        self.inner.get(id)
    }

    fn list(&self) -> Result<Vec<Persona>, StoreError> {
        self.inner.list()
    }

    fn delete(&self, id: PersonaId) -> Result<(), StoreError> {
        self.inner.delete(id)
    }

    fn update(&self, id: PersonaId, fields: &PersonaFields) -> Result<Persona, StoreError> {
        self.inner.update(id, fields)
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Returns the name required for persistence.
fn required_name(fields: &PersonaFields) -> Result<String, StoreError> {
    fields
        .pnombre
        .clone()
        .ok_or_else(|| StoreError::Constraint("pnombre must not be null".to_string()))
}

// ============================================================================
// SECTION: Tests
// ============================================================================
