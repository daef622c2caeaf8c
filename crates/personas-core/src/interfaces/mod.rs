// crates/personas-core/src/interfaces/mod.rs
// ============================================================================
// Module: Personas Interfaces
// Description: Backend-agnostic persistence contract for persona records.
// Purpose: Define the store surface used by the persona service.
// Dependencies: crate::core, thiserror
// ============================================================================

//! ## Overview
//! The [`PersonaStore`] trait is the only seam between the service layer and
//! a datastore. Backends own the canonical record set and assign ids.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

use crate::core::Persona;
use crate::core::PersonaFields;
use crate::core::PersonaId;

// ============================================================================
// SECTION: Persona Store
// ============================================================================

/// Persona store errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Store I/O error.
    #[error("persona store io error: {0}")]
    Io(String),
    /// Store data is corrupted.
    #[error("persona store corruption: {0}")]
    Corrupt(String),
    /// Store schema version is incompatible.
    #[error("persona store version mismatch: {0}")]
    VersionMismatch(String),
    /// Store data is invalid.
    #[error("persona store invalid data: {0}")]
    Invalid(String),
    /// A record violated a persistence constraint (for example a missing name).
    #[error("persona store constraint violation: {0}")]
    Constraint(String),
    /// Store reported an error.
    #[error("persona store error: {0}")]
    Store(String),
}

impl StoreError {
    /// Returns a stable label for logging.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Io(_) => "io",
            Self::Corrupt(_) => "corrupt",
            Self::VersionMismatch(_) => "version_mismatch",
            Self::Invalid(_) => "invalid",
            Self::Constraint(_) => "constraint",
            Self::Store(_) => "store",
        }
    }
}

/// Record-level persistence for personas.
pub trait PersonaStore {
    /// Inserts a new record and returns it with its assigned id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Constraint`] when the name is missing, or another
    /// [`StoreError`] when the backend fails.
    fn insert(&self, fields: &PersonaFields) -> Result<Persona, StoreError>;

    /// Loads a record by id; an unknown id yields `None`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the backend fails.
    fn get(&self, id: PersonaId) -> Result<Option<Persona>, StoreError>;

    /// Returns every record in ascending id order.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the backend fails.
    fn list(&self) -> Result<Vec<Persona>, StoreError>;

    /// Deletes a record by id; unknown ids are a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the backend fails.
    fn delete(&self, id: PersonaId) -> Result<(), StoreError>;

    /// Writes the fields under `id`, inserting when no record exists.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Constraint`] when the name is missing, or another
    /// [`StoreError`] when the backend fails.
    fn update(&self, id: PersonaId, fields: &PersonaFields) -> Result<Persona, StoreError>;
}
