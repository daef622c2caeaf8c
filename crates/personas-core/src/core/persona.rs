// crates/personas-core/src/core/persona.rs
// ============================================================================
// Module: Persona Records
// Description: Stored persona records and client-submitted field sets.
// Purpose: Define the persona wire form and the save input.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! A [`Persona`] is a persisted record: it always carries an id and a name.
//! [`PersonaFields`] is what a client submits; both fields may be absent and
//! the store decides whether the result is persistable. [`PersonaRecord`] is
//! the save input, with an id only when the record already exists.
//!
//! # Invariants
//! - A [`Persona`] returned by a store has a unique id and a non-null name.
//! - Request payloads never carry an id; any `id` key is ignored on decode.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::core::identifiers::PersonaId;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Persisted persona record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Persona {
    /// Store-assigned identifier.
    pub id: PersonaId,
    /// Given name (required at persistence time).
    pub pnombre: String,
    /// Age in years, when known.
    pub edad: Option<i32>,
}

/// Client-submitted persona fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonaFields {
    /// Given name; a missing name fails at persistence time.
    pub pnombre: Option<String>,
    /// Age in years.
    pub edad: Option<i32>,
}

impl PersonaFields {
    /// Creates a field set with both values provided.
    #[must_use]
    pub fn new(pnombre: impl Into<String>, edad: Option<i32>) -> Self {
        Self {
            pnombre: Some(pnombre.into()),
            edad,
        }
    }
}

/// Save input: fields plus the id of an existing record, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonaRecord {
    /// Identifier of the record being overwritten; `None` inserts.
    pub id: Option<PersonaId>,
    /// Field values to persist.
    pub fields: PersonaFields,
}

impl PersonaRecord {
    /// Creates a record that has not been persisted yet.
    #[must_use]
    pub const fn new(fields: PersonaFields) -> Self {
        Self {
            id: None,
            fields,
        }
    }

    /// Replaces both name and age with the submitted values.
    ///
    /// Omitted values clear the stored ones; there is no merge.
    pub fn overwrite_fields(&mut self, fields: PersonaFields) {
        self.fields.pnombre = fields.pnombre;
        self.fields.edad = fields.edad;
    }
}

impl From<Persona> for PersonaRecord {
    fn from(persona: Persona) -> Self {
        Self {
            id: Some(persona.id),
            fields: PersonaFields {
                pnombre: Some(persona.pnombre),
                edad: persona.edad,
            },
        }
    }
}
