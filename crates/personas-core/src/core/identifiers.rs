// crates/personas-core/src/core/identifiers.rs
// ============================================================================
// Module: Personas Identifiers
// Description: Store-assigned identifiers for persona records.
// Purpose: Provide a strongly typed, serializable id with a stable numeric form.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Persona identifiers are assigned by the store on insert and never change
//! afterwards. They serialize as bare JSON integers.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Identifier Types
// ============================================================================

/// Store-assigned persona identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersonaId(i64);

impl PersonaId {
    /// Creates a persona identifier from its raw value.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw identifier value.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for PersonaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<i64> for PersonaId {
    fn from(value: i64) -> Self {
        Self::new(value)
    }
}
