// crates/personas-core/src/core/mod.rs
// ============================================================================
// Module: Personas Core Types
// Description: Canonical persona records and identifiers.
// Purpose: Provide stable, serializable types shared by every layer.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Core types define the persona record as stored and as submitted by
//! clients. These types are the source of truth for the HTTP wire form.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod identifiers;
pub mod persona;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use identifiers::PersonaId;
pub use persona::Persona;
pub use persona::PersonaFields;
pub use persona::PersonaRecord;
