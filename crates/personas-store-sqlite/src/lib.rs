// crates/personas-store-sqlite/src/lib.rs
// ============================================================================
// Module: SQLite Persona Store
// Description: Durable PersonaStore backend using SQLite.
// Purpose: Provide production persistence for persona records.
// Dependencies: personas-core, rusqlite
// ============================================================================

//! ## Overview
//! This crate provides a SQLite-backed [`PersonaStore`] implementation over a
//! single `persona` table with generated integer ids. The schema is created on
//! first open and version-checked on every later open.
//!
//! [`PersonaStore`]: personas_core::PersonaStore

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod store;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use store::SqlitePersonaStore;
pub use store::SqliteStoreConfig;
pub use store::SqliteStoreError;
pub use store::SqliteStoreMode;
pub use store::SqliteSyncMode;
