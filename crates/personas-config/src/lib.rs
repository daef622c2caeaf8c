// crates/personas-config/src/lib.rs
// ============================================================================
// Module: Personas Config Library
// Description: Canonical config model and validation.
// Purpose: Single source of truth for personas.toml semantics.
// Dependencies: personas-store-sqlite, serde, toml
// ============================================================================

//! ## Overview
//! `personas-config` defines the configuration model for the Personas server.
//! Loading is strict and fail-closed: oversized, non-UTF-8, or inconsistent
//! files are rejected before any listener or store is opened.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::*;
