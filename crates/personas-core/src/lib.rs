// crates/personas-core/src/lib.rs
// ============================================================================
// Module: Personas Core Library
// Description: Public API surface for the Personas core.
// Purpose: Expose the persona model, store interface, and service layer.
// Dependencies: crate::{core, interfaces, runtime}
// ============================================================================

//! ## Overview
//! Personas core defines the single managed entity, the backend-agnostic
//! [`PersonaStore`] contract, and the [`PersonaService`] that sits between the
//! HTTP boundary and a store. It carries no transport or database specifics;
//! durable backends live in sibling crates.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod core;
pub mod interfaces;
pub mod runtime;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use core::*;

pub use interfaces::PersonaStore;
pub use interfaces::StoreError;
pub use runtime::InMemoryPersonaStore;
pub use runtime::PersonaService;
pub use runtime::SharedPersonaStore;
