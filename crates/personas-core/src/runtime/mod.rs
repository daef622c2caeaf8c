// crates/personas-core/src/runtime/mod.rs
// ============================================================================
// Module: Personas Runtime
// Description: Service layer and in-process store implementations.
// Purpose: Orchestrate persona CRUD between the HTTP boundary and a store.
// Dependencies: crate::{core, interfaces}
// ============================================================================

//! ## Overview
//! Runtime modules hold the persona service and the in-memory and shared
//! store wrappers. Every transport calls into the same service.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod service;
pub mod store;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use service::PersonaService;
pub use store::InMemoryPersonaStore;
pub use store::SharedPersonaStore;
