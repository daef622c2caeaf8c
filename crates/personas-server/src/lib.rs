// crates/personas-server/src/lib.rs
// ============================================================================
// Module: Personas Server
// Description: HTTP surface for persona CRUD.
// Purpose: Expose a store-backed persona service over JSON routes.
// Dependencies: personas-core, personas-config, axum, tokio
// ============================================================================

//! ## Overview
//! Personas server maps the `/personas` routes onto a
//! [`personas_core::PersonaService`] and records one structured audit event
//! per handled request. All persistence goes through the configured store.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod audit;
pub mod routes;
pub mod server;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use audit::PersonaAuditEvent;
pub use audit::PersonaAuditEventParams;
pub use audit::PersonaAuditSink;
pub use audit::PersonaFileAuditSink;
pub use audit::PersonaNoopAuditSink;
pub use audit::PersonaOutcome;
pub use audit::PersonaStderrAuditSink;
pub use audit::ServerStartedEvent;
pub use routes::ApiError;
pub use server::PersonaServer;
pub use server::PersonaServerError;
