// crates/personas-cli/src/lib.rs
// ============================================================================
// Module: Personas CLI Library
// Description: Shared helpers for the Personas command-line interface.
// Purpose: Provide reusable components for the CLI binary and tests.
// Dependencies: personas-config
// ============================================================================

//! ## Overview
//! This library module houses shared CLI utilities. The binary entry point
//! (`src/main.rs`) imports the bind policy checks from here.

// ============================================================================
// SECTION: Modules
// ============================================================================

/// Bind exposure policy for the `serve` command.
pub mod serve_policy;
