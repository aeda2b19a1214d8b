//! Domain layer containing the client-side business rules.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (document identifier, validation errors, state machine)
//! - `reanalysis` - Re-analysis status lifecycle and its error taxonomy
//! - `settings` - Per-document view settings and the key they are stored under

pub mod foundation;
pub mod reanalysis;
pub mod settings;
