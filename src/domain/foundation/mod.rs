//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers and error types that form the
//! vocabulary of the document viewer.

mod errors;
mod ids;
mod state_machine;

pub use errors::ValidationError;
pub use ids::DocumentId;
pub use state_machine::StateMachine;
