//! DigestGPT Client - document viewer core.
//!
//! This crate provides the pieces of the document viewer that carry real
//! behavior: triggering a server-side re-analysis of a document, and
//! persisting per-document view settings in a key-value store.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;
