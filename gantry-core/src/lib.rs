//! Gantry Core
//!
//! Core types and decision logic for the gantry delivery control plane.
//!
//! This crate contains:
//! - Domain types: resource identities, invocations, derived facts
//! - The promotion state model (dev → test → staging → {blue, green} → prod)
//! - Pipeline name resolution and parameter building
//! - Manifest accessors: typed read-only views over cluster documents
//!
//! Note: everything here is pure. Network access lives in `gantry-client`.

pub mod action;
pub mod domain;
pub mod environment;
pub mod error;
pub mod manifest;
pub mod naming;
pub mod params;

// Re-export commonly used types
pub use action::Action;
pub use error::{ManifestError, Result};
pub use naming::Naming;
