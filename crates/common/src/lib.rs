//! Shared types for the spawn point registry.
//!
//! # Invariants
//! - `Location` is a plain value; equality is field-wise.
//! - The document form of a location is a flat mapping, never nested.

mod location;

pub use location::Location;
