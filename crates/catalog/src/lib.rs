//! Beer catalog domain module.
//!
//! This crate contains business rules for the beer catalog, implemented purely
//! as deterministic domain logic (no IO, no HTTP, no storage).

pub mod beer;

pub use beer::{Beer, BeerFields, BeerId};
