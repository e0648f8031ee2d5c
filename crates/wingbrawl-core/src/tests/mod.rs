//! Cross-module tests for the object manager and the game facade.
//!
//! - `integration.rs`: end-to-end scenarios through the manager and the duel
//! - `properties.rs`: `proptest` properties over random populations
//! - `helpers.rs`: recording sinks and factory functions

pub(crate) mod helpers;
mod properties;
