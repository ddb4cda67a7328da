//! Integration test utilities for the club membership API
//!
//! This crate provides helpers for running end-to-end tests against
//! the REST API with tokens minted the way the identity provider
//! would mint them.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
