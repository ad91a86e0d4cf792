//! Shared test utilities for pulse integration harnesses.
//!
//! Import everything you need via `mod common; use common::*;` at the top of
//! each harness file. All helpers are deterministic: fixture clusters are
//! built the same way on every run so result ordering is reproducible.

pub mod assertions;
pub mod builders;
pub mod fixtures;

pub use builders::*;
pub use fixtures::*;
