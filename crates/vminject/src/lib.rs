//! Compile-time ViewModel binding-registry generation.
//!
//! One round: the host hands over its candidate types and a symbol table;
//! discovery validates and groups the injectable entities by scope, then
//! every scope gets a provider factory, a binding module, and a
//! factory-binding module written to the artifact sink.

pub mod config;
pub mod round;

pub use vminject_build as build;
pub use vminject_runtime as runtime;
pub use vminject_schema as schema;

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        config::Config,
        round::{RoundError, RoundSummary, run_round},
    };
    pub use vminject_build::prelude::*;
}
