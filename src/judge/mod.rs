//! Validator adapters.
//!
//! The checker core is language-agnostic. Adapters say where a validator's
//! source lives, how to build it, and how to run it.

pub mod adapter;
pub mod build;
pub mod languages;
pub mod registry;

pub use adapter::ValidatorAdapter;
