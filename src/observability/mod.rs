//! Observability
//!
//! Structured check events over the `log` facade.

pub mod audit;
