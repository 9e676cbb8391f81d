//! Osteoporosis risk assessment engine.
//!
//! The [`assessment`] module holds the deterministic scoring pipeline
//! (score calculator, recommendation generator, plan builder) together with
//! the thin service, history, routing, and cohort import layers that sit on
//! top of it.

pub mod assessment;
pub mod config;
pub mod error;
pub mod telemetry;
