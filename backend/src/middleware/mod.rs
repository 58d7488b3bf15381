//! Request middleware.
//!
//! Purpose: Wrap the HTTP pipeline with cross-cutting behaviour; today that is
//! the tracing layer that mints and propagates a per-request trace id.

pub mod trace;

pub use trace::Trace;
