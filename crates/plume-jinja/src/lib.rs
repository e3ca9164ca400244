//! plume-jinja - Jinja templating layer for Plume
//!
//! This crate is the surface the notebook layer calls: a minijinja
//! environment exposing `ref()`, `source()`, and `var()` backed by a
//! backend adapter, rendering project macros + cell text into
//! engine-ready SQL. The rendered string is what preview mode prints
//! and what the execution layer ships to the engine.

pub mod environment;
pub mod error;
pub mod functions;

pub use environment::CellEnvironment;
pub use error::{JinjaError, JinjaResult};
