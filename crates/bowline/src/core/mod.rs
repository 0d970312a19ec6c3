//! Core types for canvas processing
//!
//! This module defines the canvas data model, the shared error type, and the
//! logging bootstrap used by both the library and the CLI.

mod error;
pub mod logging;
mod types;

pub use error::*;
pub use logging::*;
pub use types::*;
