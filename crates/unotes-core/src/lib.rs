//! # unotes-core
//!
//! Core types, traits, and error definitions for the unotes tutor service.
//!
//! This crate provides the request and invocation data model and the
//! backend trait that the inference and api crates depend on.

pub mod defaults;
pub mod error;
pub mod models;
pub mod traits;

// Re-export commonly used types at crate root
pub use error::{Error, Result};
pub use models::*;
pub use traits::*;
