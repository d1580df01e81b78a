//! HTTP handler modules for unotes-api.

pub mod ai;
pub mod health;
