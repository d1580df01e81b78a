//! # unotes-inference
//!
//! Tutor orchestration for the unotes study companion.
//!
//! This crate provides:
//! - Mode resolution as an ordered decision table
//! - Prompt templates and context block builders
//! - AUTO and CHAT mode handlers producing a [`ModelInvocation`]
//! - The [`Tutor`] orchestrator (normalize, resolve, dispatch, invoke)
//! - OpenAI-compatible chat backend (feature `openai`, default)
//! - Mock backend for deterministic tests (feature `mock`)
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use unotes_inference::{ModelCatalog, OpenAIBackend, Tutor};
//!
//! #[tokio::main]
//! async fn main() {
//!     let backend = OpenAIBackend::from_env().unwrap();
//!     let tutor = Tutor::new(Arc::new(backend), ModelCatalog::from_env().unwrap());
//!
//!     let request = serde_json::from_str(r#"{"userQuestion": "What is a heap?"}"#).unwrap();
//!     let envelope = tutor.handle(request).await.unwrap();
//!     println!("{}", envelope.response);
//! }
//! ```

pub mod config;
pub mod context;
pub mod modes;
pub mod prompts;
pub mod resolver;
pub mod tutor;

#[cfg(feature = "openai")]
pub mod openai;

// Mock chat backend for testing
#[cfg(any(test, feature = "mock"))]
pub mod mock;

// Re-export core types
pub use unotes_core::*;

#[cfg(feature = "openai")]
pub use openai::{OpenAIBackend, OpenAIConfig, UpstreamErrorCode};

pub use config::ModelCatalog;
pub use modes::{build_invocation, AUTO_PARAMS, CHAT_PARAMS};
pub use resolver::{resolve_mode, resolve_with, ResolutionRule, RESOLUTION_RULES};
pub use tutor::{PreparedRequest, Stage, Tutor};
