//! # contract: interface for the text-generation service
//!
//! This module defines the single trait ([`Generator`]) behind which the
//! remote completion endpoint lives. It is the only non-deterministic,
//! network-dependent seam in the pipeline, so it is kept narrow: one prompt
//! in, one completion out, single turn, no history, no streaming.
//!
//! ## Mocking & Testing
//! - The trait is annotated for `mockall` so consumers can generate
//!   deterministic mocks for unit/integration tests.
//!
//! ## Adding New Generation Backends
//! - Implement the trait for your backend client.
//! - Convert all meaningful upstream errors (transport, status, timeout,
//!   empty content) to a boxed error.

use async_trait::async_trait;

use mockall::{automock, predicate::*};

/// Error type for the Generator trait (simple boxed error for now).
pub type GenerateError = Box<dyn std::error::Error + Send + Sync>;

/// Trait for requesting a single text completion from a generation service.
/// Implemented by real clients and by test mocks.
///
/// The trait is `Send` + `Sync` and intended for async/await usage.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait Generator: Send + Sync {
    /// Send the prompt as a single user message and return the first
    /// completion's text verbatim. A call that times out, fails transport,
    /// returns an error status or yields no usable content must error.
    async fn complete(&self, prompt: &str) -> Result<String, GenerateError>;
}
