//! Client for the content-generation backend.
//!
//! Validates and sanitizes user parameters ([`GenerationRequest`]), builds
//! the generation prompt ([`build_prompt`]), and talks to the backend over
//! HTTP with a global timeout and per-status error mapping
//! ([`GenerationClient`]).

mod client;
mod error;
mod prompt;
mod request;

pub use client::{DEFAULT_TIMEOUT_SECS, GeneratedContent, GenerationClient, GenerationMetadata};
pub use error::ClientError;
pub use prompt::build_prompt;
pub use request::{
    DEFAULT_CONTENT_LENGTH, GenerationRequest, MAX_CONTENT_LENGTH, MIN_CONTENT_LENGTH,
    RequestError, Tone,
};
