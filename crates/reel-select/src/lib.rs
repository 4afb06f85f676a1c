//! Transcript-driven viral clip selection.
//!
//! Turns a timestamped transcript into a ranked set of sentence-aligned
//! highlight windows. A generative backend proposes and scores clips;
//! everything it returns is validated against the production
//! constraints, and a deterministic random fallback takes over whenever
//! the backend is unreachable or its output is unusable. Callers always
//! receive a usable result.

pub mod error;
pub mod gemini;
pub mod prompt;
pub mod selector;

pub use error::{SelectError, SelectResult};
pub use gemini::{GeminiClient, TextGenerator};
pub use prompt::{build_prompt, render_transcript};
pub use selector::ClipSelector;
