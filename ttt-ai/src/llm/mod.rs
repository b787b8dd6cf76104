//! Language-model integration
//!
//! Move selection and commentary through an Ollama-compatible service.

mod client;
mod commentary;
mod engine;
mod oracle;
mod parser;
mod prompt;

pub use client::{GenerationRequest, OllamaClient, OllamaConfig, TextGenerator};
pub use commentary::{CommentaryGenerator, COMMENTARY_PLACEHOLDER};
pub use engine::LlmEngine;
pub use oracle::LlmOracle;
pub use parser::{LlmMove, MoveParser};
pub use prompt::{PromptTemplate, RemoteTier};
