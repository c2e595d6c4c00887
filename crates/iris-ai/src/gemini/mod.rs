//! Google Gemini API backend.
//!
//! Implements `ContentBackend` for Gemini models via the
//! Generative Language API `generateContent` method.

mod api;
mod client;
mod config;


pub use client::GeminiClient;
pub use config::{GeminiConfig, DEFAULT_BASE_URL, DEFAULT_MODEL};
