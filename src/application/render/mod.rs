//! Markdown rendering for post previews.
//!
//! Rendering is pure: markdown in, sanitised HTML out, with structured errors.
//! Deciding what to do when rendering fails is left to the caller.

mod service;
mod types;

pub use service::{ComrakMarkdownRenderer, markdown_renderer};
pub use types::{MarkdownRenderer, RenderError};
