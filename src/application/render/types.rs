use thiserror::Error;

/// Structured errors surfaced by the renderer. Messages never contain the
/// rendered document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    #[error("markdown rendering failed: {message}")]
    Markdown { message: String },
}

impl RenderError {
    pub fn markdown(message: impl Into<String>) -> Self {
        Self::Markdown {
            message: message.into(),
        }
    }
}

/// Converts visible markdown into HTML safe to embed in a page.
///
/// Implementations must be deterministic: the same input yields byte-identical
/// output. Incomplete markdown (for example an unterminated code fence left by
/// truncation) must render best effort instead of failing.
pub trait MarkdownRenderer: Send + Sync {
    fn render(&self, markdown: &str) -> Result<String, RenderError>;
}
