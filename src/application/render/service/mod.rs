mod config;

use std::sync::Arc;

use comrak::{Arena, format_html, nodes::AstNode, parse_document};
use once_cell::sync::Lazy;

use crate::application::render::types::{MarkdownRenderer, RenderError};

use config::{build_preview_sanitizer, default_options};

/// CommonMark + GFM renderer backed by comrak, sanitised with ammonia.
pub struct ComrakMarkdownRenderer {
    options: comrak::Options<'static>,
    sanitizer: ammonia::Builder<'static>,
}

impl ComrakMarkdownRenderer {
    /// Tables, strikethrough, autolinks, task lists and footnotes enabled.
    pub fn new() -> Self {
        Self {
            options: default_options(),
            sanitizer: build_preview_sanitizer(),
        }
    }

    /// Render markdown while skipping sanitisation. Diagnostics only; never
    /// embed the result in a page.
    pub fn render_unsanitized(&self, markdown: &str) -> Result<String, RenderError> {
        let arena = Arena::new();
        let root = parse_document(&arena, markdown, &self.options);
        render_html_stage(root, &self.options)
    }
}

impl Default for ComrakMarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

static MARKDOWN_RENDERER: Lazy<Arc<ComrakMarkdownRenderer>> =
    Lazy::new(|| Arc::new(ComrakMarkdownRenderer::new()));

/// Shared renderer instance, initialised on first use.
pub fn markdown_renderer() -> Arc<ComrakMarkdownRenderer> {
    Arc::clone(&MARKDOWN_RENDERER)
}

impl MarkdownRenderer for ComrakMarkdownRenderer {
    fn render(&self, markdown: &str) -> Result<String, RenderError> {
        let arena = Arena::new();
        let root = parse_document(&arena, markdown, &self.options);
        let rendered_html = render_html_stage(root, &self.options)?;
        Ok(sanitize_stage(&rendered_html, &self.sanitizer))
    }
}

fn render_html_stage<'a>(
    root: &'a AstNode<'a>,
    options: &comrak::Options<'static>,
) -> Result<String, RenderError> {
    let mut html = String::new();
    format_html(root, options, &mut html).map_err(|err| RenderError::markdown(err.to_string()))?;
    Ok(html)
}

fn sanitize_stage(html: &str, sanitizer: &ammonia::Builder<'static>) -> String {
    sanitizer.clean(html).to_string()
}
