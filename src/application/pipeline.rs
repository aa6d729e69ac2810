//! Preview pipeline: resolve the visible text, render it, decide on the gate.
//!
//! The three stages run synchronously in order. Render failures never reach the
//! viewer: the visible text is emitted as escaped plain text instead and the
//! failure is logged for the host to observe.

use std::sync::Arc;

use metrics::counter;
use serde::Serialize;
use tracing::{debug, warn};

use crate::application::{
    gate::{GateSettings, should_show_gate},
    preview::{Preview, PreviewError, resolve_for_viewer},
    render::{MarkdownRenderer, markdown_renderer},
};
use crate::domain::viewer::ViewerContext;

pub const PREVIEW_TRUNCATED_METRIC: &str = "agoat_preview_truncated_total";
pub const RENDER_FALLBACK_METRIC: &str = "agoat_render_fallback_total";

/// Everything a view layer needs to display a post body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedPreview {
    pub html: String,
    pub was_truncated: bool,
    pub show_gate: bool,
    /// True when markdown rendering failed and `html` holds escaped plain text.
    pub fallback: bool,
}

#[derive(Clone)]
pub struct PreviewPipeline {
    renderer: Arc<dyn MarkdownRenderer>,
    gate: GateSettings,
}

impl PreviewPipeline {
    pub fn new(renderer: Arc<dyn MarkdownRenderer>, gate: GateSettings) -> Self {
        Self { renderer, gate }
    }

    /// Pipeline backed by the shared comrak renderer.
    pub fn with_default_renderer(gate: GateSettings) -> Self {
        Self::new(markdown_renderer(), gate)
    }

    pub fn gate(&self) -> GateSettings {
        self.gate
    }

    pub fn render(
        &self,
        content: &str,
        viewer: &ViewerContext,
    ) -> Result<RenderedPreview, PreviewError> {
        let Preview {
            visible_text,
            was_truncated,
        } = resolve_for_viewer(content, viewer)?;

        if was_truncated {
            counter!(PREVIEW_TRUNCATED_METRIC).increment(1);
            debug!(
                target = "application::pipeline",
                limit = viewer.max_content_length,
                "Preview truncated"
            );
        }

        let (html, fallback) = match self.renderer.render(&visible_text) {
            Ok(html) => (html, false),
            Err(err) => {
                counter!(RENDER_FALLBACK_METRIC).increment(1);
                warn!(
                    target = "application::pipeline",
                    error = %err,
                    chars = visible_text.chars().count(),
                    "Markdown rendering failed; falling back to plain text"
                );
                (plain_text_html(&visible_text), true)
            }
        };

        let show_gate = should_show_gate(
            was_truncated,
            viewer.is_authenticated,
            self.gate.show_login_prompt,
        );

        Ok(RenderedPreview {
            html,
            was_truncated,
            show_gate,
            fallback,
        })
    }
}

impl std::fmt::Debug for PreviewPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreviewPipeline")
            .field("gate", &self.gate)
            .finish_non_exhaustive()
    }
}

fn plain_text_html(text: &str) -> String {
    format!("<p>{}</p>", ammonia::clean_text(text))
}
