//! Content preview resolution.
//!
//! Decides how much raw markdown a viewer may see. Truncation counts Unicode
//! scalar values of the raw source and ignores markdown structure, so a cut can
//! land inside a link or an open code fence; the renderer copes with that.

use std::num::NonZeroUsize;

use serde::Serialize;
use thiserror::Error;

use crate::domain::viewer::ViewerContext;

/// Appended to truncated previews.
pub const ELLIPSIS: &str = "...";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PreviewError {
    #[error("invalid preview configuration: max content length must be positive, got {value}")]
    InvalidConfiguration { value: i64 },
}

/// Validated preview budget in characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PreviewLimit(NonZeroUsize);

impl PreviewLimit {
    pub fn new(max_content_length: i64) -> Result<Self, PreviewError> {
        usize::try_from(max_content_length)
            .ok()
            .and_then(NonZeroUsize::new)
            .map(Self)
            .ok_or(PreviewError::InvalidConfiguration {
                value: max_content_length,
            })
    }

    pub fn get(self) -> usize {
        self.0.get()
    }
}

impl TryFrom<i64> for PreviewLimit {
    type Error = PreviewError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// The part of a post's markdown a viewer is allowed to see.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Preview {
    pub visible_text: String,
    pub was_truncated: bool,
}

impl Preview {
    fn full(content: &str) -> Self {
        Self {
            visible_text: content.to_string(),
            was_truncated: false,
        }
    }
}

/// Resolve the visible portion of `content`.
///
/// Authenticated viewers always get everything. Anonymous viewers get at most
/// `max_content_length` characters followed by [`ELLIPSIS`]. A non-positive
/// limit is rejected before any output is produced.
pub fn resolve_preview(
    content: &str,
    is_authenticated: bool,
    max_content_length: i64,
) -> Result<Preview, PreviewError> {
    let limit = PreviewLimit::new(max_content_length)?;
    Ok(resolve_with_limit(content, is_authenticated, limit))
}

/// [`resolve_preview`] driven by a [`ViewerContext`].
pub fn resolve_for_viewer(content: &str, viewer: &ViewerContext) -> Result<Preview, PreviewError> {
    resolve_preview(content, viewer.is_authenticated, viewer.max_content_length)
}

pub fn resolve_with_limit(content: &str, is_authenticated: bool, limit: PreviewLimit) -> Preview {
    if is_authenticated {
        return Preview::full(content);
    }

    match content.char_indices().nth(limit.get()) {
        None => Preview::full(content),
        Some((cut, _)) => {
            let mut visible_text = String::with_capacity(cut + ELLIPSIS.len());
            visible_text.push_str(&content[..cut]);
            visible_text.push_str(ELLIPSIS);
            Preview {
                visible_text,
                was_truncated: true,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_content_is_returned_unchanged() {
        let content = "# Title\n\nShort body.";
        let preview = resolve_preview(content, false, 300).expect("preview");
        assert_eq!(preview.visible_text, content);
        assert!(!preview.was_truncated);
    }

    #[test]
    fn content_at_exact_limit_is_not_truncated() {
        let content = "a".repeat(300);
        let preview = resolve_preview(&content, false, 300).expect("preview");
        assert_eq!(preview.visible_text, content);
        assert!(!preview.was_truncated);
    }

    #[test]
    fn long_content_is_cut_and_marked() {
        let content = "x".repeat(310);
        let preview = resolve_preview(&content, false, 300).expect("preview");
        assert_eq!(preview.visible_text, format!("{}...", "x".repeat(300)));
        assert_eq!(preview.visible_text.chars().count(), 303);
        assert!(preview.was_truncated);
    }

    #[test]
    fn authenticated_viewers_see_everything() {
        let content = "y".repeat(5_000);
        let preview = resolve_preview(&content, true, 10).expect("preview");
        assert_eq!(preview.visible_text, content);
        assert!(!preview.was_truncated);
    }

    #[test]
    fn truncation_counts_characters_not_bytes() {
        let content = "héllo wörld";
        let preview = resolve_preview(content, false, 4).expect("preview");
        assert_eq!(preview.visible_text, "héll...");
    }

    #[test]
    fn non_positive_limits_are_rejected() {
        assert_eq!(
            resolve_preview("anything", false, 0),
            Err(PreviewError::InvalidConfiguration { value: 0 })
        );
        assert_eq!(
            resolve_preview("anything", true, -5),
            Err(PreviewError::InvalidConfiguration { value: -5 })
        );
    }

    #[test]
    fn viewer_context_drives_resolution() {
        let viewer = ViewerContext::anonymous(3);
        let preview = resolve_for_viewer("abcdef", &viewer).expect("preview");
        assert_eq!(preview.visible_text, "abc...");
    }
}
