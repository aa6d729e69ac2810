//! Posts as the viewer sees them, with the display rules shared by every frontend.

use agoat_api_types::{PostId, PostRecord};
use serde::Serialize;
use time::{OffsetDateTime, format_description::FormatItem, macros::format_description};

use super::slug::{PostPath, derive_slug};

/// Shown when a post carries no author.
pub const DEFAULT_AUTHOR: &str = "Admin";

pub const HUMAN_DATE_FORMAT: &[FormatItem<'static>] =
    format_description!("[month repr:long] [day padding:none], [year]");

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Post {
    pub id: PostId,
    pub title: String,
    /// Raw markdown source. Never mutated by the preview pipeline.
    pub content: String,
    pub slug: String,
    pub published: bool,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
    pub author: Option<String>,
    pub user_id: Option<String>,
}

impl Post {
    /// Author name for bylines, falling back to [`DEFAULT_AUTHOR`].
    pub fn display_author(&self) -> &str {
        self.author
            .as_deref()
            .map(str::trim)
            .filter(|author| !author.is_empty())
            .unwrap_or(DEFAULT_AUTHOR)
    }

    /// Modification time, only when it differs from the creation time.
    pub fn modified_at(&self) -> Option<OffsetDateTime> {
        (self.updated_at != self.created_at).then_some(self.updated_at)
    }

    pub fn created_label(&self) -> String {
        format_human_date(self.created_at)
    }

    pub fn updated_label(&self) -> Option<String> {
        self.modified_at().map(format_human_date)
    }

    /// Routing path used by the `post-path` query parameter.
    pub fn path(&self) -> PostPath {
        PostPath::new(self.slug.clone(), self.id.clone())
    }

    /// Raw content length in characters.
    pub fn content_chars(&self) -> usize {
        self.content.chars().count()
    }
}

impl From<PostRecord> for Post {
    fn from(record: PostRecord) -> Self {
        let PostRecord {
            id,
            title,
            content,
            slug,
            published,
            created_at,
            updated_at,
            user_id,
            author,
        } = record;

        let slug = if slug.trim().is_empty() {
            derive_slug(&title).unwrap_or_default()
        } else {
            slug
        };

        Self {
            id,
            title,
            content,
            slug,
            published,
            created_at,
            updated_at,
            author,
            user_id,
        }
    }
}

/// Long US-style date, e.g. `January 5, 2024`.
pub fn format_human_date(at: OffsetDateTime) -> String {
    at.format(HUMAN_DATE_FORMAT).expect("valid calendar date")
}
