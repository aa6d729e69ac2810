//! Slugs and routing paths for posts.
//!
//! Slug derivation bridges ASCII slugification (`slug` crate) with Chinese
//! transliteration (`pinyin` crate) so a title like “基线对齐” becomes
//! `ji-xian-dui-qi`. Posts served without a slug get one derived from their title.

use std::fmt;
use std::str::FromStr;

use agoat_api_types::PostId;
use pinyin::{Pinyin, ToPinyin};
use slug::slugify;
use thiserror::Error;

use super::error::DomainError;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SlugError {
    #[error("slug source text is empty")]
    EmptyInput,
    #[error("failed to derive slug from `{input}`")]
    Unrepresentable { input: String },
}

/// Derive a base slug from a post title.
pub fn derive_slug(input: &str) -> Result<String, SlugError> {
    if input.trim().is_empty() {
        return Err(SlugError::EmptyInput);
    }

    let transliterated = transliterate_to_ascii(input);
    let candidate = slugify(&transliterated);

    if candidate.is_empty() {
        return Err(SlugError::Unrepresentable {
            input: input.to_string(),
        });
    }

    Ok(candidate)
}

fn transliterate_to_ascii(input: &str) -> String {
    let mut output = String::with_capacity(input.len());

    for ch in input.chars() {
        if ch.is_ascii() {
            output.push(ch);
            continue;
        }

        match ch.to_pinyin() {
            Some(py) => append_pinyin(&mut output, py),
            None if ch.is_whitespace() => output.push(' '),
            None => output.push(ch),
        }
    }

    output
}

fn append_pinyin(buffer: &mut String, pinyin: Pinyin) {
    if !buffer.is_empty() && !buffer.ends_with(' ') {
        buffer.push(' ');
    }
    buffer.push_str(pinyin.plain());
}

/// `<slug>/<id>` routing path carried in the `post-path` query parameter.
///
/// The id is the last segment; everything before the final `/` is the slug.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostPath {
    pub slug: String,
    pub id: PostId,
}

impl PostPath {
    pub fn new(slug: impl Into<String>, id: PostId) -> Self {
        Self {
            slug: slug.into(),
            id,
        }
    }

    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let trimmed = raw.trim().trim_matches('/');
        let (slug, id) = trimmed
            .rsplit_once('/')
            .ok_or_else(|| DomainError::invalid_post_path(raw))?;

        let slug = slug.trim();
        let id = id.trim();
        if slug.is_empty() || id.is_empty() {
            return Err(DomainError::invalid_post_path(raw));
        }

        // Only canonical integers become numeric; `007` or `+5` stay verbatim.
        let id = match id.parse::<i64>() {
            Ok(numeric) if numeric.to_string() == id => PostId::Numeric(numeric),
            _ => PostId::Text(id.to_string()),
        };

        Ok(Self::new(slug, id))
    }
}

impl FromStr for PostPath {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for PostPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.slug, self.id)
    }
}
