//! Per-request viewer state handed to the preview pipeline by the host.

use serde::{Deserialize, Serialize};

/// Character budget for previews in post listings.
pub const LIST_PREVIEW_LENGTH: i64 = 300;
/// Character budget for the single-post viewer.
pub const SINGLE_PREVIEW_LENGTH: i64 = 800;

/// Who is looking at a post and how much of it they may see.
///
/// The limit stays a signed integer here because it arrives from host
/// configuration; the preview resolver rejects values that are not positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewerContext {
    pub is_authenticated: bool,
    pub max_content_length: i64,
}

impl ViewerContext {
    pub fn new(is_authenticated: bool, max_content_length: i64) -> Self {
        Self {
            is_authenticated,
            max_content_length,
        }
    }

    /// Context used for list previews (300 characters).
    pub fn for_list(is_authenticated: bool) -> Self {
        Self::new(is_authenticated, LIST_PREVIEW_LENGTH)
    }

    /// Context used for single-post previews (800 characters).
    pub fn for_single(is_authenticated: bool) -> Self {
        Self::new(is_authenticated, SINGLE_PREVIEW_LENGTH)
    }

    pub fn anonymous(max_content_length: i64) -> Self {
        Self::new(false, max_content_length)
    }
}
