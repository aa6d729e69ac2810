//! Source traits describing where posts come from.
//!
//! The Post Fetch API is an external collaborator; adapters live under
//! `infra`. Timeouts belong to the adapter, retries to the caller.

use agoat_api_types::{ListPostsQuery, PageMeta, PostId};
use async_trait::async_trait;
use thiserror::Error;

use crate::domain::posts::Post;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("request timed out")]
    Timeout,
    #[error("api responded with status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("api reported failure: {message}")]
    Api { message: String },
    #[error("failed to decode api response: {0}")]
    Decode(String),
    #[error("post not found")]
    NotFound,
    #[error("invalid request: {message}")]
    InvalidRequest { message: String },
}

impl FetchError {
    pub fn transport(err: impl std::fmt::Display) -> Self {
        Self::Transport(err.to_string())
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            message: message.into(),
        }
    }
}

/// One page of posts plus whatever pagination metadata the API supplied.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PostPage {
    pub posts: Vec<Post>,
    pub meta: Option<PageMeta>,
}

#[async_trait]
pub trait PostSource: Send + Sync {
    /// `GET /posts?page&per_page[&published]`
    async fn list_posts(&self, query: &ListPostsQuery) -> Result<PostPage, FetchError>;

    /// `GET /posts/{id}`, or `GET /posts/{id}/{slug}` when a slug is given.
    async fn get_post(&self, id: &PostId, slug: Option<&str>) -> Result<Post, FetchError>;
}
