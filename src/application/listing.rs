//! View models for post listings and the single-post viewer.
//!
//! Both views fetch through a [`PostSource`] and run each post body through the
//! [`PreviewPipeline`] with the limit that applies to that view.

use std::num::NonZeroU32;
use std::sync::Arc;

use agoat_api_types::{ListPostsQuery, PostId};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::application::{
    pagination::Pagination,
    pipeline::{PreviewPipeline, RenderedPreview},
    preview::PreviewError,
    repos::{FetchError, PostSource},
};
use crate::domain::{posts::Post, slug::PostPath, viewer::ViewerContext};

#[derive(Debug, Error)]
pub enum ListingError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Preview(#[from] PreviewError),
}

/// Posts per listing page unless configured otherwise.
pub const DEFAULT_PER_PAGE: NonZeroU32 = match NonZeroU32::new(10) {
    Some(value) => value,
    None => panic!("default page size must be non-zero"),
};

/// Listing behaviour supplied by the host deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListingSettings {
    pub per_page: NonZeroU32,
    pub show_published_only: bool,
    pub list_max_content_length: i64,
    pub single_max_content_length: i64,
}

impl Default for ListingSettings {
    fn default() -> Self {
        Self {
            per_page: DEFAULT_PER_PAGE,
            show_published_only: true,
            list_max_content_length: crate::domain::viewer::LIST_PREVIEW_LENGTH,
            single_max_content_length: crate::domain::viewer::SINGLE_PREVIEW_LENGTH,
        }
    }
}

impl ListingSettings {
    /// Anonymous viewers only ever see published posts.
    pub fn published_filter(&self, is_authenticated: bool) -> bool {
        self.show_published_only || !is_authenticated
    }
}

/// Byline and routing data shared by cards and the single-post view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostHeader {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub path: String,
    pub author: String,
    pub published_on: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_on: Option<String>,
}

impl From<&Post> for PostHeader {
    fn from(post: &Post) -> Self {
        Self {
            id: post.id.to_string(),
            title: post.title.clone(),
            slug: post.slug.clone(),
            path: post.path().to_string(),
            author: post.display_author().to_string(),
            published_on: post.created_label(),
            updated_on: post.updated_label(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostCard {
    #[serde(flatten)]
    pub header: PostHeader,
    pub preview: RenderedPreview,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostListing {
    pub cards: Vec<PostCard>,
    pub pagination: Pagination,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostView {
    #[serde(flatten)]
    pub header: PostHeader,
    pub body: RenderedPreview,
}

#[derive(Clone)]
pub struct ListingService {
    source: Arc<dyn PostSource>,
    pipeline: PreviewPipeline,
    settings: ListingSettings,
}

impl ListingService {
    pub fn new(
        source: Arc<dyn PostSource>,
        pipeline: PreviewPipeline,
        settings: ListingSettings,
    ) -> Self {
        Self {
            source,
            pipeline,
            settings,
        }
    }

    pub fn settings(&self) -> &ListingSettings {
        &self.settings
    }

    pub async fn list(&self, page: u32, is_authenticated: bool) -> Result<PostListing, ListingError> {
        let page = page.max(1);
        let query = ListPostsQuery::new(page, self.settings.per_page.get())
            .published_only(self.settings.published_filter(is_authenticated));

        let fetched = self.source.list_posts(&query).await?;
        let viewer = ViewerContext::new(is_authenticated, self.settings.list_max_content_length);
        let cards = fetched
            .posts
            .iter()
            .map(|post| self.card(post, &viewer))
            .collect::<Result<Vec<_>, _>>()?;

        let pagination = Pagination::from_response(
            page,
            self.settings.per_page,
            fetched.meta.as_ref(),
            cards.len(),
        );

        info!(
            target = "application::listing",
            page,
            posts = cards.len(),
            total_pages = pagination.total_pages,
            "Post listing built"
        );

        Ok(PostListing { cards, pagination })
    }

    pub async fn view(
        &self,
        id: &PostId,
        slug: Option<&str>,
        is_authenticated: bool,
    ) -> Result<PostView, ListingError> {
        let post = self.source.get_post(id, slug).await?;
        let viewer = ViewerContext::new(is_authenticated, self.settings.single_max_content_length);
        let body = self.pipeline.render(&post.content, &viewer)?;

        debug!(
            target = "application::listing",
            post_id = %post.id,
            chars = post.content_chars(),
            truncated = body.was_truncated,
            gate = body.show_gate,
            "Post view built"
        );

        Ok(PostView {
            header: PostHeader::from(&post),
            body,
        })
    }

    /// Resolve a `post-path` value (`<slug>/<id>`) into a post view.
    pub async fn view_path(
        &self,
        path: &PostPath,
        is_authenticated: bool,
    ) -> Result<PostView, ListingError> {
        self.view(&path.id, Some(path.slug.as_str()), is_authenticated)
            .await
    }

    fn card(&self, post: &Post, viewer: &ViewerContext) -> Result<PostCard, PreviewError> {
        let preview = self.pipeline.render(&post.content, viewer)?;
        Ok(PostCard {
            header: PostHeader::from(post),
            preview,
        })
    }
}

impl std::fmt::Debug for ListingService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListingService")
            .field("pipeline", &self.pipeline)
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use agoat_api_types::PageMeta;
    use async_trait::async_trait;
    use time::macros::datetime;

    use super::*;
    use crate::application::gate::GateSettings;
    use crate::application::repos::PostPage;

    #[derive(Default)]
    struct StubSource {
        posts: Vec<Post>,
        meta: Option<PageMeta>,
        queries: Mutex<Vec<ListPostsQuery>>,
        lookups: Mutex<Vec<(PostId, Option<String>)>>,
    }

    #[async_trait]
    impl PostSource for StubSource {
        async fn list_posts(&self, query: &ListPostsQuery) -> Result<PostPage, FetchError> {
            self.queries.lock().expect("queries lock").push(*query);
            Ok(PostPage {
                posts: self.posts.clone(),
                meta: self.meta,
            })
        }

        async fn get_post(&self, id: &PostId, slug: Option<&str>) -> Result<Post, FetchError> {
            self.lookups
                .lock()
                .expect("lookups lock")
                .push((id.clone(), slug.map(str::to_string)));
            self.posts
                .iter()
                .find(|post| &post.id == id)
                .cloned()
                .ok_or(FetchError::NotFound)
        }
    }

    fn post(id: i64, content: &str) -> Post {
        Post {
            id: PostId::Numeric(id),
            title: format!("Post {id}"),
            content: content.to_string(),
            slug: format!("post-{id}"),
            published: true,
            created_at: datetime!(2024-02-01 09:00 UTC),
            updated_at: datetime!(2024-02-01 09:00 UTC),
            author: None,
            user_id: None,
        }
    }

    fn service(source: Arc<StubSource>, settings: ListingSettings) -> ListingService {
        ListingService::new(
            source,
            PreviewPipeline::with_default_renderer(GateSettings::default()),
            settings,
        )
    }

    #[tokio::test]
    async fn anonymous_listing_requests_published_posts_only() {
        let source = Arc::new(StubSource {
            posts: vec![post(1, "short")],
            ..Default::default()
        });
        let settings = ListingSettings {
            show_published_only: false,
            ..Default::default()
        };

        service(source.clone(), settings)
            .list(1, false)
            .await
            .expect("listing");
        service(source.clone(), settings)
            .list(1, true)
            .await
            .expect("listing");

        let queries = source.queries.lock().expect("queries lock");
        assert_eq!(queries[0].published, Some(true));
        assert_eq!(queries[1].published, None);
    }

    #[test]
    fn default_settings_page_by_ten_with_viewer_limits() {
        let settings = ListingSettings::default();
        assert_eq!(settings.per_page.get(), 10);
        assert_eq!(settings.per_page, DEFAULT_PER_PAGE);
        assert_eq!(settings.list_max_content_length, 300);
        assert_eq!(settings.single_max_content_length, 800);
    }

    #[tokio::test]
    async fn listing_uses_list_limit_and_gates_long_posts() {
        let long = "a".repeat(350);
        let source = Arc::new(StubSource {
            posts: vec![post(1, "short"), post(2, &long)],
            ..Default::default()
        });

        let listing = service(source, ListingSettings::default())
            .list(1, false)
            .await
            .expect("listing");

        assert_eq!(listing.cards.len(), 2);
        assert!(!listing.cards[0].preview.show_gate);
        assert!(listing.cards[1].preview.was_truncated);
        assert!(listing.cards[1].preview.show_gate);
        assert_eq!(listing.cards[1].header.author, "Admin");
        assert_eq!(listing.cards[1].header.path, "post-2/2");
        assert_eq!(listing.pagination.total_pages, 1);
    }

    #[tokio::test]
    async fn single_view_uses_single_limit() {
        let body = "b".repeat(500);
        let source = Arc::new(StubSource {
            posts: vec![post(9, &body)],
            ..Default::default()
        });

        let view = service(source.clone(), ListingSettings::default())
            .view_path(&PostPath::parse("post-9/9").expect("path"), false)
            .await
            .expect("view");

        assert!(!view.body.was_truncated);
        assert_eq!(view.header.published_on, "February 1, 2024");

        let lookups = source.lookups.lock().expect("lookups lock");
        assert_eq!(lookups[0], (PostId::Numeric(9), Some("post-9".to_string())));
    }

    #[tokio::test]
    async fn invalid_limit_surfaces_as_preview_error() {
        let source = Arc::new(StubSource {
            posts: vec![post(1, "body")],
            ..Default::default()
        });
        let settings = ListingSettings {
            list_max_content_length: 0,
            ..Default::default()
        };

        let err = service(source, settings)
            .list(1, false)
            .await
            .expect_err("invalid limit");
        assert!(matches!(
            err,
            ListingError::Preview(PreviewError::InvalidConfiguration { value: 0 })
        ));
    }

    #[tokio::test]
    async fn missing_post_surfaces_fetch_error() {
        let source = Arc::new(StubSource::default());
        let err = service(source, ListingSettings::default())
            .view(&PostId::Numeric(3), None, true)
            .await
            .expect_err("missing post");
        assert!(matches!(err, ListingError::Fetch(FetchError::NotFound)));
    }
}
