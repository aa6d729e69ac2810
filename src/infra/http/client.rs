use std::time::Duration;

use agoat_api_types::{ApiEnvelope, ListPostsQuery, PostId, PostRecord};
use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::application::repos::{FetchError, PostPage, PostSource};
use crate::domain::posts::Post;
use crate::infra::error::InfraError;

/// reqwest-backed client for `{api_url}/posts`.
#[derive(Clone, Debug)]
pub struct PostsClient {
    client: Client,
    base: Url,
}

impl PostsClient {
    pub fn new(api_url: &Url, timeout: Duration) -> Result<Self, InfraError> {
        if api_url.cannot_be_a_base() {
            return Err(InfraError::http_client(format!(
                "api url `{api_url}` cannot be used as a base"
            )));
        }

        let client = Client::builder()
            .user_agent(Self::user_agent())
            .timeout(timeout)
            .build()
            .map_err(|err| InfraError::http_client(err.to_string()))?;

        Ok(Self {
            client,
            base: api_url.clone(),
        })
    }

    pub fn user_agent() -> &'static str {
        concat!("agoat/", env!("CARGO_PKG_VERSION"))
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    /// Append path segments to the configured API root, escaping each one.
    fn url(&self, segments: &[&str]) -> Result<Url, FetchError> {
        let mut url = self.base.clone();
        url.set_query(None);
        url.path_segments_mut()
            .map_err(|_| FetchError::invalid_request("api url cannot be a base"))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get<T: DeserializeOwned>(
        &self,
        mut url: Url,
        query: &[(&str, String)],
    ) -> Result<ApiEnvelope<T>, FetchError> {
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }

        debug!(target = "infra::http::posts", url = %url, "GET");

        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        Self::handle(resp).await
    }

    async fn handle<T: DeserializeOwned>(resp: Response) -> Result<ApiEnvelope<T>, FetchError> {
        let status = resp.status();
        let bytes = resp.bytes().await.map_err(map_reqwest_error)?;

        if status == StatusCode::NOT_FOUND {
            return Err(FetchError::NotFound);
        }
        if !status.is_success() {
            let body = String::from_utf8_lossy(&bytes).into_owned();
            return Err(FetchError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let envelope: ApiEnvelope<T> =
            serde_json::from_slice(&bytes).map_err(|err| FetchError::Decode(err.to_string()))?;

        if !envelope.success {
            let message = envelope
                .failure_reason()
                .unwrap_or("unspecified error")
                .to_string();
            return Err(FetchError::Api { message });
        }

        Ok(envelope)
    }
}

#[async_trait]
impl PostSource for PostsClient {
    async fn list_posts(&self, query: &ListPostsQuery) -> Result<PostPage, FetchError> {
        let url = self.url(&["posts"])?;
        let envelope: ApiEnvelope<Vec<PostRecord>> = self.get(url, &query.to_pairs()).await?;

        let meta = envelope.meta;
        let posts = envelope
            .data
            .unwrap_or_default()
            .into_iter()
            .map(Post::from)
            .collect();

        Ok(PostPage { posts, meta })
    }

    async fn get_post(&self, id: &PostId, slug: Option<&str>) -> Result<Post, FetchError> {
        if id.is_empty() {
            return Err(FetchError::invalid_request("post id must not be empty"));
        }

        let id = id.to_string();
        let url = match slug.map(str::trim).filter(|slug| !slug.is_empty()) {
            Some(slug) => self.url(&["posts", id.as_str(), slug])?,
            None => self.url(&["posts", id.as_str()])?,
        };

        let envelope: ApiEnvelope<PostRecord> = self.get(url, &[]).await?;
        envelope.data.map(Post::from).ok_or(FetchError::NotFound)
    }
}

fn map_reqwest_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        FetchError::Timeout
    } else {
        FetchError::transport(err)
    }
}
