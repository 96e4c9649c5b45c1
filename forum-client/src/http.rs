use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{policies::ExponentialBackoff, RetryTransientMiddleware};
use serde::Deserialize;

use crate::client::ForumClient;
use crate::error::Error;
use crate::types::{parse_topic_info, topic_info_to_absolute_url, validate_topic_url};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);
const MAX_RETRIES: u32 = 5;

/// A [`ForumClient`] backed by a Discourse instance's HTTP API.
pub struct DiscourseClient {
    base_path: String,
    api_username: String,
    api_key: String,
    category_id: u64,
    http: ClientWithMiddleware,
}

impl DiscourseClient {
    pub fn new(
        base_path: impl Into<String>,
        api_username: impl Into<String>,
        api_key: impl Into<String>,
        category_id: u64,
    ) -> Self {
        let retry_policy = ExponentialBackoff::builder()
            .retry_bounds(Duration::from_secs(1), Duration::from_secs(30))
            .build_with_max_retries(MAX_RETRIES);
        let inner = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("building the forum http client should never fail");
        let http = ClientBuilder::new(inner)
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .build();

        Self {
            base_path: base_path.into(),
            api_username: api_username.into(),
            api_key: api_key.into(),
            category_id,
            http,
        }
    }

    fn auth_headers(&self) -> Result<HeaderMap, Error> {
        let mut headers = HeaderMap::new();
        headers.insert(
            HeaderName::from_static("api-key"),
            HeaderValue::from_str(&self.api_key)
                .map_err(|e| Error::UnexpectedResponse {
                    url: self.base_path.clone(),
                    reason: format!("invalid api key header value: {e}"),
                })?,
        );
        headers.insert(
            HeaderName::from_static("api-username"),
            HeaderValue::from_str(&self.api_username)
                .map_err(|e| Error::UnexpectedResponse {
                    url: self.base_path.clone(),
                    reason: format!("invalid api username header value: {e}"),
                })?,
        );
        Ok(headers)
    }
}

#[derive(Deserialize)]
struct CreatePostResponse {
    topic_slug: String,
    topic_id: u64,
}

#[async_trait]
impl ForumClient for DiscourseClient {
    async fn create_topic(&self, title: &str, content: &str) -> Result<String, Error> {
        let url = format!("{}/posts.json", self.base_path.trim_end_matches('/'));
        let response = self
            .http
            .post(&url)
            .headers(self.auth_headers()?)
            .form(&[
                ("title", title),
                ("raw", content),
                ("category", &self.category_id.to_string()),
                ("unlist_topic", "true"),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status {
                url,
                status,
            });
        }
        let parsed: CreatePostResponse =
            response
                .json()
                .await
                .map_err(|e| Error::UnexpectedResponse {
                    url: url.clone(),
                    reason: e.to_string(),
                })?;

        Ok(topic_info_to_absolute_url(
            &self.base_path,
            &crate::types::TopicInfo {
                slug: parsed.topic_slug,
                id: parsed.topic_id,
            },
        ))
    }

    async fn retrieve_topic(&self, url: &str) -> Result<String, Error> {
        if !self.check_topic_read_permission(url).await? {
            return Err(Error::NoReadPermission {
                url: url.to_string(),
            });
        }
        let info = parse_topic_info(&self.base_path, url)?;
        let raw_url = format!("{}/raw/{}", self.base_path.trim_end_matches('/'), info.id);
        let response = self
            .http
            .get(&raw_url)
            .headers(self.auth_headers()?)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status {
                url: url.to_string(),
                status,
            });
        }
        response.text().await.map_err(|e| Error::UnexpectedResponse {
            url: url.to_string(),
            reason: e.to_string(),
        })
    }

    async fn update_topic(&self, url: &str, content: &str) -> Result<(), Error> {
        let info = parse_topic_info(&self.base_path, url)?;
        let post_url = format!(
            "{}/t/{}/{}.json",
            self.base_path.trim_end_matches('/'),
            info.slug,
            info.id
        );
        let response = self
            .http
            .put(&post_url)
            .headers(self.auth_headers()?)
            .form(&[("post[raw]", content)])
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(Error::Status {
                url: url.to_string(),
                status,
            })
        }
    }

    async fn delete_topic(&self, url: &str) -> Result<(), Error> {
        let info = parse_topic_info(&self.base_path, url)?;
        let delete_url = format!(
            "{}/t/{}.json",
            self.base_path.trim_end_matches('/'),
            info.id
        );
        let response = self
            .http
            .delete(&delete_url)
            .headers(self.auth_headers()?)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(Error::Status {
                url: url.to_string(),
                status,
            })
        }
    }

    async fn check_topic_read_permission(&self, url: &str) -> Result<bool, Error> {
        let info = parse_topic_info(&self.base_path, url)?;
        let topic_url = format!("{}/t/{}.json", self.base_path.trim_end_matches('/'), info.id);
        let response = self
            .http
            .get(&topic_url)
            .headers(self.auth_headers()?)
            .send()
            .await?;
        Ok(response.status().is_success())
    }

    async fn check_topic_write_permission(&self, url: &str) -> Result<bool, Error> {
        let info = parse_topic_info(&self.base_path, url)?;
        let topic_url = format!("{}/t/{}.json", self.base_path.trim_end_matches('/'), info.id);
        let response = self
            .http
            .get(&topic_url)
            .headers(self.auth_headers()?)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Error::Status {
                url: url.to_string(),
                status: response.status(),
            });
        }
        #[derive(Deserialize)]
        struct PostStream {
            posts: Vec<FirstPost>,
        }
        #[derive(Deserialize)]
        struct FirstPost {
            post_number: u32,
            can_edit: Option<bool>,
        }
        #[derive(Deserialize)]
        struct TopicBody {
            post_stream: PostStream,
        }

        let body: TopicBody = response.json().await.map_err(|e| Error::UnexpectedResponse {
            url: url.to_string(),
            reason: e.to_string(),
        })?;
        let first_post = body
            .post_stream
            .posts
            .into_iter()
            .find(|post| post.post_number == 1)
            .ok_or_else(|| Error::UnexpectedResponse {
                url: url.to_string(),
                reason: "topic has no first post".to_string(),
            })?;

        Ok(first_post.can_edit.unwrap_or(false))
    }

    fn absolute_url(&self, url: &str) -> Result<String, Error> {
        validate_topic_url(&self.base_path, url)?;
        let info = parse_topic_info(&self.base_path, url)?;
        Ok(topic_info_to_absolute_url(&self.base_path, &info))
    }
}
