use async_trait::async_trait;

use crate::error::Error;

/// The operations the reconciliation engine needs from a documentation
/// forum. A topic is identified by its absolute URL; callers never see the
/// forum's internal slug/id representation directly.
#[async_trait]
pub trait ForumClient: Send + Sync {
    /// Creates a new topic with `title` and `content` as its first post,
    /// returning the URL to the created topic.
    async fn create_topic(&self, title: &str, content: &str) -> Result<String, Error>;

    /// Retrieves the content of a topic's first post.
    async fn retrieve_topic(&self, url: &str) -> Result<String, Error>;

    /// Replaces the content of a topic's first post.
    async fn update_topic(&self, url: &str, content: &str) -> Result<(), Error>;

    /// Deletes a topic.
    async fn delete_topic(&self, url: &str) -> Result<(), Error>;

    /// Checks whether the configured credentials can read `url`.
    async fn check_topic_read_permission(&self, url: &str) -> Result<bool, Error>;

    /// Checks whether the configured credentials can write to `url`.
    async fn check_topic_write_permission(&self, url: &str) -> Result<bool, Error>;

    /// Normalizes `url` (which may be relative) to an absolute topic URL.
    fn absolute_url(&self, url: &str) -> Result<String, Error>;
}
