//! A client for the forum a documentation tree is reconciled against:
//! topic CRUD plus permission checks, with the URL validation the rest of
//! the engine relies on to recognize a "managed" topic.

mod client;
mod error;
mod http;
mod types;

pub use client::ForumClient;
pub use error::Error;
pub use http::DiscourseClient;
pub use types::{parse_topic_info, topic_info_to_absolute_url, validate_topic_url, TopicInfo};
