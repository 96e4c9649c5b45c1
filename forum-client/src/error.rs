use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("{0}")]
    InvalidUrl(String),

    #[error("topic has been deleted: {url}")]
    TopicDeleted { url: String },

    #[error("could not read topic {url}: missing read permission")]
    NoReadPermission { url: String },

    #[error("request to the forum failed: {0}")]
    Request(#[from] reqwest_middleware::Error),

    #[error("forum returned an error response for {url}: {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("forum returned unexpected data for {url}: {reason}")]
    UnexpectedResponse { url: String, reason: String },
}
