use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BooksError {
    #[error("invalid request url: {0}")]
    Url(String),

    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("book service returned {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("failed to decode book service response: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    RateLimited,
    Server,
    Client,
    Network,
    Timeout,
    Decode,
    Unknown,
}

impl BooksError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            BooksError::Status { status, .. } => {
                if *status == StatusCode::TOO_MANY_REQUESTS {
                    ErrorKind::RateLimited
                } else if status.is_server_error() {
                    ErrorKind::Server
                } else if status.is_client_error() {
                    ErrorKind::Client
                } else {
                    ErrorKind::Unknown
                }
            }
            BooksError::Request(e) => {
                if e.is_timeout() {
                    ErrorKind::Timeout
                } else if e.is_decode() {
                    ErrorKind::Decode
                } else if e.is_connect() || e.is_body() || e.is_request() {
                    ErrorKind::Network
                } else {
                    ErrorKind::Unknown
                }
            }
            BooksError::Decode(_) => ErrorKind::Decode,
            BooksError::Url(_) => ErrorKind::Client,
        }
    }
}
