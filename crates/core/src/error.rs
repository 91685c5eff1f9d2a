/// Errors raised while building the client, before any request is sent.
///
/// Failures of individual service operations are reported as
/// [`NormalizedFailure`](crate::error_handler::NormalizedFailure) instead.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("invalid REST API URL: {0}")]
    InvalidBaseUrl(String),
    #[error("failed to build HTTP client: {0}")]
    HttpClientBuild(reqwest::Error),
}

pub type ClientResult<T> = std::result::Result<T, ClientError>;
