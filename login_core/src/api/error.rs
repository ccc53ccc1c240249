use thiserror::Error;

/// Easy alias for error handling
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can happen while submitting a login request. None of these
/// mean the credentials were wrong; that's a successful response with a falsy
/// `success` flag.
#[derive(Debug, Error)]
pub enum Error {
    /// We couldn't parse a URL, for example if the base URL was invalid.
    #[error("URL error: {0}")]
    UrlParse(#[from] url::ParseError),

    /// The request never got a complete response, for example because the
    /// server refused the connection or hung up while sending the body.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The response body was not JSON.
    #[error("could not parse response: {0}")]
    Parse(#[from] serde_json::Error),

    /// The response body was JSON `null`, which has no fields to read.
    #[error("could not parse response: body was null")]
    NullBody,
}

impl Error {
    /// Whether this error happened before we got a response body.
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network(_))
    }

    /// Whether we got a response body but couldn't make sense of it.
    pub fn is_parse(&self) -> bool {
        matches!(self, Self::Parse(_) | Self::NullBody)
    }
}
