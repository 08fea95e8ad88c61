//! Errors for this crate.
//! About anyhow: see https://github.com/TrueLayer/reqwest-middleware/issues/119
//!
//! Error responses from Jenkins are not errors here: they are returned as a
//! [crate::ResponseResult] with its `error` text set. [JenkinsError] covers
//! what cannot be represented that way.

use reqwest::StatusCode;
use std::num::ParseIntError;

#[derive(thiserror::Error, Debug)]
pub enum InvalidJenkinsUrl {
    #[error("Given URL does not start with \"http://\" or \"https://\": {0}")]
    Protocol(String),

    #[error("Given URL is malformed: {0}")]
    Malformed(String),
}

aliri_braid::from_infallible!(InvalidJenkinsUrl);

/// Problems found while building a [crate::JenkinsClient], before any request is sent.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("Endpoint must be set")]
    MissingEndpoint,

    #[error("Credentials must be set")]
    MissingCredentials,

    #[error("Credentials must look like \"user:secret\" or its base64 encoding")]
    MalformedCredentials,

    #[error("Invalid header value for {0}")]
    InvalidHeader(&'static str),

    #[error(transparent)]
    Url(#[from] InvalidJenkinsUrl),
}

/// The crumb needed to send a POST request could not be obtained.
#[derive(thiserror::Error, Debug)]
pub enum CrumbError {
    /// The crumb issuer answered with an error status.
    #[error("crumb issuer responded ({status:?}): {text}")]
    Issuer { status: StatusCode, text: String },

    /// The crumb issuer answered, but the body could not be read as a crumb.
    #[error("crumb issuer response is malformed: {0}")]
    Malformed(String),

    /// The crumb issuer answered without a crumb value.
    #[error("Crumb couldn't be obtained")]
    Missing,

    /// The crumb issuer handed back a header name or value which is not valid in HTTP.
    #[error("crumb cannot be used as a header: {0}")]
    InvalidHeader(String),
}

/// Errors representing failed interactions with Jenkins.
#[derive(thiserror::Error, Debug)]
pub enum JenkinsError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Connection, timeout or TLS failure (no HTTP status exists).
    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    #[error(transparent)]
    Crumb(#[from] CrumbError),

    /// Error from a reqwest middleware function.
    #[error(transparent)]
    Middleware(anyhow::Error),

    /// An endpoint which must return a bare integer returned something else.
    #[error("expected an integer response body, got {body:?}")]
    IntParse {
        body: String,
        source: ParseIntError,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<reqwest_middleware::Error> for JenkinsError {
    fn from(error: reqwest_middleware::Error) -> Self {
        match error {
            reqwest_middleware::Error::Middleware(e) => match e.downcast::<CrumbError>() {
                Ok(crumb) => JenkinsError::Crumb(crumb),
                Err(e) => match e.downcast::<JenkinsError>() {
                    Ok(inner) => inner,
                    Err(e) => JenkinsError::Middleware(e),
                },
            },
            reqwest_middleware::Error::Reqwest(e) => JenkinsError::Transport(e),
        }
    }
}

impl From<JenkinsError> for reqwest_middleware::Error {
    fn from(error: JenkinsError) -> Self {
        match error {
            JenkinsError::Transport(e) => reqwest_middleware::Error::Reqwest(e),
            JenkinsError::Middleware(e) => reqwest_middleware::Error::Middleware(e),
            JenkinsError::Crumb(e) => reqwest_middleware::Error::Middleware(anyhow::Error::new(e)),
            other => reqwest_middleware::Error::Middleware(anyhow::Error::new(other)),
        }
    }
}

impl From<CrumbError> for reqwest_middleware::Error {
    fn from(e: CrumbError) -> Self {
        reqwest_middleware::Error::Middleware(anyhow::Error::new(e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crumb_error_survives_middleware_roundtrip() {
        let wrapped = reqwest_middleware::Error::Middleware(anyhow::Error::new(CrumbError::Missing));
        assert!(matches!(
            JenkinsError::from(wrapped),
            JenkinsError::Crumb(CrumbError::Missing)
        ));
    }

    #[test]
    fn test_other_middleware_error_is_kept() {
        let wrapped = reqwest_middleware::Error::Middleware(anyhow::anyhow!("retry budget spent"));
        match JenkinsError::from(wrapped) {
            JenkinsError::Middleware(e) => assert_eq!(e.to_string(), "retry budget spent"),
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
