//! Error taxonomy for the wavy.fm client.
//!
//! Every failure the client can produce is one of a small set of typed
//! errors, so callers can tell a rejected request (`ApiError`) apart from a
//! network outage (`TransportError`) or a broken response shape
//! (`DecodeError`) without looking at raw HTTP details.

use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

/// Top level error returned by every client operation.
#[derive(Debug, Error)]
pub enum Error {
    /// The client-credentials grant failed.
    #[error("token grant failed: {0}")]
    Auth(#[from] AuthError),

    /// The HTTP call could not be completed.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The API rejected the request with a structured error body.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// A response body did not match the expected shape.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// A user URI was malformed or empty.
    #[error(transparent)]
    UserUri(#[from] UserUriError),

    /// Missing or invalid process configuration.
    #[error("configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Returns the API error if the remote side rejected the request.
    pub fn as_api(&self) -> Option<&ApiError> {
        match self {
            Error::Api(api) => Some(api),
            _ => None,
        }
    }

    /// True when the call was aborted through a cancellation token.
    pub fn is_cancelled(&self) -> bool {
        matches!(
            self,
            Error::Transport(TransportError::Cancelled)
                | Error::Auth(AuthError::Transport(TransportError::Cancelled))
        )
    }
}

/// Low level network failure or cancellation.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request was cancelled")]
    Cancelled,

    #[error("failed to execute request: {0}")]
    Request(#[from] reqwest::Error),

    #[error("failed to build request url: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// Failure of the client-credentials grant.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("token endpoint answered {status}: {body}")]
    Rejected { status: StatusCode, body: String },

    #[error("malformed token response: {0}")]
    Malformed(#[source] serde_json::Error),

    #[error("token response has out of range expires_in: {0}")]
    InvalidExpiry(i64),
}

/// Error object returned by the wavy.fm API for any status >= 400.
///
/// See <https://wavy.fm/developers/docs/v1beta/errors>.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Error)]
#[error("{status}: {name}")]
pub struct ApiError {
    pub status: u16,
    pub code: String,
    pub name: String,
    pub detail: String,
}

/// A response body that could not be decoded.
#[derive(Debug, Error)]
#[error("failed to decode response body with status {status}: {source}")]
pub struct DecodeError {
    pub status: StatusCode,
    #[source]
    pub source: serde_json::Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserUriError {
    #[error("failed to parse UserURI: {0:?}")]
    Parse(String),

    #[error("UserURI value must not be empty")]
    InvalidState,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_renders_status_and_name() {
        let err: ApiError = serde_json::from_str(
            r#"{"status":404,"code":"not_found","name":"UserNotFound","detail":"no such user"}"#,
        )
        .unwrap();

        assert_eq!(err.to_string(), "404: UserNotFound");
        assert_eq!(Error::from(err.clone()).to_string(), "404: UserNotFound");
        assert_eq!(Error::from(err).as_api().map(|a| a.status), Some(404));
    }

    #[test]
    fn cancellation_is_detected_through_auth() {
        let err = Error::Auth(AuthError::Transport(TransportError::Cancelled));
        assert!(err.is_cancelled());
        assert!(Error::Transport(TransportError::Cancelled).is_cancelled());
        assert!(!Error::Config("missing".into()).is_cancelled());
    }
}
