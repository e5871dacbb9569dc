use std::fmt::Display;

use thiserror::Error;

/// Where a failure originated. Every failure of the client collapses into an
/// [`ErrorResult`]; the kind only tells callers which layer produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// connection refused, timeout, dns ...
    Transport,
    /// the token provider could not supply a credential
    Token,
    /// an outgoing body could not be serialized
    Encode,
    /// an incoming payload (network or cache) could not be parsed
    Decode,
    /// the remote service answered with a non-200 status
    Remote,
}

/// Uniform error envelope returned by every operation.
///
/// `status_code` is `None` when no HTTP status was received (transport
/// failures, local encode/decode failures). A remote rejection always carries
/// the real status and the raw response body as message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ErrorResult {
    pub kind: ErrorKind,
    pub message: String,
    pub status_code: Option<u16>,
}

pub type Result<T> = std::result::Result<T, ErrorResult>;

impl ErrorResult {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            status_code: None,
        }
    }

    pub fn with_status(mut self, status_code: u16) -> Self {
        self.status_code = Some(status_code);
        self
    }

    pub fn transport(err: impl Display) -> Self {
        Self::new(ErrorKind::Transport, err.to_string())
    }

    pub fn encode(err: impl Display) -> Self {
        Self::new(ErrorKind::Encode, err.to_string())
    }

    pub fn decode(err: impl Display) -> Self {
        Self::new(ErrorKind::Decode, err.to_string())
    }

    pub fn token(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Token, message)
    }

    /// Non-200 answer: the raw body becomes the message.
    pub fn remote(body: &[u8], status_code: u16) -> Self {
        Self::new(ErrorKind::Remote, String::from_utf8_lossy(body).into_owned()).with_status(status_code)
    }

    /// True when the remote service produced this error (a real HTTP status is present).
    pub fn has_status(&self) -> bool {
        self.status_code.is_some()
    }
}
