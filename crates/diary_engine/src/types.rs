use std::fmt;

use diary_core::RawPost;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct ApiError {
    pub kind: FailureKind,
    pub message: String,
}

impl ApiError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidProfileUrl,
    HttpStatus(u16),
    Timeout,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    Decode,
    Network,
    UserNotFound,
}

impl FailureKind {
    /// True for every failure of the HTTP exchange itself, as opposed to a
    /// well-formed answer saying the account does not exist.
    pub fn is_network(&self) -> bool {
        matches!(
            self,
            FailureKind::HttpStatus(_)
                | FailureKind::Timeout
                | FailureKind::TooLarge { .. }
                | FailureKind::Decode
                | FailureKind::Network
        )
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidProfileUrl => write!(f, "invalid profile url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::Decode => write!(f, "malformed response body"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::UserNotFound => write!(f, "user not found"),
        }
    }
}

/// Why pagination stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopReason {
    /// The server returned an empty page.
    Exhausted,
    /// The last post of a page had an id that is not an integer, so no older
    /// cursor could be computed. Posts gathered so far are still complete.
    MalformedPostId { id: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOutcome {
    /// All pages concatenated in server order (newest first).
    pub posts: Vec<RawPost>,
    pub pages: usize,
    pub stop: StopReason,
}
