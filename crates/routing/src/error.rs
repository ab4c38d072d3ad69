use thiserror::Error;

/// Failure of a single route request.
///
/// `Backend`, `Status` and `Malformed` are all backend-class failures; only
/// `Transport` means the service could not be reached at all.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    /// `{success: false, error}` from the backend.
    #[error("{0}")]
    Backend(String),
    #[error("routing backend returned HTTP {status}")]
    Status { status: u16 },
    #[error("malformed routing response: {0}")]
    Malformed(String),
    #[error("routing backend unreachable: {0}")]
    Transport(String),
}

impl RouteError {
    pub fn is_transport(&self) -> bool {
        matches!(self, RouteError::Transport(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ComparisonError {
    #[error("no route could be computed for any of the {attempted} priorities")]
    NoRoutes { attempted: usize },
}
