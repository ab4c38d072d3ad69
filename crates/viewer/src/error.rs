use routing::{ComparisonError, RouteError};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ViewerError {
    #[error("source and destination are both required")]
    Validation,
    #[error("{0}")]
    Backend(RouteError),
    #[error("{0}")]
    Transport(RouteError),
    #[error(transparent)]
    Comparison(#[from] ComparisonError),
    #[error("comparison view needs at least one route")]
    EmptyComparison,
}

impl From<RouteError> for ViewerError {
    fn from(err: RouteError) -> Self {
        if err.is_transport() {
            ViewerError::Transport(err)
        } else {
            ViewerError::Backend(err)
        }
    }
}

impl ViewerError {
    /// Text shown to the user in an alert.
    pub fn user_message(&self) -> String {
        match self {
            ViewerError::Validation => "Please enter both source and destination".to_string(),
            ViewerError::Backend(err) => format!("Error: {err}"),
            ViewerError::Transport(_) => "Failed to find route. Please try again.".to_string(),
            ViewerError::Comparison(_) | ViewerError::EmptyComparison => {
                "Could not compare routes. Please try again.".to_string()
            }
        }
    }
}
