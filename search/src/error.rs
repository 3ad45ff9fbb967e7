use thiserror::Error;

/// Errors raised while building, loading or saving a maze
#[derive(Debug, Error)]
pub enum MazeError {
    #[error("Malformed maze: {reason}")]
    Malformed { reason: String },
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

impl MazeError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        MazeError::Malformed {
            reason: reason.into(),
        }
    }
}

/// Errors raised by the frontier and the search engine
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// `remove` was called on a frontier with no entries
    #[error("Empty frontier")]
    EmptyFrontier,
    /// The frontier ran out before the goal was reached
    #[error("No solution, explored {explored} states")]
    NoSolution { explored: usize },
    #[error("Explore limit reached after {explored} states")]
    ExploreLimitReached { explored: usize },
}

impl SearchError {
    /// An unreachable goal is an ordinary outcome, not a bug in the caller.
    pub fn is_no_solution(&self) -> bool {
        matches!(self, SearchError::NoSolution { .. })
    }
}
