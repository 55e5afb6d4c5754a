use thiserror::Error;

/// Configuration errors raised before a round is created.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("board holds at most {capacity} tiles but {required} are required")]
    InsufficientCapacity { required: usize, capacity: usize },

    #[error("invalid variant: {0}")]
    InvalidConfig(&'static str),
}

pub type Result<T> = std::result::Result<T, GameError>;
