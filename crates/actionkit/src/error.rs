use std::fmt;

/// Unified error type for the actionkit crate.
#[derive(Debug, Clone)]
pub enum ActionError {
    /// The registry fetch failed at the transport level.
    Network(String),
    /// An exact-path lookup found nothing, even after fetching siblings.
    NotFound(String),
    /// A path pattern could not be compiled.
    InvalidPattern(String),
    /// A behavior module could not be loaded.
    ModuleLoad(String),
    /// Internal error.
    Internal(String),
}

impl fmt::Display for ActionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionError::Network(msg) => write!(f, "network failure: {msg}"),
            ActionError::NotFound(path) => write!(f, "no action found for path: {path}"),
            ActionError::InvalidPattern(msg) => write!(f, "invalid pattern: {msg}"),
            ActionError::ModuleLoad(msg) => write!(f, "module load failed: {msg}"),
            ActionError::Internal(msg) => write!(f, "internal error: {msg}"),
        }
    }
}

impl std::error::Error for ActionError {}

/// Result type alias using [`ActionError`].
pub type ActionResult<T> = Result<T, ActionError>;
