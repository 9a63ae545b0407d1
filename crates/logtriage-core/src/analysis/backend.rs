use crate::errors::CoreError;

/// Trait for analysis endpoints. Sync only, no async.
pub trait AnalysisBackend {
    /// Send a serialized request payload and return the raw response body bytes.
    /// Any failure to complete the exchange is a `CoreError::Transport`.
    fn send(&self, payload: &str) -> Result<Vec<u8>, CoreError>;
}
