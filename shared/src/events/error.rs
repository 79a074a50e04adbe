use thiserror::Error;

/// Errors surfaced while applying a remote entity event
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    /// The handler reported a failure
    #[error("Event handler failed: {0}")]
    Handler(String),

    /// The handler panicked; the panic was caught at the dispatch boundary
    #[error("Event handler panicked: {0}")]
    Panicked(String),
}
