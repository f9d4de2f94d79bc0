use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    /// Fewer data points than the algorithm needs. Callers hide the affected
    /// panel instead of surfacing this.
    #[error("Insufficient data: need at least {required} points, got {actual}")]
    InsufficientData { required: usize, actual: usize },

    /// A caller passed a parameter outside the contract.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
