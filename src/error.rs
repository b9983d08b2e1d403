/// Boxed failure value stored by [`crate::Faults`].
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Failure synthesized by [`crate::Faults::condition`] when its predicate holds.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ConditionFailed {
    pub message: String,
}

impl ConditionFailed {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("Failed to install global tracing subscriber: {0}")]
    SetGlobal(String),
}
