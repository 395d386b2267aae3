use thiserror::Error;

use pagereach_core_types::ReachError;

#[derive(Debug, Error)]
pub enum MessageError {
    #[error("tool disabled by policy")]
    Disabled,
    #[error("message exceeds {0} characters")]
    TextTooLong(usize),
    #[error("operation cancelled")]
    Cancelled,
}

impl From<MessageError> for ReachError {
    fn from(err: MessageError) -> Self {
        ReachError::new(err.to_string())
    }
}
