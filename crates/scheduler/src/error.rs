use thiserror::Error;

use pagereach_core_types::ReachError;

#[derive(Debug, Error)]
pub enum SchedulerError {
    #[error("no valid targets after filtering")]
    NoValidTargets,
    #[error("message payload is empty")]
    EmptyPayload,
}

impl From<SchedulerError> for ReachError {
    fn from(err: SchedulerError) -> Self {
        ReachError::new(err.to_string())
    }
}
