pub mod error;
pub mod events;
pub mod model;
pub mod session;

pub use error::SchedulerError;
pub use events::{NoopEvents, NoticeKind, SchedulerEvents};
pub use model::{
    AdvanceOutcome, BatchProgress, BatchReport, InteractOutcome, InteractReport,
    OrchestrationSession, SchedulerPolicy, SequenceOutcome, SequenceReport,
};
pub use session::BatchScheduler;
