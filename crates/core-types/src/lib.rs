use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

mod target;

pub use target::{FilterConfig, Target, TargetFilter};

/// Shared error type every PageReach crate converts its local errors into.
#[derive(Debug, Error, Clone)]
pub enum ReachError {
    /// A host collaborator call (tab control, page query, debugger) failed.
    #[error("host call failed: {0}")]
    Host(String),
    /// The host refused to attach the debugging channel to the tab.
    #[error("debugger attach refused: {0}")]
    AttachRefused(String),
    /// A page query returned a reply of the wrong shape.
    #[error("unexpected page query reply, expected {0}")]
    ReplyShape(&'static str),
    /// A target URL could not be parsed.
    #[error("invalid target url: {0}")]
    InvalidTarget(String),
    #[error("{0}")]
    Message(String),
}

impl ReachError {
    pub fn new(message: impl Into<String>) -> Self {
        Self::Message(message.into())
    }

    pub fn host(message: impl Into<String>) -> Self {
        Self::Host(message.into())
    }
}

/// Host-assigned identity of one browser tab.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct TabId(pub i64);

impl fmt::Display for TabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct ActionId(pub String);

impl ActionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl Default for ActionId {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct SequenceId(pub String);

impl SequenceId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl Default for SequenceId {
    fn default() -> Self {
        Self::new()
    }
}

/// Lifecycle of one tab the scheduler is driving.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum TabState {
    Opened,
    Ready,
    Interacting,
    Closed,
}

/// One open tab bound to the target it was opened for.
#[derive(Clone, Debug)]
pub struct TabHandle {
    pub id: TabId,
    pub target: Target,
    pub state: TabState,
}

impl TabHandle {
    pub fn opened(id: TabId, target: Target) -> Self {
        Self {
            id,
            target,
            state: TabState::Opened,
        }
    }
}
