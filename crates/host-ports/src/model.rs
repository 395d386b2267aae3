use serde::{Deserialize, Serialize};

use pagereach_core_types::ReachError;

/// Read-only or DOM-mutating query the core asks the host to run inside a
/// page. The core depends only on this descriptor/reply contract, never on
/// how the host executes it.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum PageQuery {
    /// Enumerate anchors inside the container with the given accessible role.
    CollectLinks { container_role: String },
    /// Current total scrollable height of the document.
    ScrollHeight,
    /// Scroll the document to its current bottom.
    ScrollToBottom,
    /// Locate an element by accessible role whose label contains one of the
    /// given fragments, returning its on-screen center.
    LocateByLabel { role: String, labels: Vec<String> },
    /// Find and activate a control by accessible role and label.
    ActivateByLabel { role: String, labels: Vec<String> },
    /// Find and activate a control by accessible role and visible text.
    ActivateByText { role: String, fragments: Vec<String> },
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum QueryReply {
    Links {
        container_found: bool,
        links: Vec<LinkRecord>,
    },
    Height(i64),
    Point(Option<PixelPoint>),
    Activated(bool),
    Ack,
}

impl QueryReply {
    pub fn into_links(self) -> Result<(bool, Vec<LinkRecord>), ReachError> {
        match self {
            QueryReply::Links {
                container_found,
                links,
            } => Ok((container_found, links)),
            _ => Err(ReachError::ReplyShape("Links")),
        }
    }

    pub fn into_height(self) -> Result<i64, ReachError> {
        match self {
            QueryReply::Height(height) => Ok(height),
            _ => Err(ReachError::ReplyShape("Height")),
        }
    }

    pub fn into_point(self) -> Result<Option<PixelPoint>, ReachError> {
        match self {
            QueryReply::Point(point) => Ok(point),
            _ => Err(ReachError::ReplyShape("Point")),
        }
    }

    pub fn into_activated(self) -> Result<bool, ReachError> {
        match self {
            QueryReply::Activated(activated) => Ok(activated),
            _ => Err(ReachError::ReplyShape("Activated")),
        }
    }

    pub fn expect_ack(self) -> Result<(), ReachError> {
        match self {
            QueryReply::Ack => Ok(()),
            _ => Err(ReachError::ReplyShape("Ack")),
        }
    }
}

/// One anchor found inside the feed container.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LinkRecord {
    pub text: String,
    pub href: String,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct PixelPoint {
    pub x: i32,
    pub y: i32,
}

/// Phase of a synthetic pointer gesture dispatched through the debugger.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum PointerPhase {
    Pressed,
    Released,
}

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct TabStatus {
    pub loaded: bool,
}
