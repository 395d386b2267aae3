pub mod model;
pub mod ports;

pub use model::{LinkRecord, PageQuery, PixelPoint, PointerPhase, QueryReply, TabStatus};
pub use ports::{DebuggerPort, PageQueryPort, TabControlPort};
