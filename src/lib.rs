//! Library facade for the PageReach outreach engine: configuration,
//! target-list import, and re-exports of the engine crates for embedders
//! that wire their own host-integration layer.

pub mod cli;
pub mod config;
pub mod importer;

pub use pagereach_core_types as core_types;
pub use pagereach_discovery as discovery;
pub use pagereach_host_ports as host_ports;
pub use pagereach_scheduler as scheduler;
pub use pagereach_tabs as tabs;
pub use tool_message;

pub use config::AppConfig;
pub use importer::{import_targets, ImportSummary};
