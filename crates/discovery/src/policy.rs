use std::time::Duration;

use serde::{Deserialize, Serialize};

use pagereach_core_types::FilterConfig;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollPolicy {
    /// Pause between scroll steps; feed pages load new content lazily and
    /// need this long before the height observation means anything.
    pub scroll_delay_ms: u64,
    /// Hard cap on scroll steps for one session.
    pub max_attempts: u32,
    /// Consecutive identical height observations that end the session.
    pub stable_threshold: u32,
    /// Outer deadline for one discovery run.
    pub overall_timeout_ms: u64,
}

impl Default for ScrollPolicy {
    fn default() -> Self {
        Self {
            scroll_delay_ms: 6000,
            max_attempts: 1000,
            stable_threshold: 3,
            overall_timeout_ms: 300_000,
        }
    }
}

impl ScrollPolicy {
    pub fn scroll_delay(&self) -> Duration {
        Duration::from_millis(self.scroll_delay_ms)
    }

    pub fn overall_timeout(&self) -> Duration {
        Duration::from_millis(self.overall_timeout_ms)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscoveryPolicy {
    pub scroll: ScrollPolicy,
    /// Accessible role of the feed container links are harvested from.
    pub container_role: String,
    pub filter: FilterConfig,
}

impl Default for DiscoveryPolicy {
    fn default() -> Self {
        Self {
            scroll: ScrollPolicy::default(),
            container_role: "feed".to_string(),
            filter: FilterConfig::default(),
        }
    }
}
