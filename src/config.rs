//! Aggregated configuration for every engine policy, loaded from a single
//! YAML file with defaults suitable for a first run.

use serde::{Deserialize, Serialize};

use pagereach_discovery::DiscoveryPolicy;
use pagereach_scheduler::SchedulerPolicy;
use pagereach_tabs::TabPolicy;
use tool_message::MessagePolicyView;

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub discovery: DiscoveryPolicy,
    pub tabs: TabPolicy,
    pub message: MessagePolicyView,
    pub scheduler: SchedulerPolicy,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_round_trip_through_yaml() {
        let config = AppConfig::default();
        let yaml = serde_yaml::to_string(&config).unwrap();
        let parsed: AppConfig = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed.scheduler.batch_size, 5);
        assert_eq!(parsed.discovery.scroll.stable_threshold, 3);
        assert_eq!(parsed.message.timings.post_insert_ms, 1200);
    }

    #[test]
    fn partial_file_keeps_defaults_for_the_rest() {
        let yaml = "scheduler:\n  batch_size: 3\n";
        let parsed: AppConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(parsed.scheduler.batch_size, 3);
        assert_eq!(parsed.scheduler.inter_open_delay_ms, 800);
        assert_eq!(parsed.tabs.settle_ms, 3000);
    }
}
