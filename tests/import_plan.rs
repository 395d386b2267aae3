//! End-to-end check of the local data path: CSV import through the profile
//! filter into the batch partition the scheduler would run.

use std::io::Write;

use pagereach_cli::config::AppConfig;
use pagereach_cli::importer::import_targets;
use pagereach_core_types::TargetFilter;

fn sample_csv() -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    let mut rows = String::from("\"No.\",\"Title\",\"URL\"\n");
    for i in 0..12 {
        rows.push_str(&format!(
            "\"{}\",\"Shop {}\",\"https://www.facebook.com/shop{}\"\n",
            i + 1,
            i,
            i
        ));
    }
    rows.push_str("\"13\",\"A group\",\"https://www.facebook.com/groups/999\"\n");
    file.write_all(rows.as_bytes()).unwrap();
    file
}

#[test]
fn imported_list_partitions_like_the_scheduler() {
    let file = sample_csv();
    let summary = import_targets(file.path(), &TargetFilter::default()).unwrap();
    assert_eq!(summary.targets.len(), 12);
    assert_eq!(summary.rejected, 1);

    let config = AppConfig::default();
    let batch_size = config.scheduler.batch_size;
    let sizes: Vec<usize> = summary
        .targets
        .chunks(batch_size)
        .map(|chunk| chunk.len())
        .collect();
    assert_eq!(sizes, vec![5, 5, 2]);
}

#[test]
fn config_defaults_match_the_documented_timings() {
    let config = AppConfig::default();
    assert_eq!(config.scheduler.inter_open_delay_ms, 800);
    assert_eq!(config.scheduler.inter_message_delay_ms, 4000);
    assert_eq!(config.tabs.poll_interval_ms, 500);
    assert_eq!(config.message.timings.post_focus_ms, 1000);
    assert_eq!(config.discovery.scroll.scroll_delay_ms, 6000);
}
