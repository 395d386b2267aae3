use std::time::Duration;

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct MessagePolicyView {
    pub enabled: bool,
    pub max_text_len: usize,
    /// Accessible role of the message input region.
    pub input_role: String,
    /// Label fragments identifying the input region, one per locale.
    pub input_labels: Vec<String>,
    /// Accessible role of the send control.
    pub send_role: String,
    /// Accessible labels of the send control, one per locale.
    pub send_labels: Vec<String>,
    pub timings: MessageTimings,
}

impl Default for MessagePolicyView {
    fn default() -> Self {
        Self {
            enabled: true,
            max_text_len: 2000,
            input_role: "textbox".to_string(),
            input_labels: vec!["Tin nhắn".to_string(), "Message".to_string()],
            send_role: "button".to_string(),
            send_labels: vec![
                "Press enter to send".to_string(),
                "Nhấn Enter để gửi".to_string(),
            ],
            timings: MessageTimings::default(),
        }
    }
}

/// Every step transition waits for the page to settle. The remote page's
/// rendering latency is environment-dependent, so each wait is a tunable
/// field rather than a derived value.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct MessageTimings {
    /// After the defensive detach, before attaching.
    pub pre_attach_ms: u64,
    /// After attach, before the focus gesture.
    pub post_attach_ms: u64,
    /// Between pointer press and release.
    pub press_release_gap_ms: u64,
    /// After the focus gesture, before inserting text.
    pub post_focus_ms: u64,
    /// After the raw-text insert. Safe range observed in deployment:
    /// 1200–3000 ms depending on page animation latency.
    pub post_insert_ms: u64,
    /// After detach, before querying for the send control.
    pub post_detach_ms: u64,
}

impl Default for MessageTimings {
    fn default() -> Self {
        Self {
            pre_attach_ms: 100,
            post_attach_ms: 200,
            press_release_gap_ms: 50,
            post_focus_ms: 1000,
            post_insert_ms: 1200,
            post_detach_ms: 500,
        }
    }
}

impl MessageTimings {
    pub fn pre_attach(&self) -> Duration {
        Duration::from_millis(self.pre_attach_ms)
    }

    pub fn post_attach(&self) -> Duration {
        Duration::from_millis(self.post_attach_ms)
    }

    pub fn press_release_gap(&self) -> Duration {
        Duration::from_millis(self.press_release_gap_ms)
    }

    pub fn post_focus(&self) -> Duration {
        Duration::from_millis(self.post_focus_ms)
    }

    pub fn post_insert(&self) -> Duration {
        Duration::from_millis(self.post_insert_ms)
    }

    pub fn post_detach(&self) -> Duration {
        Duration::from_millis(self.post_detach_ms)
    }
}

#[cfg(test)]
pub(crate) fn zeroed() -> MessagePolicyView {
    MessagePolicyView {
        timings: MessageTimings {
            pre_attach_ms: 0,
            post_attach_ms: 0,
            press_release_gap_ms: 0,
            post_focus_ms: 0,
            post_insert_ms: 0,
            post_detach_ms: 0,
        },
        ..MessagePolicyView::default()
    }
}
