use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::ReachError;

/// One discovered profile page. Identity is the normalized URL: query and
/// fragment are dropped and a trailing slash is trimmed, so the same page
/// reached through different anchors dedupes to one target.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Target {
    pub title: String,
    pub url: String,
}

impl Target {
    pub fn new(title: impl Into<String>, url: &str) -> Result<Self, ReachError> {
        let normalized = normalize_url(url)?;
        Ok(Self {
            title: title.into(),
            url: normalized,
        })
    }

    /// Key used when deduplicating discovered links.
    pub fn dedup_key(&self) -> &str {
        &self.url
    }
}

fn normalize_url(raw: &str) -> Result<String, ReachError> {
    let mut parsed = Url::parse(raw).map_err(|_| ReachError::InvalidTarget(raw.to_string()))?;
    parsed.set_query(None);
    parsed.set_fragment(None);
    let mut text = parsed.to_string();
    while text.ends_with('/') && parsed.path() != "/" {
        text.pop();
    }
    if parsed.path() == "/" && text.ends_with('/') {
        text.pop();
    }
    Ok(text)
}

static DEFAULT_PROFILE_PATTERN: &str = r"^https://www\.facebook\.com/[A-Za-z0-9._-]+$";

fn default_pattern() -> String {
    DEFAULT_PROFILE_PATTERN.to_string()
}

fn default_excluded() -> Vec<String> {
    ["/feed/", "/discover/", "/groups/", "/search/"]
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Serializable source for a [`TargetFilter`].
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Shape a profile-page URL must match.
    pub profile_pattern: String,
    /// Path fragments that mark feed/discovery/search/group-index links.
    pub excluded_segments: Vec<String>,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            profile_pattern: default_pattern(),
            excluded_segments: default_excluded(),
        }
    }
}

/// Accepts URLs that look like a profile page and rejects index-style links.
#[derive(Clone, Debug)]
pub struct TargetFilter {
    pattern: Regex,
    excluded: Vec<String>,
}

static DEFAULT_PROFILE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(DEFAULT_PROFILE_PATTERN).expect("built-in profile pattern is valid")
});

impl TargetFilter {
    pub fn new(pattern: &str, excluded: Vec<String>) -> Result<Self, ReachError> {
        let pattern = Regex::new(pattern)
            .map_err(|err| ReachError::new(format!("invalid profile pattern: {err}")))?;
        Ok(Self { pattern, excluded })
    }

    pub fn from_config(config: &FilterConfig) -> Result<Self, ReachError> {
        Self::new(&config.profile_pattern, config.excluded_segments.clone())
    }

    pub fn accepts(&self, url: &str) -> bool {
        if self.excluded.iter().any(|segment| url.contains(segment)) {
            return false;
        }
        self.pattern.is_match(url)
    }
}

impl Default for TargetFilter {
    fn default() -> Self {
        Self {
            pattern: DEFAULT_PROFILE_REGEX.clone(),
            excluded: default_excluded(),
        }
    }
}
