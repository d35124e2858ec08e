//! Maps a raw client identifier to the label shown in the admin view.

use std::collections::{BTreeMap, HashMap};

use crate::config::default_section_labels;

const LINK_PREFIX: &str = "link_";

/// Read-only table of known section ids and their display labels
#[derive(Debug, Clone)]
pub struct SectionLabels {
    labels: HashMap<String, String>,
}

impl Default for SectionLabels {
    fn default() -> Self {
        Self::new(default_section_labels())
    }
}

impl SectionLabels {
    pub fn new(labels: BTreeMap<String, String>) -> Self {
        Self {
            labels: labels.into_iter().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Resolve the `section` label for a tracked `path`
    ///
    /// Known ids win, then `link_<url>` click targets, then the path itself.
    pub fn classify(&self, path: &str) -> String {
        if let Some(label) = self.labels.get(path) {
            return label.clone();
        }

        match path.strip_prefix(LINK_PREFIX) {
            Some(url) => classify_link(url),
            None => path.to_string(),
        }
    }
}

fn classify_link(url: &str) -> String {
    if url.contains("Certificate") {
        let title = url.rsplit('/').next().filter(|s| !s.is_empty());
        format!("Clicked: Certificate -> {}", title.unwrap_or("Unknown"))
    } else if url.contains("github") {
        "Clicked: GitHub Project".to_string()
    } else if url.contains("demo") || url.contains("vercel") {
        "Clicked: Project Demo".to_string()
    } else {
        format!("Clicked: {}", url)
    }
}
