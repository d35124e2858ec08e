use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{FolioError, Result};

/// Kind of client-reported interaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InteractionType {
    #[default]
    View,
    Click,
}

impl InteractionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::View => "view",
            Self::Click => "click",
        }
    }
}

impl std::fmt::Display for InteractionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for InteractionType {
    type Err = String;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "view" => Ok(Self::View),
            "click" => Ok(Self::Click),
            _ => Err(format!("Invalid interaction type: '{}'. Valid: view, click", s)),
        }
    }
}

/// Body accepted by the tracking endpoint and the passive gate
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackRequest {
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub interaction_type: Option<InteractionType>,
}

impl TrackRequest {
    pub fn new(path: impl Into<String>, interaction_type: InteractionType) -> Self {
        Self {
            path: Some(path.into()),
            interaction_type: Some(interaction_type),
        }
    }

    /// Parse a raw JSON body; an empty body means "nothing to track"
    pub fn from_json(body: &[u8]) -> Result<Self> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }
        serde_json::from_slice(body)
            .map_err(|e| FolioError::serialization(format!("Invalid tracking payload: {}", e)))
    }
}

/// What `InteractionTracker::process` decided
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackOutcome {
    /// A new record was written
    Recorded,
    /// Same address viewed the same path inside the dedup window
    AlreadyTracked,
    /// No `path` in the request
    Skipped,
}

/// Record handed to the store; immutable once written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewInteraction {
    pub timestamp: DateTime<Utc>,
    pub local_time: String,
    pub browser: String,
    pub os: String,
    pub device: String,
    pub ip: String,
    pub section: String,
    pub path: String,
    pub interaction_type: InteractionType,
}
