//! Interaction history for the biaslens client.
//!
//! A record is only created once both a generated response and its bias
//! evaluation exist for the same prompt. History is kept in memory,
//! most-recent-first, bounded by a configurable limit, with explicit
//! JSONL export.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::path::Path;
use uuid::Uuid;

/// Bias classification of a generated response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BiasLabel {
    /// The response agrees with the user's framing without critique.
    Biased,
    /// The response pushes back on or qualifies the user's framing.
    Unbiased,
    /// The evaluator's output matched neither label.
    Unknown,
}

impl BiasLabel {
    /// Parse an evaluator label case-insensitively.
    ///
    /// "unbiased" is checked before "biased" since the former contains
    /// the latter.
    pub fn parse(raw: &str) -> Self {
        let lower = raw.trim().to_ascii_lowercase();
        if lower.contains("unbiased") {
            Self::Unbiased
        } else if lower.contains("biased") {
            Self::Biased
        } else {
            Self::Unknown
        }
    }

    /// Lowercase label, used to key badge styling.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Biased => "biased",
            Self::Unbiased => "unbiased",
            Self::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for BiasLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Biased => write!(f, "BIASED"),
            Self::Unbiased => write!(f, "UNBIASED"),
            Self::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

/// A completed prompt/response/evaluation triple.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InteractionRecord {
    /// Unique record identifier (UUID).
    pub id: String,
    /// Prompt submitted for generation.
    pub prompt: String,
    /// Text returned by the generation endpoint.
    pub response: String,
    /// Evaluation returned by the evaluation endpoint.
    pub evaluation: BiasLabel,
    /// When the record was created.
    pub timestamp: DateTime<Utc>,
}

impl InteractionRecord {
    /// Create a record for a completed interaction.
    pub fn new(
        prompt: impl Into<String>,
        response: impl Into<String>,
        evaluation: BiasLabel,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            prompt: prompt.into(),
            response: response.into(),
            evaluation,
            timestamp: Utc::now(),
        }
    }
}

/// Bounded interaction history, most-recent-first.
#[derive(Debug, Clone)]
pub struct History {
    entries: VecDeque<InteractionRecord>,
    limit: usize,
}

impl History {
    /// Create an empty history holding at most `limit` records.
    pub fn new(limit: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            limit: limit.max(1),
        }
    }

    /// Prepend a record, dropping the oldest entry when full.
    pub fn record(&mut self, record: InteractionRecord) {
        self.entries.push_front(record);
        while self.entries.len() > self.limit {
            self.entries.pop_back();
        }
    }

    /// Iterate records, most recent first.
    pub fn iter(&self) -> impl Iterator<Item = &InteractionRecord> {
        self.entries.iter()
    }

    /// Number of records held.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the history is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remove all records.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Save history to a JSONL file, most recent first.
    pub fn save(&self, path: &Path) -> Result<(), HistoryError> {
        use std::io::Write;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(HistoryError::Io)?;
        }
        let mut file = std::fs::File::create(path).map_err(HistoryError::Io)?;

        for record in &self.entries {
            let json = serde_json::to_string(record).map_err(HistoryError::Serialize)?;
            writeln!(file, "{json}").map_err(HistoryError::Io)?;
        }

        Ok(())
    }

    /// Load history from a JSONL file written by [`History::save`].
    pub fn load(path: &Path, limit: usize) -> Result<Self, HistoryError> {
        let content = std::fs::read_to_string(path).map_err(HistoryError::Io)?;

        let mut history = Self::new(limit);
        for line in content.lines() {
            if line.trim().is_empty() {
                continue;
            }
            let record: InteractionRecord =
                serde_json::from_str(line).map_err(HistoryError::Parse)?;
            history.entries.push_back(record);
        }
        while history.entries.len() > history.limit {
            history.entries.pop_back();
        }

        Ok(history)
    }
}

/// Errors that can occur when persisting history.
#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("Serialization error: {0}")]
    Serialize(#[source] serde_json::Error),

    /// JSON parse error.
    #[error("Parse error: {0}")]
    Parse(#[source] serde_json::Error),
}
