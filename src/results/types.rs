use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Persisted (score, timestamp) pair for one quiz unit.
/// Overwritten on resubmission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub score: u32,
    pub total: u32,
    pub recorded_at: DateTime<Utc>,
}

impl ScoreRecord {
    pub fn percent(&self) -> u8 {
        if self.total > 0 {
            (self.score as f64 * 100.0 / self.total as f64).round() as u8
        } else {
            0
        }
    }
}

/// Local gradebook state: one score record per unit, plus the saved theme
/// preference. All the scalars the original kept in its key-value cache.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreBook {
    pub version: u32,
    #[serde(default)]
    pub records: HashMap<String, ScoreRecord>,
    /// Saved theme preference ("dark" / "light"); None means auto-detect
    #[serde(default)]
    pub theme: Option<String>,
}

impl Default for ScoreBook {
    fn default() -> Self {
        Self::new()
    }
}

impl ScoreBook {
    pub fn new() -> Self {
        Self {
            version: 1,
            records: HashMap::new(),
            theme: None,
        }
    }

    /// Record a score for a unit, overwriting any previous record.
    /// The timestamp is taken at call time, so resubmissions move it forward.
    pub fn record(&mut self, unit: &str, score: u32, total: u32) {
        self.records.insert(
            unit.to_string(),
            ScoreRecord {
                score,
                total,
                recorded_at: Utc::now(),
            },
        );
    }

    pub fn get(&self, unit: &str) -> Option<&ScoreRecord> {
        self.records.get(unit)
    }

    /// Records sorted by unit identifier, for stable listing
    pub fn sorted_records(&self) -> Vec<(&String, &ScoreRecord)> {
        let mut entries: Vec<_> = self.records.iter().collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries
    }

    pub fn set_theme(&mut self, theme: &str) {
        self.theme = Some(theme.to_string());
    }
}
