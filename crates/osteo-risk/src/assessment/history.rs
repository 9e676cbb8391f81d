use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{Classification, RiskAnalysis, RiskLevel};

/// Number of past evaluations kept when nothing else is configured.
pub const DEFAULT_HISTORY_LIMIT: usize = 10;

/// Stored summary of one evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub assessed_at: DateTime<Utc>,
    pub score: u8,
    pub risk_level: RiskLevel,
    pub classification: Classification,
}

impl HistoryEntry {
    pub fn from_analysis(analysis: &RiskAnalysis, assessed_at: DateTime<Utc>) -> Self {
        Self {
            assessed_at,
            score: analysis.score,
            risk_level: analysis.risk_level,
            classification: analysis.classification,
        }
    }

    pub fn headline(&self) -> String {
        format!(
            "{} - Score: {}/100 - {}",
            self.assessed_at.format("%Y-%m-%d"),
            self.score,
            self.classification.label()
        )
    }
}

/// Bounded, newest-first log of evaluations.
#[derive(Debug, Clone)]
pub struct HistoryLog {
    entries: VecDeque<HistoryEntry>,
    capacity: usize,
}

impl HistoryLog {
    /// A zero capacity is raised to one.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn push(&mut self, entry: HistoryEntry) {
        self.entries.push_front(entry);
        self.entries.truncate(self.capacity);
    }

    pub fn recent(&self, limit: usize) -> Vec<HistoryEntry> {
        self.entries.iter().take(limit).cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for HistoryLog {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_LIMIT)
    }
}

/// Storage abstraction so the service can be exercised in isolation.
pub trait HistoryRepository: Send + Sync {
    fn record(&self, entry: HistoryEntry) -> Result<(), RepositoryError>;
    fn recent(&self, limit: usize) -> Result<Vec<HistoryEntry>, RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("history store unavailable: {0}")]
    Unavailable(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn entry(day: u32, score: u8) -> HistoryEntry {
        HistoryEntry {
            assessed_at: Utc
                .with_ymd_and_hms(2025, 3, day, 9, 0, 0)
                .single()
                .expect("valid timestamp"),
            score,
            risk_level: RiskLevel::from_score(score),
            classification: Classification::from_score(score),
        }
    }

    #[test]
    fn keeps_newest_entries_first() {
        let mut log = HistoryLog::with_capacity(3);
        log.push(entry(1, 90));
        log.push(entry(2, 60));

        let recent = log.recent(10);
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].score, 60);
        assert_eq!(recent[1].score, 90);
    }

    #[test]
    fn drops_oldest_entry_beyond_capacity() {
        let mut log = HistoryLog::default();
        for day in 1..=12 {
            log.push(entry(day, day as u8 * 5));
        }

        assert_eq!(log.len(), DEFAULT_HISTORY_LIMIT);
        let recent = log.recent(DEFAULT_HISTORY_LIMIT);
        assert_eq!(recent.first().map(|e| e.score), Some(60));
        assert_eq!(recent.last().map(|e| e.score), Some(15));
    }

    #[test]
    fn zero_capacity_still_keeps_latest() {
        let mut log = HistoryLog::with_capacity(0);
        log.push(entry(1, 10));
        log.push(entry(2, 20));
        assert_eq!(log.capacity(), 1);
        assert_eq!(log.recent(5)[0].score, 20);
    }

    #[test]
    fn headline_mentions_date_score_and_band() {
        let headline = entry(4, 55).headline();
        assert_eq!(headline, "2025-03-04 - Score: 55/100 - OSTEOPENIA");
    }
}
