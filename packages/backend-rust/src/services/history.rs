use std::collections::{HashMap, VecDeque};

use chrono::{SecondsFormat, Utc};
use kelelahan_fuzzy::{Category, FatigueInputs, InferenceResult};
use parking_lot::RwLock;
use serde::Serialize;

const MAX_SESSION_ID_LEN: usize = 64;

#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    #[error("session not found: {0}")]
    SessionNotFound(String),
    #[error("invalid session id: {0}")]
    InvalidSessionId(String),
}

/// One evaluation as shown in the history table and chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    /// 1-based, keeps counting after old rows are dropped
    pub test_number: usize,
    /// Chart axis label, "Tes N"
    pub test_label: String,
    #[serde(flatten)]
    pub inputs: FatigueInputs,
    /// Rounded to two decimals
    pub score: f64,
    /// Category text, e.g. "Lelah Sedang"
    pub label: &'static str,
    pub category: Category,
    pub inconclusive: bool,
    pub recorded_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistorySummary {
    pub count: usize,
    pub average_score: f64,
    pub max_score: f64,
    pub latest_label: &'static str,
}

#[derive(Debug, Default)]
struct SessionHistory {
    entries: VecDeque<HistoryEntry>,
    next_number: usize,
    /// Value of the store's append counter at the last append
    last_updated: u64,
}

#[derive(Debug, Default)]
struct Sessions {
    map: HashMap<String, SessionHistory>,
    append_counter: u64,
}

impl Sessions {
    /// Drops least-recently-updated sessions until one more fits under `max_sessions`.
    fn evict_for_insert(&mut self, max_sessions: usize) -> usize {
        let mut evicted = 0;
        while self.map.len() >= max_sessions {
            let oldest = self
                .map
                .iter()
                .min_by_key(|(_, session)| session.last_updated)
                .map(|(id, _)| id.clone());
            match oldest {
                Some(id) => {
                    self.map.remove(&id);
                    evicted += 1;
                }
                None => break,
            }
        }
        evicted
    }
}

/// Append-only per-session evaluation history.
///
/// Rows are capped per session and sessions are capped per store; a new
/// session past the cap evicts the one appended to least recently.
pub struct HistoryStore {
    sessions: RwLock<Sessions>,
    max_entries: usize,
    max_sessions: usize,
}

impl HistoryStore {
    pub fn new(max_entries: usize, max_sessions: usize) -> Self {
        Self {
            sessions: RwLock::new(Sessions::default()),
            max_entries: max_entries.max(1),
            max_sessions: max_sessions.max(1),
        }
    }

    pub fn append(
        &self,
        session_id: &str,
        inputs: FatigueInputs,
        result: &InferenceResult,
    ) -> Result<HistoryEntry, HistoryError> {
        validate_session_id(session_id)?;

        let mut sessions = self.sessions.write();
        if !sessions.map.contains_key(session_id) {
            let evicted = sessions.evict_for_insert(self.max_sessions);
            if evicted > 0 {
                tracing::debug!(
                    evicted,
                    max_sessions = self.max_sessions,
                    "evicted least-recently-updated fatigue sessions"
                );
            }
        }
        sessions.append_counter += 1;
        let counter = sessions.append_counter;

        let session = sessions.map.entry(session_id.to_string()).or_default();
        session.next_number += 1;
        session.last_updated = counter;

        let entry = HistoryEntry {
            test_number: session.next_number,
            test_label: format!("Tes {}", session.next_number),
            inputs,
            score: round_score(result.score),
            label: result.category.label(),
            category: result.category,
            inconclusive: result.inconclusive,
            recorded_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        };

        session.entries.push_back(entry.clone());
        while session.entries.len() > self.max_entries {
            session.entries.pop_front();
        }

        Ok(entry)
    }

    pub fn entries(&self, session_id: &str) -> Result<Vec<HistoryEntry>, HistoryError> {
        validate_session_id(session_id)?;
        let sessions = self.sessions.read();
        sessions
            .map
            .get(session_id)
            .map(|session| session.entries.iter().cloned().collect())
            .ok_or_else(|| HistoryError::SessionNotFound(session_id.to_string()))
    }

    /// Drops a session; returns how many rows it held.
    pub fn clear(&self, session_id: &str) -> Result<usize, HistoryError> {
        validate_session_id(session_id)?;
        self.sessions
            .write()
            .map
            .remove(session_id)
            .map(|session| session.entries.len())
            .ok_or_else(|| HistoryError::SessionNotFound(session_id.to_string()))
    }

    pub fn session_count(&self) -> usize {
        self.sessions.read().map.len()
    }

    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    pub fn max_sessions(&self) -> usize {
        self.max_sessions
    }
}

pub fn summarize(entries: &[HistoryEntry]) -> Option<HistorySummary> {
    let latest = entries.last()?;
    let total: f64 = entries.iter().map(|e| e.score).sum();
    let max_score = entries.iter().map(|e| e.score).fold(f64::MIN, f64::max);
    Some(HistorySummary {
        count: entries.len(),
        average_score: round_score(total / entries.len() as f64),
        max_score,
        latest_label: latest.label,
    })
}

pub fn round_score(score: f64) -> f64 {
    (score * 100.0).round() / 100.0
}

pub fn validate_session_id(session_id: &str) -> Result<(), HistoryError> {
    let valid = !session_id.is_empty()
        && session_id.len() <= MAX_SESSION_ID_LEN
        && session_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(HistoryError::InvalidSessionId(session_id.to_string()))
    }
}
