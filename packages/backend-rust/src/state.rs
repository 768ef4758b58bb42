use std::sync::Arc;
use std::time::{Instant, SystemTime};

use kelelahan_fuzzy::{FuzzyEngine, FuzzyError};

use crate::config::Config;
use crate::services::history::HistoryStore;

#[derive(Clone)]
pub struct AppState {
    started_at: Instant,
    started_at_system: SystemTime,
    engine: Arc<FuzzyEngine>,
    history: Arc<HistoryStore>,
}

impl AppState {
    pub fn new(engine: Arc<FuzzyEngine>, history: Arc<HistoryStore>) -> Self {
        Self {
            started_at: Instant::now(),
            started_at_system: SystemTime::now(),
            engine,
            history,
        }
    }

    /// Builds the fixed fuzzy model once; every request shares it read-only.
    pub fn from_config(config: &Config) -> Result<Self, FuzzyError> {
        let engine = Arc::new(FuzzyEngine::standard()?);
        let history = Arc::new(HistoryStore::new(config.history_limit, config.max_sessions));
        Ok(Self::new(engine, history))
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }

    pub fn started_at_system(&self) -> SystemTime {
        self.started_at_system
    }

    pub fn engine(&self) -> Arc<FuzzyEngine> {
        Arc::clone(&self.engine)
    }

    pub fn history(&self) -> Arc<HistoryStore> {
        Arc::clone(&self.history)
    }
}
