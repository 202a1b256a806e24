//! Best-effort session and stats persistence.
//!
//! Nothing here fails: storage and serialization errors are logged as
//! warnings and reads degrade to "no saved state".

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::session::StudySession;
use crate::stats::StudyStats;
use crate::store::KeyValueStore;

/// Key of the in-progress session.
pub const SESSION_KEY: &str = "studyMode_session";
/// Key of the historical stats.
pub const STATS_KEY: &str = "studyMode_stats";

/// JSON persistence of study state over a [`KeyValueStore`].
#[derive(Debug)]
pub struct StudyRepository<S> {
    store: S,
}

impl<S: KeyValueStore> StudyRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn save_session(&self, session: &StudySession) {
        self.save(SESSION_KEY, session);
    }

    pub fn load_session(&self) -> Option<StudySession> {
        self.load(SESSION_KEY)
    }

    pub fn clear_session(&self) {
        if let Err(e) = self.store.remove(SESSION_KEY) {
            tracing::warn!("failed to clear saved session: {e}");
        }
    }

    pub fn save_stats(&self, stats: &StudyStats) {
        self.save(STATS_KEY, stats);
    }

    pub fn load_stats(&self) -> Option<StudyStats> {
        self.load(STATS_KEY)
    }

    fn save<T: Serialize>(&self, key: &str, value: &T) {
        let json = match serde_json::to_string(value) {
            Ok(json) => json,
            Err(e) => {
                tracing::warn!("failed to serialize {key}: {e}");
                return;
            }
        };
        if let Err(e) = self.store.set(key, &json) {
            tracing::warn!("failed to save {key}: {e}");
        }
    }

    fn load<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.store.get(key) {
            Ok(raw) => raw?,
            Err(e) => {
                tracing::warn!("failed to load {key}: {e}");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!("discarding malformed {key}: {e}");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SplitMix64;
    use crate::session::StudyType;
    use crate::stats::SessionSummary;
    use crate::store::MemoryStore;
    use dentition_core::catalog::catalog;

    #[test]
    fn session_roundtrip_preserves_progress_and_order() {
        let repo = StudyRepository::new(MemoryStore::new());
        let mut session =
            StudySession::start(catalog(), StudyType::Notation, &mut SplitMix64::new(5));
        session.mark_correct();
        session.next_card();
        session.mark_incorrect();
        session.next_card();

        repo.save_session(&session);
        let loaded = repo.load_session().unwrap();
        assert_eq!(loaded.current_index, 2);
        assert_eq!(loaded.correct_answers, 1);
        assert_eq!(loaded.total_answered, 2);
        assert_eq!(loaded.shuffled_teeth, session.shuffled_teeth);
        assert_eq!(loaded, session);
    }

    #[test]
    fn stats_roundtrip() {
        let repo = StudyRepository::new(MemoryStore::new());
        let mut stats = StudyStats::default();
        stats.record(SessionSummary {
            id: "1".into(),
            correct_answers: 3,
            total_questions: 4,
            study_type: StudyType::Mixed,
        });
        repo.save_stats(&stats);
        assert_eq!(repo.load_stats(), Some(stats));
    }

    #[test]
    fn missing_state_loads_as_none() {
        let repo = StudyRepository::new(MemoryStore::new());
        assert!(repo.load_session().is_none());
        assert!(repo.load_stats().is_none());
    }

    #[test]
    fn malformed_json_is_discarded() {
        let store = MemoryStore::new();
        store.set(SESSION_KEY, "{not json").unwrap();
        store.set(STATS_KEY, "42").unwrap();
        let repo = StudyRepository::new(store);
        assert!(repo.load_session().is_none());
        assert!(repo.load_stats().is_none());
    }

    #[test]
    fn unavailable_store_degrades_silently() {
        let repo = StudyRepository::new(MemoryStore::unavailable());
        let session = StudySession::start(catalog(), StudyType::Eruption, &mut SplitMix64::new(1));
        repo.save_session(&session);
        repo.save_stats(&StudyStats::default());
        repo.clear_session();
        assert!(repo.load_session().is_none());
        assert!(repo.load_stats().is_none());
    }

    #[test]
    fn clear_session_removes_only_the_session() {
        let repo = StudyRepository::new(MemoryStore::new());
        let session = StudySession::start(catalog(), StudyType::Eruption, &mut SplitMix64::new(1));
        repo.save_session(&session);
        repo.save_stats(&StudyStats::default());
        repo.clear_session();
        assert!(repo.load_session().is_none());
        assert!(repo.load_stats().is_some());
    }
}
