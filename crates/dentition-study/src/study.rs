//! The study-mode controller.
//!
//! Owns the live session and stats, restores them from storage when opened,
//! and writes every change back. An active session is saved after each
//! action; finishing a session records it in the stats and removes the saved
//! session.

use dentition_core::model::ToothRecord;

use crate::repository::StudyRepository;
use crate::rng::RandomSource;
use crate::session::{Advance, Flashcard, StudySession, StudyType};
use crate::stats::{SessionSummary, StudyStats};
use crate::store::KeyValueStore;

/// Result of [`StudyMode::next_card`].
#[derive(Debug, Clone, PartialEq)]
pub enum NextOutcome {
    Moved,
    /// The deck was exhausted and the session was recorded.
    Completed(SessionSummary),
}

pub struct StudyMode<'a, S: KeyValueStore> {
    records: &'a [ToothRecord],
    repo: StudyRepository<S>,
    rng: Box<dyn RandomSource>,
    session: StudySession,
    stats: StudyStats,
}

impl<'a, S: KeyValueStore> StudyMode<'a, S> {
    /// Restore saved state, or start a new session of `default_type`.
    ///
    /// A saved session whose cards no longer resolve against `records` is
    /// discarded.
    pub fn open(
        records: &'a [ToothRecord],
        store: S,
        default_type: StudyType,
        mut rng: Box<dyn RandomSource>,
    ) -> Self {
        let repo = StudyRepository::new(store);
        let stats = repo.load_stats().unwrap_or_default();

        let saved = repo.load_session().filter(|s| {
            let ok = s.is_consistent_with(records);
            if !ok {
                tracing::warn!("saved session does not match the catalog, starting fresh");
            }
            ok
        });

        let session = match saved {
            Some(session) => {
                tracing::debug!(index = session.current_index, "restored study session");
                session
            }
            None => {
                let session = StudySession::start(records, default_type, rng.as_mut());
                repo.save_session(&session);
                session
            }
        };

        Self {
            records,
            repo,
            rng,
            session,
            stats,
        }
    }

    pub fn session(&self) -> &StudySession {
        &self.session
    }

    pub fn stats(&self) -> &StudyStats {
        &self.stats
    }

    pub fn repository(&self) -> &StudyRepository<S> {
        &self.repo
    }

    pub fn current_tooth(&self) -> Option<&'a ToothRecord> {
        self.session.current_tooth(self.records)
    }

    pub fn current_card(&self) -> Option<Flashcard> {
        self.current_tooth()
            .map(|t| Flashcard::new(t, self.session.study_type))
    }

    /// Replace the current session with a freshly shuffled one, keeping the
    /// study type.
    pub fn start_new_session(&mut self) {
        let study_type = self.session.study_type;
        self.session = StudySession::start(self.records, study_type, self.rng.as_mut());
        self.repo.save_session(&self.session);
        tracing::debug!(%study_type, cards = self.session.len(), "started study session");
    }

    pub fn mark_correct(&mut self) -> bool {
        let changed = self.session.mark_correct();
        if changed {
            self.persist();
        }
        changed
    }

    pub fn mark_incorrect(&mut self) -> bool {
        let changed = self.session.mark_incorrect();
        if changed {
            self.persist();
        }
        changed
    }

    pub fn skip(&mut self) {
        self.session.skip();
        self.persist();
    }

    /// Advance, ending the session after the last card.
    pub fn next_card(&mut self) -> NextOutcome {
        match self.session.next_card() {
            Advance::Moved => {
                self.persist();
                NextOutcome::Moved
            }
            Advance::Finished => NextOutcome::Completed(self.end_session()),
        }
    }

    pub fn previous_card(&mut self) -> bool {
        let moved = self.session.previous_card();
        if moved {
            self.persist();
        }
        moved
    }

    pub fn set_study_type(&mut self, study_type: StudyType) {
        self.session.set_study_type(study_type);
        self.persist();
    }

    /// Record the session in the stats, save them, and drop the saved session.
    pub fn end_session(&mut self) -> SessionSummary {
        let id = chrono::Utc::now().timestamp_millis().to_string();
        let summary = self.session.finish(id);
        self.stats.record(summary.clone());
        self.repo.save_stats(&self.stats);
        self.repo.clear_session();
        tracing::info!(
            correct = summary.correct_answers,
            total = summary.total_questions,
            "study session complete"
        );
        summary
    }

    /// Save the session if it is still active.
    fn persist(&self) {
        if self.session.is_session_active {
            self.repo.save_session(&self.session);
        }
    }
}
