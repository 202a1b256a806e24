//! Historical study statistics.

use serde::{Deserialize, Serialize};

use crate::session::StudyType;

/// How many past sessions are kept.
pub const HISTORY_LIMIT: usize = 10;

/// Summary of a finished session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    pub id: String,
    pub correct_answers: u32,
    pub total_questions: u32,
    pub study_type: StudyType,
}

impl SessionSummary {
    /// Percentage correct, 0 for a session with no answers.
    pub fn accuracy(&self) -> f64 {
        percentage(self.correct_answers, self.total_questions)
    }
}

/// Best score and recent history, most recent first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyStats {
    /// Best session accuracy seen, as a percentage.
    #[serde(default)]
    pub best_score: f64,
    #[serde(default)]
    pub study_history: Vec<SessionSummary>,
}

impl StudyStats {
    /// Record a finished session: prepend it, cap the history, raise the
    /// best score if beaten.
    pub fn record(&mut self, summary: SessionSummary) {
        let accuracy = summary.accuracy();
        if accuracy > self.best_score {
            self.best_score = accuracy;
        }
        self.study_history.insert(0, summary);
        self.study_history.truncate(HISTORY_LIMIT);
    }

    /// Questions answered across the kept history.
    pub fn total_questions(&self) -> u32 {
        self.study_history.iter().map(|s| s.total_questions).sum()
    }

    pub fn sessions(&self) -> usize {
        self.study_history.len()
    }
}

pub(crate) fn percentage(part: u32, whole: u32) -> f64 {
    if whole == 0 {
        0.0
    } else {
        f64::from(part) / f64::from(whole) * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(id: u32, correct: u32, total: u32) -> SessionSummary {
        SessionSummary {
            id: id.to_string(),
            correct_answers: correct,
            total_questions: total,
            study_type: StudyType::Eruption,
        }
    }

    #[test]
    fn history_is_capped_most_recent_first() {
        let mut stats = StudyStats::default();
        for i in 0..15 {
            stats.record(summary(i, 1, 2));
        }
        assert_eq!(stats.sessions(), HISTORY_LIMIT);
        assert_eq!(stats.study_history[0].id, "14");
        assert_eq!(stats.study_history[9].id, "5");
        assert_eq!(stats.total_questions(), 20);
    }

    #[test]
    fn best_score_only_rises() {
        let mut stats = StudyStats::default();
        stats.record(summary(1, 3, 4));
        assert_eq!(stats.best_score, 75.0);
        stats.record(summary(2, 1, 4));
        assert_eq!(stats.best_score, 75.0);
        stats.record(summary(3, 4, 4));
        assert_eq!(stats.best_score, 100.0);
    }

    #[test]
    fn empty_session_scores_zero() {
        assert_eq!(summary(1, 0, 0).accuracy(), 0.0);
    }

    #[test]
    fn stats_json_uses_camel_case() {
        let mut stats = StudyStats::default();
        stats.record(summary(1, 2, 4));
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["bestScore"], 50.0);
        assert_eq!(json["studyHistory"][0]["totalQuestions"], 4);
        assert_eq!(json["studyHistory"][0]["studyType"], "eruption");
    }
}
