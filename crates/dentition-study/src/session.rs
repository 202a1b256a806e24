//! Flashcard study sessions.
//!
//! A session walks a shuffled deck of tooth ids. Each card can be answered
//! once (correct, incorrect, or skipped) before moving on; moving past the
//! last card ends the session.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use dentition_core::catalog;
use dentition_core::error::CatalogError;
use dentition_core::model::{format_age, Position, ToothRecord, ToothType};

use crate::rng::{shuffle, RandomSource};
use crate::stats::{percentage, SessionSummary};

/// What the cards ask about.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StudyType {
    #[default]
    Eruption,
    Notation,
    Mixed,
}

impl fmt::Display for StudyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StudyType::Eruption => write!(f, "eruption"),
            StudyType::Notation => write!(f, "notation"),
            StudyType::Mixed => write!(f, "mixed"),
        }
    }
}

impl FromStr for StudyType {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "eruption" => Ok(StudyType::Eruption),
            "notation" => Ok(StudyType::Notation),
            "mixed" => Ok(StudyType::Mixed),
            other => Err(CatalogError::InvalidValue {
                field: "study type",
                value: other.to_string(),
            }),
        }
    }
}

/// Result of moving to the next card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    Moved,
    /// There was no next card; the session has ended.
    Finished,
}

/// In-progress session state, persisted between runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudySession {
    pub current_index: usize,
    pub show_answer: bool,
    pub study_type: StudyType,
    /// Record ids in card order.
    pub shuffled_teeth: Vec<String>,
    pub correct_answers: u32,
    pub total_answered: u32,
    pub is_session_active: bool,
}

impl StudySession {
    /// A fresh, active session over `records` in shuffled order.
    pub fn start(records: &[ToothRecord], study_type: StudyType, rng: &mut dyn RandomSource) -> Self {
        let mut deck: Vec<String> = records.iter().map(|t| t.id.clone()).collect();
        shuffle(&mut deck, rng);
        Self {
            current_index: 0,
            show_answer: false,
            study_type,
            shuffled_teeth: deck,
            correct_answers: 0,
            total_answered: 0,
            is_session_active: true,
        }
    }

    pub fn len(&self) -> usize {
        self.shuffled_teeth.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shuffled_teeth.is_empty()
    }

    pub fn current_id(&self) -> Option<&str> {
        self.shuffled_teeth.get(self.current_index).map(String::as_str)
    }

    /// The current card's record, resolved against `records`.
    pub fn current_tooth<'a>(&self, records: &'a [ToothRecord]) -> Option<&'a ToothRecord> {
        catalog::find_in(records, self.current_id()?).ok()
    }

    /// Whether every card id resolves and the index is in range.
    pub fn is_consistent_with(&self, records: &[ToothRecord]) -> bool {
        (self.is_empty() || self.current_index < self.len())
            && self
                .shuffled_teeth
                .iter()
                .all(|id| records.iter().any(|t| &t.id == id))
    }

    /// Position in the deck as a percentage, counting the current card.
    pub fn progress(&self) -> f64 {
        if self.is_empty() {
            return 0.0;
        }
        (self.current_index + 1) as f64 / self.len() as f64 * 100.0
    }

    /// Percentage of answered cards marked correct.
    pub fn accuracy(&self) -> f64 {
        percentage(self.correct_answers, self.total_answered)
    }

    /// Count a correct answer. Ignored once the answer is showing.
    pub fn mark_correct(&mut self) -> bool {
        if self.show_answer {
            return false;
        }
        self.correct_answers += 1;
        self.total_answered += 1;
        self.show_answer = true;
        true
    }

    /// Count an incorrect answer. Ignored once the answer is showing.
    pub fn mark_incorrect(&mut self) -> bool {
        if self.show_answer {
            return false;
        }
        self.total_answered += 1;
        self.show_answer = true;
        true
    }

    /// Count the card as answered without credit and reveal the answer.
    pub fn skip(&mut self) {
        self.total_answered += 1;
        self.show_answer = true;
    }

    /// Move to the next card, or report that the deck is exhausted.
    ///
    /// Exhausting the deck does not deactivate the session; see
    /// [`StudySession::finish`].
    pub fn next_card(&mut self) -> Advance {
        if self.current_index + 1 < self.len() {
            self.current_index += 1;
            self.show_answer = false;
            Advance::Moved
        } else {
            Advance::Finished
        }
    }

    /// Move back one card. A no-op on the first card.
    pub fn previous_card(&mut self) -> bool {
        if self.current_index == 0 {
            return false;
        }
        self.current_index -= 1;
        self.show_answer = false;
        true
    }

    pub fn set_study_type(&mut self, study_type: StudyType) {
        self.study_type = study_type;
    }

    /// Deactivate the session and summarize it under `id`.
    pub fn finish(&mut self, id: impl Into<String>) -> SessionSummary {
        self.is_session_active = false;
        SessionSummary {
            id: id.into(),
            correct_answers: self.correct_answers,
            total_questions: self.total_answered,
            study_type: self.study_type,
        }
    }
}

/// Question and answer text for one card.
#[derive(Debug, Clone, PartialEq)]
pub struct Flashcard {
    /// e.g. "Permanent · Upper right · First Molar".
    pub title: String,
    pub question: String,
    pub hint: Option<String>,
    /// Labelled answer lines, shown once the card is answered.
    pub answer: Vec<(String, String)>,
}

impl Flashcard {
    pub fn new(tooth: &ToothRecord, study_type: StudyType) -> Self {
        let dentition = match tooth.tooth_type {
            ToothType::Primary => "Primary",
            ToothType::Permanent => "Permanent",
        };
        let arch = match tooth.position {
            Position::Maxillary => "Upper",
            Position::Mandibular => "Lower",
        };
        let title = format!("{dentition} · {arch} {} · {}", tooth.side, tooth.name);

        let (question, hint) = match study_type {
            StudyType::Eruption => (
                "When does this tooth typically erupt?".to_string(),
                tooth
                    .shedding
                    .as_ref()
                    .map(|_| "Also, when does it typically shed?".to_string()),
            ),
            StudyType::Notation => (
                "What are the notation numbers for this tooth?".to_string(),
                Some("Universal, Palmer, and FDI systems".to_string()),
            ),
            StudyType::Mixed => (
                "What do you know about this tooth?".to_string(),
                Some("Eruption age, notation, and characteristics".to_string()),
            ),
        };

        let mut answer = Vec::new();
        if matches!(study_type, StudyType::Eruption | StudyType::Mixed) {
            let ages = [
                ("Eruption", Some(&tooth.eruption)),
                ("Shedding", tooth.shedding.as_ref()),
                ("Root completion", tooth.root_completion.as_ref()),
            ];
            for (label, span) in ages {
                if let Some(span) = span {
                    answer.push((
                        label.to_string(),
                        format!(
                            "{} (average: {})",
                            span.age_range,
                            format_age(span.age_months)
                        ),
                    ));
                }
            }
        }
        if matches!(study_type, StudyType::Notation | StudyType::Mixed) {
            answer.push(("Universal".to_string(), tooth.notation.universal.clone()));
            answer.push(("Palmer".to_string(), tooth.notation.palmer.clone()));
            answer.push(("FDI".to_string(), tooth.notation.fdi.clone()));
        }

        Self {
            title,
            question,
            hint,
            answer,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SplitMix64;
    use dentition_core::catalog::catalog;

    fn session() -> StudySession {
        StudySession::start(catalog(), StudyType::Eruption, &mut SplitMix64::new(1))
    }

    #[test]
    fn start_shuffles_the_whole_catalog() {
        let s = session();
        assert_eq!(s.len(), 52);
        assert!(s.is_session_active);
        assert!(s.is_consistent_with(catalog()));
        let in_order: Vec<String> = catalog().iter().map(|t| t.id.clone()).collect();
        assert_ne!(s.shuffled_teeth, in_order);

        let again = StudySession::start(catalog(), StudyType::Eruption, &mut SplitMix64::new(1));
        assert_eq!(s.shuffled_teeth, again.shuffled_teeth);
    }

    #[test]
    fn answers_count_once_per_card() {
        let mut s = session();
        assert!(s.mark_correct());
        assert!(!s.mark_correct());
        assert!(!s.mark_incorrect());
        assert_eq!((s.correct_answers, s.total_answered), (1, 1));

        assert_eq!(s.next_card(), Advance::Moved);
        assert!(!s.show_answer);
        assert!(s.mark_incorrect());
        assert_eq!((s.correct_answers, s.total_answered), (1, 2));
        assert_eq!(s.accuracy(), 50.0);
    }

    #[test]
    fn skip_always_counts() {
        let mut s = session();
        s.skip();
        s.skip();
        assert_eq!(s.total_answered, 2);
        assert_eq!(s.correct_answers, 0);
        assert!(s.show_answer);
    }

    #[test]
    fn navigation_bounds() {
        let mut s = session();
        assert!(!s.previous_card());
        assert_eq!(s.progress(), 1.0 / 52.0 * 100.0);
        for _ in 0..51 {
            assert_eq!(s.next_card(), Advance::Moved);
        }
        assert_eq!(s.current_index, 51);
        assert_eq!(s.progress(), 100.0);
        assert_eq!(s.next_card(), Advance::Finished);
        assert_eq!(s.current_index, 51);
        assert!(s.previous_card());
        assert_eq!(s.current_index, 50);
    }

    #[test]
    fn finish_summarizes_and_deactivates() {
        let mut s = session();
        s.mark_correct();
        s.next_card();
        s.skip();
        s.set_study_type(StudyType::Mixed);
        let summary = s.finish("123");
        assert!(!s.is_session_active);
        assert_eq!(summary.id, "123");
        assert_eq!(summary.correct_answers, 1);
        assert_eq!(summary.total_questions, 2);
        assert_eq!(summary.study_type, StudyType::Mixed);
    }

    #[test]
    fn current_tooth_resolves() {
        let s = session();
        let tooth = s.current_tooth(catalog()).unwrap();
        assert_eq!(Some(tooth.id.as_str()), s.current_id());
    }

    #[test]
    fn unknown_ids_are_inconsistent() {
        let mut s = session();
        s.shuffled_teeth[3] = "primary-99".into();
        assert!(!s.is_consistent_with(catalog()));

        let mut s = session();
        s.current_index = 52;
        assert!(!s.is_consistent_with(catalog()));
    }

    #[test]
    fn session_json_uses_camel_case() {
        let json = serde_json::to_value(session()).unwrap();
        assert_eq!(json["currentIndex"], 0);
        assert_eq!(json["isSessionActive"], true);
        assert_eq!(json["studyType"], "eruption");
        assert_eq!(json["shuffledTeeth"].as_array().unwrap().len(), 52);
    }

    #[test]
    fn flashcard_content_by_type() {
        let primary = catalog::find("51").unwrap();
        let card = Flashcard::new(primary, StudyType::Eruption);
        assert_eq!(card.title, "Primary · Upper right · Central Incisor");
        assert_eq!(card.hint.as_deref(), Some("Also, when does it typically shed?"));
        assert_eq!(card.answer[0].0, "Eruption");
        assert_eq!(card.answer[0].1, "8-12 months (average: 10 months)");
        assert_eq!(card.answer[1].0, "Shedding");

        let permanent = catalog::find("36").unwrap();
        let card = Flashcard::new(permanent, StudyType::Eruption);
        assert_eq!(card.hint, None);
        assert!(card.answer.iter().all(|(label, _)| label != "Shedding"));

        let card = Flashcard::new(permanent, StudyType::Notation);
        assert_eq!(
            card.answer,
            vec![
                ("Universal".to_string(), "19".to_string()),
                ("Palmer".to_string(), "LL6".to_string()),
                ("FDI".to_string(), "36".to_string()),
            ]
        );

        let card = Flashcard::new(permanent, StudyType::Mixed);
        assert_eq!(card.answer.len(), 5);
    }

    #[test]
    fn study_type_parse() {
        assert_eq!("Notation".parse::<StudyType>().unwrap(), StudyType::Notation);
        assert!("essay".parse::<StudyType>().is_err());
    }
}
