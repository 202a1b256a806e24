//! Chronological dental development timeline.
//!
//! Records are turned into eruption events, grouped into steps by age and
//! preceded by a birth step. For any step the set of visible teeth is
//! recomputed from scratch: erupting teeth are appended in order, and a
//! permanent incisor, canine or premolar first removes the primary tooth it
//! replaces. Permanent molars have no predecessor and are purely additive.

use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;

use crate::model::{ToothRecord, ToothType};

/// Age display of the birth step.
pub const BIRTH_DISPLAY: &str = "Birth";
/// Description of the birth step.
pub const BIRTH_DESCRIPTION: &str = "No teeth present yet";

/// What happens to a tooth at an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Eruption,
    Shedding,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventKind::Eruption => write!(f, "eruption"),
            EventKind::Shedding => write!(f, "shedding"),
        }
    }
}

/// A single eruption or shedding of one tooth.
#[derive(Debug, Clone, Serialize)]
pub struct TimelineEvent<'a> {
    pub kind: EventKind,
    pub tooth: &'a ToothRecord,
    pub age_months: u32,
    pub age_display: String,
    pub description: String,
}

/// All events sharing one age.
#[derive(Debug, Clone, Serialize)]
pub struct TimelineStep<'a> {
    pub age_months: u32,
    pub age_display: String,
    pub events: Vec<TimelineEvent<'a>>,
    pub description: String,
}

impl<'a> TimelineStep<'a> {
    fn birth() -> Self {
        Self {
            age_months: 0,
            age_display: BIRTH_DISPLAY.to_string(),
            events: Vec::new(),
            description: BIRTH_DESCRIPTION.to_string(),
        }
    }

    fn from_group(events: Vec<TimelineEvent<'a>>) -> Self {
        let description = match events.as_slice() {
            [single] => single.description.clone(),
            _ => format!("{} teeth events occur", events.len()),
        };
        Self {
            age_months: events[0].age_months,
            age_display: events[0].age_display.clone(),
            events,
            description,
        }
    }

    /// Eruption events of this step, in order.
    pub fn eruptions(&self) -> impl Iterator<Item = &TimelineEvent<'a>> {
        self.events
            .iter()
            .filter(|e| e.kind == EventKind::Eruption)
    }
}

/// Emit one eruption event per record, plus shedding events when asked.
pub fn extract_events(records: &[ToothRecord], include_shedding: bool) -> Vec<TimelineEvent<'_>> {
    let mut events: Vec<TimelineEvent<'_>> = records
        .iter()
        .map(|tooth| TimelineEvent {
            kind: EventKind::Eruption,
            tooth,
            age_months: tooth.eruption.age_months,
            age_display: tooth.eruption.age_range.clone(),
            description: format!("{} erupts", tooth.display_name()),
        })
        .collect();

    if include_shedding {
        events.extend(records.iter().filter_map(|tooth| {
            let shedding = tooth.shedding.as_ref()?;
            Some(TimelineEvent {
                kind: EventKind::Shedding,
                tooth,
                age_months: shedding.age_months,
                age_display: shedding.age_range.clone(),
                description: format!("{} sheds", tooth.display_name()),
            })
        }));
    }

    events
}

/// Sort events by age and group equal ages into steps after the birth step.
///
/// The sort is stable, so simultaneous events keep their input order.
pub fn group_steps(mut events: Vec<TimelineEvent<'_>>) -> Vec<TimelineStep<'_>> {
    events.sort_by_key(|e| e.age_months);

    let mut steps = vec![TimelineStep::birth()];
    let mut group: Vec<TimelineEvent<'_>> = Vec::new();

    for event in events {
        if group.first().is_some_and(|g| g.age_months != event.age_months) {
            steps.push(TimelineStep::from_group(std::mem::take(&mut group)));
        }
        group.push(event);
    }
    if !group.is_empty() {
        steps.push(TimelineStep::from_group(group));
    }

    steps
}

/// FDI code of the primary tooth a permanent tooth replaces.
///
/// Quadrant `q` maps to primary quadrant `q + 4`; only positions 1–5 have a
/// predecessor. Primary teeth and malformed codes yield `None`.
pub fn predecessor_fdi(tooth: &ToothRecord) -> Option<String> {
    if tooth.tooth_type != ToothType::Permanent {
        return None;
    }
    let (quadrant, pos) = tooth.notation.fdi_digits()?;
    if !(1..=5).contains(&pos) {
        return None;
    }
    Some(format!("{}{}", quadrant + 4, pos))
}

/// Teeth present after applying steps `1..=index`.
pub fn visible_at<'a>(steps: &[TimelineStep<'a>], index: usize) -> Vec<&'a ToothRecord> {
    let mut visible: Vec<&'a ToothRecord> = Vec::new();

    for step in steps.iter().take(index + 1).skip(1) {
        for event in step.eruptions() {
            if let Some(pred) = predecessor_fdi(event.tooth) {
                if let Some(idx) = visible
                    .iter()
                    .position(|t| t.is_primary() && t.notation.fdi == pred)
                {
                    visible.remove(idx);
                }
            }
            visible.push(event.tooth);
        }
    }

    visible
}

/// The steppable timeline over a record set.
#[derive(Debug, Clone)]
pub struct Timeline<'a> {
    steps: Vec<TimelineStep<'a>>,
}

impl<'a> Timeline<'a> {
    /// Eruption-only timeline.
    pub fn new(records: &'a [ToothRecord]) -> Self {
        Self::from_events(extract_events(records, false))
    }

    /// Timeline that also lists shedding events. Shedding never changes the
    /// visible set.
    pub fn with_shedding(records: &'a [ToothRecord]) -> Self {
        Self::from_events(extract_events(records, true))
    }

    pub fn from_events(events: Vec<TimelineEvent<'a>>) -> Self {
        let steps = group_steps(events);
        tracing::debug!(steps = steps.len(), "built timeline");
        Self { steps }
    }

    pub fn steps(&self) -> &[TimelineStep<'a>] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Always false: the birth step is present even for an empty catalog.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn last_index(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }

    /// Clamp an index into `[0, last_index]`.
    pub fn clamp(&self, index: usize) -> usize {
        index.min(self.last_index())
    }

    pub fn step(&self, index: usize) -> &TimelineStep<'a> {
        &self.steps[self.clamp(index)]
    }

    pub fn visible_teeth(&self, index: usize) -> Vec<&'a ToothRecord> {
        visible_at(&self.steps, self.clamp(index))
    }

    /// Ids of teeth erupting in exactly this step.
    pub fn recently_erupted(&self, index: usize) -> BTreeSet<&'a str> {
        self.step(index)
            .eruptions()
            .map(|e| e.tooth.id.as_str())
            .collect()
    }

    pub fn is_complete(&self, index: usize) -> bool {
        self.clamp(index) == self.last_index()
    }

    /// Fraction of the timeline walked, in `[0, 1]`.
    pub fn progress(&self, index: usize) -> f64 {
        let last = self.last_index();
        if last == 0 {
            return 0.0;
        }
        self.clamp(index) as f64 / last as f64
    }

    pub fn age_display(&self, index: usize) -> &str {
        &self.step(index).age_display
    }

    /// Whether both primary and permanent teeth are visible at this step.
    pub fn is_mixed_dentition(&self, index: usize) -> bool {
        let visible = self.visible_teeth(index);
        visible.iter().any(|t| t.is_primary()) && visible.iter().any(|t| t.is_permanent())
    }

    /// One-line status for the step, as shown under the age heading.
    pub fn status_description(&self, index: usize) -> String {
        if self.is_complete(index) {
            return "Development Complete! All teeth have erupted.".to_string();
        }

        let eruptions: Vec<_> = self.step(index).eruptions().collect();
        let mut description = match eruptions.as_slice() {
            [] => return "No new eruptions at this stage".to_string(),
            [single] => single.description.clone(),
            many => format!("{} teeth erupt", many.len()),
        };

        if self.is_mixed_dentition(index) {
            description.push_str(" (Mixed Dentition Stage)");
        }
        description
    }
}
