//! Step navigation over a [`Timeline`].
//!
//! `current_step` starts at the birth step and moves by single steps or
//! absolute jumps. Every accepted move takes the animation guard, which
//! releases by itself after a fixed delay; moves requested while the guard is
//! held are dropped, not queued.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use tokio::time::Instant;

use crate::error::CatalogError;
use crate::model::ToothRecord;
use crate::timeline::{Timeline, TimelineStep};

/// How long the guard is held after a move.
pub const DEFAULT_ANIMATION_DELAY: Duration = Duration::from_millis(500);

/// Re-entrance debounce for navigation.
///
/// The guard is a deadline rather than a flag cleared by a timer task, so it
/// needs no runtime and follows tokio's paused clock in tests.
#[derive(Debug, Clone)]
pub struct AnimationGuard {
    delay: Duration,
    held_until: Option<Instant>,
}

impl AnimationGuard {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            held_until: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn is_held(&self) -> bool {
        self.held_until.is_some_and(|until| Instant::now() < until)
    }

    /// Take the guard unless it is already held.
    fn try_acquire(&mut self) -> bool {
        if self.is_held() {
            return false;
        }
        self.held_until = Some(Instant::now() + self.delay);
        true
    }
}

impl Default for AnimationGuard {
    fn default() -> Self {
        Self::new(DEFAULT_ANIMATION_DELAY)
    }
}

/// A navigation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Forward,
    Backward,
    Reset,
    End,
    Goto(usize),
}

impl fmt::Display for Navigation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Navigation::Forward => write!(f, "forward"),
            Navigation::Backward => write!(f, "backward"),
            Navigation::Reset => write!(f, "reset"),
            Navigation::End => write!(f, "end"),
            Navigation::Goto(n) => write!(f, "goto {n}"),
        }
    }
}

impl FromStr for Navigation {
    type Err = CatalogError;

    /// Accepts the names above and the keyboard aliases of the timeline view.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_lowercase();
        match s.as_str() {
            "forward" | "next" | "right" | "space" | "f" => Ok(Navigation::Forward),
            "backward" | "back" | "prev" | "left" | "b" => Ok(Navigation::Backward),
            "reset" | "home" => Ok(Navigation::Reset),
            "end" => Ok(Navigation::End),
            other => other
                .strip_prefix("goto ")
                .or_else(|| other.strip_prefix("g"))
                .and_then(|n| n.trim().parse().ok())
                .map(Navigation::Goto)
                .ok_or_else(|| CatalogError::InvalidValue {
                    field: "navigation",
                    value: other.to_string(),
                }),
        }
    }
}

/// Owns a timeline and the position within it.
#[derive(Debug, Clone)]
pub struct TimelineNavigator<'a> {
    timeline: Timeline<'a>,
    current: usize,
    guard: AnimationGuard,
}

impl<'a> TimelineNavigator<'a> {
    pub fn new(timeline: Timeline<'a>) -> Self {
        Self::with_delay(timeline, DEFAULT_ANIMATION_DELAY)
    }

    pub fn with_delay(timeline: Timeline<'a>, delay: Duration) -> Self {
        Self {
            timeline,
            current: 0,
            guard: AnimationGuard::new(delay),
        }
    }

    /// Place the navigator at `index` (clamped) without taking the guard.
    pub fn starting_at(mut self, index: usize) -> Self {
        self.current = self.timeline.clamp(index);
        self
    }

    pub fn timeline(&self) -> &Timeline<'a> {
        &self.timeline
    }

    pub fn current_step(&self) -> usize {
        self.current
    }

    pub fn step(&self) -> &TimelineStep<'a> {
        self.timeline.step(self.current)
    }

    pub fn is_animating(&self) -> bool {
        self.guard.is_held()
    }

    pub fn is_complete(&self) -> bool {
        self.timeline.is_complete(self.current)
    }

    pub fn visible_teeth(&self) -> Vec<&'a ToothRecord> {
        self.timeline.visible_teeth(self.current)
    }

    pub fn recently_erupted(&self) -> BTreeSet<&'a str> {
        self.timeline.recently_erupted(self.current)
    }

    pub fn status_description(&self) -> String {
        self.timeline.status_description(self.current)
    }

    /// Apply a request. Returns whether it was accepted.
    pub fn navigate(&mut self, nav: Navigation) -> bool {
        match nav {
            Navigation::Forward => self.forward(),
            Navigation::Backward => self.backward(),
            Navigation::Reset => self.reset(),
            Navigation::End => self.end(),
            Navigation::Goto(n) => self.goto(n),
        }
    }

    /// Move one step later. A no-op at the last step.
    pub fn forward(&mut self) -> bool {
        if self.current >= self.timeline.last_index() {
            return false;
        }
        let target = self.current + 1;
        self.move_to(target, Navigation::Forward)
    }

    /// Move one step earlier. A no-op at the birth step.
    pub fn backward(&mut self) -> bool {
        if self.current == 0 {
            return false;
        }
        let target = self.current - 1;
        self.move_to(target, Navigation::Backward)
    }

    pub fn reset(&mut self) -> bool {
        self.move_to(0, Navigation::Reset)
    }

    pub fn end(&mut self) -> bool {
        let last = self.timeline.last_index();
        self.move_to(last, Navigation::End)
    }

    /// Jump to `index`, clamped to the timeline.
    pub fn goto(&mut self, index: usize) -> bool {
        let target = self.timeline.clamp(index);
        self.move_to(target, Navigation::Goto(index))
    }

    fn move_to(&mut self, target: usize, nav: Navigation) -> bool {
        if !self.guard.try_acquire() {
            tracing::debug!(%nav, current = self.current, "navigation dropped while animating");
            return false;
        }
        tracing::debug!(%nav, from = self.current, to = target, "timeline step");
        self.current = target;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::catalog;

    fn instant_nav() -> TimelineNavigator<'static> {
        TimelineNavigator::with_delay(Timeline::new(catalog()), Duration::ZERO)
    }

    #[test]
    fn starts_at_birth() {
        let nav = instant_nav();
        assert_eq!(nav.current_step(), 0);
        assert!(nav.visible_teeth().is_empty());
        assert!(!nav.is_animating());
    }

    #[test]
    fn backward_at_birth_is_noop() {
        let mut nav = instant_nav();
        assert!(!nav.backward());
        assert_eq!(nav.current_step(), 0);
    }

    #[test]
    fn forward_at_end_is_noop() {
        let mut nav = instant_nav();
        assert!(nav.end());
        let last = nav.timeline().last_index();
        assert_eq!(nav.current_step(), last);
        assert!(!nav.forward());
        assert_eq!(nav.current_step(), last);
        assert!(nav.is_complete());
    }

    #[test]
    fn single_steps_and_jumps() {
        let mut nav = instant_nav();
        assert!(nav.forward());
        assert!(nav.forward());
        assert_eq!(nav.current_step(), 2);
        assert!(nav.backward());
        assert_eq!(nav.current_step(), 1);
        assert!(nav.goto(5));
        assert_eq!(nav.current_step(), 5);
        assert!(nav.reset());
        assert_eq!(nav.current_step(), 0);
    }

    #[test]
    fn goto_clamps() {
        let mut nav = instant_nav();
        assert!(nav.goto(1_000));
        assert_eq!(nav.current_step(), nav.timeline().last_index());
    }

    #[test]
    fn recently_erupted_follows_current_step() {
        let mut nav = instant_nav();
        nav.forward();
        let first = nav.recently_erupted();
        nav.forward();
        let second = nav.recently_erupted();
        assert!(first.is_disjoint(&second));
        nav.reset();
        assert!(nav.recently_erupted().is_empty());
    }

    #[test]
    fn empty_timeline_navigation_is_noop() {
        let mut nav = TimelineNavigator::with_delay(Timeline::new(&[]), Duration::ZERO);
        assert!(!nav.forward());
        assert!(!nav.backward());
        assert_eq!(nav.current_step(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn guard_drops_moves_until_delay_elapses() {
        let mut nav = TimelineNavigator::new(Timeline::new(catalog()));
        assert!(nav.forward());
        assert!(nav.is_animating());

        assert!(!nav.forward());
        assert!(!nav.end());
        assert!(!nav.goto(3));
        assert_eq!(nav.current_step(), 1);

        tokio::time::advance(Duration::from_millis(499)).await;
        assert!(!nav.backward());
        assert_eq!(nav.current_step(), 1);

        tokio::time::advance(Duration::from_millis(1)).await;
        assert!(!nav.is_animating());
        assert!(nav.forward());
        assert_eq!(nav.current_step(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn boundary_noop_does_not_take_guard() {
        let mut nav = TimelineNavigator::new(Timeline::new(catalog()));
        assert!(!nav.backward());
        assert!(!nav.is_animating());
        assert!(nav.forward());
    }

    #[tokio::test(start_paused = true)]
    async fn starting_position_leaves_guard_free() {
        let mut nav = TimelineNavigator::new(Timeline::new(catalog())).starting_at(4);
        assert_eq!(nav.current_step(), 4);
        assert!(!nav.is_animating());
        assert!(nav.navigate(Navigation::Backward));
        assert!(!nav.navigate(Navigation::End));
        assert_eq!(nav.current_step(), 3);

        let nav = TimelineNavigator::new(Timeline::new(catalog())).starting_at(999);
        assert!(nav.is_complete());
    }

    #[test]
    fn parse_navigation() {
        assert_eq!("next".parse::<Navigation>().unwrap(), Navigation::Forward);
        assert_eq!("Home".parse::<Navigation>().unwrap(), Navigation::Reset);
        assert_eq!("goto 4".parse::<Navigation>().unwrap(), Navigation::Goto(4));
        assert_eq!("g12".parse::<Navigation>().unwrap(), Navigation::Goto(12));
        assert!("sideways".parse::<Navigation>().is_err());
    }
}
