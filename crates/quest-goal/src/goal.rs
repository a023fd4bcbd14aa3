// goal.rs — Goal: one tracked objective and its point-accrual rules.
//
// Three kinds of goal share a title and a point value but differ in how an
// event is applied:
//   Simple    — one-time achievement; the first event completes it
//   Eternal   — recorded repeatedly, earns a fixed award every time, never completes
//   Checklist — counts events up to a target, pays a one-off bonus on reaching it
//
// Completion saturates: once a Simple or Checklist goal is complete, further
// events leave it untouched.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::GoalError;

/// Points an eternal goal earns each time an event is recorded.
pub const ETERNAL_EVENT_POINTS: i64 = 100;

/// The kind of a goal, carrying the state that only that kind needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GoalKind {
    /// A one-time achievement.
    Simple { completed: bool },

    /// A goal that is recorded repeatedly and never completes.
    Eternal,

    /// A goal that completes after `target_count` events and then pays
    /// `bonus_points` once.
    Checklist {
        current_count: u32,
        target_count: u32,
        bonus_points: i64,
    },
}

/// Discriminator naming a goal kind without its state.
///
/// This is the value written to the `kind` field of a persisted record.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum GoalType {
    Simple,
    Eternal,
    Checklist,
}

impl GoalType {
    /// All known goal types, in display order.
    pub const ALL: [GoalType; 3] = [GoalType::Simple, GoalType::Eternal, GoalType::Checklist];

    /// The tag used for this type in persisted records.
    pub fn as_str(&self) -> &'static str {
        match self {
            GoalType::Simple => "simple",
            GoalType::Eternal => "eternal",
            GoalType::Checklist => "checklist",
        }
    }

    /// Look up a goal type by its record tag.
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == tag)
    }
}

impl fmt::Display for GoalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A tracked goal.
///
/// Fields are private: the title never changes after construction and the
/// point value only moves through [`Goal::record_event`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Goal {
    title: String,
    points: i64,
    kind: GoalKind,
}

impl Goal {
    /// Create a one-time goal worth `points`.
    pub fn simple(title: impl Into<String>, points: i64) -> Result<Self, GoalError> {
        Self::new(title.into(), points, GoalKind::Simple { completed: false })
    }

    /// Create a goal that earns [`ETERNAL_EVENT_POINTS`] every time it is recorded.
    pub fn eternal(title: impl Into<String>, points: i64) -> Result<Self, GoalError> {
        Self::new(title.into(), points, GoalKind::Eternal)
    }

    /// Create a goal that completes after `target_count` events and then
    /// awards `bonus_points`.
    pub fn checklist(
        title: impl Into<String>,
        target_count: u32,
        points: i64,
        bonus_points: i64,
    ) -> Result<Self, GoalError> {
        Self::new(
            title.into(),
            points,
            GoalKind::Checklist {
                current_count: 0,
                target_count,
                bonus_points,
            },
        )
    }

    /// Rebuild a goal from previously persisted state, enforcing the same
    /// invariants as the constructors.
    pub(crate) fn restore(title: String, points: i64, kind: GoalKind) -> Result<Self, GoalError> {
        Self::new(title, points, kind)
    }

    fn new(title: String, points: i64, kind: GoalKind) -> Result<Self, GoalError> {
        if title.trim().is_empty() {
            return Err(GoalError::InvalidGoal("title must not be empty".to_string()));
        }
        if let GoalKind::Checklist {
            current_count,
            target_count,
            bonus_points,
        } = kind
        {
            if target_count == 0 {
                return Err(GoalError::InvalidGoal(format!(
                    "checklist '{}' needs a target count above zero",
                    title
                )));
            }
            if current_count > target_count {
                return Err(GoalError::InvalidGoal(format!(
                    "checklist '{}' is at {}/{}, past its target",
                    title, current_count, target_count
                )));
            }
            if bonus_points < 0 {
                return Err(GoalError::InvalidGoal(format!(
                    "checklist '{}' has a negative bonus ({})",
                    title, bonus_points
                )));
            }
        }
        Ok(Self {
            title,
            points,
            kind,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Points currently accrued by this goal.
    pub fn points(&self) -> i64 {
        self.points
    }

    pub fn kind(&self) -> &GoalKind {
        &self.kind
    }

    pub fn goal_type(&self) -> GoalType {
        match self.kind {
            GoalKind::Simple { .. } => GoalType::Simple,
            GoalKind::Eternal => GoalType::Eternal,
            GoalKind::Checklist { .. } => GoalType::Checklist,
        }
    }

    /// Apply one occurrence of progress.
    ///
    /// Never fails. Recording against a completed Simple or Checklist goal
    /// is a no-op.
    pub fn record_event(&mut self) {
        match &mut self.kind {
            GoalKind::Simple { completed } => *completed = true,
            GoalKind::Eternal => {
                self.points = self.points.saturating_add(ETERNAL_EVENT_POINTS);
            }
            GoalKind::Checklist {
                current_count,
                target_count,
                bonus_points,
            } => {
                if *current_count < *target_count {
                    *current_count += 1;
                    if *current_count == *target_count {
                        self.points = self.points.saturating_add(*bonus_points);
                    }
                }
            }
        }
    }

    pub fn is_complete(&self) -> bool {
        match self.kind {
            GoalKind::Simple { completed } => completed,
            GoalKind::Eternal => false,
            GoalKind::Checklist {
                current_count,
                target_count,
                ..
            } => current_count >= target_count,
        }
    }

    /// Human-readable one-line status, e.g. `[X] Run a marathon (earned 1000 points)`.
    pub fn display_status(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mark = if self.is_complete() { "[X]" } else { "[ ]" };
        match self.kind {
            GoalKind::Simple { completed: true } => {
                write!(f, "{} {} (earned {} points)", mark, self.title, self.points)
            }
            GoalKind::Simple { completed: false } => {
                write!(f, "{} {} (worth {} points)", mark, self.title, self.points)
            }
            GoalKind::Eternal => write!(
                f,
                "{} {} ({} points so far, +{} each time)",
                mark, self.title, self.points, ETERNAL_EVENT_POINTS
            ),
            GoalKind::Checklist {
                current_count,
                target_count,
                bonus_points,
            } => {
                if self.is_complete() {
                    write!(
                        f,
                        "{} {} (completed {}/{}, earned {} points)",
                        mark, self.title, current_count, target_count, self.points
                    )
                } else {
                    write!(
                        f,
                        "{} {} (completed {}/{}, {} bonus on finish)",
                        mark, self.title, current_count, target_count, bonus_points
                    )
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chapters() -> Goal {
        Goal::checklist("Read 10 chapters", 10, 50, 500).unwrap()
    }

    #[test]
    fn new_goals_start_incomplete() {
        assert!(!Goal::simple("Run a marathon", 1000).unwrap().is_complete());
        assert!(!Goal::eternal("Pray daily", 0).unwrap().is_complete());
        assert!(!chapters().is_complete());
    }

    #[test]
    fn simple_goal_completes_once_and_keeps_points() {
        let mut goal = Goal::simple("Run a marathon", 1000).unwrap();
        goal.record_event();
        assert!(goal.is_complete());
        assert_eq!(goal.points(), 1000);

        goal.record_event();
        goal.record_event();
        assert!(goal.is_complete());
        assert_eq!(goal.points(), 1000);
    }

    #[test]
    fn eternal_goal_earns_every_time_and_never_completes() {
        let mut goal = Goal::eternal("Pray daily", 0).unwrap();
        for n in 1..=3 {
            goal.record_event();
            assert_eq!(goal.points(), ETERNAL_EVENT_POINTS * n);
            assert!(!goal.is_complete());
        }
        assert_eq!(goal.points(), 300);
    }

    #[test]
    fn checklist_pays_bonus_exactly_on_target() {
        let mut goal = chapters();
        for _ in 0..9 {
            goal.record_event();
        }
        assert!(!goal.is_complete());
        assert_eq!(goal.points(), 50);

        goal.record_event();
        assert!(goal.is_complete());
        assert_eq!(goal.points(), 550);
    }

    #[test]
    fn checklist_saturates_after_target() {
        let mut goal = chapters();
        for _ in 0..10 {
            goal.record_event();
        }
        let at_target = goal.clone();

        for _ in 0..5 {
            goal.record_event();
        }
        assert_eq!(goal, at_target);
        assert_eq!(
            goal.kind(),
            &GoalKind::Checklist {
                current_count: 10,
                target_count: 10,
                bonus_points: 500,
            }
        );
    }

    #[test]
    fn single_step_checklist_completes_on_first_event() {
        let mut goal = Goal::checklist("Book dentist", 1, 0, 25).unwrap();
        goal.record_event();
        assert!(goal.is_complete());
        assert_eq!(goal.points(), 25);
    }

    #[test]
    fn empty_title_is_rejected() {
        let result = Goal::simple("   ", 10);
        assert!(matches!(result, Err(GoalError::InvalidGoal(_))));
    }

    #[test]
    fn zero_target_checklist_is_rejected() {
        let result = Goal::checklist("Nothing to do", 0, 50, 500);
        assert!(matches!(result, Err(GoalError::InvalidGoal(_))));
    }

    #[test]
    fn negative_bonus_is_rejected() {
        let result = Goal::checklist("Lose points", 3, 50, -10);
        assert!(matches!(result, Err(GoalError::InvalidGoal(_))));
    }

    #[test]
    fn restore_rejects_count_past_target() {
        let result = Goal::restore(
            "Overdone".to_string(),
            0,
            GoalKind::Checklist {
                current_count: 4,
                target_count: 3,
                bonus_points: 0,
            },
        );
        assert!(matches!(result, Err(GoalError::InvalidGoal(_))));
    }

    #[test]
    fn goal_type_tags_round_trip() {
        for goal_type in GoalType::ALL {
            assert_eq!(GoalType::from_tag(goal_type.as_str()), Some(goal_type));
        }
        assert_eq!(GoalType::from_tag("SimpleGoal"), None);
    }

    #[test]
    fn display_status_reflects_state() {
        let mut goal = chapters();
        assert_eq!(
            goal.display_status(),
            "[ ] Read 10 chapters (completed 0/10, 500 bonus on finish)"
        );
        for _ in 0..10 {
            goal.record_event();
        }
        assert_eq!(
            goal.display_status(),
            "[X] Read 10 chapters (completed 10/10, earned 550 points)"
        );

        let mut simple = Goal::simple("Run a marathon", 1000).unwrap();
        assert!(simple.display_status().starts_with("[ ] Run a marathon"));
        simple.record_event();
        assert_eq!(
            simple.display_status(),
            "[X] Run a marathon (earned 1000 points)"
        );
    }
}
