// user.rs — User: the owner of a goal list and its running point total.

use std::fmt::Write as _;

use crate::codec::Snapshot;
use crate::error::GoalError;
use crate::goal::Goal;
use crate::store::ProgressStore;

/// A user's goals, in the order they were added, plus the points earned so far.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    name: String,
    goals: Vec<Goal>,
    total_points: i64,
}

impl User {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            goals: Vec::new(),
            total_points: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn total_points(&self) -> i64 {
        self.total_points
    }

    /// Append a goal. Returns its zero-based position.
    pub fn add_goal(&mut self, goal: Goal) -> usize {
        tracing::debug!(title = goal.title(), kind = %goal.goal_type(), "goal added");
        self.goals.push(goal);
        self.goals.len() - 1
    }

    /// Record one event against the goal at `position` and credit the points
    /// that event earned to the running total.
    ///
    /// Only the change caused by this event is added, so repeated events on
    /// an eternal or checklist goal never count earlier accrual twice.
    /// Returns the points gained.
    pub fn record_goal_event(&mut self, position: usize) -> Result<i64, GoalError> {
        let goal = self
            .goals
            .get_mut(position)
            .ok_or(GoalError::GoalNotFound(position))?;
        let before = goal.points();
        goal.record_event();
        let delta = goal.points().saturating_sub(before);
        self.total_points = self.total_points.saturating_add(delta);

        tracing::debug!(
            title = goal.title(),
            delta,
            total = self.total_points,
            complete = goal.is_complete(),
            "goal event recorded"
        );
        Ok(delta)
    }

    pub fn goals(&self) -> &[Goal] {
        &self.goals
    }

    /// Status line for every goal, numbered from 1, followed by the total.
    pub fn display_goals(&self) -> String {
        let mut out = format!("{}'s goals:\n", self.name);
        if self.goals.is_empty() {
            out.push_str("  (none yet)\n");
        }
        for (i, goal) in self.goals.iter().enumerate() {
            let _ = writeln!(out, "{:>3}. {}", i + 1, goal);
        }
        let _ = write!(out, "Total points: {}", self.total_points);
        out
    }

    /// Write the user's progress to `store`, replacing whatever was there.
    pub fn save_progress(&self, store: &ProgressStore) -> Result<(), GoalError> {
        store.save(self)
    }

    /// Replace this user's goals and total with what `store` holds.
    ///
    /// The file is fully decoded before anything changes; on error the
    /// user is left exactly as it was. A missing file is a no-op.
    /// Returns the number of goals loaded (0 when there was no file).
    pub fn load_progress(&mut self, store: &ProgressStore) -> Result<usize, GoalError> {
        match store.load_if_present()? {
            Some(snapshot) => Ok(self.restore(snapshot)),
            None => Ok(0),
        }
    }

    /// Replace goals and total with a decoded snapshot. The user's name is
    /// taken from the snapshot when it carries one.
    pub fn restore(&mut self, snapshot: Snapshot) -> usize {
        if let Some(name) = snapshot.user {
            self.name = name;
        }
        self.goals = snapshot.goals;
        self.total_points = snapshot.total_points;
        self.goals.len()
    }
}
