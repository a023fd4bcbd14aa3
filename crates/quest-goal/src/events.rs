// events.rs — Progress events and journal dispatch.
//
// Every change to a user's progress can be described as a QuestEvent. Sinks
// subscribe to these events; the journal sink appends them as JSON lines so
// a user can look back over what they recorded and when.
//
// The dispatcher is synchronous and best-effort: a failing sink is logged
// and skipped, it never blocks the operation that produced the event.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::GoalError;
use crate::goal::{Goal, GoalType};

/// Events emitted as a user's progress changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum QuestEvent {
    /// A new goal was added.
    GoalAdded {
        title: String,
        kind: GoalType,
        points: i64,
        timestamp: DateTime<Utc>,
    },

    /// An event was recorded against a goal.
    EventRecorded {
        title: String,
        points_gained: i64,
        total_points: i64,
        completed: bool,
        timestamp: DateTime<Utc>,
    },

    /// Progress was written to disk.
    ProgressSaved {
        path: String,
        goal_count: usize,
        timestamp: DateTime<Utc>,
    },

    /// Progress was read from disk.
    ProgressLoaded {
        path: String,
        goal_count: usize,
        timestamp: DateTime<Utc>,
    },
}

impl QuestEvent {
    /// Get the event type name as a string.
    pub fn event_type(&self) -> &str {
        match self {
            QuestEvent::GoalAdded { .. } => "goal_added",
            QuestEvent::EventRecorded { .. } => "event_recorded",
            QuestEvent::ProgressSaved { .. } => "progress_saved",
            QuestEvent::ProgressLoaded { .. } => "progress_loaded",
        }
    }

    pub fn goal_added(goal: &Goal) -> Self {
        QuestEvent::GoalAdded {
            title: goal.title().to_string(),
            kind: goal.goal_type(),
            points: goal.points(),
            timestamp: Utc::now(),
        }
    }

    pub fn event_recorded(goal: &Goal, points_gained: i64, total_points: i64) -> Self {
        QuestEvent::EventRecorded {
            title: goal.title().to_string(),
            points_gained,
            total_points,
            completed: goal.is_complete(),
            timestamp: Utc::now(),
        }
    }

    pub fn progress_saved(path: &Path, goal_count: usize) -> Self {
        QuestEvent::ProgressSaved {
            path: path.display().to_string(),
            goal_count,
            timestamp: Utc::now(),
        }
    }

    pub fn progress_loaded(path: &Path, goal_count: usize) -> Self {
        QuestEvent::ProgressLoaded {
            path: path.display().to_string(),
            goal_count,
            timestamp: Utc::now(),
        }
    }
}

/// Trait for receiving progress events.
pub trait NotificationSink: Send {
    /// Handle an event. Errors are logged by the dispatcher.
    fn send(&self, event: &QuestEvent) -> Result<(), GoalError>;
}

/// Appends events as JSONL to a journal file.
pub struct JournalSink {
    path: PathBuf,
}

impl JournalSink {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl NotificationSink for JournalSink {
    fn send(&self, event: &QuestEvent) -> Result<(), GoalError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| GoalError::storage(parent, source))?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|source| GoalError::storage(&self.path, source))?;

        let json = serde_json::to_string(event)?;
        writeln!(file, "{}", json).map_err(|source| GoalError::storage(&self.path, source))?;

        Ok(())
    }
}

/// Dispatches events to multiple sinks.
pub struct EventDispatcher {
    sinks: Vec<Box<dyn NotificationSink>>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self { sinks: Vec::new() }
    }

    pub fn add_sink(&mut self, sink: Box<dyn NotificationSink>) {
        self.sinks.push(sink);
    }

    /// Dispatch an event to all sinks.
    pub fn dispatch(&self, event: &QuestEvent) {
        for sink in &self.sinks {
            if let Err(e) = sink.send(event) {
                tracing::warn!(event = event.event_type(), "notification sink error: {}", e);
            }
        }
    }
}

impl Default for EventDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use tempfile::tempdir;

    struct FailingSink;

    impl NotificationSink for FailingSink {
        fn send(&self, _event: &QuestEvent) -> Result<(), GoalError> {
            Err(GoalError::NotificationError("offline".to_string()))
        }
    }

    struct CollectingSink(Arc<Mutex<Vec<String>>>);

    impl NotificationSink for CollectingSink {
        fn send(&self, event: &QuestEvent) -> Result<(), GoalError> {
            self.0.lock().unwrap().push(event.event_type().to_string());
            Ok(())
        }
    }

    #[test]
    fn event_serialization_round_trip() {
        let goal = Goal::checklist("Read 10 chapters", 10, 50, 500).unwrap();
        let event = QuestEvent::goal_added(&goal);
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"event_type\":\"goal_added\""));
        assert!(json.contains("\"kind\":\"checklist\""));

        let restored: QuestEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.event_type(), "goal_added");
    }

    #[test]
    fn journal_sink_appends_lines() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("journal").join("events.jsonl");
        let sink = JournalSink::new(&path);

        let mut goal = Goal::eternal("Pray daily", 0).unwrap();
        sink.send(&QuestEvent::goal_added(&goal)).unwrap();
        goal.record_event();
        sink.send(&QuestEvent::event_recorded(&goal, 100, 100)).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[1].contains("\"points_gained\":100"));
    }

    #[test]
    fn dispatcher_skips_failing_sinks() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut dispatcher = EventDispatcher::new();
        dispatcher.add_sink(Box::new(FailingSink));
        dispatcher.add_sink(Box::new(CollectingSink(Arc::clone(&seen))));

        dispatcher.dispatch(&QuestEvent::progress_saved(Path::new("goals.json"), 2));

        assert_eq!(*seen.lock().unwrap(), ["progress_saved"]);
    }
}
