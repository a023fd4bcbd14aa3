//! # quest-goal
//!
//! Goal tracking with points for Eternal Quest.
//!
//! A [`User`] owns an ordered list of [`Goal`]s. Each goal is one of three
//! kinds with its own rules for what recording an event does:
//!
//! - **Simple** — completes on the first event
//! - **Eternal** — earns [`ETERNAL_EVENT_POINTS`] every time, never completes
//! - **Checklist** — counts events to a target and pays a bonus once on reaching it
//!
//! ## Key components
//!
//! - [`Goal`] / [`GoalKind`] — the goal model and its event semantics
//! - [`codec`] — tagged JSON records that rebuild the right goal kind on load
//! - [`User`] — goal list plus running total, credited per event by the points gained
//! - [`ProgressStore`] — atomic whole-file persistence of a user's progress
//! - [`QuestEvent`] / [`EventDispatcher`] — progress notifications (e.g. a JSONL journal)
//! - [`QuestConfig`] — quest.toml settings

pub mod codec;
pub mod config;
pub mod error;
pub mod events;
pub mod goal;
pub mod store;
pub mod user;

pub use codec::{GoalRecord, Snapshot};
pub use config::QuestConfig;
pub use error::GoalError;
pub use events::{EventDispatcher, JournalSink, NotificationSink, QuestEvent};
pub use goal::{Goal, GoalKind, GoalType, ETERNAL_EVENT_POINTS};
pub use store::ProgressStore;
pub use user::User;
