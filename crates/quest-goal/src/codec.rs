// codec.rs — Tagged record format for persisting goals.
//
// Every goal is written as a JSON object whose `kind` field names the
// variant, followed by the fields that variant needs:
//
//   {"kind": "simple",    "title": "...", "points": 1000, "completed": true}
//   {"kind": "eternal",   "title": "...", "points": 300}
//   {"kind": "checklist", "title": "...", "points": 50,
//    "target_count": 10, "bonus_points": 500, "current_count": 4}
//
// Decoding checks the tag against the closed set of goal types before looking
// at any other field, so an unknown variant is reported as such rather than
// as a generic parse error. Missing fields are never defaulted.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::GoalError;
use crate::goal::{Goal, GoalKind, GoalType};

/// One persisted goal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GoalRecord {
    Simple {
        title: String,
        points: i64,
        completed: bool,
    },
    Eternal {
        title: String,
        points: i64,
    },
    Checklist {
        title: String,
        points: i64,
        target_count: u32,
        bonus_points: i64,
        current_count: u32,
    },
}

impl From<&Goal> for GoalRecord {
    fn from(goal: &Goal) -> Self {
        let title = goal.title().to_string();
        let points = goal.points();
        match *goal.kind() {
            GoalKind::Simple { completed } => GoalRecord::Simple {
                title,
                points,
                completed,
            },
            GoalKind::Eternal => GoalRecord::Eternal { title, points },
            GoalKind::Checklist {
                current_count,
                target_count,
                bonus_points,
            } => GoalRecord::Checklist {
                title,
                points,
                target_count,
                bonus_points,
                current_count,
            },
        }
    }
}

impl TryFrom<GoalRecord> for Goal {
    type Error = GoalError;

    fn try_from(record: GoalRecord) -> Result<Self, Self::Error> {
        match record {
            GoalRecord::Simple {
                title,
                points,
                completed,
            } => Goal::restore(title, points, GoalKind::Simple { completed }),
            GoalRecord::Eternal { title, points } => {
                Goal::restore(title, points, GoalKind::Eternal)
            }
            GoalRecord::Checklist {
                title,
                points,
                target_count,
                bonus_points,
                current_count,
            } => Goal::restore(
                title,
                points,
                GoalKind::Checklist {
                    current_count,
                    target_count,
                    bonus_points,
                },
            ),
        }
    }
}

/// A user's saved progress: the goal records plus the bookkeeping needed to
/// resume a session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    /// Name of the user the progress belongs to, if recorded.
    pub user: Option<String>,
    pub total_points: i64,
    pub goals: Vec<Goal>,
}

#[derive(Serialize)]
struct SnapshotDocument<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    user: Option<&'a str>,
    total_points: i64,
    goals: Vec<GoalRecord>,
}

#[derive(Deserialize)]
struct SnapshotEnvelope {
    #[serde(default)]
    user: Option<String>,
    total_points: i64,
    goals: Value,
}

/// Encode goals as a JSON array of tagged records, in sequence order.
pub fn encode(goals: &[Goal]) -> Result<Vec<u8>, GoalError> {
    let records: Vec<GoalRecord> = goals.iter().map(GoalRecord::from).collect();
    Ok(serde_json::to_vec_pretty(&records)?)
}

/// Decode a JSON array of tagged records back into goals.
///
/// Fails on the first bad record; nothing is returned for the records that
/// preceded it.
pub fn decode(bytes: &[u8]) -> Result<Vec<Goal>, GoalError> {
    let value = parse_document(bytes)?;
    decode_records(value)
}

/// Encode a full progress snapshot.
pub fn encode_snapshot(
    user: Option<&str>,
    total_points: i64,
    goals: &[Goal],
) -> Result<Vec<u8>, GoalError> {
    let document = SnapshotDocument {
        user,
        total_points,
        goals: goals.iter().map(GoalRecord::from).collect(),
    };
    Ok(serde_json::to_vec_pretty(&document)?)
}

/// Decode a progress snapshot.
///
/// A bare record array is accepted too and yields a snapshot with no user
/// name and a zero total.
pub fn decode_snapshot(bytes: &[u8]) -> Result<Snapshot, GoalError> {
    let value = parse_document(bytes)?;
    if value.is_array() {
        return Ok(Snapshot {
            user: None,
            total_points: 0,
            goals: decode_records(value)?,
        });
    }

    let envelope: SnapshotEnvelope =
        serde_json::from_value(value).map_err(|e| GoalError::MalformedRecord {
            index: None,
            reason: e.to_string(),
        })?;
    Ok(Snapshot {
        user: envelope.user,
        total_points: envelope.total_points,
        goals: decode_records(envelope.goals)?,
    })
}

fn parse_document(bytes: &[u8]) -> Result<Value, GoalError> {
    serde_json::from_slice(bytes).map_err(|e| GoalError::MalformedRecord {
        index: None,
        reason: e.to_string(),
    })
}

fn decode_records(value: Value) -> Result<Vec<Goal>, GoalError> {
    let Value::Array(records) = value else {
        return Err(GoalError::MalformedRecord {
            index: None,
            reason: "expected a sequence of goal records".to_string(),
        });
    };
    records
        .into_iter()
        .enumerate()
        .map(|(index, record)| decode_record(index, record))
        .collect()
}

fn decode_record(index: usize, value: Value) -> Result<Goal, GoalError> {
    let Some(fields) = value.as_object() else {
        return Err(GoalError::malformed(index, "record is not an object"));
    };
    let kind = match fields.get("kind") {
        Some(Value::String(kind)) => kind,
        Some(_) => return Err(GoalError::malformed(index, "`kind` is not a string")),
        None => return Err(GoalError::malformed(index, "missing field `kind`")),
    };
    if GoalType::from_tag(kind).is_none() {
        return Err(GoalError::UnsupportedGoalType {
            index,
            kind: kind.clone(),
        });
    }

    let record: GoalRecord =
        serde_json::from_value(value).map_err(|e| GoalError::malformed(index, e.to_string()))?;
    Goal::try_from(record).map_err(|e| match e {
        GoalError::InvalidGoal(reason) => GoalError::malformed(index, reason),
        other => other,
    })
}
