// goal.rs — Goal subcommands: add, record, list.

use anyhow::{bail, Context};
use clap::Subcommand;
use quest_goal::config::PointsConfig;
use quest_goal::{Goal, QuestConfig, QuestEvent};

use super::Session;

#[derive(Subcommand)]
pub enum AddCommands {
    /// A one-time goal, complete after a single event.
    Simple {
        /// Goal title (e.g., "Run a marathon").
        title: String,
        /// Points the goal is worth (defaults to `points.simple`).
        #[arg(long)]
        points: Option<i64>,
    },
    /// A goal recorded again and again; earns points every time.
    Eternal {
        /// Goal title (e.g., "Pray daily").
        title: String,
        /// Starting points (defaults to `points.eternal`).
        #[arg(long)]
        points: Option<i64>,
    },
    /// A goal done a set number of times, with a bonus at the end.
    Checklist {
        /// Goal title (e.g., "Read 10 chapters").
        title: String,
        /// Number of events needed to complete the goal.
        #[arg(long)]
        target: u32,
        /// Starting points (defaults to `points.checklist`).
        #[arg(long)]
        points: Option<i64>,
        /// Bonus on completion (defaults to `points.checklist_bonus`).
        #[arg(long)]
        bonus: Option<i64>,
    },
}

pub fn add(cmd: &AddCommands, config: &QuestConfig) -> anyhow::Result<()> {
    let goal = build_goal(cmd, &config.points)?;
    let mut session = Session::open(config)?;

    let event = QuestEvent::goal_added(&goal);
    let position = session.user.add_goal(goal);
    session.commit(&[event])?;

    println!(
        "Added goal {}: {}",
        position + 1,
        session.user.goals()[position]
    );
    Ok(())
}

fn build_goal(cmd: &AddCommands, defaults: &PointsConfig) -> anyhow::Result<Goal> {
    let goal = match cmd {
        AddCommands::Simple { title, points } => {
            Goal::simple(title.as_str(), points.unwrap_or(defaults.simple))
        }
        AddCommands::Eternal { title, points } => {
            Goal::eternal(title.as_str(), points.unwrap_or(defaults.eternal))
        }
        AddCommands::Checklist {
            title,
            target,
            points,
            bonus,
        } => Goal::checklist(
            title.as_str(),
            *target,
            points.unwrap_or(defaults.checklist),
            bonus.unwrap_or(defaults.checklist_bonus),
        ),
    };
    Ok(goal?)
}

/// Record an event for the goal at 1-based `position`.
pub fn record(position: usize, config: &QuestConfig) -> anyhow::Result<()> {
    let mut session = Session::open(config)?;
    let count = session.user.goals().len();
    if position == 0 || position > count {
        bail!(
            "no goal #{} (there are {} goals; see `quest list`)",
            position,
            count
        );
    }

    let index = position - 1;
    let gained = session
        .user
        .record_goal_event(index)
        .with_context(|| format!("failed to record goal #{}", position))?;
    let goal = &session.user.goals()[index];
    let event = QuestEvent::event_recorded(goal, gained, session.user.total_points());
    session.commit(&[event])?;

    println!("Recorded: {}", session.user.goals()[index]);
    if gained > 0 {
        println!(
            "+{} points (total {})",
            gained,
            session.user.total_points()
        );
    }
    Ok(())
}

pub fn list(config: &QuestConfig) -> anyhow::Result<()> {
    let session = Session::open(config)?;
    println!("{}", session.user.display_goals());
    Ok(())
}
