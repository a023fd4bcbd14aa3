// mod.rs — Shared session plumbing for quest subcommands.

pub mod goal;

use anyhow::Context;
use quest_goal::{EventDispatcher, JournalSink, ProgressStore, QuestConfig, QuestEvent, User};

/// One command's view of the user's progress: loaded on open, written back
/// by `commit`.
pub struct Session {
    pub user: User,
    store: ProgressStore,
    dispatcher: EventDispatcher,
}

impl Session {
    /// Load progress from the configured file. A missing file starts a new
    /// user named after the config.
    pub fn open(config: &QuestConfig) -> anyhow::Result<Self> {
        let store = ProgressStore::new(&config.storage.progress_file);

        let mut dispatcher = EventDispatcher::new();
        if let Some(journal) = &config.storage.journal_file {
            dispatcher.add_sink(Box::new(JournalSink::new(journal)));
        }

        let mut user = User::new(&config.user.name);
        let existed = store.exists();
        let count = user
            .load_progress(&store)
            .with_context(|| format!("failed to load progress from {}", store.path().display()))?;
        if existed {
            dispatcher.dispatch(&QuestEvent::progress_loaded(store.path(), count));
        }

        Ok(Self {
            user,
            store,
            dispatcher,
        })
    }

    /// Save progress, then announce `events` followed by the save itself.
    /// Nothing is announced if the save fails.
    pub fn commit(&self, events: &[QuestEvent]) -> anyhow::Result<()> {
        self.user
            .save_progress(&self.store)
            .with_context(|| format!("failed to save progress to {}", self.store.path().display()))?;
        for event in events {
            self.dispatcher.dispatch(event);
        }
        self.dispatcher.dispatch(&QuestEvent::progress_saved(
            self.store.path(),
            self.user.goals().len(),
        ));
        Ok(())
    }
}
