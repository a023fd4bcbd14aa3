// store.rs — ProgressStore: whole-file persistence for a user's progress.
//
// Progress lives in one JSON file (see codec.rs for the layout). Saves write
// a sibling `.tmp` file and rename it over the target, so a crash mid-save
// leaves either the old file or the new one, never a torn mix.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::codec::{self, Snapshot};
use crate::error::GoalError;
use crate::user::User;

/// File-backed store for one user's progress.
#[derive(Debug, Clone)]
pub struct ProgressStore {
    path: PathBuf,
}

impl ProgressStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Save a user's goals and total, replacing the previous file.
    pub fn save(&self, user: &User) -> Result<(), GoalError> {
        let bytes = codec::encode_snapshot(Some(user.name()), user.total_points(), user.goals())?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| GoalError::storage(parent, source))?;
        }
        let tmp_path = self.tmp_path();
        fs::write(&tmp_path, &bytes).map_err(|source| GoalError::storage(&tmp_path, source))?;
        if let Err(source) = fs::rename(&tmp_path, &self.path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(GoalError::storage(&self.path, source));
        }

        tracing::debug!(
            path = %self.path.display(),
            goals = user.goals().len(),
            "progress saved"
        );
        Ok(())
    }

    /// Load saved progress. A missing file yields an empty snapshot.
    pub fn load(&self) -> Result<Snapshot, GoalError> {
        Ok(self.load_if_present()?.unwrap_or_default())
    }

    /// Load saved progress, or `None` if there is no file yet.
    pub fn load_if_present(&self) -> Result<Option<Snapshot>, GoalError> {
        match fs::read(&self.path) {
            Ok(bytes) => self.decode(&bytes).map(Some),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "no saved progress");
                Ok(None)
            }
            Err(source) => Err(GoalError::storage(&self.path, source)),
        }
    }

    /// Load saved progress, treating a missing file as an error.
    pub fn load_existing(&self) -> Result<Snapshot, GoalError> {
        let bytes = fs::read(&self.path).map_err(|source| GoalError::storage(&self.path, source))?;
        self.decode(&bytes)
    }

    fn decode(&self, bytes: &[u8]) -> Result<Snapshot, GoalError> {
        let snapshot = codec::decode_snapshot(bytes)?;
        tracing::debug!(
            path = %self.path.display(),
            goals = snapshot.goals.len(),
            "progress loaded"
        );
        Ok(snapshot)
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::goal::Goal;
    use tempfile::tempdir;

    fn make_user() -> User {
        let mut user = User::new("Hero");
        user.add_goal(Goal::simple("Run a marathon", 1000).unwrap());
        user.add_goal(Goal::eternal("Pray daily", 0).unwrap());
        user.add_goal(Goal::checklist("Read 10 chapters", 10, 50, 500).unwrap());
        user.record_goal_event(1).unwrap();
        user.record_goal_event(2).unwrap();
        user
    }

    #[test]
    fn save_and_load_round_trip() {
        let dir = tempdir().unwrap();
        let store = ProgressStore::new(dir.path().join("user_goals.json"));

        let user = make_user();
        store.save(&user).unwrap();
        assert!(store.exists());

        let snapshot = store.load().unwrap();
        assert_eq!(snapshot.user.as_deref(), Some("Hero"));
        assert_eq!(snapshot.total_points, 100);
        assert_eq!(snapshot.goals, user.goals());
    }

    #[test]
    fn load_missing_file_is_empty() {
        let dir = tempdir().unwrap();
        let store = ProgressStore::new(dir.path().join("absent.json"));

        let snapshot = store.load().unwrap();
        assert_eq!(snapshot, Snapshot::default());
    }

    #[test]
    fn load_existing_missing_file_is_storage_unavailable() {
        let dir = tempdir().unwrap();
        let store = ProgressStore::new(dir.path().join("absent.json"));

        let result = store.load_existing();
        assert!(matches!(result, Err(GoalError::StorageUnavailable { .. })));
    }

    #[test]
    fn save_creates_parent_directories() {
        let dir = tempdir().unwrap();
        let store = ProgressStore::new(dir.path().join("nested/deeper/progress.json"));
        store.save(&make_user()).unwrap();
        assert!(store.exists());
    }

    #[test]
    fn save_replaces_previous_contents_and_leaves_no_temp_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("progress.json");
        let store = ProgressStore::new(&path);

        store.save(&make_user()).unwrap();
        store.save(&User::new("Hero")).unwrap();

        assert!(store.load().unwrap().goals.is_empty());
        assert!(!dir.path().join("progress.json.tmp").exists());
    }

    #[test]
    fn failed_rename_cleans_up_temp_file() {
        let dir = tempdir().unwrap();
        // A directory sits where the progress file should go.
        let path = dir.path().join("progress.json");
        fs::create_dir(&path).unwrap();
        fs::write(path.join("keep"), "x").unwrap();
        let store = ProgressStore::new(&path);

        let result = store.save(&make_user());
        assert!(matches!(result, Err(GoalError::StorageUnavailable { .. })));
        assert!(!dir.path().join("progress.json.tmp").exists());
    }

    #[test]
    fn save_into_unwritable_location_fails() {
        let dir = tempdir().unwrap();
        // A regular file where a directory is expected.
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "x").unwrap();
        let store = ProgressStore::new(blocker.join("progress.json"));

        let result = store.save(&make_user());
        assert!(matches!(result, Err(GoalError::StorageUnavailable { .. })));
    }

    #[test]
    fn corrupt_file_is_reported() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("progress.json");
        fs::write(&path, "{ this is not json").unwrap();

        let result = ProgressStore::new(&path).load();
        assert!(matches!(result, Err(GoalError::MalformedRecord { .. })));
    }

    #[test]
    fn load_if_present_distinguishes_missing_file() {
        let dir = tempdir().unwrap();
        let store = ProgressStore::new(dir.path().join("progress.json"));
        assert!(store.load_if_present().unwrap().is_none());

        store.save(&make_user()).unwrap();
        assert_eq!(store.load_if_present().unwrap().unwrap().goals.len(), 3);
    }

    #[test]
    fn loading_missing_file_keeps_goals_in_memory() {
        let dir = tempdir().unwrap();
        let store = ProgressStore::new(dir.path().join("absent.json"));

        let mut user = User::new("Hero");
        user.add_goal(Goal::eternal("Pray daily", 0).unwrap());
        user.record_goal_event(0).unwrap();
        let before = user.clone();

        assert_eq!(user.load_progress(&store).unwrap(), 0);
        assert_eq!(user, before);
        assert_eq!(user.total_points(), 100);
    }

    #[test]
    fn store_survives_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("progress.json");

        {
            let store = ProgressStore::new(&path);
            store.save(&make_user()).unwrap();
        }

        {
            let store = ProgressStore::new(&path);
            let mut user = User::new("Someone else");
            assert_eq!(user.load_progress(&store).unwrap(), 3);
            assert_eq!(user.name(), "Hero");
            assert_eq!(user.total_points(), 100);
        }
    }
}
