//! Named snapshot storage.
//!
//! Sessions never touch storage on their own; callers hand a `SnapshotStore`
//! to `GameSession::save_to` / `GameSession::load_from`.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::errors::{EngineError, EngineResult};
use crate::session::game_session::GameSession;

const FILE_PREFIX: &str = "chess_game_";
const FILE_SUFFIX: &str = ".json";

pub trait SnapshotStore {
    fn save(&mut self, name: &str, snapshot: &str) -> EngineResult<()>;

    /// `Ok(None)` when nothing is stored under `name`.
    fn load(&self, name: &str) -> EngineResult<Option<String>>;

    /// Stored game names, sorted.
    fn list(&self) -> EngineResult<Vec<String>>;
}

/// Names double as file names, so keep them to a safe alphabet.
fn check_name(name: &str) -> EngineResult<()> {
    let valid = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(EngineError::InvalidState(format!("invalid game name {name:?}")))
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SnapshotStore for MemoryStore {
    fn save(&mut self, name: &str, snapshot: &str) -> EngineResult<()> {
        check_name(name)?;
        self.entries.insert(name.to_owned(), snapshot.to_owned());
        Ok(())
    }

    fn load(&self, name: &str) -> EngineResult<Option<String>> {
        check_name(name)?;
        Ok(self.entries.get(name).cloned())
    }

    fn list(&self) -> EngineResult<Vec<String>> {
        Ok(self.entries.keys().cloned().collect())
    }
}

/// One `chess_game_<name>.json` file per game under `root`.
#[derive(Debug, Clone)]
pub struct DirectoryStore {
    root: PathBuf,
}

impl DirectoryStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, name: &str) -> PathBuf {
        self.root.join(format!("{FILE_PREFIX}{name}{FILE_SUFFIX}"))
    }
}

impl SnapshotStore for DirectoryStore {
    fn save(&mut self, name: &str, snapshot: &str) -> EngineResult<()> {
        check_name(name)?;
        fs::create_dir_all(&self.root)?;
        let path = self.path_for(name);
        fs::write(&path, snapshot)?;
        debug!(path = %path.display(), "snapshot saved");
        Ok(())
    }

    fn load(&self, name: &str) -> EngineResult<Option<String>> {
        check_name(name)?;
        match fs::read_to_string(self.path_for(name)) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn list(&self) -> EngineResult<Vec<String>> {
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut names = Vec::new();
        for entry in entries {
            let file_name = entry?.file_name();
            let Some(file_name) = file_name.to_str() else {
                continue;
            };
            if let Some(name) = file_name
                .strip_prefix(FILE_PREFIX)
                .and_then(|rest| rest.strip_suffix(FILE_SUFFIX))
            {
                names.push(name.to_owned());
            }
        }
        names.sort_unstable();
        Ok(names)
    }
}

impl GameSession {
    pub fn save_to(&self, store: &mut dyn SnapshotStore, name: &str) -> EngineResult<()> {
        store.save(name, &self.serialize()?)
    }

    pub fn load_from(store: &dyn SnapshotStore, name: &str) -> EngineResult<GameSession> {
        let raw = store
            .load(name)?
            .ok_or_else(|| EngineError::InvalidState(format!("no saved game named {name:?}")))?;
        GameSession::deserialize(&raw)
    }
}
