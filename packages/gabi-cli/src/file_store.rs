use gabi_engine::{GameStore, StoreError, StoreKey};
use log::{debug, warn};
use serde_json::{Map, Value};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// A [`GameStore`] backed by a single JSON object on disk. Every write is
/// flushed immediately, so each CLI invocation sees the previous one's
/// writes. The file is only ever swapped whole, through a temporary file.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: Map<String, Value>,
}

impl FileStore {
    /// Opens `path`. A missing file is an empty store; an unreadable one is
    /// reported and also treated as empty.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(text) => match serde_json::from_str::<Value>(&text) {
                Ok(Value::Object(map)) => map,
                Ok(_) => {
                    warn!("{} does not hold a JSON object, starting fresh", path.display());
                    Map::new()
                }
                Err(e) => {
                    warn!("{} is corrupt ({}), starting fresh", path.display(), e);
                    Map::new()
                }
            },
            Err(e) if e.kind() == io::ErrorKind::NotFound => Map::new(),
            Err(e) => {
                warn!("cannot read {} ({}), starting fresh", path.display(), e);
                Map::new()
            }
        };
        Self { path, entries }
    }

    /// Writes `entries` to disk and only then adopts them, so a failed
    /// write leaves both the file and the in-memory copy untouched.
    fn commit(&mut self, entries: Map<String, Value>) -> Result<(), StoreError> {
        write_atomically(&self.path, &entries)?;
        self.entries = entries;
        Ok(())
    }
}

fn write_atomically(path: &Path, entries: &Map<String, Value>) -> Result<(), StoreError> {
    let text = serde_json::to_string_pretty(entries)?;
    let tmp = path.with_extension("tmp");
    fs::write(&tmp, text)?;
    if let Err(e) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(e.into());
    }
    debug!("saved {}", path.display());
    Ok(())
}

impl GameStore for FileStore {
    fn get(&self, key: StoreKey) -> Option<Value> {
        self.entries.get(key.as_str()).cloned()
    }

    fn set(&mut self, key: StoreKey, value: Value) -> Result<(), StoreError> {
        let mut entries = self.entries.clone();
        entries.insert(key.as_str().to_string(), value);
        self.commit(entries)
    }

    fn replace(&mut self, entries: Vec<(StoreKey, Value)>) -> Result<(), StoreError> {
        let entries = entries
            .into_iter()
            .map(|(key, value)| (key.as_str().to_string(), value))
            .collect();
        self.commit(entries)
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        self.entries.clear();
        match fs::remove_file(&self.path) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }
}
