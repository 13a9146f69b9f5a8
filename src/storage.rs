use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{ErrorKind, Read, Write};
use std::path::PathBuf;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::models::{Settings, Task};

pub const TODOS_KEY: &str = "todos";
pub const SETTINGS_KEY: &str = "settings";

#[derive(Debug)]
pub enum StorageError {
    Io(std::io::Error),
    Json(serde_json::Error),
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageError::Io(err) => write!(f, "io error: {err}"),
            StorageError::Json(err) => write!(f, "json error: {err}"),
        }
    }
}

impl std::error::Error for StorageError {}

impl From<std::io::Error> for StorageError {
    fn from(value: std::io::Error) -> Self {
        StorageError::Io(value)
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(value: serde_json::Error) -> Self {
        StorageError::Json(value)
    }
}

/// Opaque string store with get/set/remove and nothing more.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// One `<key>.json` file per key under `root`.
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn ensure_dirs(&self) -> Result<(), StorageError> {
        fs::create_dir_all(&self.root)?;
        Ok(())
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }

    fn write_atomic(&self, path: PathBuf, bytes: &[u8]) -> Result<(), StorageError> {
        let temp_path = path.with_extension("tmp");
        {
            let mut file = File::create(&temp_path)?;
            file.write_all(bytes)?;
            file.sync_all()?;
        }
        fs::rename(temp_path, path)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let mut file = match File::open(self.path_for(key)) {
            Ok(file) => file,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        let mut buf = String::new();
        file.read_to_string(&mut buf)?;
        Ok(Some(buf))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.ensure_dirs()?;
        self.write_atomic(self.path_for(key), value.as_bytes())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        match fs::remove_file(self.path_for(key)) {
            Err(err) if err.kind() != ErrorKind::NotFound => Err(err.into()),
            _ => Ok(()),
        }
    }
}

fn load_json<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> Result<Option<T>, StorageError> {
    match store.get(key)? {
        Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        None => Ok(None),
    }
}

fn save_json<T: Serialize + ?Sized>(
    store: &mut dyn KeyValueStore,
    key: &str,
    data: &T,
) -> Result<(), StorageError> {
    let json = serde_json::to_string(data)?;
    store.set(key, &json)
}

/// `Ok(None)` when nothing was saved yet.
pub fn load_tasks(store: &dyn KeyValueStore) -> Result<Option<Vec<Task>>, StorageError> {
    load_json(store, TODOS_KEY)
}

pub fn load_settings(store: &dyn KeyValueStore) -> Result<Option<Settings>, StorageError> {
    load_json(store, SETTINGS_KEY)
}

pub fn save_tasks(store: &mut dyn KeyValueStore, tasks: &[Task]) -> Result<(), StorageError> {
    save_json(store, TODOS_KEY, tasks)
}

pub fn save_settings(
    store: &mut dyn KeyValueStore,
    settings: &Settings,
) -> Result<(), StorageError> {
    save_json(store, SETTINGS_KEY, settings)
}
