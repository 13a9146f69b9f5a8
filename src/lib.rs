//! Core of a single-user todo notebook: the task store, drag-and-drop reordering
//! over filtered views, and the derived counts and progress the UI renders.
//! The UI itself stays outside and drives everything through `commands`.
pub mod annotation;
pub mod commands;
pub mod events;
pub mod logging;
pub mod models;
pub mod reorder;
pub mod state;
pub mod storage;
pub mod view;

use std::path::PathBuf;

pub use crate::commands::{CommandCtx, HeadlessCtx};
pub use crate::events::{AudioCue, StatePayload, StyleUpdate};
pub use crate::models::{FilterMode, Settings, Task};
pub use crate::state::{AppState, TaskStore, Toggled};
pub use crate::storage::{FileStore, KeyValueStore, MemoryStore, StorageError};

/// Opens (creating if needed) a file-backed notebook under `data_dir`.
///
/// Logging is left to the host: with the `app` feature, call
/// [`logging::init_logging`] with the same directory first.
pub fn open_data_dir(data_dir: PathBuf) -> Result<(HeadlessCtx<FileStore>, AppState), StorageError> {
    let store = FileStore::new(data_dir);
    store.ensure_dirs()?;
    let mut ctx = HeadlessCtx::new(store);
    let state = commands::load_state(&mut ctx);
    Ok((ctx, state))
}
