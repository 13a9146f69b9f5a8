//! Operations the UI layer calls. Each one mutates `AppState`, persists what
//! changed, then fires the side channels. Nothing here reports an error to the
//! caller: bad input and unknown ids are no-ops, and failed writes or cues are
//! logged and dropped.

use crate::events::{AudioCue, StatePayload, StyleUpdate, CUE_VOLUME};
use crate::models::{FilterMode, Settings, Task};
use crate::reorder;
use crate::state::{AppState, Toggled};
use crate::storage::{self, KeyValueStore};

pub trait CommandCtx {
    fn store(&mut self) -> &mut dyn KeyValueStore;
    fn play_cue(&self, cue: AudioCue, volume: f32) -> Result<(), String>;
    fn apply_styles(&self, update: &StyleUpdate);
    fn emit_state_updated(&self, payload: StatePayload);
}

/// Context for hosts with storage but no audio or styling surface.
pub struct HeadlessCtx<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> HeadlessCtx<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn into_store(self) -> S {
        self.store
    }
}

impl<S: KeyValueStore> CommandCtx for HeadlessCtx<S> {
    fn store(&mut self) -> &mut dyn KeyValueStore {
        &mut self.store
    }

    fn play_cue(&self, cue: AudioCue, _volume: f32) -> Result<(), String> {
        log::trace!("headless: skipping cue {cue:?}");
        Ok(())
    }

    fn apply_styles(&self, _update: &StyleUpdate) {}

    fn emit_state_updated(&self, _payload: StatePayload) {}
}

fn notify(ctx: &impl CommandCtx, state: &AppState) {
    ctx.emit_state_updated(StatePayload {
        tasks: state.tasks().to_vec(),
        settings: state.settings().clone(),
    });
}

fn persist_tasks(ctx: &mut impl CommandCtx, state: &AppState) {
    if let Err(error) = storage::save_tasks(ctx.store(), state.tasks()) {
        log::warn!("failed to persist todos: {error}");
    }
    notify(ctx, state);
}

fn persist_settings(ctx: &mut impl CommandCtx, state: &AppState) {
    if let Err(error) = storage::save_settings(ctx.store(), state.settings()) {
        log::warn!("failed to persist settings: {error}");
    }
    notify(ctx, state);
}

fn cue(ctx: &impl CommandCtx, state: &AppState, cue: AudioCue) {
    if !state.settings().audio_enabled {
        return;
    }
    if let Err(error) = ctx.play_cue(cue, CUE_VOLUME) {
        log::debug!("audio cue {cue:?} failed: {error}");
    }
}

/// Reads both records. Missing or unreadable ones fall back to defaults.
pub fn load_state(ctx: &mut impl CommandCtx) -> AppState {
    let tasks = match storage::load_tasks(&*ctx.store()) {
        Ok(tasks) => tasks.unwrap_or_default(),
        Err(error) => {
            log::warn!("could not load todos, starting empty: {error}");
            Vec::new()
        }
    };
    let saved_settings = match storage::load_settings(&*ctx.store()) {
        Ok(settings) => settings,
        Err(error) => {
            log::warn!("could not load settings, using defaults: {error}");
            None
        }
    };

    let has_saved_settings = saved_settings.is_some();
    let state = AppState::new(tasks, saved_settings.unwrap_or_default());
    if has_saved_settings {
        ctx.apply_styles(&StyleUpdate::from_settings(state.settings()));
    }
    log::info!("loaded {} task(s)", state.tasks().len());
    state
}

pub fn add_task(ctx: &mut impl CommandCtx, state: &mut AppState, raw_text: &str) -> Option<Task> {
    let task = state.store.add(raw_text)?;
    log::debug!("added task {} estimate={:?}", task.id, task.time_estimate);
    persist_tasks(ctx, state);
    cue(ctx, state, AudioCue::Drop);
    Some(task)
}

pub fn toggle_task(ctx: &mut impl CommandCtx, state: &mut AppState, task_id: &str) -> Option<Toggled> {
    let toggled = state.store.toggle(task_id)?;
    persist_tasks(ctx, state);
    if toggled == Toggled::Completed {
        cue(ctx, state, AudioCue::Check);
    }
    Some(toggled)
}

pub fn delete_task(ctx: &mut impl CommandCtx, state: &mut AppState, task_id: &str) -> bool {
    if state.store.remove(task_id).is_none() {
        return false;
    }
    persist_tasks(ctx, state);
    cue(ctx, state, AudioCue::Remove);
    true
}

pub fn clear_completed(ctx: &mut impl CommandCtx, state: &mut AppState) -> usize {
    let removed = state.store.clear_completed();
    if removed > 0 {
        log::debug!("cleared {removed} completed task(s)");
        persist_tasks(ctx, state);
    }
    removed
}

pub fn set_filter(state: &mut AppState, filter: FilterMode) {
    state.filter = filter;
}

pub fn begin_drag(state: &mut AppState, task_id: &str) {
    state.drag.begin(task_id);
}

pub fn note_candidate_drop_index(state: &mut AppState, filtered_index: usize) {
    state.drag.note_candidate_drop_index(filtered_index);
}

pub fn leave_drop_zone(state: &mut AppState) {
    state.drag.leave();
}

/// Returns true when the drop moved a task.
pub fn end_drag(ctx: &mut impl CommandCtx, state: &mut AppState) -> bool {
    if !reorder::end_drag(state) {
        return false;
    }
    persist_tasks(ctx, state);
    cue(ctx, state, AudioCue::Drop);
    true
}

/// Replaces the whole settings record and returns it as stored.
pub fn update_settings(
    ctx: &mut impl CommandCtx,
    state: &mut AppState,
    settings: Settings,
) -> Settings {
    let previous = state.replace_settings(settings);
    if previous == *state.settings() {
        return previous;
    }
    persist_settings(ctx, state);
    if previous.styling_differs(state.settings()) {
        ctx.apply_styles(&StyleUpdate::from_settings(state.settings()));
    }
    state.settings().clone()
}
