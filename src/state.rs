use std::collections::HashSet;

use chrono::Utc;
use uuid::Uuid;

use crate::annotation::parse_time_annotation;
use crate::models::{FilterMode, Settings, Task};
use crate::reorder::DragSession;

/// Which way a toggle flipped a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggled {
    Completed,
    Reopened,
}

/// Canonical task order. Every mutation keeps untouched tasks in their
/// relative order and ids stay unique.
#[derive(Debug, Clone, Default)]
pub struct TaskStore {
    tasks: Vec<Task>,
}

impl TaskStore {
    /// Builds a store from persisted records, dropping repeated ids (first wins).
    pub fn new(tasks: Vec<Task>) -> Self {
        let mut seen = HashSet::new();
        let before = tasks.len();
        let tasks: Vec<Task> = tasks
            .into_iter()
            .filter(|task| seen.insert(task.id.clone()))
            .collect();
        if tasks.len() != before {
            log::warn!(
                "dropped {} task(s) with duplicate ids on load",
                before - tasks.len()
            );
        }
        Self { tasks }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn contains(&self, task_id: &str) -> bool {
        self.position(task_id).is_some()
    }

    pub fn position(&self, task_id: &str) -> Option<usize> {
        self.tasks.iter().position(|task| task.id == task_id)
    }

    fn next_id(&self) -> String {
        loop {
            let id = Uuid::new_v4().to_string();
            if !self.contains(&id) {
                return id;
            }
        }
    }

    /// Appends a task parsed from `raw_text`; blank input adds nothing.
    pub fn add(&mut self, raw_text: &str) -> Option<Task> {
        if raw_text.trim().is_empty() {
            return None;
        }
        let parsed = parse_time_annotation(raw_text);
        let task = Task {
            id: self.next_id(),
            text: parsed.text,
            completed: false,
            created_at: Utc::now(),
            time_estimate: parsed.time_estimate,
        };
        self.tasks.push(task.clone());
        Some(task)
    }

    pub fn toggle(&mut self, task_id: &str) -> Option<Toggled> {
        let task = self.tasks.iter_mut().find(|task| task.id == task_id)?;
        task.completed = !task.completed;
        Some(if task.completed {
            Toggled::Completed
        } else {
            Toggled::Reopened
        })
    }

    pub fn remove(&mut self, task_id: &str) -> Option<Task> {
        let index = self.position(task_id)?;
        Some(self.tasks.remove(index))
    }

    /// Returns how many tasks were dropped.
    pub fn clear_completed(&mut self) -> usize {
        let before = self.tasks.len();
        self.tasks.retain(|task| !task.completed);
        before - self.tasks.len()
    }

    /// Moves a task to `target` in canonical order, clamped to the end.
    /// Used by drop resolution; returns false when the id is unknown.
    pub fn move_to(&mut self, task_id: &str, target: usize) -> bool {
        let Some(index) = self.position(task_id) else {
            return false;
        };
        let mut next = self.tasks.clone();
        let task = next.remove(index);
        let target = target.min(next.len());
        next.insert(target, task);
        self.replace(next);
        true
    }

    /// Installs a whole new order in one assignment.
    pub fn replace(&mut self, tasks: Vec<Task>) {
        self.tasks = tasks;
    }
}

/// The single owner of everything the list needs at runtime: canonical order,
/// settings, the active filter and the in-flight drag gesture.
#[derive(Debug, Default)]
pub struct AppState {
    pub store: TaskStore,
    settings: Settings,
    pub filter: FilterMode,
    pub drag: DragSession,
}

impl AppState {
    pub fn new(tasks: Vec<Task>, settings: Settings) -> Self {
        Self {
            store: TaskStore::new(tasks),
            settings: settings.normalized(),
            filter: FilterMode::default(),
            drag: DragSession::default(),
        }
    }

    pub fn tasks(&self) -> &[Task] {
        self.store.tasks()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Swaps in a whole settings record and hands back the previous one.
    pub fn replace_settings(&mut self, settings: Settings) -> Settings {
        std::mem::replace(&mut self.settings, settings.normalized())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_task(id: &str, completed: bool) -> Task {
        Task {
            id: id.to_string(),
            text: format!("task-{id}"),
            completed,
            created_at: Utc::now(),
            time_estimate: None,
        }
    }

    fn ids(store: &TaskStore) -> Vec<&str> {
        store.tasks().iter().map(|task| task.id.as_str()).collect()
    }

    #[test]
    fn add_parses_annotation_and_appends() {
        let mut store = TaskStore::default();
        let first = store.add("Task (30 min)").expect("task added");
        assert_eq!(first.text, "Task");
        assert_eq!(first.time_estimate, Some(30));
        assert!(!first.completed);

        let second = store.add("Plain task").expect("task added");
        assert_eq!(second.time_estimate, None);
        assert_eq!(ids(&store), vec![first.id.as_str(), second.id.as_str()]);
    }

    #[test]
    fn add_rejects_blank_input() {
        let mut store = TaskStore::default();
        assert!(store.add("").is_none());
        assert!(store.add("   \t").is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn ids_stay_unique_across_adds_and_removes() {
        let mut store = TaskStore::default();
        for round in 0..50 {
            let task = store.add(&format!("task {round}")).expect("task added");
            if round % 3 == 0 {
                store.remove(&task.id);
            }
        }
        let unique: HashSet<_> = store.tasks().iter().map(|task| &task.id).collect();
        assert_eq!(unique.len(), store.len());
    }

    #[test]
    fn new_drops_duplicate_ids_keeping_first() {
        let mut dup = make_task("a", true);
        dup.text = "second".to_string();
        let store = TaskStore::new(vec![make_task("a", false), make_task("b", false), dup]);
        assert_eq!(ids(&store), vec!["a", "b"]);
        assert_eq!(store.tasks()[0].text, "task-a");
    }

    #[test]
    fn toggle_reports_direction_and_round_trips() {
        let mut store = TaskStore::new(vec![make_task("a", false), make_task("b", false)]);
        let before = store.tasks().to_vec();

        assert_eq!(store.toggle("a"), Some(Toggled::Completed));
        assert!(store.tasks()[0].completed);
        assert_eq!(store.toggle("a"), Some(Toggled::Reopened));
        assert_eq!(store.tasks(), before.as_slice());

        // Missing ids are a no-op.
        assert_eq!(store.toggle("missing"), None);
        assert_eq!(store.tasks(), before.as_slice());
    }

    #[test]
    fn remove_and_clear_completed_keep_relative_order() {
        let mut store = TaskStore::new(vec![
            make_task("a", true),
            make_task("b", false),
            make_task("c", true),
            make_task("d", false),
            make_task("e", false),
        ]);
        assert!(store.remove("missing").is_none());
        assert_eq!(store.remove("d").map(|task| task.id), Some("d".to_string()));
        assert_eq!(ids(&store), vec!["a", "b", "c", "e"]);

        assert_eq!(store.clear_completed(), 2);
        assert_eq!(ids(&store), vec!["b", "e"]);
        assert_eq!(store.clear_completed(), 0);
    }

    #[test]
    fn move_to_places_task_and_clamps_target() {
        let mut store = TaskStore::new(vec![
            make_task("a", false),
            make_task("b", false),
            make_task("c", false),
        ]);
        assert!(store.move_to("a", 1));
        assert_eq!(ids(&store), vec!["b", "a", "c"]);
        assert!(store.move_to("c", 0));
        assert_eq!(ids(&store), vec!["c", "b", "a"]);
        assert!(store.move_to("c", 99));
        assert_eq!(ids(&store), vec!["b", "a", "c"]);
        assert!(!store.move_to("missing", 0));
    }

    #[test]
    fn replace_settings_normalizes_and_returns_previous() {
        let mut state = AppState::new(Vec::new(), Settings::default());
        let next = Settings {
            list_name: "  Errands ".to_string(),
            ..Settings::default()
        };
        let previous = state.replace_settings(next);
        assert_eq!(previous, Settings::default());
        assert_eq!(state.settings().list_name, "Errands");
    }
}
