//! Read-only projections recomputed from the canonical order on every read.

use crate::models::{FilterMode, Settings, Task};

pub fn filtered(tasks: &[Task], mode: FilterMode) -> Vec<&Task> {
    tasks.iter().filter(|task| mode.matches(task)).collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Counts {
    pub total: usize,
    pub active: usize,
    pub completed: usize,
}

impl Counts {
    pub fn of(tasks: &[Task]) -> Self {
        let completed = tasks.iter().filter(|task| task.completed).count();
        Self {
            total: tasks.len(),
            active: tasks.len() - completed,
            completed,
        }
    }

    pub fn for_filter(&self, mode: FilterMode) -> usize {
        match mode {
            FilterMode::All => self.total,
            FilterMode::Active => self.active,
            FilterMode::Done => self.completed,
        }
    }

    /// Whether "Clear completed" has anything to do.
    pub fn has_completed(&self) -> bool {
        self.completed > 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TimeSummary {
    pub total_minutes: u64,
    pub completed_minutes: u64,
}

impl TimeSummary {
    pub fn of(tasks: &[Task]) -> Self {
        let mut summary = Self::default();
        for task in tasks {
            let minutes = u64::from(task.time_estimate.unwrap_or(0));
            summary.total_minutes += minutes;
            if task.completed {
                summary.completed_minutes += minutes;
            }
        }
        summary
    }

    /// 0 when nothing carries an estimate.
    pub fn progress_percentage(&self) -> f64 {
        if self.total_minutes == 0 {
            return 0.0;
        }
        self.completed_minutes as f64 / self.total_minutes as f64 * 100.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProgressView {
    pub label: String,
    pub percentage: f64,
    pub rounded_percentage: u32,
}

/// The progress bar, if it should be drawn at all.
pub fn progress_view(tasks: &[Task], settings: &Settings) -> Option<ProgressView> {
    if !settings.show_progress_bar {
        return None;
    }
    let summary = TimeSummary::of(tasks);
    if summary.total_minutes == 0 {
        return None;
    }
    let percentage = summary.progress_percentage();
    Some(ProgressView {
        label: format!(
            "{} / {} completed",
            format_duration(summary.completed_minutes),
            format_duration(summary.total_minutes)
        ),
        percentage,
        rounded_percentage: percentage.round() as u32,
    })
}

fn plural(quantity: u64, unit: &str) -> String {
    if quantity > 1 {
        format!("{quantity} {unit}s")
    } else {
        format!("{quantity} {unit}")
    }
}

/// `45` → "45 minutes", `60` → "1 hour", `125` → "2 hours 5 minutes".
pub fn format_duration(minutes: u64) -> String {
    if minutes < 60 {
        return format!("{minutes} minutes");
    }
    let hours = minutes / 60;
    let remainder = minutes % 60;
    if remainder == 0 {
        plural(hours, "hour")
    } else {
        format!("{} {}", plural(hours, "hour"), plural(remainder, "minute"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn make_task(id: &str, completed: bool, time_estimate: Option<u32>) -> Task {
        Task {
            id: id.to_string(),
            text: format!("task-{id}"),
            completed,
            created_at: Utc::now(),
            time_estimate,
        }
    }

    #[test]
    fn format_duration_matches_expected_strings() {
        assert_eq!(format_duration(0), "0 minutes");
        assert_eq!(format_duration(1), "1 minutes");
        assert_eq!(format_duration(59), "59 minutes");
        assert_eq!(format_duration(60), "1 hour");
        assert_eq!(format_duration(61), "1 hour 1 minute");
        assert_eq!(format_duration(90), "1 hour 30 minutes");
        assert_eq!(format_duration(120), "2 hours");
        assert_eq!(format_duration(125), "2 hours 5 minutes");
    }

    #[test]
    fn filtered_and_counts_partition_tasks() {
        let tasks = vec![
            make_task("a", false, None),
            make_task("b", true, None),
            make_task("c", false, None),
        ];
        let active: Vec<_> = filtered(&tasks, FilterMode::Active)
            .iter()
            .map(|task| task.id.as_str())
            .collect();
        assert_eq!(active, vec!["a", "c"]);
        assert_eq!(filtered(&tasks, FilterMode::Done).len(), 1);
        assert_eq!(filtered(&tasks, FilterMode::All).len(), 3);

        let counts = Counts::of(&tasks);
        assert_eq!(
            counts,
            Counts {
                total: 3,
                active: 2,
                completed: 1
            }
        );
        for mode in FilterMode::ALL {
            assert_eq!(counts.for_filter(mode), filtered(&tasks, mode).len());
        }
        assert!(counts.has_completed());
        assert!(!Counts::of(&tasks[..1]).has_completed());
    }

    #[test]
    fn progress_is_zero_without_estimates_and_full_when_timed_tasks_done() {
        let untimed = vec![make_task("a", true, None), make_task("b", false, None)];
        assert_eq!(TimeSummary::of(&untimed).progress_percentage(), 0.0);

        let timed = vec![
            make_task("a", true, Some(30)),
            make_task("b", false, None),
            make_task("c", true, Some(90)),
        ];
        let summary = TimeSummary::of(&timed);
        assert_eq!(summary.total_minutes, 120);
        assert_eq!(summary.completed_minutes, 120);
        assert_eq!(summary.progress_percentage(), 100.0);
    }

    #[test]
    fn progress_view_respects_setting_and_empty_totals() {
        let tasks = vec![make_task("a", true, Some(30)), make_task("b", false, Some(60))];
        let view = progress_view(&tasks, &Settings::default()).expect("progress shown");
        assert_eq!(view.label, "30 minutes / 1 hour 30 minutes completed");
        assert_eq!(view.rounded_percentage, 33);

        let hidden = Settings {
            show_progress_bar: false,
            ..Settings::default()
        };
        assert!(progress_view(&tasks, &hidden).is_none());

        let untimed = vec![make_task("a", true, None)];
        assert!(progress_view(&untimed, &Settings::default()).is_none());
    }
}
