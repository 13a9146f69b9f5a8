use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub type Timestamp = DateTime<Utc>;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub text: String,
    pub completed: bool,
    pub created_at: Timestamp,
    /// Minutes, taken from an inline annotation like `(30 min)` at creation time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_estimate: Option<u32>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum FilterMode {
    #[default]
    All,
    Active,
    Done,
}

impl FilterMode {
    pub const ALL: [FilterMode; 3] = [FilterMode::All, FilterMode::Active, FilterMode::Done];

    pub fn matches(self, task: &Task) -> bool {
        match self {
            FilterMode::All => true,
            FilterMode::Active => !task.completed,
            FilterMode::Done => task.completed,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FilterMode::All => "All",
            FilterMode::Active => "Active",
            FilterMode::Done => "Done",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default = "default_list_name")]
    pub list_name: String,
    #[serde(default = "default_primary_color")]
    pub primary_color: String,
    #[serde(default = "default_font")]
    pub font: String,
    #[serde(default = "default_true")]
    pub audio_enabled: bool,
    #[serde(default = "default_true")]
    pub show_progress_bar: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            list_name: default_list_name(),
            primary_color: default_primary_color(),
            font: default_font(),
            audio_enabled: true,
            show_progress_bar: true,
        }
    }
}

impl Settings {
    /// Trims the string fields; blank ones fall back to their defaults so the
    /// stored record always has a usable title, colour and font.
    pub fn normalized(mut self) -> Self {
        self.list_name = non_blank_or(self.list_name, default_list_name);
        self.primary_color = non_blank_or(self.primary_color, default_primary_color);
        self.font = non_blank_or(self.font, default_font);
        self
    }

    pub fn styling_differs(&self, other: &Settings) -> bool {
        self.primary_color != other.primary_color
            || self.font != other.font
            || self.list_name != other.list_name
    }
}

fn non_blank_or(value: String, fallback: fn() -> String) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        fallback()
    } else if trimmed.len() == value.len() {
        value
    } else {
        trimmed.to_string()
    }
}

fn default_list_name() -> String {
    "Serena's To-Do List".to_string()
}

fn default_primary_color() -> String {
    // Soft notebook green.
    "#85ce92".to_string()
}

fn default_font() -> String {
    "Arial, Helvetica, sans-serif".to_string()
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaletteOption {
    pub name: &'static str,
    pub value: &'static str,
}

pub const COLOR_OPTIONS: [PaletteOption; 6] = [
    PaletteOption { name: "Green", value: "#85ce92" },
    PaletteOption { name: "Blue", value: "#1aa1bc" },
    PaletteOption { name: "Indigo", value: "#501abc" },
    PaletteOption { name: "Purple", value: "#993fbd" },
    PaletteOption { name: "Pink", value: "#e91e63" },
    PaletteOption { name: "Orange", value: "#f39c12" },
];

pub const FONT_OPTIONS: [PaletteOption; 5] = [
    PaletteOption { name: "Sans-serif", value: "Arial, Helvetica, sans-serif" },
    PaletteOption { name: "Serif", value: "Garamond, serif" },
    PaletteOption { name: "Monospace", value: "\"Courier New\", Courier, monospace" },
    PaletteOption { name: "Cursive", value: "\"Bradley Hand\", cursive" },
    PaletteOption { name: "Fantasy", value: "Luminari, fantasy" },
];
