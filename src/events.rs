use crate::models::{Settings, Task};

pub const CUE_VOLUME: f32 = 0.4;

/// Hex alpha appended to the accent colour for drop shadows (~40% opacity).
const SHADOW_ALPHA_SUFFIX: &str = "66";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioCue {
    /// Task added or dropped into a new place.
    Drop,
    /// Task became completed.
    Check,
    /// Task deleted.
    Remove,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleUpdate {
    pub primary_color: String,
    pub shadow_color: String,
    pub font: String,
    pub title: String,
}

impl StyleUpdate {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            primary_color: settings.primary_color.clone(),
            shadow_color: format!("{}{SHADOW_ALPHA_SUFFIX}", settings.primary_color),
            font: settings.font.clone(),
            title: settings.list_name.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatePayload {
    pub tasks: Vec<Task>,
    pub settings: Settings,
}
