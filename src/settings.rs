//! User settings persisted in the OS config directory.

use std::path::{Path, PathBuf};

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::calendar::interaction::DEFAULT_DRAG_THRESHOLD;
use crate::calendar::EventFilter;
use crate::model::ViewMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WeekStart {
    Monday,
    Sunday,
}

impl WeekStart {
    pub fn weekday(&self) -> Weekday {
        match self {
            WeekStart::Monday => Weekday::Mon,
            WeekStart::Sunday => Weekday::Sun,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub week_start: WeekStart,
    pub default_view: ViewMode,
    /// Months shown when switching to the continuous view.
    pub continuous_months: u32,
    /// Layers per week row before "+N more" kicks in (continuous view).
    pub max_visible_layers: usize,
    pub drag_threshold: f32,
    /// Whether cascades clamp dependents into the container by default.
    pub clamp_cascade: bool,
    pub filter: EventFilter,
    pub last_file: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            week_start: WeekStart::Monday,
            default_view: ViewMode::Month,
            continuous_months: 3,
            max_visible_layers: 3,
            drag_threshold: DEFAULT_DRAG_THRESHOLD,
            clamp_cascade: true,
            filter: EventFilter::default(),
            last_file: None,
        }
    }
}

impl Settings {
    /// Directory holding `settings.json`.
    pub fn config_dir() -> PathBuf {
        directories::ProjectDirs::from("", "", "CampaignPlanner")
            .map(|dirs| dirs.config_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."))
    }

    pub fn default_path() -> PathBuf {
        Self::config_dir().join("settings.json")
    }

    /// Load from `path`, falling back to defaults when missing or unreadable.
    pub fn load(path: &Path) -> Self {
        let Ok(contents) = std::fs::read_to_string(path) else {
            tracing::debug!(path = %path.display(), "no settings file, using defaults");
            return Self::default();
        };
        match serde_json::from_str(&contents) {
            Ok(settings) => settings,
            Err(err) => {
                tracing::warn!(path = %path.display(), %err, "ignoring corrupt settings file");
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(path, json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");
        let settings = Settings {
            week_start: WeekStart::Sunday,
            default_view: ViewMode::Continuous { months: 4 },
            clamp_cascade: false,
            ..Default::default()
        };
        settings.save(&path).unwrap();
        assert_eq!(Settings::load(&path), settings);
    }

    #[test]
    fn partial_and_corrupt_files_fall_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{ "max_visible_layers": 5 }"#).unwrap();
        let settings = Settings::load(&path);
        assert_eq!(settings.max_visible_layers, 5);
        assert_eq!(settings.week_start, WeekStart::Monday);

        std::fs::write(&path, "not json").unwrap();
        assert_eq!(Settings::load(&path), Settings::default());
    }
}
