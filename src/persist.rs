// Project files: JSON on disk, with a fallback decode for files written by
// older builds (pre-id schema, fractional page counts, `name` for `title`).

use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use uuid::Uuid;

use crate::model::{DayNight, Project, Scene, ShootDay};
use crate::AppError;

pub fn load_project(path: &str) -> Result<Project, AppError> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| AppError::ProjectError(format!("{}: {}", path, e)))?;
    decode_project(&content).map_err(|e| AppError::ProjectError(format!("{}: {}", path, e)))
}

pub fn save_project(project: &Project, path: &str) -> Result<(), AppError> {
    let json = serde_json::to_string_pretty(project)
        .map_err(|e| AppError::ProjectError(e.to_string()))?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Decode the current shape; on failure retry as the legacy shape. When
/// both fail, the current-shape error is the one reported.
pub fn decode_project(json: &str) -> Result<Project, serde_json::Error> {
    match serde_json::from_str::<Project>(json) {
        Ok(project) => Ok(project),
        Err(primary) => match serde_json::from_str::<LegacyProject>(json) {
            Ok(legacy) => Ok(legacy.into_project()),
            Err(_) => Err(primary),
        },
    }
}

/// File shape written before scenes carried ids: `name` instead of `title`,
/// fractional `pages` instead of integer eighths, day/night as a flag.
#[derive(Debug, Deserialize)]
struct LegacyProject {
    name: String,
    #[serde(default)]
    unscheduled: Vec<LegacyScene>,
    days: Vec<LegacyDay>,
}

#[derive(Debug, Deserialize)]
struct LegacyDay {
    date: NaiveDate,
    scenes: Vec<LegacyScene>,
}

#[derive(Debug, Deserialize)]
struct LegacyScene {
    title: String,
    #[serde(default)]
    pages: f64,
    #[serde(default)]
    minutes: u32,
    #[serde(default)]
    night: bool,
}

impl LegacyProject {
    fn into_project(self) -> Project {
        Project {
            title: self.name,
            created_at: Utc::now(),
            shift_on_range_change: true,
            unscheduled: self.unscheduled.into_iter().map(LegacyScene::into_scene).collect(),
            days: self
                .days
                .into_iter()
                .map(|day| ShootDay {
                    id: Uuid::new_v4(),
                    date: day.date,
                    scenes: day.scenes.into_iter().map(LegacyScene::into_scene).collect(),
                })
                .collect(),
        }
    }
}

impl LegacyScene {
    fn into_scene(self) -> Scene {
        Scene {
            id: Uuid::new_v4(),
            title: self.title,
            eighths: (self.pages * 8.0).round().max(0.0) as u32,
            estimated_minutes: self.minutes,
            day_night: if self.night { DayNight::Night } else { DayNight::Day },
        }
    }
}
