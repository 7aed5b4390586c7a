// Schedule data model: scenes, shoot days, and the project that owns them.
//
// A scene lives in exactly one place at a time: the unscheduled pool or a
// single shoot day's list. Every mutation below keeps that exclusive, and
// keeps the day list sorted ascending and contiguous by date.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("no scene with id {0}")]
    SceneNotFound(Uuid),
    #[error("no shoot day on {0}")]
    NoSuchDay(NaiveDate),
    #[error("invalid date range: {start} to {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DayNight {
    Day,
    Night,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub id: Uuid,
    pub title: String,
    /// Script-page length in eighths of a page.
    pub eighths: u32,
    pub estimated_minutes: u32,
    pub day_night: DayNight,
}

impl Scene {
    pub fn new(title: impl Into<String>, eighths: u32, estimated_minutes: u32, day_night: DayNight) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            eighths,
            estimated_minutes,
            day_night,
        }
    }

    /// Copy of this scene under a fresh id, titled as a copy.
    pub fn duplicate(&self) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: format!("{} (Copy)", self.title),
            ..self.clone()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShootDay {
    pub id: Uuid,
    pub date: NaiveDate,
    /// Insertion order is the shooting order and the rendering order.
    pub scenes: Vec<Scene>,
}

impl ShootDay {
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            date,
            scenes: Vec::new(),
        }
    }

    pub fn total_eighths(&self) -> u32 {
        self.scenes.iter().map(|s| s.eighths).sum()
    }

    pub fn total_minutes(&self) -> u32 {
        self.scenes.iter().map(|s| s.estimated_minutes).sum()
    }

    pub fn scenes_of(&self, kind: DayNight) -> impl Iterator<Item = &Scene> {
        self.scenes.iter().filter(move |s| s.day_night == kind)
    }

    /// (eighths, minutes) for one side of the day/night split.
    pub fn subtotal(&self, kind: DayNight) -> (u32, u32) {
        self.scenes_of(kind)
            .fold((0, 0), |(e, m), s| (e + s.eighths, m + s.estimated_minutes))
    }
}

/// Where a scene should end up after a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneSlot {
    Pool,
    Day(NaiveDate),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Totals {
    pub scenes: usize,
    pub eighths: u32,
    pub minutes: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub title: String,
    pub created_at: DateTime<Utc>,
    /// Date-range edits slide scene assignments when true, keep them pinned
    /// to their calendar dates when false.
    #[serde(default = "default_shift")]
    pub shift_on_range_change: bool,
    pub unscheduled: Vec<Scene>,
    pub days: Vec<ShootDay>,
}

fn default_shift() -> bool {
    true
}

impl Project {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            created_at: Utc::now(),
            shift_on_range_change: true,
            unscheduled: Vec::new(),
            days: Vec::new(),
        }
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.days.first().map(|d| d.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.days.last().map(|d| d.date)
    }

    pub fn day_on(&self, date: NaiveDate) -> Option<&ShootDay> {
        self.days.iter().find(|d| d.date == date)
    }

    /// Totals over scheduled scenes only; the pool is reported separately.
    pub fn scheduled_totals(&self) -> Totals {
        self.days.iter().fold(Totals::default(), |acc, day| Totals {
            scenes: acc.scenes + day.scenes.len(),
            eighths: acc.eighths + day.total_eighths(),
            minutes: acc.minutes + day.total_minutes(),
        })
    }

    /// Move a scene between the pool and a day (or day to day) in one step.
    ///
    /// The destination is validated before anything is removed, so a failed
    /// move leaves the project untouched.
    pub fn move_scene(&mut self, scene_id: Uuid, dest: SceneSlot) -> Result<(), ScheduleError> {
        if let SceneSlot::Day(date) = dest {
            if self.day_on(date).is_none() {
                return Err(ScheduleError::NoSuchDay(date));
            }
        }
        let scene = self.take_scene(scene_id)?;
        match dest {
            SceneSlot::Pool => self.unscheduled.push(scene),
            SceneSlot::Day(date) => {
                match self.days.iter_mut().find(|d| d.date == date) {
                    Some(day) => day.scenes.push(scene),
                    // Checked above; restore rather than lose the scene.
                    None => {
                        self.unscheduled.push(scene);
                        return Err(ScheduleError::NoSuchDay(date));
                    }
                }
            }
        }
        Ok(())
    }

    fn take_scene(&mut self, scene_id: Uuid) -> Result<Scene, ScheduleError> {
        if let Some(pos) = self.unscheduled.iter().position(|s| s.id == scene_id) {
            return Ok(self.unscheduled.remove(pos));
        }
        for day in &mut self.days {
            if let Some(pos) = day.scenes.iter().position(|s| s.id == scene_id) {
                return Ok(day.scenes.remove(pos));
            }
        }
        Err(ScheduleError::SceneNotFound(scene_id))
    }

    /// Duplicate a scene wherever it lives, inserting the copy right after
    /// the original.
    pub fn duplicate_scene(&mut self, scene_id: Uuid) -> Result<Uuid, ScheduleError> {
        if let Some(pos) = self.unscheduled.iter().position(|s| s.id == scene_id) {
            let copy = self.unscheduled[pos].duplicate();
            let id = copy.id;
            self.unscheduled.insert(pos + 1, copy);
            return Ok(id);
        }
        for day in &mut self.days {
            if let Some(pos) = day.scenes.iter().position(|s| s.id == scene_id) {
                let copy = day.scenes[pos].duplicate();
                let id = copy.id;
                day.scenes.insert(pos + 1, copy);
                return Ok(id);
            }
        }
        Err(ScheduleError::SceneNotFound(scene_id))
    }

    /// Rebuild the contiguous day list for `[start, end]`.
    ///
    /// Shift mode slides existing days onto the new dates by position; lock
    /// mode keeps them pinned to their calendar dates. Either way, scenes on
    /// days that fall off the calendar return to the pool in order.
    pub fn set_date_range(&mut self, start: NaiveDate, end: NaiveDate) -> Result<(), ScheduleError> {
        if end < start {
            return Err(ScheduleError::InvalidRange { start, end });
        }
        let dates = date_span(start, end);
        let old = std::mem::take(&mut self.days);

        if self.shift_on_range_change {
            let mut old = old.into_iter();
            for date in dates {
                match old.next() {
                    Some(mut day) => {
                        day.date = date;
                        self.days.push(day);
                    }
                    None => self.days.push(ShootDay::empty(date)),
                }
            }
            for day in old {
                self.unscheduled.extend(day.scenes);
            }
        } else {
            let mut by_date = BTreeMap::new();
            for day in old {
                if day.date >= start && day.date <= end {
                    by_date.insert(day.date, day);
                } else {
                    self.unscheduled.extend(day.scenes);
                }
            }
            for date in dates {
                self.days
                    .push(by_date.remove(&date).unwrap_or_else(|| ShootDay::empty(date)));
            }
        }
        Ok(())
    }
}

fn date_span(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    let mut dates = Vec::new();
    let mut date = start;
    while date <= end {
        dates.push(date);
        let Some(next) = date.succ_opt() else { break };
        date = next;
    }
    dates
}
