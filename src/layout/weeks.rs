// Groups an ordered shoot-day list into Sunday-first calendar week rows.

use chrono::{Datelike, NaiveDate};

use crate::model::ShootDay;

pub const DAYS_PER_WEEK: usize = 7;

/// One column slot of a week row.
#[derive(Debug, Clone, Copy)]
pub enum Slot<'a> {
    /// Calendar date outside the schedule's range. Stays empty; the grouper
    /// never synthesizes dates past the ends.
    Unused,
    /// In-range date with no scheduled shoot day.
    Empty(NaiveDate),
    Day(&'a ShootDay),
}

impl Slot<'_> {
    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            Slot::Unused => None,
            Slot::Empty(date) => Some(*date),
            Slot::Day(day) => Some(day.date),
        }
    }

    pub fn scene_count(&self) -> usize {
        match self {
            Slot::Day(day) => day.scenes.len(),
            _ => 0,
        }
    }
}

/// A full Sunday-to-Saturday row of the calendar grid.
#[derive(Debug, Clone)]
pub struct WeekRow<'a> {
    pub slots: [Slot<'a>; DAYS_PER_WEEK],
}

impl<'a> WeekRow<'a> {
    fn unused() -> Self {
        Self {
            slots: [Slot::Unused; DAYS_PER_WEEK],
        }
    }

    /// Densest day in the row; drives the row's target height.
    pub fn max_scene_count(&self) -> usize {
        self.slots.iter().map(Slot::scene_count).max().unwrap_or(0)
    }
}

/// Walk the calendar one day at a time from the first to the last shoot
/// date, filling weekday slots and closing a row every Saturday (and at the
/// final date). Dates with no matching shoot day become `Slot::Empty`.
pub fn group_into_weeks(days: &[ShootDay]) -> Vec<WeekRow<'_>> {
    let (Some(first), Some(last)) = (days.first(), days.last()) else {
        return Vec::new();
    };
    let end = last.date;

    let mut rows = Vec::new();
    let mut row = WeekRow::unused();
    let mut pending = days.iter().peekable();
    let mut date = first.date;
    loop {
        let weekday = date.weekday().num_days_from_sunday() as usize;
        row.slots[weekday] = match pending.next_if(|day| day.date == date) {
            Some(day) => Slot::Day(day),
            None => Slot::Empty(date),
        };
        if weekday == DAYS_PER_WEEK - 1 || date == end {
            rows.push(std::mem::replace(&mut row, WeekRow::unused()));
        }
        if date == end {
            break;
        }
        let Some(next) = date.succ_opt() else { break };
        date = next;
    }
    rows
}
