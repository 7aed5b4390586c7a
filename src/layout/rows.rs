// Target heights for week rows, from a content-density bucket function.

use super::weeks::WeekRow;

/// Floor for any week row, and the floor the fit pass never squeezes below.
pub const ROW_HEIGHT_MIN_MM: f32 = 16.0;
pub const ROW_HEIGHT_MAX_MM: f32 = 80.0;

/// Step function from the densest day in a week to a row height.
pub fn target_row_height(max_scenes: usize) -> f32 {
    match max_scenes {
        0 => ROW_HEIGHT_MIN_MM,
        1..=2 => 24.0,
        3..=4 => 34.0,
        5..=7 => 50.0,
        8..=10 => 68.0,
        _ => ROW_HEIGHT_MAX_MM,
    }
}

/// Organic per-row heights; this is what pagination consumes, so a week
/// keeps the same height whichever page it lands on.
pub fn plan_row_heights(weeks: &[WeekRow]) -> Vec<f32> {
    weeks
        .iter()
        .map(|week| target_row_height(week.max_scene_count()))
        .collect()
}

/// Fit the rows to a single column of `available` height: scale down
/// uniformly (never below the row minimum) when over, grow each row by its
/// share of the slack when under. An approximation for the fit-to-one-page
/// view; pagination stays the authoritative constraint.
pub fn fit_row_heights(heights: &[f32], available: f32) -> Vec<f32> {
    let naive: f32 = heights.iter().sum();
    if naive <= 0.0 {
        return heights.to_vec();
    }
    let scale = available / naive;
    heights
        .iter()
        .map(|&h| {
            if scale < 1.0 {
                (h * scale).max(ROW_HEIGHT_MIN_MM)
            } else {
                h * scale
            }
        })
        .collect()
}
