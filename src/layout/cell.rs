// Fits a day's scene boxes into one calendar cell.

/// Date label band at the top of every in-range cell.
pub const DATE_BAND_MM: f32 = 5.0;
/// Totals band at the bottom of cells that have scenes.
pub const TOTALS_BAND_MM: f32 = 5.0;
/// Vertical pitch of one scene box slot.
pub const SCENE_SLOT_MM: f32 = 6.0;

/// How many scene boxes a cell shows, and how many fold into "+N more".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellPlan {
    pub shown: usize,
    pub hidden: usize,
}

impl CellPlan {
    pub fn overflow(&self) -> bool {
        self.hidden > 0
    }
}

/// Stack scenes into the cell's usable band. When they don't all fit, the
/// last visible slot is given to the "+N more" marker instead of a box.
pub fn plan_cell(scene_count: usize, cell_height: f32) -> CellPlan {
    if scene_count == 0 {
        return CellPlan { shown: 0, hidden: 0 };
    }
    let usable = cell_height - DATE_BAND_MM - TOTALS_BAND_MM;
    let max_visible = if usable > 0.0 {
        (usable / SCENE_SLOT_MM) as usize
    } else {
        0
    };
    if scene_count <= max_visible {
        CellPlan { shown: scene_count, hidden: 0 }
    } else {
        let shown = max_visible.saturating_sub(1);
        CellPlan { shown, hidden: scene_count - shown }
    }
}

/// Clip a label to `max_chars`, marking the cut with a trailing ellipsis.
pub fn truncate_label(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let keep = max_chars.saturating_sub(3);
    let mut out: String = text.chars().take(keep).collect();
    out.push_str("...");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_day_shows_nothing() {
        assert_eq!(plan_cell(0, 34.0), CellPlan { shown: 0, hidden: 0 });
    }

    #[test]
    fn scenes_that_fit_all_show() {
        // 34mm cell: 24mm usable, four 6mm slots.
        let plan = plan_cell(4, 34.0);
        assert_eq!(plan, CellPlan { shown: 4, hidden: 0 });
        assert!(!plan.overflow());
    }

    #[test]
    fn overflow_trades_the_last_slot_for_the_marker() {
        let plan = plan_cell(5, 34.0);
        assert_eq!(plan, CellPlan { shown: 3, hidden: 2 });
        assert!(plan.overflow());
    }

    #[test]
    fn shown_plus_hidden_is_always_the_total() {
        for count in 0..30 {
            for height in [0.0, 10.0, 16.0, 24.0, 34.0, 50.0, 68.0, 80.0] {
                let plan = plan_cell(count, height);
                assert_eq!(plan.shown + plan.hidden, count, "count {count} height {height}");
                assert_eq!(plan.overflow(), plan.hidden > 0);
            }
        }
    }

    #[test]
    fn cramped_cell_hides_everything_behind_the_marker() {
        let plan = plan_cell(3, 12.0);
        assert_eq!(plan, CellPlan { shown: 0, hidden: 3 });
    }

    #[test]
    fn labels_truncate_on_char_boundaries() {
        assert_eq!(truncate_label("INT. DINER", 16), "INT. DINER");
        assert_eq!(truncate_label("INT. WAREHOUSE - CONTINUOUS", 16), "INT. WAREHOUS...");
        assert_eq!(truncate_label("çççççç", 5), "çç...");
    }
}
