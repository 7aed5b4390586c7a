// Walks height-planned week rows onto fixed-size pages.
//
// PDF coordinates grow upward, so the cursor starts at the content top and
// rows stack downward. A row is never split: if it can't clear the bottom
// limit it defers whole to the next page. The one exception keeping the
// walk finite is a row taller than a page, which is placed at the top of a
// fresh page and allowed to overflow.

/// US Letter, landscape.
pub const PAGE_WIDTH_MM: f32 = 279.4;
pub const PAGE_HEIGHT_MM: f32 = 215.9;

pub const MARGIN_MM: f32 = 15.0;

/// Title/header band reserved on page 1 only.
pub const HEADER_HEIGHT_MM: f32 = 24.0;

/// Rows stop this far above the bottom margin.
pub const PAGE_SAFETY_MM: f32 = 2.0;

/// Tolerance for the fits-on-page check, so an exact fit (which the
/// single-page scaling produces) never defers on rounding noise.
const FIT_EPSILON_MM: f32 = 0.05;

use super::weeks::DAYS_PER_WEEK;

#[derive(Debug, Clone, Copy)]
pub struct PageGeometry {
    pub width: f32,
    pub height: f32,
    pub margin: f32,
    pub header_height: f32,
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self {
            width: PAGE_WIDTH_MM,
            height: PAGE_HEIGHT_MM,
            margin: MARGIN_MM,
            header_height: HEADER_HEIGHT_MM,
        }
    }
}

impl PageGeometry {
    pub fn content_width(&self) -> f32 {
        self.width - 2.0 * self.margin
    }

    pub fn column_width(&self) -> f32 {
        self.content_width() / DAYS_PER_WEEK as f32
    }

    /// Left edge of column `i`; `i == 7` is the right edge of the grid.
    pub fn column_x(&self, i: usize) -> f32 {
        self.margin + i as f32 * self.column_width()
    }

    /// Where rows may start on the given page (header only on page 1).
    pub fn content_top(&self, page_index: usize) -> f32 {
        let header = if page_index == 0 { self.header_height } else { 0.0 };
        self.height - self.margin - header
    }

    pub fn bottom_limit(&self) -> f32 {
        self.margin + PAGE_SAFETY_MM
    }

    /// Height the fit pass may fill on page 1: content top down to the
    /// bottom limit.
    pub fn first_page_fit_height(&self) -> f32 {
        self.content_top(0) - self.bottom_limit()
    }
}

/// A week row placed on a page, by input index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedRow {
    pub index: usize,
    pub top: f32,
    pub height: f32,
}

impl PlacedRow {
    pub fn bottom(&self) -> f32 {
        self.top - self.height
    }
}

/// One page's worth of placed rows, plus the horizontal grid boundaries
/// captured while placing them (top of the first row, then each bottom).
#[derive(Debug, Clone, Default)]
pub struct PageLayout {
    pub rows: Vec<PlacedRow>,
    pub row_lines: Vec<f32>,
}

impl PageLayout {
    /// Vertical span of the grid actually drawn on this page.
    pub fn grid_extent(&self) -> Option<(f32, f32)> {
        match (self.row_lines.first(), self.row_lines.last()) {
            (Some(&top), Some(&bottom)) if self.row_lines.len() >= 2 => Some((top, bottom)),
            _ => None,
        }
    }
}

/// Place every row, in order, unsplit, onto as many pages as needed.
pub fn paginate(heights: &[f32], geom: &PageGeometry) -> Vec<PageLayout> {
    let mut pages = Vec::new();
    let mut index = 0;
    while index < heights.len() {
        let mut y = geom.content_top(pages.len());
        let mut page = PageLayout::default();
        while index < heights.len() {
            let height = heights[index];
            let fits = y - height >= geom.bottom_limit() - FIT_EPSILON_MM;
            if !fits && !page.rows.is_empty() {
                break;
            }
            if page.rows.is_empty() {
                page.row_lines.push(y);
            }
            page.rows.push(PlacedRow { index, top: y, height });
            y -= height;
            page.row_lines.push(y);
            index += 1;
        }
        pages.push(page);
    }
    pages
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geom() -> PageGeometry {
        PageGeometry::default()
    }

    fn placed_indices(pages: &[PageLayout]) -> Vec<usize> {
        pages
            .iter()
            .flat_map(|p| p.rows.iter().map(|r| r.index))
            .collect()
    }

    #[test]
    fn no_rows_means_no_pages() {
        assert!(paginate(&[], &geom()).is_empty());
    }

    #[test]
    fn every_row_is_placed_once_in_order() {
        let heights = vec![50.0; 12];
        let pages = paginate(&heights, &geom());
        assert_eq!(placed_indices(&pages), (0..12).collect::<Vec<_>>());
    }

    #[test]
    fn rows_defer_whole_to_the_next_page() {
        // Page 1 rows area: 215.9 - 15 - 24 - 15 = 161.9mm, so a second
        // 80mm row would land 0.1mm inside the 2mm safety line and defers.
        // The headerless second page takes two.
        let heights = vec![80.0, 80.0, 80.0];
        let pages = paginate(&heights, &geom());
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].rows.len(), 1);
        assert_eq!(pages[1].rows.len(), 2);
        // The deferred row starts at the full content top, no header band.
        assert_eq!(pages[1].rows[0].top, geom().content_top(1));
    }

    #[test]
    fn header_band_is_reserved_on_page_one_only() {
        let g = geom();
        assert_eq!(g.content_top(0), g.height - g.margin - g.header_height);
        assert_eq!(g.content_top(1), g.height - g.margin);

        let heights = vec![50.0, 50.0, 50.0, 50.0];
        let pages = paginate(&heights, &g);
        assert_eq!(pages[0].rows[0].top, g.content_top(0));
        if pages.len() > 1 {
            assert_eq!(pages[1].rows[0].top, g.content_top(1));
        }
    }

    #[test]
    fn placed_rows_respect_the_bottom_limit() {
        let heights = vec![24.0, 34.0, 50.0, 68.0, 80.0, 16.0, 34.0, 50.0];
        let g = geom();
        for (page_index, page) in paginate(&heights, &g).iter().enumerate() {
            for row in &page.rows {
                assert!(row.top <= g.content_top(page_index) + 1e-3);
                assert!(row.bottom() >= g.bottom_limit() - 1e-3);
            }
        }
    }

    #[test]
    fn oversized_row_still_placed_on_fresh_page() {
        // Known limitation: a row taller than the page overflows the bottom
        // rather than stalling the walk or being split.
        let heights = vec![50.0, 500.0, 50.0];
        let g = geom();
        let pages = paginate(&heights, &g);
        assert_eq!(placed_indices(&pages), vec![0, 1, 2]);
        assert_eq!(pages.len(), 3);
        let oversized = pages[1].rows[0];
        assert_eq!(oversized.index, 1);
        assert_eq!(oversized.top, g.content_top(1));
        assert!(oversized.bottom() < g.bottom_limit());
    }

    #[test]
    fn row_lines_bound_each_placed_row() {
        let heights = vec![30.0, 40.0, 50.0];
        let pages = paginate(&heights, &geom());
        assert_eq!(pages.len(), 1);
        let page = &pages[0];
        assert_eq!(page.row_lines.len(), page.rows.len() + 1);
        for (i, row) in page.rows.iter().enumerate() {
            assert_eq!(page.row_lines[i], row.top);
            assert_eq!(page.row_lines[i + 1], row.bottom());
        }
        let (top, bottom) = page.grid_extent().unwrap();
        assert_eq!(top, page.rows[0].top);
        assert_eq!(bottom, page.rows[2].bottom());
    }

    #[test]
    fn seven_columns_eight_boundaries() {
        let g = geom();
        assert!((g.column_x(7) - (g.width - g.margin)).abs() < 1e-3);
        assert!((g.column_width() * 7.0 - g.content_width()).abs() < 1e-3);
    }
}
