// Renders a project's calendar onto landscape pages and writes the PDF.
//
// Geometry comes from `crate::layout`; this module only turns placed rows
// into printpdf draw calls. Text runs take the current fill color, so every
// text helper re-asserts its color after the box fills.

use printpdf::path::{PaintMode, WindingOrder};
use printpdf::*;
use std::fs::File;
use std::io::BufWriter;

use crate::layout::cell::{plan_cell, truncate_label, DATE_BAND_MM, SCENE_SLOT_MM};
use crate::layout::pages::{paginate, PageGeometry, PageLayout, PlacedRow};
use crate::layout::rows::{fit_row_heights, plan_row_heights};
use crate::layout::weeks::{group_into_weeks, Slot, WeekRow, DAYS_PER_WEEK};
use crate::model::{DayNight, Project, ShootDay};
use crate::parse::{format_eighths, format_minutes};
use crate::AppError;

/// Font sizes in points
const TITLE_FONT_SIZE: f32 = 18.0;
const NORMAL_FONT_SIZE: f32 = 11.0;
const SMALL_FONT_SIZE: f32 = 9.0;
const SCENE_FONT_SIZE: f32 = 7.0;

/// Scene boxes sit this far inside their column
const SCENE_BOX_INSET_MM: f32 = 0.8;
/// Box height within the 6mm slot pitch; the rest is the gap
const SCENE_BOX_HEIGHT_MM: f32 = 5.0;
const SCENE_TITLE_MAX_CHARS: usize = 18;

const WEEKDAY_LABELS: [&str; DAYS_PER_WEEK] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

fn black() -> Color {
    Color::Rgb(Rgb::new(0.0, 0.0, 0.0, None))
}

fn grid_gray() -> Color {
    Color::Rgb(Rgb::new(0.45, 0.45, 0.45, None))
}

fn scene_fill(kind: DayNight) -> Color {
    match kind {
        DayNight::Day => Color::Rgb(Rgb::new(1.0, 0.94, 0.78, None)),
        DayNight::Night => Color::Rgb(Rgb::new(0.78, 0.82, 0.91, None)),
    }
}

/// Lay out and write the whole calendar. Returns the page count.
///
/// `single_page` squeezes the week rows toward one page before pagination;
/// pagination still decides the real page breaks.
pub fn render_schedule(project: &Project, output_path: &str, single_page: bool) -> Result<usize, AppError> {
    let geom = PageGeometry::default();
    let weeks = group_into_weeks(&project.days);
    let mut heights = plan_row_heights(&weeks);
    if single_page {
        heights = fit_row_heights(&heights, geom.first_page_fit_height());
    }
    let pages = paginate(&heights, &geom);

    let (doc, page1, layer1) = PdfDocument::new(
        &project.title,
        Mm(geom.width),
        Mm(geom.height),
        "Layer 1",
    );
    let font_regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| AppError::PdfError(e.to_string()))?;
    let font_bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| AppError::PdfError(e.to_string()))?;

    let mut layer = doc.get_page(page1).get_layer(layer1);
    draw_header(&layer, &font_regular, &font_bold, project, &geom);

    for (page_index, page) in pages.iter().enumerate() {
        if page_index > 0 {
            let (next_page, next_layer) = doc.add_page(Mm(geom.width), Mm(geom.height), "Layer 1");
            layer = doc.get_page(next_page).get_layer(next_layer);
        }
        for placed in &page.rows {
            draw_week_row(&layer, &font_regular, &font_bold, &weeks[placed.index], placed, &geom);
        }
        draw_grid(&layer, page, &geom);
    }

    let file = File::create(output_path)?;
    let mut writer = BufWriter::new(file);
    doc.save(&mut writer)
        .map_err(|e| AppError::PdfError(e.to_string()))?;

    // A project with no shoot days still produces the header sheet.
    Ok(pages.len().max(1))
}

// ============================================================================
// Header (page 1 only)
// ============================================================================

fn range_label(project: &Project) -> String {
    match (project.first_date(), project.last_date()) {
        (Some(first), Some(last)) => format!(
            "{} - {}",
            first.format("%b %-d, %Y"),
            last.format("%b %-d, %Y")
        ),
        _ => "No shoot days scheduled".to_string(),
    }
}

fn totals_label(project: &Project) -> String {
    let totals = project.scheduled_totals();
    format!(
        "{} scenes  |  {} pg  |  {}",
        totals.scenes,
        format_eighths(totals.eighths),
        format_minutes(totals.minutes)
    )
}

fn day_night_label(project: &Project) -> String {
    let (mut day_eighths, mut night_eighths) = (0, 0);
    for day in &project.days {
        day_eighths += day.subtotal(DayNight::Day).0;
        night_eighths += day.subtotal(DayNight::Night).0;
    }
    format!(
        "Day {} pg  /  Night {} pg",
        format_eighths(day_eighths),
        format_eighths(night_eighths)
    )
}

fn draw_header(
    layer: &PdfLayerReference,
    font_regular: &IndirectFontRef,
    font_bold: &IndirectFontRef,
    project: &Project,
    geom: &PageGeometry,
) {
    layer.set_fill_color(black());
    let top = geom.height - geom.margin;

    layer.use_text(&project.title, TITLE_FONT_SIZE, Mm(geom.margin), Mm(top - 6.5), font_bold);
    layer.use_text(
        &range_label(project),
        NORMAL_FONT_SIZE,
        Mm(geom.margin),
        Mm(top - 13.0),
        font_regular,
    );

    // Totals and day/night split, right side of the header band
    let totals_x = geom.margin + geom.content_width() - 80.0;
    layer.use_text(
        &totals_label(project),
        SMALL_FONT_SIZE,
        Mm(totals_x),
        Mm(top - 13.0),
        font_regular,
    );
    layer.use_text(
        &day_night_label(project),
        SMALL_FONT_SIZE,
        Mm(totals_x),
        Mm(top - 17.5),
        font_regular,
    );

    // Weekday captions sit just above the grid
    let caption_y = geom.content_top(0) + 1.5;
    for (i, label) in WEEKDAY_LABELS.iter().enumerate() {
        layer.use_text(
            *label,
            SMALL_FONT_SIZE,
            Mm(geom.column_x(i) + 1.5),
            Mm(caption_y),
            font_bold,
        );
    }
}

// ============================================================================
// Week rows and day cells
// ============================================================================

fn draw_week_row(
    layer: &PdfLayerReference,
    font_regular: &IndirectFontRef,
    font_bold: &IndirectFontRef,
    week: &WeekRow,
    placed: &PlacedRow,
    geom: &PageGeometry,
) {
    for (col, slot) in week.slots.iter().enumerate() {
        if matches!(slot, Slot::Unused) {
            continue;
        }
        draw_day_cell(
            layer,
            font_regular,
            font_bold,
            slot,
            geom.column_x(col),
            placed.top,
            geom.column_width(),
            placed.height,
        );
    }
}

fn draw_day_cell(
    layer: &PdfLayerReference,
    font_regular: &IndirectFontRef,
    font_bold: &IndirectFontRef,
    slot: &Slot,
    x: f32,
    top: f32,
    width: f32,
    height: f32,
) {
    let Some(date) = slot.date() else { return };

    layer.set_fill_color(black());
    layer.use_text(
        &date.format("%-m/%-d").to_string(),
        SMALL_FONT_SIZE,
        Mm(x + 1.5),
        Mm(top - 3.8),
        font_bold,
    );

    let Slot::Day(day) = *slot else { return };
    if day.scenes.is_empty() {
        return;
    }

    let plan = plan_cell(day.scenes.len(), height);
    for (i, scene) in day.scenes.iter().take(plan.shown).enumerate() {
        let slot_top = top - DATE_BAND_MM - i as f32 * SCENE_SLOT_MM;
        draw_scene_box(layer, font_regular, scene_fill(scene.day_night), &scene.title, x, slot_top, width);
    }
    if plan.hidden > 0 {
        let marker_y = top - DATE_BAND_MM - plan.shown as f32 * SCENE_SLOT_MM - 3.8;
        layer.set_fill_color(grid_gray());
        layer.use_text(
            &format!("+{} more", plan.hidden),
            SCENE_FONT_SIZE,
            Mm(x + 2.0),
            Mm(marker_y),
            font_regular,
        );
    }

    draw_cell_totals(layer, font_regular, day, x, top - height);
}

fn draw_scene_box(
    layer: &PdfLayerReference,
    font_regular: &IndirectFontRef,
    fill: Color,
    title: &str,
    x: f32,
    slot_top: f32,
    width: f32,
) {
    let x0 = x + SCENE_BOX_INSET_MM;
    let x1 = x + width - SCENE_BOX_INSET_MM;
    let y0 = slot_top - 0.5;
    let y1 = y0 - SCENE_BOX_HEIGHT_MM;

    fill_rect(layer, x0, y0, x1, y1, fill);
    layer.set_outline_color(grid_gray());
    layer.set_outline_thickness(0.3);
    stroke_rect(layer, x0, y0, x1, y1);

    layer.set_fill_color(black());
    layer.use_text(
        &truncate_label(title, SCENE_TITLE_MAX_CHARS),
        SCENE_FONT_SIZE,
        Mm(x0 + 1.0),
        Mm(y0 - 3.4),
        font_regular,
    );
}

fn draw_cell_totals(
    layer: &PdfLayerReference,
    font_regular: &IndirectFontRef,
    day: &ShootDay,
    x: f32,
    bottom: f32,
) {
    layer.set_fill_color(black());
    layer.use_text(
        &format!(
            "{} pg  {}",
            format_eighths(day.total_eighths()),
            format_minutes(day.total_minutes())
        ),
        SCENE_FONT_SIZE,
        Mm(x + 1.5),
        Mm(bottom + 1.6),
        font_regular,
    );
}

// ============================================================================
// Grid lines
// ============================================================================

/// Verticals span only the rows drawn on this page, not the full sheet.
fn draw_grid(layer: &PdfLayerReference, page: &PageLayout, geom: &PageGeometry) {
    let Some((top, bottom)) = page.grid_extent() else { return };

    layer.set_outline_color(black());
    layer.set_outline_thickness(0.4);
    for i in 0..=DAYS_PER_WEEK {
        let x = geom.column_x(i);
        draw_line(layer, x, top, x, bottom);
    }
    for &y in &page.row_lines {
        draw_line(layer, geom.margin, y, geom.margin + geom.content_width(), y);
    }
}

// ============================================================================
// Drawing utilities
// ============================================================================

fn draw_line(layer: &PdfLayerReference, x1: f32, y1: f32, x2: f32, y2: f32) {
    let points = vec![
        (Point::new(Mm(x1), Mm(y1)), false),
        (Point::new(Mm(x2), Mm(y2)), false),
    ];
    let line = Line {
        points,
        is_closed: false,
    };
    layer.add_line(line);
}

fn stroke_rect(layer: &PdfLayerReference, x0: f32, y0: f32, x1: f32, y1: f32) {
    let points = vec![
        (Point::new(Mm(x0), Mm(y0)), false),
        (Point::new(Mm(x1), Mm(y0)), false),
        (Point::new(Mm(x1), Mm(y1)), false),
        (Point::new(Mm(x0), Mm(y1)), false),
    ];
    let line = Line {
        points,
        is_closed: true,
    };
    layer.add_line(line);
}

fn fill_rect(layer: &PdfLayerReference, x0: f32, y0: f32, x1: f32, y1: f32, fill: Color) {
    layer.set_fill_color(fill);
    let ring = vec![
        (Point::new(Mm(x0), Mm(y0)), false),
        (Point::new(Mm(x1), Mm(y0)), false),
        (Point::new(Mm(x1), Mm(y1)), false),
        (Point::new(Mm(x0), Mm(y1)), false),
    ];
    let polygon = Polygon {
        rings: vec![ring],
        mode: PaintMode::Fill,
        winding_order: WindingOrder::NonZero,
    };
    layer.add_polygon(polygon);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ShootDay;
    use chrono::NaiveDate;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, day).unwrap()
    }

    #[test]
    fn header_labels_reflect_the_schedule() {
        let mut project = Project::new("Desert Run");
        assert_eq!(range_label(&project), "No shoot days scheduled");

        project.days = vec![ShootDay::empty(d(4)), ShootDay::empty(d(13))];
        assert_eq!(range_label(&project), "Mar 4, 2026 - Mar 13, 2026");
        assert_eq!(totals_label(&project), "0 scenes  |  0 pg  |  0 min");
    }

    #[test]
    fn day_night_split_sums_across_days() {
        use crate::model::Scene;

        let mut project = Project::new("Night Heavy");
        let mut day = ShootDay::empty(d(4));
        day.scenes.push(Scene::new("A", 8, 60, DayNight::Day));
        day.scenes.push(Scene::new("B", 5, 45, DayNight::Night));
        let mut later = ShootDay::empty(d(5));
        later.scenes.push(Scene::new("C", 3, 30, DayNight::Night));
        project.days = vec![day, later];

        assert_eq!(day_night_label(&project), "Day 1 pg  /  Night 1 pg");
    }
}
