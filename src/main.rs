// schedule-pdf: Render film/video shoot schedules as calendar PDFs

use chrono::NaiveDate;
use clap::Parser;

use schedule_pdf::{pdf, persist, AppError};

#[derive(Parser, Debug)]
#[command(author, version, about = "Render film/video shoot schedules as calendar PDFs")]
struct Args {
    /// Project schedule file (JSON)
    #[arg(short, long)]
    project: String,

    /// Output filename (defaults to schedule-{title}.pdf)
    #[arg(short, long)]
    output: Option<String>,

    /// Override the schedule title in the rendered header
    #[arg(short, long)]
    title: Option<String>,

    /// New first shoot date (YYYY-MM-DD); regenerates the day range
    #[arg(long, requires = "end")]
    start: Option<String>,

    /// New last shoot date (YYYY-MM-DD); regenerates the day range
    #[arg(long, requires = "start")]
    end: Option<String>,

    /// Write the (possibly re-ranged) project back to this file
    #[arg(long)]
    save: Option<String>,

    /// Scale week rows toward a single page before paginating
    #[arg(long)]
    single_page: bool,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn parse_date(date_str: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
        .map_err(|_| AppError::DateError(date_str.to_string()))
}

fn run() -> Result<(), AppError> {
    let args = Args::parse();

    let mut project = persist::load_project(&args.project)?;
    if let Some(title) = args.title {
        project.title = title;
    }
    if let (Some(start), Some(end)) = (&args.start, &args.end) {
        project.set_date_range(parse_date(start)?, parse_date(end)?)?;
    }
    if let Some(save_path) = &args.save {
        persist::save_project(&project, save_path)?;
    }

    let output_file = args.output.unwrap_or_else(|| {
        let sanitized_title = project
            .title
            .to_lowercase()
            .replace(' ', "-")
            .chars()
            .filter(|c| c.is_alphanumeric() || *c == '-')
            .collect::<String>();
        format!("schedule-{}.pdf", sanitized_title)
    });

    let page_count = pdf::render_schedule(&project, &output_file, args.single_page)?;

    let totals = project.scheduled_totals();
    println!("✓ Generated: {}", output_file);
    println!("  Title: {}", project.title);
    println!("  Days: {}", project.days.len());
    println!("  Scenes: {}", totals.scenes);
    println!("  Pages: {}", page_count);
    if !project.unscheduled.is_empty() {
        println!(
            "  Unscheduled: {} scenes not placed on the calendar",
            project.unscheduled.len()
        );
    }

    Ok(())
}
