// Shoot-schedule planning core: the data model, the calendar layout engine,
// project-file persistence, and the PDF renderer. The binary in main.rs is a
// thin CLI over this; a graphical editor would sit on the same surface.

use thiserror::Error;

pub mod layout;
pub mod model;
pub mod parse;
pub mod pdf;
pub mod persist;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Failed to create PDF: {0}")]
    PdfError(String),
    #[error("Failed to read project file: {0}")]
    ProjectError(String),
    #[error("Invalid date format: {0}")]
    DateError(String),
    #[error("Schedule error: {0}")]
    ScheduleError(#[from] model::ScheduleError),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
