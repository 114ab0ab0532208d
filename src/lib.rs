//! deptdash - Academic department workbook normalization
//!
//! This crate reads a department's operational workbook (lecture counts, exam
//! result releases, enrollments, schedules, highlights, internships and
//! counselling) and normalizes each sheet into a typed, serializable model.
//! Hand-maintained sheets are read leniently: missing sheets and malformed
//! rows degrade to empty results instead of failing the whole load.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use deptdash::LoaderBuilder;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Create a loader with default settings
//!     let loader = LoaderBuilder::new().build()?;
//!
//!     // Load the workbook into the normalized model
//!     let model = loader.load_path("department.xlsx")?;
//!
//!     for exam in &model.exams {
//!         println!("{}: {}%", exam.cycle, exam.percentage);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! # Custom Configuration
//!
//! ```rust,no_run
//! use deptdash::{DateFormat, LoaderBuilder, SheetNames};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let loader = LoaderBuilder::new()
//!         .with_date_format(DateFormat::Iso8601)
//!         .with_sheet_names(SheetNames {
//!             enrollments: "Intake".to_string(),
//!             ..SheetNames::default()
//!         })
//!         .build()?;
//!
//!     let bytes = std::fs::read("department.xlsx")?;
//!     let model = loader.load_bytes(&bytes)?;
//!     println!("{} programmes", model.enrollment.programmes.len());
//!
//!     Ok(())
//! }
//! ```
//!
//! # Reports
//!
//! ```rust,no_run
//! use deptdash::{render_report, DashboardSummary, LoaderBuilder, OutputFormat};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let loader = LoaderBuilder::new().build()?;
//!     let model = loader.load_path("department.xlsx")?;
//!
//!     let summary = DashboardSummary::from_model(&model);
//!     println!("Total lectures: {}", summary.total_lectures);
//!
//!     // KPI block and one table per domain
//!     println!("{}", render_report(&model, OutputFormat::Markdown)?);
//!
//!     Ok(())
//! }
//! ```

mod api;
mod builder;
mod error;
mod formatter;
mod model;
mod output;
mod parser;
pub mod sections;
mod security;
mod summary;
mod types;

// 公開API
pub use api::{DateFormat, OutputFormat, SheetNames};
pub use builder::{DashboardLoader, LoadStage, LoaderBuilder};
pub use error::DashboardError;
pub use model::{
    AuditBreakdown, CounsellingRecord, DashboardModel, EnrollmentTable, Event, ExamCycleRecord,
    ExamProgress, GuestLecture, HighlightsData, InternshipSummary, LectureRecord, ProgrammeRow,
    RowType, ScheduleEntry,
};
pub use output::{render_report, write_report};
pub use parser::{normalize_sheet_key, RawSheet, RawWorkbook, SheetLocator};
pub use security::SecurityConfig;
pub use summary::{DashboardSummary, DegreeTotal, ProgrammeProgress, Split};
pub use types::{parse_leading_float, parse_number, CellValue, Row};
