//! CLI Tool Example
//!
//! This example demonstrates how to build a command-line tool
//! using deptdash for turning a department workbook into a report.

use std::fs::File;
use std::io::{self, Write};
use std::process;

use deptdash::{write_report, DashboardError, DateFormat, LoadStage, LoaderBuilder, OutputFormat};

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <input.xlsx> [output] [options]", args[0]);
        eprintln!("\nOptions:");
        eprintln!("  --json              Write a JSON report (default: Markdown)");
        eprintln!("  --iso-dates         Format dates as YYYY-MM-DD");
        eprintln!("  --progress          Print load stages to stderr");
        eprintln!("\nExamples:");
        eprintln!("  {} department.xlsx", args[0]);
        eprintln!("  {} department.xlsx report.md", args[0]);
        eprintln!("  {} department.xlsx report.json --json --iso-dates", args[0]);
        process::exit(1);
    }

    let input_path = &args[1];
    let mut output_path: Option<&str> = None;
    let mut format = OutputFormat::Markdown;
    let mut date_format = DateFormat::Display;
    let mut show_progress = false;

    for arg in &args[2..] {
        match arg.as_str() {
            "--json" => format = OutputFormat::Json,
            "--iso-dates" => date_format = DateFormat::Iso8601,
            "--progress" => show_progress = true,
            "-" => output_path = None,
            other if other.starts_with("--") => {
                eprintln!("Error: Unknown option: {}", other);
                process::exit(1);
            }
            path => output_path = Some(path),
        }
    }

    match run(input_path, output_path, format, date_format, show_progress) {
        Ok(()) => {
            if let Some(path) = output_path {
                println!("Report written: {} -> {}", input_path, path);
            }
        }
        Err(e) => {
            handle_error(e);
            process::exit(1);
        }
    }
}

fn run(
    input_path: &str,
    output_path: Option<&str>,
    format: OutputFormat,
    date_format: DateFormat,
    show_progress: bool,
) -> Result<(), DashboardError> {
    let loader = LoaderBuilder::new().with_date_format(date_format).build()?;

    let input = File::open(input_path)?;
    let model = loader.load_with_progress(input, |stage: LoadStage| {
        if show_progress {
            eprintln!("[{:>3}%] {}", stage.percent(), stage.label());
        }
    })?;

    match output_path {
        Some(path) => write_report(&model, format, File::create(path)?)?,
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            write_report(&model, format, &mut handle)?;
            handle.flush()?;
        }
    }

    Ok(())
}

fn handle_error(error: DashboardError) {
    match error {
        DashboardError::Io(io_err) => {
            eprintln!("I/O Error: {}", io_err);
            eprintln!("Please check that the file exists and you have permission to access it.");
        }
        DashboardError::Parse(parse_err) => {
            eprintln!("Parse Error: {}", parse_err);
            eprintln!("The file may not be a valid workbook or may be corrupted.");
        }
        DashboardError::Zip(msg) => {
            eprintln!("ZIP Archive Error: {}", msg);
            eprintln!("The file may be corrupted or not a valid ZIP archive.");
        }
        DashboardError::Config(msg) => {
            eprintln!("Configuration Error: {}", msg);
        }
        DashboardError::SecurityViolation(msg) => {
            eprintln!("Security Violation: {}", msg);
            eprintln!("The file violates security constraints (e.g., file size limit).");
        }
    }
}
