//! Analyze command handler
//!
//! Loads a transcript (JSON array of semesters), runs the classification
//! and deficit pipeline, and renders the result as JSON or text.

use crate::args::OutputFormat;
use credit_audit::analysis::Analyzer;
use credit_audit::config::Config;
use credit_audit::models::{AnalysisReport, BucketKind, ReportStatus, Semester};
use credit_audit::{error, info, verbose};
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

/// Options for one analyze invocation
pub struct AnalyzeOptions<'a> {
    /// Department given on the command line
    pub department: Option<&'a str>,
    /// Report format
    pub format: OutputFormat,
    /// Output file; stdout when `None`
    pub output: Option<&'a Path>,
}

/// Run the analyze command.
///
/// # Errors
/// Returns a printable message if the transcript, taxonomy or requirement
/// table cannot be loaded, or the report cannot be written.
pub fn run(input_file: &Path, options: &AnalyzeOptions<'_>, config: &Config) -> Result<(), String> {
    let semesters = load_transcript(input_file)?;
    info!(
        "Transcript loaded: {} ({} semesters)",
        input_file.display(),
        semesters.len()
    );

    let taxonomy = config.load_taxonomy().map_err(|e| {
        error!("Taxonomy load failed: {e}");
        format!("✗ Failed to load taxonomy: {e}")
    })?;
    let store = super::requirement_store(config)?;

    let department = options.department.or_else(|| config.default_department());
    let report = Analyzer::new(&taxonomy, store).analyze(&semesters, department);

    let rendered = match options.format {
        OutputFormat::Json => serde_json::to_string_pretty(&report)
            .map_err(|e| format!("✗ Failed to serialize report: {e}"))?,
        OutputFormat::Text => render_text(&report),
    };

    match options.output {
        Some(path) => {
            let target = resolve_output_path(path, &config.paths.reports_dir);
            write_report(&target, &rendered)?;
            println!("✓ Report written: {}", target.display());
        }
        None => println!("{rendered}"),
    }
    Ok(())
}

/// Read semester records from a JSON file
///
/// # Errors
/// Returns a printable message if the file is unreadable or not a semester array
pub fn load_transcript(path: &Path) -> Result<Vec<Semester>, String> {
    let content = fs::read_to_string(path).map_err(|e| {
        error!("Failed to read transcript {}: {e}", path.display());
        format!("✗ Failed to read {}: {e}", path.display())
    })?;
    serde_json::from_str(&content).map_err(|e| {
        error!("Failed to parse transcript {}: {e}", path.display());
        format!("✗ Failed to parse {}: {e}", path.display())
    })
}

/// Relative output paths land in the reports directory.
fn resolve_output_path(path: &Path, reports_dir: &str) -> PathBuf {
    if path.is_absolute() || reports_dir.is_empty() {
        path.to_path_buf()
    } else {
        Path::new(reports_dir).join(path)
    }
}

fn write_report(target: &Path, rendered: &str) -> Result<(), String> {
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| format!("✗ Failed to create {}: {e}", parent.display()))?;
    }
    fs::write(target, rendered).map_err(|e| {
        error!("Failed to write report {}: {e}", target.display());
        format!("✗ Failed to write {}: {e}", target.display())
    })?;
    verbose!("Wrote {} bytes to {}", rendered.len(), target.display());
    Ok(())
}

/// Render a report as a plain-text summary
#[must_use]
pub fn render_text(report: &AnalysisReport) -> String {
    let mut out = String::new();
    let deficit = &report.deficit_analysis;

    let _ = writeln!(out, "=== Credit Audit ===");
    let _ = writeln!(
        out,
        "Department: {}",
        deficit.department.as_deref().unwrap_or("(unknown)")
    );

    let _ = writeln!(out, "\nCategories:");
    for (name, node) in &report.categorized_credits {
        let _ = writeln!(out, "  {name}: {} credits", node.earned_credits());
    }

    let _ = writeln!(out, "\nEarned credits:");
    for bucket in BucketKind::ALL {
        let _ = writeln!(
            out,
            "  {:<28} {}",
            bucket.label(),
            report.current_credits_summary.get(bucket)
        );
    }

    if deficit.status != ReportStatus::Success {
        if let Some(message) = &deficit.message {
            let _ = writeln!(out, "\n{message}");
        }
        return out;
    }

    let _ = writeln!(out, "\nRequirements:");
    for (bucket, detail) in &deficit.deficit_details {
        let _ = writeln!(
            out,
            "  {:<28} {:>6} / {:<6} {}",
            bucket.label(),
            detail.earned,
            detail.required,
            detail.status
        );
    }

    if let Some(summary) = &deficit.total_summary {
        let _ = writeln!(
            out,
            "\nTotal: {} / {} (gap {})",
            summary.total_earned, summary.total_required, summary.total_gap
        );
        let eligible = if summary.graduation_eligible { "yes" } else { "no" };
        let _ = writeln!(out, "Graduation eligible: {eligible}");
    }

    let _ = writeln!(out, "\nRecommendations:");
    for (index, line) in deficit.recommendations.iter().enumerate() {
        let _ = writeln!(out, "  {}. {line}", index + 1);
    }
    out
}
