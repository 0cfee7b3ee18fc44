use crate::proofreader::FileReport;
use crate::source::Source;
use anyhow::{Context, Result};
use colored::*;
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Print,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "print" => Ok(OutputFormat::Print),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown format: {}", s)),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Print => write!(f, "print"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Render the findings of every file; clean units are left out
pub fn render_results(reports: &[FileReport], colored_output: bool) -> String {
    let mut out = String::new();

    for report in reports {
        out.push_str(&format!("### Results for {} ###\n\n", report.file));

        for result in report.results.iter().filter(|r| !r.is_clean() || r.is_degraded()) {
            out.push_str(&paint(&result.text, colored_output, |s| s.red()));
            out.push('\n');

            if let Some(error) = &result.error {
                let line = format!(" ! analysis failed: {}", error);
                out.push_str(&paint(&line, colored_output, |s| s.yellow()));
                out.push('\n');
            }

            for item in &result.suggestions.write_good {
                let line = format!(" - {}", item.reason);
                out.push_str(&paint(&line, colored_output, |s| s.blue().bold()));
                out.push('\n');
            }

            for item in &result.suggestions.spelling {
                let line = format!(" - \"{}\" -> {}", item.word, item.suggestions.join(","));
                out.push_str(&paint(&line, colored_output, |s| s.magenta().bold()));
                out.push('\n');
            }

            out.push('\n');
        }
    }

    out
}

pub fn render_failed_source(source: &Source) -> String {
    format!(
        "### Proofreader *failed* to load {} ###\n{}\n",
        source.path,
        source.error.as_deref().unwrap_or_default()
    )
}

pub fn print_results(reports: &[FileReport], colored_output: bool) {
    print!("{}", render_results(reports, colored_output));
}

pub fn print_failed_source(source: &Source) {
    println!("{}", render_failed_source(source));
}

/// Write the findings as JSON, replacing any previous results file
pub fn save_results_json(reports: &[FileReport], path: &Path) -> Result<()> {
    let json = serde_json::to_string(reports).context("Failed to serialize results")?;
    fs::write(path, json).with_context(|| format!("Failed to write results file: {}", path.display()))
}

fn paint(text: &str, colored_output: bool, style: impl Fn(&str) -> ColoredString) -> String {
    if colored_output {
        style(text).to_string()
    } else {
        text.to_string()
    }
}
