//! Output formatting for reports.

use anyhow::{Context, Result};
use owo_colors::{OwoColorize, Stream};
use serde::Serialize;
use std::fmt::Write;

use crate::OutputFormat;
use crate::processor::{BasisReport, DeterminantReport, InverseReport};

/// Human readable rendering used by `--format text`.
pub(crate) trait TextReport {
    fn to_text(&self) -> String;
}

/// Render a report in the requested format.
pub(crate) fn render<T: Serialize + TextReport>(report: &T, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(report.to_text()),
        OutputFormat::Json => {
            serde_json::to_string_pretty(report).context("failed to serialize report as JSON")
        }
        OutputFormat::Yaml => {
            serde_yaml::to_string(report).context("failed to serialize report as YAML")
        }
    }
}

impl TextReport for BasisReport {
    fn to_text(&self) -> String {
        let mut out = String::new();
        if let (Some(points), Some(degree)) = (self.points, self.degree) {
            let _ = writeln!(out, "points: {points}, degree <= {degree}");
        }
        let _ = writeln!(out, "variables: {}", self.variables.join(", "));
        let _ = writeln!(out, "order: {}", self.order);
        let _ = writeln!(out, "basis ({} polynomials):", self.basis.len());
        for p in &self.basis {
            let _ = writeln!(out, "  {p}");
        }
        let s = &self.stats;
        let _ = write!(
            out,
            "iterations: {}, s-polynomials: {}, reductions: {}, added: {}",
            s.iterations, s.s_polys, s.reductions, s.basis_added
        );
        if self.truncated {
            let _ = write!(out, "\nwarning: iteration cap reached, basis may be incomplete");
        }
        out
    }
}

impl TextReport for DeterminantReport {
    fn to_text(&self) -> String {
        self.determinant.clone()
    }
}

impl TextReport for InverseReport {
    fn to_text(&self) -> String {
        self.inverse
            .iter()
            .map(|row| format!("[{}]", row.join(", ")))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Print colored error message to stderr
pub(crate) fn eprintln_colored(no_color: bool, text: &str) {
    if no_color {
        eprintln!("{}", text);
    } else {
        eprintln!("{}", text.if_supports_color(Stream::Stderr, |t| t.red()));
    }
}
