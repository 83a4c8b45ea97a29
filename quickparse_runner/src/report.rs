//! Brief and detailed reports.

use std::fmt;
use std::time::Duration;

use chrono::Local;
use quickparse_core::{Tree, Value, prune};
use serde::Serialize;

use crate::error::{Result, RunError};
use crate::options::ReportFormat;

const RULE_WIDTH: usize = 100;

/// Outcome of a comparison run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Verdict {
    Pass,
    Fail,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Pass => "PASS",
            Self::Fail => "FAIL",
        })
    }
}

/// Counts that describe a finished run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Summary {
    pub files_found: usize,
    pub keywords_found: Vec<String>,
    pub files_without_keyword: usize,
    pub files_without_reference: usize,
    pub files_with_errors: usize,
    /// `None` outside comparison mode.
    pub deviations: Option<usize>,
}

impl Summary {
    /// Only comparison runs have a verdict.
    #[must_use]
    pub fn verdict(&self) -> Option<Verdict> {
        let deviations = self.deviations?;
        let failed = deviations > 0
            || self.files_without_keyword > 0
            || self.files_without_reference > 0
            || self.files_with_errors > 0;
        Some(if failed { Verdict::Fail } else { Verdict::Pass })
    }
}

/// A finished report: the per-file detail tree and the brief summary tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub detail: Tree,
    pub brief: Tree,
    pub summary: Summary,
}

impl Report {
    /// Assemble a report. Both trees are pruned.
    #[must_use]
    pub fn new(
        detail: Tree,
        summary: Summary,
        label: &str,
        target_folder: &str,
        reference_folder: Option<&str>,
        elapsed: Duration,
    ) -> Self {
        let brief = brief_tree(&summary, label, target_folder, reference_folder, elapsed);
        Self {
            detail: prune(detail),
            brief: prune(brief),
            summary,
        }
    }

    #[must_use]
    pub fn verdict(&self) -> Option<Verdict> {
        self.summary.verdict()
    }

    /// Detailed section, a rule, then the brief section.
    pub fn render(&self, format: ReportFormat) -> Result<String> {
        let detail = stringify(&self.detail, format)?;
        let brief = stringify(&self.brief, format)?;
        let rule = "-".repeat(RULE_WIDTH);
        Ok(format!(
            "{rule}\nDetailed Report:\n\n{detail}\n{rule}\nBrief Report:\n\n{brief}"
        ))
    }
}

/// Serialize a tree without a trailing newline.
pub fn stringify(tree: &Tree, format: ReportFormat) -> Result<String> {
    let render_err = |message: String| RunError::Render { format, message };
    let text = match format {
        ReportFormat::Yaml => serde_yaml::to_string(tree).map_err(|e| render_err(e.to_string()))?,
        ReportFormat::Json => {
            serde_json::to_string_pretty(tree).map_err(|e| render_err(e.to_string()))?
        }
    };
    Ok(text.trim_end_matches('\n').to_string())
}

fn brief_tree(
    summary: &Summary,
    label: &str,
    target_folder: &str,
    reference_folder: Option<&str>,
    elapsed: Duration,
) -> Tree {
    let completed = Local::now().format("%-I:%M %p - %B %d, %Y").to_string();

    let mut brief = Tree::new();
    brief.insert("Completion Date".to_string(), Value::from(completed));
    brief.insert(
        format!("{label}(s) Found"),
        Value::from(summary.keywords_found.clone()),
    );
    brief.insert(
        format!("Files Where {label} Not Found"),
        Value::from(summary.files_without_keyword),
    );
    brief.insert(
        format!("Files Where {label} Has No Reference"),
        Value::from(summary.files_without_reference),
    );
    brief.insert(
        "Files With Errors".to_string(),
        Value::from(summary.files_with_errors),
    );
    brief.insert("Folder (Reference)".to_string(), Value::from(reference_folder));
    brief.insert("Folder (Target)".to_string(), Value::from(target_folder));
    brief.insert("Total Deviations".to_string(), Value::from(summary.deviations));
    brief.insert("Total Files Found".to_string(), Value::from(summary.files_found));
    brief.insert(
        "Total Time".to_string(),
        Value::from(format!("{:.3} seconds", elapsed.as_secs_f64())),
    );
    brief.insert(
        "Verdict".to_string(),
        Value::from(summary.verdict().map(|v| v.to_string())),
    );
    brief
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(deviations: Option<usize>) -> Summary {
        Summary {
            files_found: 3,
            keywords_found: vec!["Dev".to_string()],
            deviations,
            ..Summary::default()
        }
    }

    #[test]
    fn verdict_only_in_comparison_mode() {
        assert_eq!(summary(None).verdict(), None);
        assert_eq!(summary(Some(0)).verdict(), Some(Verdict::Pass));
        assert_eq!(summary(Some(2)).verdict(), Some(Verdict::Fail));

        let unclassified = Summary {
            files_without_keyword: 1,
            ..summary(Some(0))
        };
        assert_eq!(unclassified.verdict(), Some(Verdict::Fail));
    }

    #[test]
    fn brief_drops_empty_entries() {
        let report = Report::new(
            Tree::new(),
            summary(None),
            "Keyword",
            "/logs",
            None,
            Duration::from_millis(1500),
        );
        assert_eq!(report.brief["Keyword(s) Found"], Value::from(vec!["Dev"]));
        assert_eq!(report.brief["Total Files Found"], Value::Integer(3));
        assert_eq!(report.brief["Total Time"], Value::from("1.500 seconds"));
        assert!(!report.brief.contains_key("Verdict"));
        assert!(!report.brief.contains_key("Folder (Reference)"));
        assert!(!report.brief.contains_key("Files Where Keyword Not Found"));
    }

    #[test]
    fn brief_uses_label() {
        let report = Report::new(
            Tree::new(),
            summary(Some(1)),
            "Device",
            "/target",
            Some("/reference"),
            Duration::ZERO,
        );
        assert!(report.brief.contains_key("Device(s) Found"));
        assert_eq!(report.brief["Verdict"], Value::from("FAIL"));
        assert_eq!(report.brief["Total Deviations"], Value::Integer(1));
        assert_eq!(report.verdict(), Some(Verdict::Fail));
    }

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn renders_both_sections() {
        let mut detail = Tree::new();
        detail.insert("a.log".to_string(), Value::from("x"));
        let report = Report::new(
            detail,
            summary(None),
            "Keyword",
            "/logs",
            None,
            Duration::ZERO,
        );

        let yaml = report.render(ReportFormat::Yaml).expect("renders");
        assert!(yaml.starts_with(&"-".repeat(RULE_WIDTH)));
        assert!(yaml.contains("Detailed Report:\n\na.log: x\n"));
        assert!(yaml.contains("Brief Report:"));
        assert!(!yaml.ends_with('\n'));

        let json = report.render(ReportFormat::Json).expect("renders");
        assert!(json.contains("\"a.log\": \"x\""));
    }
}
