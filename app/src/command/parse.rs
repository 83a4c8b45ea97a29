use std::path::PathBuf;

use quickparse_config::Config;
use quickparse_runner::{ReportFormat, Runner, Verdict};
use tracing::{info, warn};

/// Input parameters for the Parse command strategy.
#[derive(Debug, Clone)]
pub struct ParseInput {
    /// YAML or JSON pattern file
    pub pattern_file: PathBuf,
    /// Folder whose files are parsed
    pub target_dir: PathBuf,
    /// Optional reference folder to compare against
    pub reference_dir: Option<PathBuf>,
    /// Overrides the configured keyword label
    pub keyword_label: Option<String>,
    /// Overrides the configured report format
    pub format: Option<ReportFormat>,
}

/// Strategy for parsing a folder, optionally comparing it against a
/// reference folder, and printing the report.
///
/// Parsing is CPU-bound and runs on the blocking thread pool.
#[derive(Debug, Clone, Copy)]
pub struct ParseStrategy;

impl ParseStrategy {
    /// Run the parse synchronously and return the rendered report.
    pub fn render(input: ParseInput, config: Config) -> anyhow::Result<(String, Option<Verdict>)> {
        let mut options = config.run;
        if let Some(label) = input.keyword_label {
            options.keyword_label = label;
        }
        let format = input.format.unwrap_or(config.report_format);

        let runner = Runner::from_pattern_file(&input.pattern_file, options)?;
        info!(
            "Loaded {} keywords from {}",
            runner.template().len(),
            input.pattern_file.display()
        );

        let report = runner.run(&input.target_dir, input.reference_dir.as_deref())?;
        Ok((report.render(format)?, report.verdict()))
    }
}

impl super::CommandStrategy for ParseStrategy {
    type Input = ParseInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let config = Config::load()?;

        let (rendered, verdict) =
            tokio::task::spawn_blocking(move || Self::render(input, config)).await??;

        println!("{rendered}");
        if verdict == Some(Verdict::Fail) {
            warn!("Comparison finished with verdict {}", Verdict::Fail);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::CommandStrategy;
    use std::path::Path;

    const PATTERNS: &str = "Dev:\n  Version: 'Version: (\\S+)'\n";

    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn write(dir: &Path, name: &str, body: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, body).expect("write");
        path
    }

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn renders_comparison_with_overrides() {
        let dir = tempfile::tempdir().expect("tempdir");
        let pattern_file = write(dir.path(), "patterns.yml", PATTERNS);
        let reference = dir.path().join("reference");
        let target = dir.path().join("target");
        std::fs::create_dir_all(&reference).expect("mkdir");
        std::fs::create_dir_all(&target).expect("mkdir");
        write(&reference, "a.log", "Dev Version: 1.0");
        write(&target, "b.log", "Dev Version: 1.1");

        let input = ParseInput {
            pattern_file,
            target_dir: target,
            reference_dir: Some(reference),
            keyword_label: Some("Device".to_string()),
            format: Some(ReportFormat::Json),
        };
        let (rendered, verdict) =
            ParseStrategy::render(input, Config::default()).expect("parse succeeds");

        assert_eq!(verdict, Some(Verdict::Fail));
        assert!(rendered.contains("\"Device\": \"Dev\""));
        assert!(rendered.contains("\"Verdict\": \"FAIL\""));
    }

    #[tokio::test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    async fn missing_pattern_file_fails() {
        let dir = tempfile::tempdir().expect("tempdir");
        let input = ParseInput {
            pattern_file: dir.path().join("missing.yml"),
            target_dir: dir.path().to_path_buf(),
            reference_dir: None,
            keyword_label: None,
            format: None,
        };
        assert!(ParseStrategy.execute(input).await.is_err());
    }
}
