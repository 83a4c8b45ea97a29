use std::path::PathBuf;

use quickparse_config::Config;
use quickparse_core::{Discoverer, Template};

/// Input parameters for the Check command strategy.
#[derive(Debug, Clone)]
pub struct CheckInput {
    /// YAML or JSON pattern file to validate
    pub pattern_file: PathBuf,
}

/// Strategy for validating a pattern file without parsing any logs.
///
/// Loads the template, rejects reserved field names, and compiles every
/// keyword and pattern, reporting all failures at once.
#[derive(Debug, Clone, Copy)]
pub struct CheckStrategy;

impl CheckStrategy {
    /// Problems found in `template`, one line each.
    #[must_use]
    pub fn problems(template: &Template, keyword_label: &str) -> Vec<String> {
        let mut problems = Vec::new();
        if let Err(e) = template.validate_names(keyword_label) {
            problems.push(e.to_string());
        }
        if let Err(e) = Discoverer::from_template(template) {
            problems.push(format!("keyword: {e}"));
        }
        for (keyword, e) in template.check_patterns() {
            problems.push(format!("{keyword}: {e}"));
        }
        problems
    }
}

impl super::CommandStrategy for CheckStrategy {
    type Input = CheckInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let config = Config::load()?;
        let template = Template::load(&input.pattern_file)?;

        let problems = Self::problems(&template, &config.run.keyword_label);
        if !problems.is_empty() {
            for problem in &problems {
                println!("  ✗ {problem}");
            }
            anyhow::bail!(
                "{} problem(s) found in {}",
                problems.len(),
                input.pattern_file.display()
            );
        }

        println!(
            "✅ {}: {} keywords, all patterns compile",
            input.pattern_file.display(),
            template.len()
        );
        for keyword in template.keywords() {
            println!("  - {keyword}");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickparse_core::TemplateFormat;

    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn template(yaml: &str) -> Template {
        Template::parse(yaml, TemplateFormat::Yaml).expect("should parse")
    }

    #[test]
    fn scaffold_is_clean() {
        let scaffold = template(Template::scaffold());
        assert!(CheckStrategy::problems(&scaffold, "Keyword").is_empty());
    }

    #[test]
    fn every_problem_is_reported() {
        let broken = template(
            "A:\n  Keyword: 'k(.)'\nB:\n  X: 'x('\nC:\n  Y: 'no group'\n",
        );
        let problems = CheckStrategy::problems(&broken, "Keyword");
        assert_eq!(problems.len(), 3);
        assert!(problems[1].starts_with("B: "));
        assert!(problems[2].starts_with("C: "));
    }
}
