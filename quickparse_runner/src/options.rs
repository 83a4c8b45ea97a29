use std::fmt;
use std::str::FromStr;

use quickparse_core::DEFAULT_KEYWORD_LABEL;
use serde::{Deserialize, Serialize};

/// Knobs for a folder run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RunOptions {
    /// Name of the keyword marker added to each file's entry, and the word
    /// used for it throughout the report ("Keyword(s) Found", ...).
    #[serde(default = "RunOptions::default_keyword_label")]
    pub keyword_label: String,

    /// File extensions scanned in each folder.
    #[serde(default = "RunOptions::default_extensions")]
    pub extensions: Vec<String>,

    /// Worker threads per available core.
    #[serde(default = "RunOptions::default_worker_multiplier")]
    pub worker_multiplier: usize,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            keyword_label: Self::default_keyword_label(),
            extensions: Self::default_extensions(),
            worker_multiplier: Self::default_worker_multiplier(),
        }
    }
}

impl RunOptions {
    fn default_keyword_label() -> String {
        DEFAULT_KEYWORD_LABEL.to_string()
    }

    fn default_extensions() -> Vec<String> {
        vec![".txt".to_string(), ".log".to_string()]
    }

    const fn default_worker_multiplier() -> usize {
        2
    }

    /// Total worker threads for the pool.
    #[must_use]
    pub fn workers(&self) -> usize {
        let cores = std::thread::available_parallelism().map_or(1, std::num::NonZeroUsize::get);
        cores * self.worker_multiplier.max(1)
    }

    #[must_use]
    pub fn not_found_key(&self) -> String {
        format!("{} Not Found", self.keyword_label)
    }

    #[must_use]
    pub fn without_reference_key(&self) -> String {
        format!("{} Without Reference", self.keyword_label)
    }
}

/// Serialization used for rendered reports.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Yaml,
    Json,
}

impl ReportFormat {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Yaml => "yaml",
            Self::Json => "json",
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().trim_start_matches('.').to_lowercase().as_str() {
            "yaml" | "yml" => Ok(Self::Yaml),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown report format: {other}")),
        }
    }
}
