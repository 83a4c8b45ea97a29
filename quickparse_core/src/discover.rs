//! Keyword discovery.
//!
//! Keywords are tried in template order and each is searched for in the text
//! as a regex. The first keyword (in template order, not text position) that
//! matches identifies the text. If none does and the template has a `"*"`
//! entry, the wildcard is returned instead.

use regex::Regex;

use crate::error::ExtractionError;
use crate::template::Template;
use crate::value::WILDCARD;

/// Compiled keyword matchers for a fixed candidate list.
#[derive(Debug, Clone)]
pub struct Discoverer {
    candidates: Vec<(String, Regex)>,
    wildcard: bool,
}

impl Discoverer {
    /// Compile the candidate keywords, in order.
    pub fn new<I, S>(candidates: I) -> Result<Self, ExtractionError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut compiled = Vec::new();
        let mut wildcard = false;

        for keyword in candidates {
            let keyword = keyword.as_ref();
            if keyword == WILDCARD {
                wildcard = true;
                continue;
            }
            let re = Regex::new(keyword).map_err(|e| ExtractionError::InvalidPattern {
                pattern: keyword.to_string(),
                message: e.to_string(),
            })?;
            compiled.push((keyword.to_string(), re));
        }

        Ok(Self {
            candidates: compiled,
            wildcard,
        })
    }

    /// Discoverer over every keyword of `template`.
    pub fn from_template(template: &Template) -> Result<Self, ExtractionError> {
        Self::new(template.keywords())
    }

    #[must_use]
    pub const fn has_wildcard(&self) -> bool {
        self.wildcard
    }

    /// The keyword identifying `text`, if any.
    #[must_use]
    pub fn discover(&self, text: &str) -> Option<&str> {
        self.candidates
            .iter()
            .find(|(_, re)| re.is_match(text))
            .map(|(keyword, _)| keyword.as_str())
            .or_else(|| self.wildcard.then_some(WILDCARD))
    }
}

/// One-shot discovery over `candidates`.
pub fn discover<S: AsRef<str>>(
    text: &str,
    candidates: &[S],
) -> Result<Option<String>, ExtractionError> {
    let discoverer = Discoverer::new(candidates)?;
    Ok(discoverer.discover(text).map(str::to_string))
}
