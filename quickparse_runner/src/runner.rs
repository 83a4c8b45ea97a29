//! Folder-level runs: parse a target folder on its own, or compare it
//! against a reference folder.

use std::path::Path;
use std::time::Instant;

use indexmap::IndexMap;
use quickparse_core::{Discoverer, NOT_FOUND, Template, Tree, Value, compare, flatten_leaves};
use tracing::{Dispatch, debug, info, warn};

use crate::error::{Result, RunError};
use crate::options::RunOptions;
use crate::pipeline::{
    FileOutcome, ParserSet, SourceFile, Unreadable, discover_files, extract_files,
    index_references,
};
use crate::pool::WorkerPool;
use crate::report::{Report, Summary};
use crate::scan::scan_folder;

/// Detail-tree key for target files that could not be processed.
pub const ERRORS_KEY: &str = "Errors";

/// Drives discovery, extraction and comparison over whole folders.
pub struct Runner {
    template: Template,
    options: RunOptions,
    dispatch: Option<Dispatch>,
}

impl Runner {
    /// Fails if a field name in `template` collides with the wildcard or the
    /// keyword label.
    pub fn new(template: Template, options: RunOptions) -> Result<Self> {
        template.validate_names(&options.keyword_label)?;
        Ok(Self {
            template,
            options,
            dispatch: None,
        })
    }

    pub fn from_pattern_file(pattern_file: &Path, options: RunOptions) -> Result<Self> {
        Self::new(Template::load(pattern_file)?, options)
    }

    /// Send this runner's log events to `dispatch` instead of the global
    /// subscriber.
    #[must_use]
    pub fn with_dispatch(mut self, dispatch: Dispatch) -> Self {
        self.dispatch = Some(dispatch);
        self
    }

    #[must_use]
    pub const fn template(&self) -> &Template {
        &self.template
    }

    #[must_use]
    pub const fn options(&self) -> &RunOptions {
        &self.options
    }

    /// Parse the target folder, comparing against `reference` when given.
    pub fn run(&self, target: &Path, reference: Option<&Path>) -> Result<Report> {
        match reference {
            Some(reference) => self.compare_folders(reference, target),
            None => self.parse_folder(target),
        }
    }

    /// Extract every file of `target` with the template of its keyword.
    pub fn parse_folder(&self, target: &Path) -> Result<Report> {
        self.in_sink(|| self.parse_folder_inner(target))
    }

    /// Extract both folders and diff each target file against the reference
    /// file that has the same keyword.
    pub fn compare_folders(&self, reference: &Path, target: &Path) -> Result<Report> {
        self.in_sink(|| self.compare_folders_inner(reference, target))
    }

    fn in_sink<T>(&self, f: impl FnOnce() -> T) -> T {
        match &self.dispatch {
            Some(dispatch) => tracing::dispatcher::with_default(dispatch, f),
            None => f(),
        }
    }

    fn setup(&self) -> Result<(WorkerPool, Discoverer)> {
        let pool = WorkerPool::new(self.options.workers())?;
        let discoverer = Discoverer::from_template(&self.template).map_err(RunError::Keywords)?;
        debug!("Worker pool ready with {} threads", pool.workers());
        Ok((pool, discoverer))
    }

    fn parse_folder_inner(&self, target: &Path) -> Result<Report> {
        let started = Instant::now();
        let label = &self.options.keyword_label;
        debug!("Working...");

        let paths = scan_folder(target, &self.options.extensions)?;
        let (pool, discoverer) = self.setup()?;

        debug!("Discovering keywords...");
        let (files, unreadable) = discover_files(&pool, &paths, &discoverer);
        let keywords = found_keywords(&files);
        debug!("Discovered keywords from target files: {}", keywords.join(", "));

        debug!("Creating parser objects...");
        let parsers = ParserSet::build(&self.template, keywords.iter().map(String::as_str));

        debug!("Parsing target files...");
        let outcomes = extract_files(&pool, &files, &parsers);

        debug!("Building report...");
        let mut detail = Tree::new();
        let mut not_found = Vec::new();
        let mut errors = unreadable_errors(&unreadable);

        for (file, outcome) in files.iter().zip(outcomes) {
            match outcome {
                FileOutcome::Unclassified => not_found.push(file.name.clone()),
                FileOutcome::Failed(e) => {
                    warn!("Failed to parse {}: {e}", file.name);
                    errors.insert(file.name.clone(), Value::from(e.to_string()));
                }
                FileOutcome::Parsed(mut parsed) => {
                    parsed.insert(label.clone(), Value::from(file.keyword.clone()));
                    detail.insert(file.name.clone(), Value::Map(parsed));
                }
            }
        }

        let summary = Summary {
            files_found: paths.len(),
            keywords_found: keywords,
            files_without_keyword: not_found.len(),
            files_without_reference: 0,
            files_with_errors: errors.len(),
            deviations: None,
        };
        detail.insert(self.options.not_found_key(), Value::from(not_found));
        detail.insert(ERRORS_KEY.to_string(), Value::Map(errors));

        info!(
            "Parsed {} files, {} without {label}",
            summary.files_found, summary.files_without_keyword
        );
        debug!("Finished");
        Ok(Report::new(
            detail,
            summary,
            label,
            &target.display().to_string(),
            None,
            started.elapsed(),
        ))
    }

    fn compare_folders_inner(&self, reference: &Path, target: &Path) -> Result<Report> {
        let started = Instant::now();
        let label = &self.options.keyword_label;
        debug!("Working...");

        let target_paths = scan_folder(target, &self.options.extensions)?;
        let reference_paths = scan_folder(reference, &self.options.extensions)?;
        let (pool, discoverer) = self.setup()?;

        debug!("Discovering keywords...");
        let (reference_files, unreadable) = discover_files(&pool, &reference_paths, &discoverer);
        if let Some(failed) = unreadable.into_iter().next() {
            return Err(RunError::Read {
                path: failed.path,
                source: failed.error,
            });
        }
        let references = index_references(reference_files)?;
        debug!(
            "Discovered keywords from reference files: {}",
            references.keys().map(String::as_str).collect::<Vec<_>>().join(", ")
        );

        let (target_files, unreadable) = discover_files(&pool, &target_paths, &discoverer);
        let target_keywords = found_keywords(&target_files);
        debug!(
            "Discovered keywords from target files: {}",
            target_keywords.join(", ")
        );

        debug!("Creating parser objects...");
        let parsers = ParserSet::build(
            &self.template,
            references
                .keys()
                .map(String::as_str)
                .chain(target_keywords.iter().map(String::as_str)),
        );

        debug!("Parsing reference files...");
        let reference_trees = self.parse_references(&pool, &references, &parsers)?;

        debug!("Parsing target files...");
        let outcomes = extract_files(&pool, &target_files, &parsers);

        debug!("Comparing reference and target...");
        let mut target_detail = Tree::new();
        let mut not_found = Vec::new();
        let mut without_reference = Vec::new();
        let mut errors = unreadable_errors(&unreadable);
        let mut deviations = 0;

        for (file, outcome) in target_files.iter().zip(outcomes) {
            let parsed = match outcome {
                FileOutcome::Unclassified => {
                    not_found.push(file.name.clone());
                    continue;
                }
                FileOutcome::Failed(e) => {
                    warn!("Failed to parse {}: {e}", file.name);
                    errors.insert(file.name.clone(), Value::from(e.to_string()));
                    continue;
                }
                FileOutcome::Parsed(parsed) => parsed,
            };
            let Some(keyword) = file.keyword.as_deref() else {
                continue;
            };
            let Some(reference_tree) = reference_trees.get(keyword) else {
                warn!("No reference file for {label} {keyword:?} found in {}", file.name);
                without_reference.push(file.name.clone());
                continue;
            };

            let result = compare(reference_tree, &parsed);
            deviations += flatten_leaves(&result.mismatches).len();

            let mut entry = Tree::new();
            entry.insert("Matches".to_string(), Value::Map(result.matches));
            entry.insert("Deviations".to_string(), Value::Map(result.mismatches));
            entry.insert(label.clone(), Value::from(keyword));
            target_detail.insert(file.name.clone(), Value::Map(entry));
        }

        let summary = Summary {
            files_found: target_paths.len(),
            keywords_found: target_keywords,
            files_without_keyword: not_found.len(),
            files_without_reference: without_reference.len(),
            files_with_errors: errors.len(),
            deviations: Some(deviations),
        };
        target_detail.insert(self.options.not_found_key(), Value::from(not_found));
        target_detail.insert(
            self.options.without_reference_key(),
            Value::from(without_reference),
        );
        target_detail.insert(ERRORS_KEY.to_string(), Value::Map(errors));

        let mut reference_detail = Tree::new();
        for (keyword, file) in &references {
            let mut entry = reference_trees.get(keyword).cloned().unwrap_or_default();
            entry.insert(label.clone(), Value::from(keyword.as_str()));
            reference_detail.insert(file.name.clone(), Value::Map(entry));
        }

        let mut detail = Tree::new();
        detail.insert("Reference Folder".to_string(), Value::Map(reference_detail));
        detail.insert("Target Folder".to_string(), Value::Map(target_detail));

        info!(
            "Compared {} target files against {} references: {deviations} deviations",
            summary.files_found,
            references.len()
        );
        debug!("Finished");
        Ok(Report::new(
            detail,
            summary,
            label,
            &target.display().to_string(),
            Some(&reference.display().to_string()),
            started.elapsed(),
        ))
    }

    /// Extract every reference file. Any failure, empty result or unmatched
    /// field is fatal.
    fn parse_references(
        &self,
        pool: &WorkerPool,
        references: &IndexMap<String, SourceFile>,
        parsers: &ParserSet,
    ) -> Result<IndexMap<String, Tree>> {
        let files: Vec<SourceFile> = references.values().cloned().collect();
        let outcomes = extract_files(pool, &files, parsers);

        let mut trees = IndexMap::with_capacity(files.len());
        for (file, outcome) in files.into_iter().zip(outcomes) {
            let keyword = file.keyword.unwrap_or_default();
            let tree = match outcome {
                FileOutcome::Parsed(tree) => tree,
                FileOutcome::Failed(source) => {
                    return Err(RunError::Patterns { keyword, source });
                }
                FileOutcome::Unclassified => {
                    return Err(RunError::ReferenceWithoutKeyword { file: file.name });
                }
            };
            if tree.is_empty() {
                return Err(RunError::EmptyReference { file: file.name });
            }
            let missing = not_found_paths(&tree);
            if !missing.is_empty() {
                return Err(RunError::IncompleteReference {
                    file: file.name,
                    fields: missing,
                });
            }
            debug!(
                "Reference {} for {} {keyword:?} has {} fields",
                file.name,
                self.options.keyword_label,
                flatten_leaves(&tree).len()
            );
            trees.insert(keyword, tree);
        }
        Ok(trees)
    }
}

/// Distinct keywords in file order.
fn found_keywords(files: &[SourceFile]) -> Vec<String> {
    let mut keywords: Vec<String> = Vec::new();
    for keyword in files.iter().filter_map(|f| f.keyword.as_ref()) {
        if !keywords.contains(keyword) {
            keywords.push(keyword.clone());
        }
    }
    keywords
}

fn unreadable_errors(unreadable: &[Unreadable]) -> Tree {
    unreadable
        .iter()
        .map(|failed| {
            warn!("Failed to read {}: {}", failed.path.display(), failed.error);
            (failed.name.clone(), Value::from(failed.error.to_string()))
        })
        .collect()
}

/// Slash-joined paths of every `"NOT FOUND"` leaf.
fn not_found_paths(tree: &Tree) -> Vec<String> {
    fn walk(tree: &Tree, prefix: &str, out: &mut Vec<String>) {
        for (key, value) in tree {
            let path = if prefix.is_empty() {
                key.clone()
            } else {
                format!("{prefix}/{key}")
            };
            match value {
                Value::Map(child) => walk(child, &path, out),
                Value::Text(s) if s == NOT_FOUND => out.push(path),
                _ => {}
            }
        }
    }

    let mut out = Vec::new();
    walk(tree, "", &mut out);
    out
}
