//! Per-file discovery and extraction stages.
//!
//! Both stages fan out over the worker pool with one owned result per file.
//! Anything that needs to look across files (duplicate reference keywords,
//! grouping by keyword) happens afterwards on the calling thread.

use std::path::PathBuf;

use indexmap::IndexMap;
use quickparse_core::{CompiledFieldTree, Discoverer, ExtractionError, Template, Tree};

use crate::error::{Result, RunError};
use crate::pool::WorkerPool;
use crate::scan::{display_name, read_text};

/// A file that was read and classified.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub path: PathBuf,
    pub name: String,
    pub text: String,
    pub keyword: Option<String>,
}

/// A file that could not be read.
#[derive(Debug)]
pub struct Unreadable {
    pub path: PathBuf,
    pub name: String,
    pub error: std::io::Error,
}

/// Read and classify every file.
#[must_use]
pub fn discover_files(
    pool: &WorkerPool,
    paths: &[PathBuf],
    discoverer: &Discoverer,
) -> (Vec<SourceFile>, Vec<Unreadable>) {
    let outcomes = pool.map(paths, |path| {
        let name = display_name(path);
        match read_text(path) {
            Ok(text) => {
                let keyword = discoverer.discover(&text).map(str::to_string);
                Ok(SourceFile {
                    path: path.clone(),
                    name,
                    text,
                    keyword,
                })
            }
            Err(error) => Err(Unreadable {
                path: path.clone(),
                name,
                error,
            }),
        }
    });

    let mut files = Vec::with_capacity(outcomes.len());
    let mut unreadable = Vec::new();
    for outcome in outcomes {
        match outcome {
            Ok(file) => files.push(file),
            Err(failed) => unreadable.push(failed),
        }
    }
    (files, unreadable)
}

/// Index reference files by keyword.
///
/// Every reference file must carry a keyword and no two may share one.
/// Files arrive in path order, so the reported pair is deterministic.
pub fn index_references(files: Vec<SourceFile>) -> Result<IndexMap<String, SourceFile>> {
    let mut index: IndexMap<String, SourceFile> = IndexMap::with_capacity(files.len());
    for file in files {
        let Some(keyword) = file.keyword.clone() else {
            return Err(RunError::ReferenceWithoutKeyword { file: file.name });
        };
        if let Some(first) = index.get(&keyword) {
            return Err(RunError::DuplicateReference {
                keyword,
                first: first.name.clone(),
                second: file.name,
            });
        }
        index.insert(keyword, file);
    }
    Ok(index)
}

/// Compiled field trees for the keywords a run actually uses.
///
/// A keyword whose patterns fail to compile keeps its error so that only
/// the files classified under it are affected.
#[derive(Debug, Default)]
pub struct ParserSet {
    parsers: IndexMap<String, std::result::Result<CompiledFieldTree, ExtractionError>>,
}

impl ParserSet {
    pub fn build<'a>(template: &Template, keywords: impl IntoIterator<Item = &'a str>) -> Self {
        let mut parsers = IndexMap::new();
        for keyword in keywords {
            if !parsers.contains_key(keyword) {
                parsers.insert(
                    keyword.to_string(),
                    CompiledFieldTree::for_keyword(template, keyword),
                );
            }
        }
        Self { parsers }
    }

    #[must_use]
    pub fn get(
        &self,
        keyword: &str,
    ) -> Option<&std::result::Result<CompiledFieldTree, ExtractionError>> {
        self.parsers.get(keyword)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.parsers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parsers.is_empty()
    }
}

/// Result of extracting one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    /// No keyword was discovered in the file.
    Unclassified,
    /// Extraction succeeded; unmatched fields hold `"NOT FOUND"`.
    Parsed(Tree),
    /// The keyword's patterns could not be compiled.
    Failed(ExtractionError),
}

/// Extract every file with the parser for its keyword, keeping sentinels.
#[must_use]
pub fn extract_files(pool: &WorkerPool, files: &[SourceFile], parsers: &ParserSet) -> Vec<FileOutcome> {
    pool.map(files, |file| {
        let Some(keyword) = file.keyword.as_deref() else {
            return FileOutcome::Unclassified;
        };
        match parsers.get(keyword) {
            Some(Ok(parser)) => FileOutcome::Parsed(parser.extract(&file.text, false)),
            Some(Err(e)) => FileOutcome::Failed(e.clone()),
            None => FileOutcome::Parsed(Tree::new()),
        }
    })
}
