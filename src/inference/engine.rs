//! Pattern inference over one directory of image files
//!
//! The first matched file fixes the expected fixed segments; every other file
//! must agree with it. Numeric dimensions must keep one digit width, which
//! makes lexicographic and numeric order coincide when picking bounds.

use crate::grammar::definition::Grammar;
use crate::grammar::filter::FileFilter;
use crate::grammar::segment::SegmentRole;
use crate::inference::pattern::{DimensionRange, Pattern, PatternPart};
use crate::inference::record::FileRecord;
use crate::io::error::{Result, ScreenError, file_system};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

/// Outcome of inferring one directory's pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inference {
    /// Pattern describing every matched file
    pub pattern: Pattern,
    /// Candidate files the grammar could not describe, sorted
    pub unmatched: Vec<String>,
    /// Number of files the pattern was built from
    pub matched: usize,
}

/// Infer the pattern of `directory` using the grammar's own file filter
///
/// # Errors
///
/// See [`infer_pattern_with`]
pub fn infer_pattern(directory: &Path, grammar: &Grammar) -> Result<Inference> {
    infer_pattern_with(directory, grammar, grammar.filter())
}

/// Infer the pattern of `directory`, keeping only files accepted by `filter`
///
/// Files whose names are not valid UTF-8 are skipped with a warning.
///
/// # Errors
///
/// Returns an error if:
/// - The directory cannot be listed
/// - No candidate file remains, or none matches the grammar
/// - Two matched files disagree on a fixed segment
/// - A numeric dimension mixes digit widths
pub fn infer_pattern_with(
    directory: &Path,
    grammar: &Grammar,
    filter: &FileFilter,
) -> Result<Inference> {
    let names = candidate_names(directory, grammar.extension(), filter)?;
    let (pattern, unmatched, matched) = infer_from_names(directory, grammar, &names)?;

    if !unmatched.is_empty() {
        tracing::debug!(
            directory = %directory.display(),
            count = unmatched.len(),
            "files did not fit grammar '{}'",
            grammar.name()
        );
    }

    Ok(Inference {
        pattern,
        unmatched,
        matched,
    })
}

fn candidate_names(directory: &Path, extension: &str, filter: &FileFilter) -> Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in fs::read_dir(directory).map_err(file_system(directory, "list directory"))? {
        let entry = entry.map_err(file_system(directory, "read directory entry"))?;
        if entry.path().is_dir() {
            continue;
        }
        let name = match entry.file_name().into_string() {
            Ok(name) => name,
            Err(raw) => {
                tracing::warn!(
                    directory = %directory.display(),
                    "skipping file with non-UTF-8 name {}",
                    raw.to_string_lossy()
                );
                continue;
            }
        };
        if name.ends_with(extension) && filter.accepts(&name) {
            names.push(name);
        }
    }
    names.sort_unstable();
    Ok(names)
}

fn infer_from_names(
    directory: &Path,
    grammar: &Grammar,
    names: &[String],
) -> Result<(Pattern, Vec<String>, usize)> {
    let empty = |unmatched: usize| ScreenError::EmptyCollection {
        directory: directory.to_path_buf(),
        extension: grammar.extension().to_string(),
        unmatched,
    };

    let mut records = Vec::with_capacity(names.len());
    let mut unmatched = Vec::new();
    for name in names {
        match FileRecord::from_name(name, grammar) {
            Some(record) => records.push(record),
            None => unmatched.push(name.clone()),
        }
    }

    let Some(first) = records.first() else {
        return Err(empty(unmatched.len()));
    };

    let expected = first.fixed_segments();
    if let Some(odd) = records.iter().find(|r| r.fixed_segments() != expected) {
        return Err(ScreenError::InconsistentGrammar {
            directory: directory.to_path_buf(),
            file: odd.name().to_string(),
            expected: expected.iter().map(ToString::to_string).collect(),
            found: odd.fixed_segments().iter().map(ToString::to_string).collect(),
        });
    }

    let mut fixed = expected.into_iter();
    let mut parts = Vec::with_capacity(grammar.roles().len());
    for role in grammar.roles() {
        parts.push(match role {
            SegmentRole::Fixed => PatternPart::Literal(fixed.next().unwrap_or_default().to_string()),
            SegmentRole::Literal(text) => PatternPart::Literal(text.clone()),
            SegmentRole::Variable { dimension } => {
                PatternPart::Range(observed_range(directory, dimension, &records)?)
            }
            SegmentRole::Enumerated {
                dimension,
                alphabet,
            } => PatternPart::Alphabet {
                dimension: dimension.clone(),
                symbols: alphabet.clone(),
            },
        });
    }

    Ok((Pattern::new(parts), unmatched, records.len()))
}

fn observed_range(
    directory: &Path,
    dimension: &str,
    records: &[FileRecord],
) -> Result<DimensionRange> {
    let values: Vec<&str> = records
        .iter()
        .filter_map(|record| record.value_of(dimension))
        .collect();

    let widths: BTreeSet<usize> = values.iter().map(|value| value.len()).collect();
    if widths.len() > 1 {
        return Err(ScreenError::InconsistentWidth {
            directory: directory.to_path_buf(),
            dimension: dimension.to_string(),
            widths: widths.into_iter().collect(),
        });
    }

    // Equal widths: string order is numeric order
    let min = values.iter().min().copied().unwrap_or_default();
    let max = values.iter().max().copied().unwrap_or_default();

    Ok(DimensionRange {
        dimension: dimension.to_string(),
        min: min.to_string(),
        max: max.to_string(),
    })
}
