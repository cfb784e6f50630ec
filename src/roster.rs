//! Roster manifest parsing
//!
//! A roster is a small manifest: line 1 is an integer count N, the next
//! N lines are one relative path each, resolved against the roster
//! file's own directory. The same grammar enumerates article files and,
//! separately, the auxiliary list files (languages, categories, linking
//! words). Word-list files reuse the grammar with words instead of
//! paths.
//!
//! Roster errors are fatal - a run over a partial manifest would
//! silently produce wrong statistics.

use crate::error::{RosterError, RosterResult};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Read a roster and resolve its entries against the roster's directory
pub fn read_roster(path: &Path) -> RosterResult<Vec<PathBuf>> {
    let base = path.parent().map(Path::to_path_buf);
    let entries = read_lines(path)?;

    Ok(entries
        .into_iter()
        .map(|relative| match &base {
            Some(base) if !base.as_os_str().is_empty() => base.join(relative),
            _ => PathBuf::from(relative),
        })
        .collect())
}

/// Read a word-list file (count + N words, one per line)
pub fn read_word_list(path: &Path) -> RosterResult<Vec<String>> {
    read_lines(path)
}

/// The three externally supplied vocabularies
///
/// Languages and categories gate which per-group report files are
/// produced; linking words are excluded from keyword extraction.
#[derive(Debug)]
pub struct AuxiliaryLists {
    /// Valid language names
    pub languages: HashSet<String>,

    /// Valid category labels (raw, as listed - normalization happens
    /// only when deriving report filenames)
    pub categories: HashSet<String>,

    /// Linking words, lowercased on load
    pub stop_words: HashSet<String>,
}

impl AuxiliaryLists {
    /// Load the auxiliary lists named by a roster
    ///
    /// The roster must name at least three files, in order: the
    /// language list, the category list, the linking-word list. Extra
    /// entries are ignored.
    pub fn load(roster_path: &Path) -> RosterResult<Self> {
        let files = read_roster(roster_path)?;
        if files.len() < 3 {
            return Err(RosterError::AuxiliaryIncomplete {
                path: roster_path.to_path_buf(),
                found: files.len(),
            });
        }

        let languages = read_word_list(&files[0])?.into_iter().collect();
        let categories = read_word_list(&files[1])?.into_iter().collect();
        let stop_words = read_word_list(&files[2])?
            .into_iter()
            .map(|word| word.to_lowercase())
            .collect();

        Ok(Self {
            languages,
            categories,
            stop_words,
        })
    }
}

/// Shared count-then-lines reader
fn read_lines(path: &Path) -> RosterResult<Vec<String>> {
    let content = fs::read_to_string(path).map_err(|source| RosterError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mut lines = content.lines();

    let count_line = lines.next().ok_or_else(|| RosterError::MissingCount {
        path: path.to_path_buf(),
    })?;

    let expected: usize =
        count_line
            .trim()
            .parse()
            .map_err(|_| RosterError::InvalidCount {
                path: path.to_path_buf(),
                line: count_line.to_string(),
            })?;

    let entries: Vec<String> = lines
        .take(expected)
        .map(|line| line.trim().to_string())
        .collect();

    if entries.len() < expected {
        return Err(RosterError::Truncated {
            path: path.to_path_buf(),
            expected,
            found: entries.len(),
        });
    }

    Ok(entries)
}
