//! High score table
//!
//! Persisted as a text file with one `alias:score` record per line. Each alias
//! holds a single score; recording again replaces it.

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use crate::error::PersistenceError;

/// Rows shown on the start and lose screens
pub const TABLE_ROWS: usize = 5;

/// Column width of the rendered table
const COLUMN_WIDTH: usize = 15;

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighScoreEntry {
    pub alias: String,
    pub score: u64,
}

/// High score table bound to its backing file
#[derive(Debug, Clone, Default)]
pub struct HighScores {
    path: PathBuf,
    scores: BTreeMap<String, u64>,
}

impl HighScores {
    /// Create an empty table that will save to `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            scores: BTreeMap::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the table from `path`.
    ///
    /// A missing file is an empty table. Lines that are not `alias:score` are
    /// skipped with a warning. A later line for the same alias replaces an
    /// earlier one.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, PersistenceError> {
        let mut table = Self::new(path);
        if !table.path.exists() {
            log::info!("No high scores at {}, starting fresh", table.path.display());
            return Ok(table);
        }

        let text = std::fs::read_to_string(&table.path).map_err(|source| PersistenceError::Read {
            path: table.path.clone(),
            source,
        })?;

        for (number, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            match parse_line(line) {
                Some((alias, score)) => {
                    table.scores.insert(alias.to_string(), score);
                }
                None => log::warn!(
                    "Skipping malformed high score line {} in {}: {:?}",
                    number + 1,
                    table.path.display(),
                    line
                ),
            }
        }

        log::info!("Loaded {} high scores", table.scores.len());
        Ok(table)
    }

    /// Write every record back, replacing the file
    pub fn save(&self) -> Result<(), PersistenceError> {
        let write_err = |source| PersistenceError::Write {
            path: self.path.clone(),
            source,
        };

        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir).map_err(write_err)?;
        }

        let mut out = String::new();
        for (alias, score) in &self.scores {
            let _ = writeln!(out, "{alias}:{score}");
        }
        std::fs::write(&self.path, out).map_err(write_err)?;

        log::info!("High scores saved ({} entries)", self.scores.len());
        Ok(())
    }

    /// Record `score` for `alias`, replacing whatever it held
    pub fn insert(&mut self, alias: &str, score: u64) {
        log::debug!("High score {}:{}", alias, score);
        self.scores.insert(alias.to_string(), score);
    }

    pub fn get(&self, alias: &str) -> Option<u64> {
        self.scores.get(alias).copied()
    }

    /// Best `k` records: score descending, then alias ascending
    pub fn top(&self, k: usize) -> Vec<HighScoreEntry> {
        let mut entries: Vec<HighScoreEntry> = self
            .scores
            .iter()
            .map(|(alias, &score)| HighScoreEntry {
                alias: alias.clone(),
                score,
            })
            .collect();
        // The map already yields aliases in ascending order; a stable sort
        // on score keeps that as the tie-break.
        entries.sort_by(|a, b| b.score.cmp(&a.score));
        entries.truncate(k);
        entries
    }

    /// Best `k` records as display text: alias left in 15 columns, score
    /// right in 15 columns, a blank line after each row.
    pub fn to_table(&self, k: usize) -> String {
        let mut out = String::new();
        for entry in self.top(k) {
            let _ = write!(
                out,
                "{:<width$}{:>width$}\n\n",
                entry.alias,
                entry.score,
                width = COLUMN_WIDTH
            );
        }
        out
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    /// Check if the table is empty
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u64> {
        self.scores.values().copied().max()
    }
}

/// Split `alias:score` on the last colon
fn parse_line(line: &str) -> Option<(&str, u64)> {
    let (alias, score) = line.rsplit_once(':')?;
    if alias.is_empty() {
        return None;
    }
    let score = score.trim().parse().ok()?;
    Some((alias, score))
}
