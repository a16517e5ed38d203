//! Loads a text file into a tree of strings, one entry per line.
//!
//! Lines are split on `\n` only, so a `\r` before it stays part of the entry.
//! Duplicate lines are rejected by the tree and counted.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

use crate::config::TreeConfig;
use crate::rebalance::Rebalance;
use crate::tree::Tree;

/// Errors that stop a file from being loaded
#[derive(Debug, Error)]
pub enum DriverError {
    /// File could not be opened
    #[error("File not found!")]
    NotFound {
        /// Path given on the command line
        path: PathBuf,
        /// Underlying open failure
        #[source]
        source: io::Error,
    },

    /// File exists but holds zero bytes
    #[error("File is empty!")]
    Empty {
        /// Path given on the command line
        path: PathBuf,
    },

    /// Reading failed part way through
    #[error("failed to read {} after {entries} entries", .path.display())]
    Read {
        /// Path given on the command line
        path: PathBuf,
        /// Entries loaded before the failure
        entries: usize,
        /// Underlying read failure
        #[source]
        source: io::Error,
    },
}

/// Outcome of feeding lines into a tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoadStats {
    /// Lines read
    pub lines: usize,
    /// Lines that became new entries
    pub inserted: usize,
    /// Lines rejected as duplicates
    pub duplicates: usize,
}

/// Insert every newline-delimited line of `reader` into `tree`
pub fn fill_tree<B, R>(reader: B, tree: &mut Tree<String, R>) -> io::Result<LoadStats>
where
    B: BufRead,
    R: Rebalance<String>,
{
    let mut stats = LoadStats::default();

    for line in reader.split(b'\n') {
        let line = String::from_utf8_lossy(&line?).into_owned();
        stats.lines += 1;
        if tree.insert(line) {
            stats.inserted += 1;
        } else {
            stats.duplicates += 1;
        }
    }

    Ok(stats)
}

/// Open `path` and build a tree of its lines
pub fn load_tree(path: &Path, config: TreeConfig) -> Result<Tree<String>, DriverError> {
    let file = File::open(path).map_err(|source| DriverError::NotFound {
        path: path.to_path_buf(),
        source,
    })?;

    let length = file
        .metadata()
        .map_err(|source| DriverError::Read {
            path: path.to_path_buf(),
            entries: 0,
            source,
        })?
        .len();
    if length == 0 {
        return Err(DriverError::Empty {
            path: path.to_path_buf(),
        });
    }
    debug!(path = %path.display(), bytes = length, "loading file");

    let mut tree = Tree::with_config(config);
    let stats = fill_tree(BufReader::new(file), &mut tree).map_err(|source| DriverError::Read {
        path: path.to_path_buf(),
        entries: tree.len(),
        source,
    })?;

    info!(
        lines = stats.lines,
        inserted = stats.inserted,
        duplicates = stats.duplicates,
        "file loaded"
    );
    Ok(tree)
}
