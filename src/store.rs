//! List storage
//!
//! A list is a named, ordered sequence of text lines backed by a single
//! `<name>.list` file. The sequence operations here validate their indices
//! and leave the sequence untouched on rejection; persistence goes through
//! the [`ListStore`] trait so the conversation logic can run against an
//! in-memory store in tests.

mod file;
#[cfg(test)]
pub mod memory;

#[cfg(test)]
mod proptests;

pub use file::FileStore;

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File extension of list backing files
pub const LIST_EXTENSION: &str = "list";

/// Which argument of an indexed command was out of range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexRole {
    Position,
    From,
    To,
}

impl fmt::Display for IndexRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexRole::Position => Ok(()),
            IndexRole::From => f.write_str("'from' "),
            IndexRole::To => f.write_str("'to' "),
        }
    }
}

/// Errors raised by list operations.
///
/// Everything except [`ListError::Io`] is recoverable and rendered straight
/// to the user; `Io` aborts the running workflow.
#[derive(Debug, Error)]
pub enum ListError {
    #[error("Invalid list name: {0}")]
    NotFound(String),
    #[error("A list with name '{0}' already exists")]
    AlreadyExists(String),
    #[error("Invalid list name: {0}")]
    InvalidName(String),
    #[error("Invalid {role}index {index}")]
    InvalidIndex { role: IndexRole, index: usize },
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ListError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        ListError::Io {
            path: path.into(),
            source,
        }
    }

    pub fn is_io(&self) -> bool {
        matches!(self, ListError::Io { .. })
    }
}

pub type ListResult<T> = Result<T, ListError>;

/// A named list with its backing file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemList {
    pub name: String,
    pub path: PathBuf,
    pub items: Vec<String>,
}

impl ItemList {
    pub fn new(name: impl Into<String>, path: PathBuf, items: Vec<String>) -> Self {
        Self {
            name: name.into(),
            path,
            items,
        }
    }
}

/// Persistence backend for the lists of one chat.
///
/// One store is bound to one storage directory and is owned by exactly one
/// session, so implementations need no internal locking.
pub trait ListStore: Send {
    /// Storage directory of this store
    fn dir(&self) -> &Path;

    /// Read every line of the backing file, in file order.
    /// A missing file is an error, not an empty list.
    fn load(&self, path: &Path) -> ListResult<Vec<String>>;

    /// Replace the backing file contents with `items`
    fn save(&mut self, path: &Path, items: &[String]) -> ListResult<()>;

    /// Delete the backing file
    fn remove(&mut self, path: &Path) -> ListResult<()>;

    /// Enumerate `(name, path)` of every list file in the directory, sorted by name
    fn discover(&self) -> ListResult<Vec<(String, PathBuf)>>;

    /// Backing file path for a list name
    fn path_for(&self, name: &str) -> PathBuf {
        self.dir().join(format!("{name}.{LIST_EXTENSION}"))
    }
}

/// Reject names that cannot be used as a file stem inside the storage directory
pub fn validate_name(name: &str) -> ListResult<()> {
    if name.is_empty() || name == "." || name == ".." || name.contains(['/', '\\', '\0']) {
        return Err(ListError::InvalidName(name.to_string()));
    }
    Ok(())
}

/// Split free text into list items, one per line.
///
/// Items are stored one per line, so text that spans lines becomes several
/// items. Line endings are `\n` or `\r\n`; text without one is a single
/// item, even when empty.
pub fn split_lines(text: &str) -> Vec<String> {
    text.split('\n')
        .map(|line| line.trim_end_matches('\r').to_string())
        .collect()
}

// ============================================================================
// Sequence operations
// ============================================================================

/// Insert `value` so that it ends up at `index` (0 ≤ index ≤ len)
pub fn insert(items: &mut Vec<String>, index: usize, value: String) -> ListResult<()> {
    if index > items.len() {
        return Err(ListError::InvalidIndex {
            role: IndexRole::Position,
            index,
        });
    }
    items.insert(index, value);
    Ok(())
}

/// Remove and return the item at `index` (0 ≤ index < len)
pub fn remove(items: &mut Vec<String>, index: usize) -> ListResult<String> {
    check_existing(items, index, IndexRole::Position)?;
    Ok(items.remove(index))
}

/// Replace the item at `index`, returning the previous value
pub fn replace_at(items: &mut [String], index: usize, value: String) -> ListResult<String> {
    check_existing(items, index, IndexRole::Position)?;
    Ok(std::mem::replace(&mut items[index], value))
}

/// Move the item at `from` so it lands at `to`.
///
/// This is a remove followed by an insert: `to` addresses the sequence
/// *after* the element has been taken out, so both indices must be below
/// the original length.
pub fn move_item(items: &mut Vec<String>, from: usize, to: usize) -> ListResult<()> {
    check_existing(items, from, IndexRole::From)?;
    check_existing(items, to, IndexRole::To)?;
    let value = items.remove(from);
    items.insert(to, value);
    Ok(())
}

fn check_existing(items: &[String], index: usize, role: IndexRole) -> ListResult<()> {
    if index < items.len() {
        Ok(())
    } else {
        Err(ListError::InvalidIndex { role, index })
    }
}
