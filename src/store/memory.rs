//! In-memory list store for testing
//!
//! Simulates the storage directory in a map and can be told to fail saves
//! or removals, which is how the workflow abort paths get exercised without
//! touching a real filesystem.

use super::{ListError, ListResult, ListStore};
use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    dir: PathBuf,
    files: BTreeMap<PathBuf, Vec<String>>,
    fail_saves: bool,
    fail_removes: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            dir: PathBuf::from("/virtual"),
            ..Self::default()
        }
    }

    /// Create a store with pre-existing lists
    pub fn with_lists<'a>(lists: impl IntoIterator<Item = (&'a str, Vec<&'a str>)>) -> Self {
        let mut store = Self::new();
        for (name, items) in lists {
            let path = store.path_for(name);
            store
                .files
                .insert(path, items.into_iter().map(String::from).collect());
        }
        store
    }

    pub fn fail_saves(&mut self, fail: bool) {
        self.fail_saves = fail;
    }

    pub fn fail_removes(&mut self, fail: bool) {
        self.fail_removes = fail;
    }

    /// Persisted items of a list, if its file exists
    pub fn contents(&self, name: &str) -> Option<&Vec<String>> {
        self.files.get(&self.path_for(name))
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }
}

impl ListStore for MemoryStore {
    fn dir(&self) -> &Path {
        &self.dir
    }

    fn load(&self, path: &Path) -> ListResult<Vec<String>> {
        self.files.get(path).cloned().ok_or_else(|| {
            ListError::io(path, io::Error::new(io::ErrorKind::NotFound, "no such file"))
        })
    }

    fn save(&mut self, path: &Path, items: &[String]) -> ListResult<()> {
        if self.fail_saves {
            return Err(ListError::io(path, io::Error::other("injected save failure")));
        }
        self.files.insert(path.to_path_buf(), items.to_vec());
        Ok(())
    }

    fn remove(&mut self, path: &Path) -> ListResult<()> {
        if self.fail_removes {
            return Err(ListError::io(path, io::Error::other("injected remove failure")));
        }
        self.files
            .remove(path)
            .map(|_| ())
            .ok_or_else(|| ListError::io(path, io::Error::new(io::ErrorKind::NotFound, "no such file")))
    }

    fn discover(&self) -> ListResult<Vec<(String, PathBuf)>> {
        Ok(self
            .files
            .keys()
            .filter_map(|path| {
                let name = path.file_stem()?.to_str()?.to_string();
                Some((name, path.clone()))
            })
            .collect())
    }
}
