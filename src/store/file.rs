//! Filesystem-backed list store

use super::{ListError, ListResult, ListStore, LIST_EXTENSION};
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Stores each list as `<dir>/<name>.list`, one item per line
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl ListStore for FileStore {
    fn dir(&self) -> &Path {
        &self.dir
    }

    fn load(&self, path: &Path) -> ListResult<Vec<String>> {
        let file = File::open(path).map_err(|e| ListError::io(path, e))?;
        BufReader::new(file)
            .lines()
            .collect::<io::Result<Vec<_>>>()
            .map_err(|e| ListError::io(path, e))
    }

    fn save(&mut self, path: &Path, items: &[String]) -> ListResult<()> {
        // Write next to the target and rename over it, so a failed write
        // never leaves a truncated list behind.
        let tmp = path.with_extension(format!("{LIST_EXTENSION}.tmp"));
        let result = write_lines(&tmp, items).and_then(|()| fs::rename(&tmp, path));
        if let Err(e) = result {
            let _ = fs::remove_file(&tmp);
            return Err(ListError::io(path, e));
        }
        Ok(())
    }

    fn remove(&mut self, path: &Path) -> ListResult<()> {
        fs::remove_file(path).map_err(|e| ListError::io(path, e))
    }

    fn discover(&self) -> ListResult<Vec<(String, PathBuf)>> {
        let entries = fs::read_dir(&self.dir).map_err(|e| ListError::io(&self.dir, e))?;

        let mut found: Vec<(String, PathBuf)> = entries
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| path.is_file())
            .filter(|path| path.extension().is_some_and(|ext| ext == LIST_EXTENSION))
            .filter_map(|path| {
                let name = path.file_stem()?.to_str()?.to_string();
                Some((name, path))
            })
            .collect();

        found.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(found)
    }
}

fn write_lines(path: &Path, items: &[String]) -> io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    for item in items {
        writeln!(writer, "{item}")?;
    }
    let file = writer.into_inner().map_err(io::IntoInnerError::into_error)?;
    file.sync_all()
}
