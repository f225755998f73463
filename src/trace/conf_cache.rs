//! Per-process cache of configuration file lines.

use std::collections::HashMap;
use std::path::PathBuf;

use crate::error::{Error, Result};

/// Where configuration file text comes from.
pub trait ConfSource {
    /// Read the whole of `file`.
    fn read(&self, file: &str) -> Result<String>;
}

/// Configuration files named relative to the administrative base directory.
#[derive(Debug, Clone)]
pub struct AdminDir {
    base: PathBuf,
}

impl AdminDir {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }
}

impl ConfSource for AdminDir {
    fn read(&self, file: &str) -> Result<String> {
        let path = self.base.join(file);
        std::fs::read_to_string(&path).map_err(|e| Error::io(path, e))
    }
}

/// Lines of each referenced configuration file, loaded on first use.
#[derive(Debug)]
pub struct ConfLineCache<S = AdminDir> {
    source: S,
    files: HashMap<String, Vec<String>>,
}

impl<S: ConfSource> ConfLineCache<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            files: HashMap::new(),
        }
    }

    /// Text of 1-based `line` in `file`, without its line terminator.
    pub fn line(&mut self, file: &str, line: usize) -> Result<&str> {
        if !self.files.contains_key(file) {
            let text = self.source.read(file)?;
            let lines: Vec<String> = text.lines().map(str::to_string).collect();
            log::debug!("cached {file} ({} lines)", lines.len());
            self.files.insert(file.to_string(), lines);
        }
        let lines = &self.files[file];
        line.checked_sub(1)
            .and_then(|i| lines.get(i))
            .map(String::as_str)
            .ok_or_else(|| Error::ConfLine {
                file: file.to_string(),
                line,
            })
    }

    /// Number of distinct files loaded so far.
    pub fn loaded(&self) -> usize {
        self.files.len()
    }
}
