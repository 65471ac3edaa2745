//! Nickname list for autonomous actors.

use std::path::Path;

use anyhow::Context;

use crate::loaders::{LoadResult, read_file};

/// Loader for the autonomous-actor name list.
///
/// File format: a RON list of strings.
///
/// ```ron
/// ["Ash", "Birch", "Cedar"]
/// ```
///
/// Blank entries are dropped and surrounding whitespace is trimmed. An empty
/// list is allowed; actors spawned from it get a fallback nickname.
pub struct NameLoader;

impl NameLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<String>> {
        let content = read_file(path)?;
        Self::parse(&content).with_context(|| format!("Invalid name list {}", path.display()))
    }

    pub fn parse(content: &str) -> LoadResult<Vec<String>> {
        let raw: Vec<String> = ron::from_str(content).context("Failed to parse name list RON")?;
        Ok(raw
            .into_iter()
            .map(|name| name.trim().to_owned())
            .filter(|name| !name.is_empty())
            .collect())
    }
}
