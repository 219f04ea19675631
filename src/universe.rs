//! # universe — Ticker universe loader
//!
//! Reads the symbol list from a CSV file. The first row is a header; only
//! the first column of each remaining row is used.

use anyhow::Context;
use std::collections::BTreeSet;
use std::path::Path;

/// Load, normalise and de-duplicate the universe at `path`.
pub fn load_universe(path: &Path) -> anyhow::Result<Vec<String>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read ticker universe from {}", path.display()))?;

    let symbols = raw
        .lines()
        .skip(1)
        .filter_map(|line| line.split(',').next());

    Ok(normalize(symbols))
}

/// Trim, upper-case, drop blanks and duplicates. Output is sorted.
pub fn normalize<I, S>(symbols: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    symbols
        .into_iter()
        .map(|s| s.as_ref().trim().trim_matches('"').trim().to_uppercase())
        .filter(|s| !s.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
