//! Natural ordering of module folders.
//!
//! Question banks are usually exported as `output_1`, `output_2`, ..., `output_10`.
//! Plain lexical sorting would put `output_10` before `output_2`, so folder names
//! are split into runs of digits and runs of everything else: digit runs compare
//! by numeric value, text runs compare case-insensitively.

use anyhow::{Context, Result};
use std::cmp::Ordering;
use std::path::{Path, PathBuf};

#[derive(Debug, PartialEq, Eq)]
enum Chunk<'a> {
    Text(&'a str),
    Number(&'a str),
}

fn chunks(s: &str) -> Vec<Chunk<'_>> {
    let mut chunks = Vec::new();
    let mut start = 0;
    let mut digits = None;
    for (i, c) in s.char_indices() {
        let is_digit = c.is_ascii_digit();
        match digits {
            Some(current) if current != is_digit => {
                chunks.push(chunk(&s[start..i], current));
                start = i;
            }
            _ => {}
        }
        digits = Some(is_digit);
    }
    if let Some(current) = digits {
        chunks.push(chunk(&s[start..], current));
    }
    chunks
}

fn chunk(s: &str, digits: bool) -> Chunk<'_> {
    if digits {
        Chunk::Number(s)
    } else {
        Chunk::Text(s)
    }
}

fn cmp_numbers(a: &str, b: &str) -> Ordering {
    // compare without parsing so arbitrarily long digit runs still work
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

/// Compare two names the way a person would order them.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let a_chunks = chunks(a);
    let b_chunks = chunks(b);

    for (x, y) in a_chunks.iter().zip(b_chunks.iter()) {
        let ordering = match (x, y) {
            (Chunk::Number(x), Chunk::Number(y)) => cmp_numbers(x, y),
            (Chunk::Text(x), Chunk::Text(y)) => x.to_lowercase().cmp(&y.to_lowercase()),
            (Chunk::Number(_), Chunk::Text(_)) => Ordering::Less,
            (Chunk::Text(_), Chunk::Number(_)) => Ordering::Greater,
        };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }

    a_chunks
        .len()
        .cmp(&b_chunks.len())
        // fully equivalent names still need a stable, total order
        .then_with(|| a.cmp(b))
}

/// Sort paths by their final component in natural order.
pub fn sort_naturally(paths: &mut [PathBuf]) {
    paths.sort_by(|a, b| natural_cmp(&leaf_name(a), &leaf_name(b)));
}

fn leaf_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_default()
}

/// List the immediate subdirectories of `root` in natural order.
///
/// Each subdirectory is one module of the question bank. Plain files in `root`
/// are ignored.
pub fn discover_modules(root: &Path) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(root)
        .with_context(|| format!("Failed to read folder {}", root.display()))?;

    let mut modules = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("Failed to read folder {}", root.display()))?;
        let path = entry.path();
        if path.is_dir() {
            modules.push(path);
        }
    }

    sort_naturally(&mut modules);
    Ok(modules)
}
