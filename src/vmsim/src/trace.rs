use anyhow::{Context, Result};
use std::{fs, path::Path};

/// Reads an address trace: one decimal logical address per line, blank
/// lines skipped. Parse failures carry the file and line number; nothing
/// malformed reaches the translation engine.
pub fn read_trace(path: &Path) -> Result<Vec<usize>> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("reading address trace {}", path.display()))?;
    parse_trace(&contents).with_context(|| format!("in address trace {}", path.display()))
}

fn parse_trace(contents: &str) -> Result<Vec<usize>> {
    let mut addresses = Vec::new();
    for (number, line) in contents.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let address = line
            .parse()
            .with_context(|| format!("line {}: malformed address {line:?}", number + 1))?;
        addresses.push(address);
    }
    Ok(addresses)
}
