//! Parsers for the dataset's `.edges` and `.circles` files.
//!
//! Edge files hold one `source target` pair of integer ids per line,
//! separated by whitespace. Circle files hold one circle per line: the
//! circle name followed by member ids, all separated by tabs.

use std::path::Path;

use crate::error::{ImportError, Result};

/// A circle as read from disk, before ids are mapped to usernames.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawCircle {
    pub name: String,
    pub members: Vec<i64>,
}

/// Read and parse an edge file.
pub fn read_edges(path: &Path) -> Result<Vec<(i64, i64)>> {
    let contents = std::fs::read_to_string(path)?;
    parse_edges(&contents, path)
}

/// Read and parse a circles file.
pub fn read_circles(path: &Path) -> Result<Vec<RawCircle>> {
    let contents = std::fs::read_to_string(path)?;
    parse_circles(&contents, path)
}

/// Parse edge lines. Blank lines are skipped; anything other than exactly
/// two integers is an error naming `file` and the 1-based line number.
pub fn parse_edges(contents: &str, file: &Path) -> Result<Vec<(i64, i64)>> {
    let mut edges = Vec::new();
    for (idx, line) in contents.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let fields: Vec<&str> = line.split_whitespace().collect();
        let [source, target] = fields.as_slice() else {
            return Err(parse_error(
                file,
                idx,
                format!("expected two ids, found {} field(s)", fields.len()),
            ));
        };
        edges.push((
            parse_id(source, file, idx)?,
            parse_id(target, file, idx)?,
        ));
    }
    Ok(edges)
}

/// Parse circle lines. Blank lines are skipped; a line with only a name is a
/// circle with no members.
pub fn parse_circles(contents: &str, file: &Path) -> Result<Vec<RawCircle>> {
    let mut circles = Vec::new();
    for (idx, line) in contents.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let mut fields = line.split('\t');
        let name = fields.next().unwrap_or_default().trim().to_string();
        let members = fields
            .map(str::trim)
            .filter(|f| !f.is_empty())
            .map(|f| parse_id(f, file, idx))
            .collect::<Result<Vec<_>>>()?;
        circles.push(RawCircle { name, members });
    }
    Ok(circles)
}

/// The ego id encoded in a dataset file name: the part before the first `.`.
pub fn ego_id(path: &Path) -> Result<i64> {
    path.file_name()
        .and_then(|name| name.to_str())
        .and_then(|name| name.split('.').next())
        .and_then(|stem| stem.parse().ok())
        .ok_or_else(|| ImportError::EgoId {
            file: path.to_path_buf(),
        })
}

fn parse_id(field: &str, file: &Path, idx: usize) -> Result<i64> {
    field
        .parse()
        .map_err(|_| parse_error(file, idx, format!("invalid id '{field}'")))
}

fn parse_error(file: &Path, idx: usize, message: String) -> ImportError {
    ImportError::Parse {
        file: file.to_path_buf(),
        line: idx + 1,
        message,
    }
}
