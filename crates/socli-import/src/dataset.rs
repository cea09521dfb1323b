//! Loading a dataset directory into memory.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use socli_core::Circle;

use crate::error::{ImportError, Result};
use crate::identity;
use crate::parse::{ego_id, read_circles, read_edges};

/// Everything read from one dataset directory.
#[derive(Debug, Default)]
pub struct Dataset {
    /// Every id seen: ego ids and both endpoints of every edge.
    pub users: BTreeSet<i64>,
    /// Follow edges in file order, self-loops removed.
    pub edges: Vec<(i64, i64)>,
    /// Edges dropped because both endpoints were the same id.
    pub self_loops: usize,
    /// Circles with owner and members already mapped to usernames.
    pub circles: Vec<Circle>,
}

impl Dataset {
    /// Read every `*.edges` file in `dir`, plus the matching `<ego>.circles`
    /// file when one exists. Files are read in name order.
    pub fn load(dir: &Path) -> Result<Self> {
        let edge_files = edge_files(dir)?;
        if edge_files.is_empty() {
            return Err(ImportError::NoEdgeFiles {
                dir: dir.to_path_buf(),
            });
        }
        tracing::info!(count = edge_files.len(), dir = %dir.display(), "Found network files");

        let mut dataset = Self::default();
        for path in &edge_files {
            let ego = ego_id(path)?;
            let edges = read_edges(path)?;
            tracing::info!(file = %path.display(), connections = edges.len(), "Processed edge file");
            dataset.add_ego(ego, edges);

            let circles_path = dir.join(format!("{ego}.circles"));
            if circles_path.is_file() {
                let owner = identity::username(ego);
                for raw in read_circles(&circles_path)? {
                    dataset.circles.push(Circle {
                        name: raw.name,
                        owner: owner.clone(),
                        members: raw.members.into_iter().map(identity::username).collect(),
                    });
                }
            }
        }

        Ok(dataset)
    }

    fn add_ego(&mut self, ego: i64, edges: Vec<(i64, i64)>) {
        self.users.insert(ego);
        for (source, target) in edges {
            self.users.insert(source);
            self.users.insert(target);
            if source == target {
                self.self_loops += 1;
            } else {
                self.edges.push((source, target));
            }
        }
    }
}

fn edge_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "edges") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}
