//! Writing a loaded dataset to the graph in batches.

use async_trait::async_trait;

use socli_core::{Circle, ImportedUser};
use socli_graph::{GraphClient, GraphError};

use crate::dataset::Dataset;
use crate::error::Result;
use crate::identity::{self, IdentityFactory};

pub const DEFAULT_BATCH_SIZE: usize = 500;

/// The writes an import needs. [`GraphClient`] is the production sink.
#[async_trait]
pub trait ImportSink: Send + Sync {
    async fn ensure_constraints(&self) -> std::result::Result<(), GraphError>;

    async fn import_users(&self, users: &[ImportedUser]) -> std::result::Result<i64, GraphError>;

    async fn import_follows(
        &self,
        edges: &[(String, String)],
    ) -> std::result::Result<i64, GraphError>;

    async fn import_circle(&self, circle: &Circle) -> std::result::Result<i64, GraphError>;
}

#[async_trait]
impl ImportSink for GraphClient {
    async fn ensure_constraints(&self) -> std::result::Result<(), GraphError> {
        GraphClient::ensure_constraints(self).await
    }

    async fn import_users(&self, users: &[ImportedUser]) -> std::result::Result<i64, GraphError> {
        GraphClient::import_users(self, users).await
    }

    async fn import_follows(
        &self,
        edges: &[(String, String)],
    ) -> std::result::Result<i64, GraphError> {
        GraphClient::import_follows(self, edges).await
    }

    async fn import_circle(&self, circle: &Circle) -> std::result::Result<i64, GraphError> {
        GraphClient::import_circle(self, circle).await
    }
}

/// Counts reported at the end of an import.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub users: usize,
    pub follows: usize,
    pub self_loops: usize,
    pub circles: usize,
    pub circle_members: i64,
}

/// Merge users, then follow edges, then circles. A batch size of zero is
/// treated as one.
pub async fn import_dataset<S>(
    sink: &S,
    dataset: &Dataset,
    batch_size: usize,
) -> Result<ImportSummary>
where
    S: ImportSink + ?Sized,
{
    let batch_size = batch_size.max(1);
    sink.ensure_constraints().await?;

    let factory = IdentityFactory::new();
    let ids: Vec<i64> = dataset.users.iter().copied().collect();
    let user_batches = ids.len().div_ceil(batch_size);
    for (n, chunk) in ids.chunks(batch_size).enumerate() {
        let users: Vec<ImportedUser> = chunk.iter().map(|&id| factory.user(id)).collect();
        let processed = sink.import_users(&users).await?;
        tracing::info!(batch = n + 1, of = user_batches, processed, "Imported users batch");
    }

    let edge_batches = dataset.edges.len().div_ceil(batch_size);
    for (n, chunk) in dataset.edges.chunks(batch_size).enumerate() {
        let edges: Vec<(String, String)> = chunk
            .iter()
            .map(|&(source, target)| (identity::username(source), identity::username(target)))
            .collect();
        let processed = sink.import_follows(&edges).await?;
        tracing::info!(batch = n + 1, of = edge_batches, processed, "Imported follows batch");
    }
    if dataset.self_loops > 0 {
        tracing::warn!(count = dataset.self_loops, "Skipped self-loop edges");
    }

    let mut circle_members = 0;
    for circle in &dataset.circles {
        let added = sink.import_circle(circle).await?;
        tracing::info!(circle = %circle.name, owner = %circle.owner, added, "Imported circle");
        circle_members += added;
    }

    Ok(ImportSummary {
        users: ids.len(),
        follows: dataset.edges.len(),
        self_loops: dataset.self_loops,
        circles: dataset.circles.len(),
        circle_members,
    })
}
