//! socli-import: bulk importer for ego-network datasets.
//!
//! Reads a directory of `<ego>.edges` files (and optional `<ego>.circles`
//! files), turns every id into a synthetic user, and merges users, follow
//! edges and circles into the graph in batches. Every write is a MERGE, so
//! running the same import twice leaves the graph unchanged.

pub mod dataset;
pub mod error;
pub mod identity;
pub mod importer;
pub mod parse;

pub use dataset::Dataset;
pub use error::ImportError;
pub use importer::{import_dataset, ImportSink, ImportSummary, DEFAULT_BATCH_SIZE};
