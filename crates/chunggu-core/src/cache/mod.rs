//! Local snapshot cache for offline access.
//!
//! After every successful load the `DataStore` writes the two collections
//! here as JSON. When the source is unreachable the last snapshot is served
//! instead, flagged as stale. The aggregation engine never reads the cache.

pub mod manager;

pub use manager::{Snapshot, SnapshotCache};
