//! Loading the two source collections.
//!
//! This module provides the `DataStore`, which reads `members.json` and
//! `scores.json` from a local directory or a static web host and hands back
//! an immutable `Dataset`. Loading is the only asynchronous step in the
//! library; everything downstream works on the resident snapshot.
//!
//! Failures surface as `DataError::DataUnavailable`. `load_or_empty` turns
//! them into an empty (or last cached) dataset plus a notice for the user.

pub mod dataset;
pub mod error;
pub mod loader;

pub use dataset::Dataset;
pub use error::{Collection, DataError};
pub use loader::{DataSource, DataStore, LoadNotice, LoadOutcome};
