//! Core library for the Chunggu golf club statistics.
//!
//! Loads the member directory and score records once, then derives every
//! view (rankings, cohorts, meetings, trends) from that resident snapshot.
//! Front ends (the `chunggu` CLI) only format what this crate returns.

pub mod admin;
pub mod auth;
pub mod cache;
pub mod config;
pub mod directory;
pub mod engine;
pub mod models;
pub mod ranking_index;
pub mod store;
pub mod utils;

pub use config::Config;
pub use engine::EngineError;
pub use models::{Gender, Member, ScoreRecord};
pub use ranking_index::{RankEntry, RankingCache, RankingIndex};
pub use store::{DataError, DataSource, DataStore, Dataset};
