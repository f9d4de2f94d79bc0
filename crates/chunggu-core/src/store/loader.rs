//! Fetching `members.json` and `scores.json`.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Result;
use reqwest::{header, Client, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use crate::cache::SnapshotCache;
use crate::engine::validate_scores;
use crate::models::{Member, ScoreRecord};

use super::dataset::Dataset;
use super::error::{Collection, DataError};

// ============================================================================
// Constants
// ============================================================================

/// HTTP request timeout in seconds.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Default number of retries per collection for transient HTTP failures.
const DEFAULT_RETRIES: u32 = 3;

/// Initial backoff delay in milliseconds, doubled after every retry.
const INITIAL_BACKOFF_MS: u64 = 500;

/// Where the two collections come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    Directory(PathBuf),
    Http { base_url: String },
}

impl DataSource {
    pub fn location(&self, collection: Collection) -> String {
        match self {
            DataSource::Directory(dir) => dir.join(collection.file_name()).display().to_string(),
            DataSource::Http { base_url } => {
                format!("{}/{}", base_url.trim_end_matches('/'), collection.file_name())
            }
        }
    }
}

/// A user-visible message about how the data was obtained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadNotice {
    /// Nothing could be loaded; the dataset is empty.
    Unavailable { reason: String },
    /// The source failed and the last local snapshot is shown instead.
    /// `outdated` is set once the snapshot is more than a day old.
    Stale {
        reason: String,
        age: String,
        outdated: bool,
    },
}

impl std::fmt::Display for LoadNotice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadNotice::Unavailable { reason } => {
                write!(f, "Club data could not be loaded ({}). Please try again later.", reason)
            }
            LoadNotice::Stale {
                reason,
                age,
                outdated,
            } => {
                write!(f, "Showing data saved {} ({}).", age, reason)?;
                if *outdated {
                    write!(f, " Recent meetings may be missing.")?;
                }
                Ok(())
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct LoadOutcome {
    pub dataset: Dataset,
    pub notice: Option<LoadNotice>,
}

enum FetchFailure {
    Retryable(DataError),
    Fatal(DataError),
}

pub struct DataStore {
    source: DataSource,
    client: Client,
    retries: u32,
    initial_backoff: Duration,
    cache: Option<SnapshotCache>,
}

impl DataStore {
    pub fn new(source: DataSource) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            source,
            client,
            retries: DEFAULT_RETRIES,
            initial_backoff: Duration::from_millis(INITIAL_BACKOFF_MS),
            cache: None,
        })
    }

    pub fn with_retries(mut self, retries: u32) -> Self {
        self.retries = retries;
        self
    }

    pub fn with_cache(mut self, cache: SnapshotCache) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn source(&self) -> &DataSource {
        &self.source
    }

    pub async fn load_members(&self) -> Result<Vec<Member>, DataError> {
        let members: Vec<Member> = self.fetch(Collection::Members).await?;

        let mut seen = HashSet::new();
        let duplicates = members.iter().filter(|m| !seen.insert(m.id)).count();
        if duplicates > 0 {
            warn!(duplicates, "Member ids are not unique; the first entry wins in lookups");
        }

        debug!(collection = %Collection::Members, count = members.len(), "Loaded collection");
        Ok(members)
    }

    pub async fn load_scores(&self) -> Result<Vec<ScoreRecord>, DataError> {
        let scores: Vec<ScoreRecord> = self.fetch(Collection::Scores).await?;
        validate_scores(&scores)
            .map_err(|e| DataError::unavailable(Collection::Scores, e.to_string()))?;

        let mut seen = HashSet::new();
        let duplicates = scores
            .iter()
            .filter(|r| !seen.insert((r.member_id, r.meeting_id)))
            .count();
        if duplicates > 0 {
            warn!(duplicates, "Found repeated (member, meeting) score records; keeping all");
        }

        debug!(collection = %Collection::Scores, count = scores.len(), "Loaded collection");
        Ok(scores)
    }

    /// Load both collections concurrently. Either both arrive or the call
    /// fails; a partial dataset is never returned.
    pub async fn load(&self) -> Result<Dataset, DataError> {
        let (members, scores) = tokio::join!(self.load_members(), self.load_scores());
        let dataset = Dataset::new(members?, scores?);

        info!(
            members = dataset.members.len(),
            scores = dataset.scores.len(),
            revision = dataset.revision,
            "Club data loaded"
        );

        if let Some(cache) = &self.cache {
            let saved = cache
                .save_members(&dataset.members)
                .and_then(|_| cache.save_scores(&dataset.scores));
            if let Err(e) = saved {
                warn!(error = %e, "Failed to save snapshot");
            }
        }

        Ok(dataset)
    }

    /// Load, or degrade to the last snapshot, or to an empty dataset. Never
    /// fails; the notice tells the user what happened.
    pub async fn load_or_empty(&self) -> LoadOutcome {
        let err = match self.load().await {
            Ok(dataset) => {
                return LoadOutcome {
                    dataset,
                    notice: None,
                }
            }
            Err(err) => err,
        };
        warn!(error = %err, "Club data unavailable");

        if let Some(cache) = &self.cache {
            match cache.load_pair() {
                Ok(Some(snapshot)) => {
                    let age = snapshot.age_display();
                    let outdated = snapshot.is_stale();
                    if outdated {
                        warn!(age = %age, "Serving outdated snapshot");
                    } else {
                        info!(age = %age, "Serving cached snapshot");
                    }
                    let (members, scores) = snapshot.data;
                    return LoadOutcome {
                        dataset: Dataset::new(members, scores),
                        notice: Some(LoadNotice::Stale {
                            reason: err.to_string(),
                            age,
                            outdated,
                        }),
                    };
                }
                Ok(None) => {}
                Err(e) => debug!(error = %e, "Failed to read snapshot"),
            }
        }

        LoadOutcome {
            dataset: Dataset::empty(),
            notice: Some(LoadNotice::Unavailable {
                reason: err.to_string(),
            }),
        }
    }

    async fn fetch<T: DeserializeOwned>(&self, collection: Collection) -> Result<Vec<T>, DataError> {
        match &self.source {
            DataSource::Directory(dir) => Self::read_file(dir, collection).await,
            DataSource::Http { .. } => self.get(collection).await,
        }
    }

    /// Local files are not retried; a missing file will not appear by waiting.
    async fn read_file<T: DeserializeOwned>(dir: &Path, collection: Collection) -> Result<Vec<T>, DataError> {
        let path = dir.join(collection.file_name());
        let contents = tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| DataError::unavailable(collection, format!("{}: {}", path.display(), e)))?;
        parse(collection, &contents)
    }

    async fn get<T: DeserializeOwned>(&self, collection: Collection) -> Result<Vec<T>, DataError> {
        let url = self.source.location(collection);
        let mut retries = 0;
        let mut backoff = self.initial_backoff;

        loop {
            match self.try_get(&url, collection).await {
                Ok(body) => return parse(collection, &body),
                Err(FetchFailure::Fatal(err)) => return Err(err),
                Err(FetchFailure::Retryable(err)) => {
                    retries += 1;
                    if retries > self.retries {
                        return Err(err);
                    }
                    warn!(
                        url = %url,
                        retry = retries,
                        backoff_ms = backoff.as_millis() as u64,
                        error = %err,
                        "Load failed, backing off"
                    );
                    tokio::time::sleep(backoff).await;
                    backoff *= 2;
                }
            }
        }
    }

    async fn try_get(&self, url: &str, collection: Collection) -> Result<String, FetchFailure> {
        let response = self
            .client
            .get(url)
            .header(header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| FetchFailure::Retryable(DataError::unavailable(collection, e.to_string())))?;

        let status = response.status();
        if status.is_success() {
            return response
                .text()
                .await
                .map_err(|e| FetchFailure::Retryable(DataError::unavailable(collection, e.to_string())));
        }

        let body = response.text().await.unwrap_or_default();
        let err = DataError::from_status(collection, status, &body);
        if status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS {
            Err(FetchFailure::Retryable(err))
        } else {
            Err(FetchFailure::Fatal(err))
        }
    }
}

fn parse<T: DeserializeOwned>(collection: Collection, contents: &str) -> Result<Vec<T>, DataError> {
    serde_json::from_str(contents)
        .map_err(|e| DataError::unavailable(collection, format!("malformed JSON: {}", e)))
}
