use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::debug;

use crate::models::{Member, ScoreRecord};

/// Consider a snapshot stale after one day.
/// The club publishes new scores at most once per meeting.
const SNAPSHOT_STALE_MINUTES: i64 = 24 * 60;

const MEMBERS_SNAPSHOT: &str = "members";
const SCORES_SNAPSHOT: &str = "scores";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot<T> {
    pub data: T,
    pub saved_at: DateTime<Utc>,
}

impl<T> Snapshot<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            saved_at: Utc::now(),
        }
    }

    pub fn age_minutes(&self) -> i64 {
        (Utc::now() - self.saved_at).num_minutes()
    }

    pub fn age_display(&self) -> String {
        let minutes = self.age_minutes();
        if minutes < 1 {
            // Includes clock skew
            "just now".to_string()
        } else if minutes < 60 {
            format!("{}m ago", minutes)
        } else if minutes < 1440 {
            let hours = minutes / 60;
            if minutes % 60 >= 30 {
                format!("{}h ago", hours + 1)
            } else {
                format!("{}h ago", hours)
            }
        } else {
            let days = minutes / 1440;
            if (minutes % 1440) / 60 >= 12 {
                format!("{}d ago", days + 1)
            } else {
                format!("{}d ago", days)
            }
        }
    }

    pub fn is_stale(&self) -> bool {
        self.age_minutes() > SNAPSHOT_STALE_MINUTES
    }
}

pub struct SnapshotCache {
    cache_dir: PathBuf,
}

impl SnapshotCache {
    pub fn new(cache_dir: PathBuf) -> Result<Self> {
        std::fs::create_dir_all(&cache_dir)
            .with_context(|| format!("Failed to create cache directory {}", cache_dir.display()))?;
        Ok(Self { cache_dir })
    }

    fn snapshot_path(&self, name: &str) -> PathBuf {
        self.cache_dir.join(format!("{}.json", name))
    }

    fn load<T: DeserializeOwned>(&self, name: &str) -> Result<Option<Snapshot<T>>> {
        let path = self.snapshot_path(name);
        if !path.exists() {
            return Ok(None);
        }

        let contents = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read snapshot: {}", name))?;
        let snapshot: Snapshot<T> = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse snapshot: {}", name))?;

        debug!(snapshot = name, age = %snapshot.age_display(), "Loaded snapshot");
        Ok(Some(snapshot))
    }

    fn save<T: Serialize>(&self, name: &str, data: &T) -> Result<()> {
        let snapshot = Snapshot::new(data);
        let contents = serde_json::to_string_pretty(&snapshot)?;
        std::fs::write(self.snapshot_path(name), contents)
            .with_context(|| format!("Failed to write snapshot: {}", name))?;
        Ok(())
    }

    pub fn load_members(&self) -> Result<Option<Snapshot<Vec<Member>>>> {
        self.load(MEMBERS_SNAPSHOT)
    }

    pub fn save_members(&self, members: &[Member]) -> Result<()> {
        self.save(MEMBERS_SNAPSHOT, &members)
    }

    pub fn load_scores(&self) -> Result<Option<Snapshot<Vec<ScoreRecord>>>> {
        self.load(SCORES_SNAPSHOT)
    }

    pub fn save_scores(&self, scores: &[ScoreRecord]) -> Result<()> {
        self.save(SCORES_SNAPSHOT, &scores)
    }

    /// Both collections, only if both snapshots exist. The older of the two
    /// timestamps is reported.
    pub fn load_pair(&self) -> Result<Option<Snapshot<(Vec<Member>, Vec<ScoreRecord>)>>> {
        match (self.load_members()?, self.load_scores()?) {
            (Some(members), Some(scores)) => Ok(Some(Snapshot {
                saved_at: members.saved_at.min(scores.saved_at),
                data: (members.data, scores.data),
            })),
            _ => Ok(None),
        }
    }

    pub fn clear(&self) -> Result<()> {
        for name in [MEMBERS_SNAPSHOT, SCORES_SNAPSHOT] {
            let path = self.snapshot_path(name);
            if path.exists() {
                std::fs::remove_file(path)?;
            }
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
