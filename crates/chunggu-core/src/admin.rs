//! Admin shadow roster.
//!
//! Edits made by an administrator are held in memory only. The loaded
//! `Dataset` is never modified and nothing is written back to the data
//! source; `ShadowRoster::preview` produces a fresh dataset so statistics
//! can be checked against the edited roster.

use std::collections::BTreeSet;
use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::models::{Gender, Member, ScoreRecord};
use crate::store::Dataset;

/// Number of members and meetings listed in the overview.
const RECENT_LIMIT: usize = 5;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AdminError {
    #[error("Name is required")]
    MissingName,

    #[error("Generation must be greater than zero")]
    InvalidGeneration,

    #[error("Invalid phone number '{0}' (expected e.g. 010-1234-5678)")]
    InvalidPhone(String),

    #[error("Member not found: {0}")]
    NotFound(i64),
}

/// Form input for a new member. The id is assigned by the roster.
#[derive(Debug, Clone, PartialEq)]
pub struct NewMember {
    pub name: String,
    pub generation: u32,
    pub gender: Gender,
    pub phone: String,
}

#[derive(Debug, Clone)]
pub struct ShadowRoster {
    members: Vec<Member>,
    scores: Arc<[ScoreRecord]>,
    revision: u64,
}

impl ShadowRoster {
    pub fn from_dataset(dataset: &Dataset) -> Self {
        Self {
            members: dataset.members.to_vec(),
            scores: Arc::clone(&dataset.scores),
            revision: 0,
        }
    }

    pub fn members(&self) -> &[Member] {
        &self.members
    }

    /// Number of edits applied so far.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn add(&mut self, new_member: NewMember) -> Result<&Member, AdminError> {
        validate(&new_member.name, new_member.generation, &new_member.phone)?;

        let id = self.members.iter().map(|m| m.id).max().unwrap_or(0) + 1;
        debug!(member_id = id, "Adding member to shadow roster");
        self.members.push(Member {
            id,
            name: new_member.name.trim().to_string(),
            generation: new_member.generation,
            gender: new_member.gender,
            phone: new_member.phone,
        });
        self.revision += 1;

        let last = self.members.len() - 1;
        Ok(&self.members[last])
    }

    pub fn update(&mut self, member: Member) -> Result<(), AdminError> {
        validate(&member.name, member.generation, &member.phone)?;

        let slot = self
            .members
            .iter_mut()
            .find(|m| m.id == member.id)
            .ok_or(AdminError::NotFound(member.id))?;
        debug!(member_id = member.id, "Updating member in shadow roster");
        *slot = Member {
            name: member.name.trim().to_string(),
            ..member
        };
        self.revision += 1;
        Ok(())
    }

    /// Remove a member. Their score records stay in the shared score slice
    /// and show up as unknown members in previews.
    pub fn remove(&mut self, id: i64) -> Result<Member, AdminError> {
        let index = self
            .members
            .iter()
            .position(|m| m.id == id)
            .ok_or(AdminError::NotFound(id))?;
        debug!(member_id = id, "Removing member from shadow roster");
        self.revision += 1;
        Ok(self.members.remove(index))
    }

    /// A dataset over the edited roster and the unchanged scores.
    pub fn preview(&self) -> Dataset {
        Dataset::with_shared_scores(self.members.clone(), Arc::clone(&self.scores))
    }
}

fn validate(name: &str, generation: u32, phone: &str) -> Result<(), AdminError> {
    if name.trim().is_empty() {
        return Err(AdminError::MissingName);
    }
    if generation == 0 {
        return Err(AdminError::InvalidGeneration);
    }
    if !is_valid_phone(phone) {
        return Err(AdminError::InvalidPhone(phone.to_string()));
    }
    Ok(())
}

/// `NN(N)-NNN(N)-NNNN`, digits only between the dashes.
pub fn is_valid_phone(phone: &str) -> bool {
    let parts: Vec<&str> = phone.split('-').collect();
    let [area, exchange, line] = parts.as_slice() else {
        return false;
    };
    let digits = |part: &str, lengths: std::ops::RangeInclusive<usize>| {
        lengths.contains(&part.len()) && part.chars().all(|c| c.is_ascii_digit())
    };
    digits(*area, 2..=3) && digits(*exchange, 3..=4) && digits(*line, 4..=4)
}

/// Totals and most recent entries for the admin landing page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdminOverview {
    pub total_members: usize,
    pub total_meetings: usize,
    pub total_scores: usize,
    /// Highest ids first.
    pub recent_members: Vec<Member>,
    /// Highest meeting ids first.
    pub recent_meeting_ids: Vec<i64>,
}

impl AdminOverview {
    pub fn from_dataset(dataset: &Dataset) -> Self {
        let mut recent_members = dataset.members.to_vec();
        recent_members.sort_by(|a, b| b.id.cmp(&a.id));
        recent_members.truncate(RECENT_LIMIT);

        let meetings: BTreeSet<i64> = dataset.scores.iter().map(|r| r.meeting_id).collect();
        let recent_meeting_ids = meetings.iter().rev().take(RECENT_LIMIT).copied().collect();

        Self {
            total_members: dataset.members.len(),
            total_meetings: meetings.len(),
            total_scores: dataset.scores.len(),
            recent_members,
            recent_meeting_ids,
        }
    }
}
