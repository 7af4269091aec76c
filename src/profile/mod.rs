//! Per-user profile accumulation.
//!
//! Requests from the same subject (same name and birth date) deduplicate
//! into one [`UserProfile`]. Each generated insight is appended to the
//! profile's history, and the derived aggregates (favorite theme, recent
//! keywords) are recomputed from that history. The resulting
//! [`ProfileTracker::personalization_context`] summary is injected into the
//! next prompt for that subject.
//!
//! Profiles live in process memory only and are never deleted.

mod keywords;

pub use keywords::{MAX_KEYWORDS, extract_keywords};

use std::fmt;

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cache::insight::digest_fields;
use crate::telemetry;
use crate::types::{Language, ZodiacSign};
use crate::{Result, StargazerError};

/// Default bound on [`UserProfile::recent_keywords`].
pub const DEFAULT_RECENT_KEYWORDS: usize = 20;

/// Request count above which a subject counts as a frequent visitor.
const FREQUENT_THRESHOLD: usize = 10;

/// Stable, one-way profile identifier (lowercase hex SHA-256).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProfileId(String);

impl ProfileId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProfileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Stylistic preferences of a subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    /// Tone of the insight (e.g. "warm", "formal", "spiritual").
    pub style: String,
    /// Length of the insight ("short", "medium", "long").
    pub length: String,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            style: "warm".to_string(),
            length: "medium".to_string(),
        }
    }
}

/// One recorded request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub zodiac_sign: ZodiacSign,
    pub insight: String,
    pub language: Language,
    pub timestamp: DateTime<Utc>,
    /// Keywords extracted from `insight`, best first.
    pub keywords: Vec<String>,
}

/// Accumulated state for one subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: ProfileId,
    pub display_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub preferences: Preferences,
    /// Append-only request history, oldest first.
    pub history: Vec<HistoryEntry>,
    /// Most frequent sign in `history`; the first seen wins ties.
    pub favorite_theme: Option<ZodiacSign>,
    /// Unique keywords, most recent first.
    pub recent_keywords: Vec<String>,
}

impl UserProfile {
    fn new(id: ProfileId, display_name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id,
            display_name: display_name.into(),
            created_at: now,
            updated_at: now,
            preferences: Preferences::default(),
            history: Vec::new(),
            favorite_theme: None,
            recent_keywords: Vec::new(),
        }
    }

    pub fn request_count(&self) -> usize {
        self.history.len()
    }

    /// "frequent" above ten recorded requests, otherwise "occasional".
    pub fn request_frequency(&self) -> &'static str {
        if self.request_count() > FREQUENT_THRESHOLD {
            "frequent"
        } else {
            "occasional"
        }
    }

    fn recompute(&mut self, keyword_bound: usize) {
        self.favorite_theme = favorite_theme(&self.history);
        self.recent_keywords = recent_keywords(&self.history, keyword_bound);
    }
}

fn favorite_theme(history: &[HistoryEntry]) -> Option<ZodiacSign> {
    // Counts in order of first appearance, so a strict `>` keeps the
    // earliest sign on ties.
    let mut counts: Vec<(ZodiacSign, usize)> = Vec::new();
    for entry in history {
        match counts.iter_mut().find(|(sign, _)| *sign == entry.zodiac_sign) {
            Some((_, count)) => *count += 1,
            None => counts.push((entry.zodiac_sign, 1)),
        }
    }

    let mut best: Option<(ZodiacSign, usize)> = None;
    for (sign, count) in counts {
        if best.is_none_or(|(_, best_count)| count > best_count) {
            best = Some((sign, count));
        }
    }
    best.map(|(sign, _)| sign)
}

fn recent_keywords(history: &[HistoryEntry], bound: usize) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for entry in history.iter().rev() {
        for keyword in &entry.keywords {
            if out.len() >= bound {
                return out;
            }
            if !out.contains(keyword) {
                out.push(keyword.clone());
            }
        }
    }
    out
}

/// Concurrent profile store.
///
/// Backed by a sharded [`DashMap`]: an update holds only its own shard's
/// write lock, so unrelated subjects never serialize on each other.
/// Callers always receive cloned snapshots.
pub struct ProfileTracker {
    profiles: DashMap<ProfileId, UserProfile>,
    recent_keyword_bound: usize,
}

impl ProfileTracker {
    pub fn new() -> Self {
        Self::with_recent_keyword_bound(DEFAULT_RECENT_KEYWORDS)
    }

    /// Tracker keeping at most `bound` recent keywords per profile.
    pub fn with_recent_keyword_bound(bound: usize) -> Self {
        Self {
            profiles: DashMap::new(),
            recent_keyword_bound: bound,
        }
    }

    /// Derive the profile id for a subject.
    pub fn identify(&self, name: &str, birth_date: &str) -> ProfileId {
        ProfileId(digest_fields(&["profile", name, birth_date]))
    }

    /// Return the profile for `id`, creating an empty one on first use.
    pub fn get_or_create(&self, id: &ProfileId, display_name: &str) -> UserProfile {
        self.profiles
            .entry(id.clone())
            .or_insert_with(|| {
                debug!(profile = %id, name = display_name, "created profile");
                UserProfile::new(id.clone(), display_name)
            })
            .clone()
    }

    /// Snapshot of an existing profile.
    pub fn get(&self, id: &ProfileId) -> Option<UserProfile> {
        self.profiles.get(id).map(|p| p.clone())
    }

    /// Append a request to the profile's history and refresh its aggregates.
    pub fn record_request(
        &self,
        id: &ProfileId,
        zodiac_sign: ZodiacSign,
        insight: &str,
        language: Language,
    ) -> Result<UserProfile> {
        let mut profile = self
            .profiles
            .get_mut(id)
            .ok_or_else(|| StargazerError::ProfileNotFound(id.to_string()))?;

        let now = Utc::now();
        profile.history.push(HistoryEntry {
            zodiac_sign,
            insight: insight.to_string(),
            language,
            timestamp: now,
            keywords: extract_keywords(insight),
        });
        profile.updated_at = now;
        profile.recompute(self.recent_keyword_bound);

        metrics::counter!(telemetry::PROFILE_UPDATES_TOTAL).increment(1);
        debug!(profile = %id, requests = profile.history.len(), "recorded request");

        Ok(profile.clone())
    }

    /// Change style and/or length preferences. `None` keeps the current value.
    pub fn update_preferences(
        &self,
        id: &ProfileId,
        style: Option<&str>,
        length: Option<&str>,
    ) -> Result<UserProfile> {
        let mut profile = self
            .profiles
            .get_mut(id)
            .ok_or_else(|| StargazerError::ProfileNotFound(id.to_string()))?;

        if let Some(style) = style {
            profile.preferences.style = style.to_string();
        }
        if let Some(length) = length {
            profile.preferences.length = length.to_string();
        }
        profile.updated_at = Utc::now();
        Ok(profile.clone())
    }

    /// Short prompt-ready summary of a profile.
    pub fn personalization_context(&self, profile: &UserProfile) -> String {
        personalization_context(profile)
    }

    /// Number of tracked profiles.
    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

impl Default for ProfileTracker {
    fn default() -> Self {
        Self::new()
    }
}

/// Render the personalization summary. Pure.
pub fn personalization_context(profile: &UserProfile) -> String {
    let mut lines = vec![
        format!("Preferred style: {}", profile.preferences.style),
        format!("Preferred length: {}", profile.preferences.length),
    ];
    if let Some(theme) = profile.favorite_theme {
        lines.push(format!("Favorite theme: {theme}"));
    }
    if !profile.recent_keywords.is_empty() {
        lines.push(format!(
            "Recent keywords: {}",
            profile.recent_keywords.join(", ")
        ));
    }
    lines.push(format!("Request frequency: {}", profile.request_frequency()));
    lines.join("\n")
}
