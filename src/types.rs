//! # Common Types
//!
//! Wire models for the RepoHealth service responses and the view-filter
//! state shared between the dashboard and the derivation pipeline.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};

/// A repository snapshot as returned by `GET /user/repos`.
///
/// Counts default to zero and the update timestamp to `None` when the server
/// omits them, so sorting always has a total order to work with.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Repository {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub stargazers_count: u64,
    #[serde(default)]
    pub forks_count: u64,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub private: bool,
    pub html_url: String,
}

/// The authenticated identity returned by `GET /user`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UserProfile {
    pub login: String,
    #[serde(default)]
    pub avatar_url: String,
    #[serde(default)]
    pub html_url: String,
}

/// Scoring snapshot for one repository, wire names in camelCase.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthScores {
    pub repo: String,
    pub total_score: i64,
    pub activity_score: i64,
    pub issue_score: i64,
    pub docs_score: i64,
    pub commit_count_last_30_days: u64,
    pub open_issues: u64,
}

/// Per-day commit counts in the order the server emitted them.
///
/// The health endpoint returns the history as a JSON object whose key order
/// is the chart's x-axis order, so this cannot round through a `HashMap`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommitHistory(pub Vec<(String, u64)>);

impl CommitHistory {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(String, u64)> {
        self.0.iter()
    }

    /// Largest daily count, used to scale the chart's y-axis.
    pub fn max_count(&self) -> u64 {
        self.0.iter().map(|(_, count)| *count).max().unwrap_or(0)
    }
}

impl<'de> Deserialize<'de> for CommitHistory {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct HistoryVisitor;

        impl<'de> Visitor<'de> for HistoryVisitor {
            type Value = CommitHistory;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a map of date labels to commit counts")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(entry) = map.next_entry::<String, u64>()? {
                    entries.push(entry);
                }
                Ok(CommitHistory(entries))
            }
        }

        deserializer.deserialize_map(HistoryVisitor)
    }
}

/// Full response of `GET /user/repos/{name}/health`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HealthReport {
    pub health: HealthScores,
    pub history: CommitHistory,
}

/// Sort order for the repository list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    Name,
    Stars,
    Forks,
    #[default]
    Updated,
}

impl SortKey {
    pub const ALL: [SortKey; 4] = [
        SortKey::Updated,
        SortKey::Name,
        SortKey::Stars,
        SortKey::Forks,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SortKey::Updated => "Recently Updated",
            SortKey::Name => "Alphabetical",
            SortKey::Stars => "Most Stars",
            SortKey::Forks => "Most Forks",
        }
    }
}

/// Ephemeral filter state for the dashboard; `language: None` means "all".
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FilterState {
    pub search: String,
    pub language: Option<String>,
    pub sort: SortKey,
}

impl FilterState {
    /// True when any narrowing input is active, which decides whether an
    /// empty result renders as "no matches" or "no repositories".
    pub fn is_active(&self) -> bool {
        !self.search.is_empty() || self.language.is_some()
    }

    pub fn reset(&mut self) {
        self.search.clear();
        self.language = None;
    }
}
