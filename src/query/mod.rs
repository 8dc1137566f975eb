//! Search execution over an in-memory record set.
//!
//! Mirrors the front end's query semantics: case-insensitive substring
//! predicates, a year inclusion set, the quality gate as a post-filter, an
//! exact total count taken before the row cap, and 4-key ledger ordering.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::DirectoryRecord;
use crate::quality::classify;
use crate::sortkey::ledger_key;

/// Default row cap for a single search, matching the front end's page size.
pub const DEFAULT_RESULT_CAP: usize = 5000;

/// Filter predicates for one search. All text predicates are
/// case-insensitive substring matches; `None` means "no constraint".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchFilter {
    /// Matched against "last first first last" so either name order hits.
    pub name: Option<String>,
    pub occupation: Option<String>,
    /// Matched against business and home address concatenated.
    pub address: Option<String>,
    /// Years to include. An empty set matches nothing.
    pub years: Vec<i32>,
    /// Apply the OCR quality gate as a post-filter.
    pub high_quality_only: bool,
    /// Row cap; the total count is taken before it applies.
    pub result_cap: usize,
}

impl SearchFilter {
    pub fn new(years: Vec<i32>) -> Self {
        Self {
            years,
            high_quality_only: true,
            result_cap: DEFAULT_RESULT_CAP,
            ..Default::default()
        }
    }

    /// Whether a record satisfies every predicate, quality gate included.
    pub fn matches(&self, record: &DirectoryRecord) -> bool {
        if !self.years.contains(&record.year) {
            return false;
        }
        if self.high_quality_only && !classify(record) {
            return false;
        }
        if let Some(q) = &self.name {
            let blob = format!(
                "{} {} {} {}",
                record.last_name, record.first_name, record.first_name, record.last_name
            );
            if !contains_ci(&blob, q) {
                return false;
            }
        }
        if let Some(q) = &self.occupation {
            if !contains_ci(&record.occupation, q) {
                return false;
            }
        }
        if let Some(q) = &self.address {
            let blob = format!("{} {}", record.business_address, record.home_address);
            if !contains_ci(&blob, q) {
                return false;
            }
        }
        true
    }
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// One search's outcome: the exact match count plus the capped, ordered rows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    /// Exact number of matches, counted before the row cap.
    pub total_matches: usize,
    /// Matching rows in ledger order, at most `result_cap` of them.
    pub rows: Vec<DirectoryRecord>,
    pub truncated: bool,
}

/// Run a filter over a record set and shape the result for display.
///
/// The sort is stable, so records with identical keys keep their store order.
pub fn search(records: &[DirectoryRecord], filter: &SearchFilter) -> SearchResult {
    let mut rows: Vec<DirectoryRecord> = records
        .iter()
        .filter(|r| filter.matches(r))
        .cloned()
        .collect();

    let total_matches = rows.len();
    rows.sort_by_cached_key(ledger_key);

    let cap = if filter.result_cap == 0 {
        DEFAULT_RESULT_CAP
    } else {
        filter.result_cap
    };
    let truncated = total_matches > cap;
    rows.truncate(cap);

    debug!(total_matches, returned = rows.len(), truncated, "search complete");

    SearchResult {
        total_matches,
        rows,
        truncated,
    }
}
