//! Turnout statistics
//!
//! Summary figures for the dashboard cards and the inputs of the two charts.
//! Everything here is computed from the full store, never from the filtered
//! view.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;

use crate::attendee::AttendeeRecord;

/// Expected attendance used when no target is configured
pub const DEFAULT_TARGET: u32 = 1000;

/// Number of locations shown in the ranking chart
pub const TOP_LOCATIONS: usize = 5;

const MILLIS_PER_DAY: f64 = 24.0 * 60.0 * 60.0 * 1000.0;

/// Progress of registrations against the target
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Summary {
    pub count: usize,
    pub target: u32,
    /// Not clamped; goes above 100 once the target is exceeded
    pub percentage_reached: f64,
    /// Negative once the target is exceeded
    pub remaining: i64,
    /// New registrations per day, rounded up
    pub growth_rate: u64,
}

impl Summary {
    pub fn target_reached(&self) -> bool {
        self.remaining <= 0
    }

    /// Caption under the remaining-participants card
    pub fn remaining_label(&self) -> &'static str {
        if self.target_reached() {
            "meta atingida!"
        } else {
            "participantes necessários"
        }
    }
}

/// Occurrences of one location in the store
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct LocationCount {
    pub location: String,
    pub count: usize,
}

impl LocationCount {
    pub fn new(location: impl Into<String>, count: usize) -> Self {
        Self {
            location: location.into(),
            count,
        }
    }
}

/// Compute the summary cards for `records` against `target`
///
/// `target` must be positive; configuration loading rejects zero.
pub fn summarize(records: &[AttendeeRecord], target: u32, now: DateTime<Utc>) -> Summary {
    let count = records.len();

    Summary {
        count,
        target,
        percentage_reached: 100.0 * count as f64 / target as f64,
        remaining: target as i64 - count as i64,
        growth_rate: growth_rate(records, now),
    }
}

/// Registrations per day since the earliest registration, rounded up
///
/// Returns 0 for an empty store. Records whose date cannot be parsed are not
/// considered for the earliest date; with no readable date the span is one
/// day.
pub fn growth_rate(records: &[AttendeeRecord], now: DateTime<Utc>) -> u64 {
    if records.is_empty() {
        return 0;
    }

    let span_days = earliest_registration(records)
        .map(|earliest| {
            let elapsed_ms = (now - earliest).num_milliseconds() as f64;
            (elapsed_ms / MILLIS_PER_DAY).ceil()
        })
        .unwrap_or(1.0)
        .max(1.0);

    (records.len() as f64 / span_days).ceil() as u64
}

/// Earliest readable registration timestamp; the first one wins ties
pub fn earliest_registration(records: &[AttendeeRecord]) -> Option<DateTime<Utc>> {
    records
        .iter()
        .filter_map(AttendeeRecord::registered_at)
        .fold(None, |min, at| match min {
            Some(current) if current <= at => Some(current),
            _ => Some(at),
        })
}

/// Count registrations per location, in first-seen order
pub fn location_counts(records: &[AttendeeRecord]) -> Vec<LocationCount> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<LocationCount> = Vec::new();

    for record in records {
        match index.get(record.location.as_str()) {
            Some(&i) => counts[i].count += 1,
            None => {
                index.insert(record.location.as_str(), counts.len());
                counts.push(LocationCount::new(record.location.clone(), 1));
            }
        }
    }

    counts
}

/// The `limit` most frequent locations, most frequent first
///
/// Locations with the same count keep the order in which they first appear
/// in the store.
pub fn top_locations(records: &[AttendeeRecord], limit: usize) -> Vec<LocationCount> {
    let mut counts = location_counts(records);
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts.truncate(limit);
    counts
}
