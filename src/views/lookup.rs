//! Identifier lookup maps over cached collections.
//!
//! Analytics records reference matches, teams, and providers by id only;
//! these projections resolve those ids against whatever collection is
//! currently cached. Misses get a sentinel label instead of an error — an
//! analytics row must render even when the referenced match page has not
//! been fetched yet.

use std::collections::HashMap;

use crate::models::{Match, Stadium, Team, TicketProvider};

/// Label returned when a referenced id is not in the cached collection.
pub const UNKNOWN_MATCH: &str = "Unknown match";

/// A record addressable by numeric id.
pub trait Keyed {
    fn key_id(&self) -> i64;
}

impl Keyed for Match {
    fn key_id(&self) -> i64 {
        self.id
    }
}

impl Keyed for Team {
    fn key_id(&self) -> i64 {
        self.id
    }
}

impl Keyed for Stadium {
    fn key_id(&self) -> i64 {
        self.id
    }
}

impl Keyed for TicketProvider {
    fn key_id(&self) -> i64 {
        self.id
    }
}

/// Build an id → record map over a cached collection.
pub fn lookup_by_id<T: Keyed>(records: &[T]) -> HashMap<i64, &T> {
    records.iter().map(|r| (r.key_id(), r)).collect()
}

/// Resolve a match id to its display title, tolerating misses.
pub fn match_label(lookup: &HashMap<i64, &Match>, match_id: i64) -> String {
    lookup
        .get(&match_id)
        .map(|m| m.display_title())
        .unwrap_or_else(|| UNKNOWN_MATCH.to_string())
}
