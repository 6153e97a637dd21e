//! Derived views: pure projections over cached collections.
//!
//! Nothing here holds state or touches the cache; every function takes the
//! decoded collection and recomputes from scratch. Recompute-by-default is
//! the baseline — all three projections are O(n log n) or better over
//! session-sized collections.

pub mod filters;
pub mod lookup;
pub mod ranking;

pub use filters::{country_options, VenueFilter};
pub use lookup::{lookup_by_id, match_label, Keyed, UNKNOWN_MATCH};
pub use ranking::{rank_offers, RankedOffer};
