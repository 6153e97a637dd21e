//! Data models for the ticket comparison API.
//!
//! This module contains the structures returned by the remote services:
//!
//! - `Match`, `Team`, `MatchPage`: schedule and score data
//! - `Stadium`: venue catalog entries
//! - `TicketOffer`, `TicketProvider`: provider listings
//! - Deal types: `DealSummary`, `DealScore`, `MarketOverview`, etc.

pub mod deal;
pub mod match_info;
pub mod stadium;
pub mod ticket;

pub use deal::{DealScore, DealSummary, MarketOverview, PriceSnapshot, TrendingMatch};
pub use match_info::{Match, MatchPage, MatchStatus, Team};
pub use stadium::Stadium;
pub use ticket::{AvailabilityStatus, TicketOffer, TicketProvider};
