//! Structural cache keys.
//!
//! A key is the full identity of a remote read: endpoint family plus every
//! parameter that changes the response. Two keys address the same cache slot
//! iff they are structurally equal, so `Matches { page: 0, size: 20 }` and
//! `Matches { page: 1, size: 20 }` are independent entries.

use std::time::Duration;

use crate::config::CachePolicy;

/// How quickly a resource class goes stale in the real world.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Volatility {
    /// Live match state; refreshed on a fixed interval while watched.
    Live,
    /// Schedules and match detail; change on reschedules and score updates.
    MatchData,
    /// Deal and market analytics; recomputed by the backend periodically.
    DealData,
    /// Team / stadium / provider catalogs; effectively fixed for a session.
    Catalog,
}

/// Identity of one cacheable remote read.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum QueryKey {
    LiveMatches,
    Matches { page: u32, size: u32 },
    Match { id: i64 },
    UpcomingMatches,
    MatchesByDate { date: String },
    MatchesByTeam { team_id: i64 },
    MatchesByStadium { stadium_id: i64 },
    MatchesByRound { round: String },
    MatchesByGroup { group: String },
    MatchesByStatus { status: String },
    Teams,
    Team { id: i64 },
    TeamsByCountry { country: String },
    Stadiums { page: u32, size: u32 },
    AllStadiums,
    Stadium { id: i64 },
    StadiumByName { name: String },
    StadiumsByCity { city: String },
    StadiumsByCountry { country: String },
    StadiumsByState { state: String },
    StadiumsByCapacity,
    TicketsByMatch { match_id: i64 },
    AllTickets,
    TicketsByProvider { provider: String },
    TicketsByStatus { status: String },
    DealsByMatch { match_id: i64 },
    CheapestDeal { match_id: i64 },
    TopDeals { limit: u32 },
    PriceHistory { match_id: i64 },
    DealSummaries,
    Providers,
    Provider { id: i64 },
    MarketOverview,
    TrendingMatches { limit: u32 },
    PriceDrops { limit: u32 },
}

impl QueryKey {
    pub fn volatility(&self) -> Volatility {
        use QueryKey::*;
        match self {
            LiveMatches => Volatility::Live,

            Matches { .. } | Match { .. } | UpcomingMatches | MatchesByDate { .. }
            | MatchesByTeam { .. } | MatchesByStadium { .. } | MatchesByRound { .. }
            | MatchesByGroup { .. } | MatchesByStatus { .. } => Volatility::MatchData,

            DealsByMatch { .. } | CheapestDeal { .. } | TopDeals { .. }
            | PriceHistory { .. } | DealSummaries | MarketOverview
            | TrendingMatches { .. } | PriceDrops { .. } => Volatility::DealData,

            Teams | Team { .. } | TeamsByCountry { .. } | Stadiums { .. } | AllStadiums
            | Stadium { .. } | StadiumByName { .. } | StadiumsByCity { .. }
            | StadiumsByCountry { .. } | StadiumsByState { .. } | StadiumsByCapacity
            | TicketsByMatch { .. } | AllTickets | TicketsByProvider { .. }
            | TicketsByStatus { .. } | Providers | Provider { .. } => Volatility::Catalog,
        }
    }

    pub fn ttl(&self, policy: &CachePolicy) -> Duration {
        match self.volatility() {
            Volatility::Live => policy.live_ttl,
            Volatility::MatchData => policy.match_ttl,
            Volatility::DealData => policy.deal_ttl,
            Volatility::Catalog => policy.catalog_ttl,
        }
    }

    /// Gateway path and query string for this key, relative to the API base.
    pub fn endpoint(&self) -> String {
        use QueryKey::*;
        match self {
            LiveMatches => "/api/matches/live".to_string(),
            Matches { page, size } => format!("/api/matches?page={}&size={}", page, size),
            Match { id } => format!("/api/matches/{}", id),
            UpcomingMatches => "/api/matches/upcoming".to_string(),
            MatchesByDate { date } => format!("/api/matches/by-date/{}", date),
            MatchesByTeam { team_id } => format!("/api/matches/by-team/{}", team_id),
            MatchesByStadium { stadium_id } => format!("/api/matches/by-stadium/{}", stadium_id),
            MatchesByRound { round } => format!("/api/matches/by-round/{}", round),
            MatchesByGroup { group } => format!("/api/matches/by-group/{}", group),
            MatchesByStatus { status } => format!("/api/matches/by-status/{}", status),
            Teams => "/api/teams".to_string(),
            Team { id } => format!("/api/teams/{}", id),
            TeamsByCountry { country } => format!("/api/teams/country/{}", country),
            Stadiums { page, size } => format!("/api/stadiums?page={}&size={}", page, size),
            AllStadiums => "/api/stadiums/all".to_string(),
            Stadium { id } => format!("/api/stadiums/{}", id),
            StadiumByName { name } => format!("/api/stadiums/name/{}", name),
            StadiumsByCity { city } => format!("/api/stadiums/by-city/{}", city),
            StadiumsByCountry { country } => format!("/api/stadiums/by-country/{}", country),
            StadiumsByState { state } => format!("/api/stadiums/by-state/{}", state),
            StadiumsByCapacity => "/api/stadiums/by-capacity".to_string(),
            TicketsByMatch { match_id } => format!("/api/tickets/match/{}", match_id),
            AllTickets => "/api/tickets".to_string(),
            TicketsByProvider { provider } => format!("/api/tickets/provider/{}", provider),
            TicketsByStatus { status } => format!("/api/tickets/status/{}", status),
            DealsByMatch { match_id } => format!("/api/deals/match/{}", match_id),
            CheapestDeal { match_id } => format!("/api/deals/match/{}/cheapest", match_id),
            TopDeals { limit } => format!("/api/deals/top?limit={}", limit),
            PriceHistory { match_id } => format!("/api/deals/match/{}/history", match_id),
            DealSummaries => "/api/deals/summaries".to_string(),
            Providers => "/api/deals/providers".to_string(),
            Provider { id } => format!("/api/deals/providers/{}", id),
            MarketOverview => "/api/deals/analytics/overview".to_string(),
            TrendingMatches { limit } => format!("/api/deals/analytics/trending?limit={}", limit),
            PriceDrops { limit } => format!("/api/deals/analytics/price-drops?limit={}", limit),
        }
    }
}

impl std::fmt::Display for QueryKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.endpoint())
    }
}
