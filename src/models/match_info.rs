use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchStatus {
    Scheduled,
    Live,
    Finished,
    Postponed,
    Cancelled,
}

impl std::fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchStatus::Scheduled => write!(f, "Scheduled"),
            MatchStatus::Live => write!(f, "Live"),
            MatchStatus::Finished => write!(f, "Finished"),
            MatchStatus::Postponed => write!(f, "Postponed"),
            MatchStatus::Cancelled => write!(f, "Cancelled"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Team {
    #[serde(default)]
    pub id: i64,
    pub name: String,
    pub country: Option<String>,
    #[serde(rename = "logoUrl")]
    pub logo_url: Option<String>,
    #[serde(rename = "fifaRanking")]
    pub fifa_ranking: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Match {
    #[serde(default)]
    pub id: i64,
    #[serde(rename = "homeTeam")]
    pub home_team: Option<Team>,
    #[serde(rename = "awayTeam")]
    pub away_team: Option<Team>,
    #[serde(rename = "stadiumId")]
    pub stadium_id: Option<i64>,
    #[serde(rename = "matchDate")]
    pub match_date: Option<String>,
    #[serde(rename = "matchTime")]
    pub match_time: Option<String>,
    pub status: Option<MatchStatus>,
    #[serde(rename = "homeScore")]
    pub home_score: Option<i32>,
    #[serde(rename = "awayScore")]
    pub away_score: Option<i32>,
    pub round: Option<String>,
    #[serde(rename = "groupName")]
    pub group_name: Option<String>,
    #[serde(rename = "venueName")]
    pub venue_name: Option<String>,
    #[serde(rename = "venueCity")]
    pub venue_city: Option<String>,
    #[serde(rename = "venueCountry")]
    pub venue_country: Option<String>,
}

/// Paginated match listing as returned by `/api/matches`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchPage {
    #[serde(default)]
    pub content: Vec<Match>,
    #[serde(rename = "totalElements", default)]
    pub total_elements: i64,
    #[serde(rename = "totalPages", default)]
    pub total_pages: i32,
}

impl Match {
    /// "Home vs Away", tolerating missing team records.
    pub fn display_title(&self) -> String {
        let home = self
            .home_team
            .as_ref()
            .map(|t| t.name.as_str())
            .unwrap_or("TBD");
        let away = self
            .away_team
            .as_ref()
            .map(|t| t.name.as_str())
            .unwrap_or("TBD");
        format!("{} vs {}", home, away)
    }

    pub fn is_live(&self) -> bool {
        matches!(self.status, Some(MatchStatus::Live))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn team(name: &str) -> Team {
        Team {
            id: 1,
            name: name.to_string(),
            country: None,
            logo_url: None,
            fifa_ranking: None,
        }
    }

    #[test]
    fn test_display_title_with_both_teams() {
        let m = Match {
            id: 1,
            home_team: Some(team("Brazil")),
            away_team: Some(team("France")),
            stadium_id: None,
            match_date: None,
            match_time: None,
            status: Some(MatchStatus::Scheduled),
            home_score: None,
            away_score: None,
            round: None,
            group_name: None,
            venue_name: None,
            venue_city: None,
            venue_country: None,
        };
        assert_eq!(m.display_title(), "Brazil vs France");
    }

    #[test]
    fn test_display_title_with_missing_team() {
        let m = Match {
            id: 1,
            home_team: Some(team("Brazil")),
            away_team: None,
            stadium_id: None,
            match_date: None,
            match_time: None,
            status: None,
            home_score: None,
            away_score: None,
            round: None,
            group_name: None,
            venue_name: None,
            venue_city: None,
            venue_country: None,
        };
        assert_eq!(m.display_title(), "Brazil vs TBD");
    }

    #[test]
    fn test_deserialize_wire_format() {
        let json = r#"{
            "id": 12,
            "homeTeam": {"id": 1, "name": "Brazil", "country": "Brazil", "fifaRanking": 5},
            "awayTeam": {"id": 2, "name": "France", "country": "France"},
            "matchDate": "2026-06-14",
            "status": "SCHEDULED",
            "venueName": "MetLife Stadium",
            "venueCity": "East Rutherford",
            "venueCountry": "USA"
        }"#;
        let m: Match = serde_json::from_str(json).unwrap();
        assert_eq!(m.id, 12);
        assert_eq!(m.venue_country.as_deref(), Some("USA"));
        assert_eq!(m.status, Some(MatchStatus::Scheduled));
        assert_eq!(m.home_team.unwrap().fifa_ranking, Some(5));
    }
}
