use serde::{Deserialize, Serialize};

/// Offer availability, ordered by how useful the offer is to a buyer.
/// `rank()` drives the ranking projection: available offers sort first,
/// sold-out offers last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AvailabilityStatus {
    Available,
    NotYetAvailable,
    SoldOut,
}

impl AvailabilityStatus {
    pub fn rank(&self) -> u8 {
        match self {
            AvailabilityStatus::Available => 0,
            AvailabilityStatus::NotYetAvailable => 1,
            AvailabilityStatus::SoldOut => 2,
        }
    }
}

impl std::fmt::Display for AvailabilityStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AvailabilityStatus::Available => write!(f, "Available"),
            AvailabilityStatus::NotYetAvailable => write!(f, "Not Yet Available"),
            AvailabilityStatus::SoldOut => write!(f, "Sold Out"),
        }
    }
}

/// One provider's ticket listing for a match.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TicketOffer {
    #[serde(default)]
    pub id: i64,
    #[serde(rename = "matchId")]
    pub match_id: i64,
    #[serde(rename = "providerName")]
    pub provider_name: String,
    #[serde(rename = "bookingUrl")]
    pub booking_url: Option<String>,
    #[serde(rename = "priceRange")]
    pub price_range: Option<String>,
    #[serde(rename = "minPrice")]
    pub min_price: Option<i64>,
    #[serde(rename = "availabilityStatus")]
    pub availability_status: AvailabilityStatus,
    pub priority: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TicketProvider {
    #[serde(default)]
    pub id: i64,
    pub name: String,
    #[serde(rename = "displayName")]
    pub display_name: Option<String>,
    #[serde(rename = "logoUrl")]
    pub logo_url: Option<String>,
    #[serde(rename = "websiteUrl")]
    pub website_url: Option<String>,
    #[serde(rename = "trustScore")]
    pub trust_score: Option<i32>,
    #[serde(rename = "feePercentage")]
    pub fee_percentage: Option<f64>,
    #[serde(rename = "hasBuyerProtection")]
    pub has_buyer_protection: Option<bool>,
}
