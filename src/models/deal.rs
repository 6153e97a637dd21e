//! Deal and market analytics as computed by the remote deal-finder service.
//!
//! All scores and trends here are consumed as-is; this layer only caches,
//! sorts, and filters them.

use serde::{Deserialize, Serialize};

/// Per-match price summary across providers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DealSummary {
    #[serde(rename = "matchId")]
    pub match_id: i64,
    pub category: Option<String>,
    #[serde(rename = "lowestPrice")]
    pub lowest_price: Option<f64>,
    #[serde(rename = "highestPrice")]
    pub highest_price: Option<f64>,
    #[serde(rename = "averagePrice")]
    pub average_price: Option<f64>,
    #[serde(rename = "bestProviderName")]
    pub best_provider_name: Option<String>,
    #[serde(rename = "bestDealScore")]
    pub best_deal_score: Option<i32>,
    #[serde(rename = "numProviders")]
    pub num_providers: Option<i32>,
    #[serde(rename = "overallTrend")]
    pub overall_trend: Option<String>,
    #[serde(rename = "bestTimeToBuy")]
    pub best_time_to_buy: Option<String>,
}

/// One provider's scored offer for a match.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DealScore {
    #[serde(default)]
    pub id: i64,
    #[serde(rename = "matchId")]
    pub match_id: i64,
    #[serde(rename = "providerName")]
    pub provider_name: String,
    #[serde(rename = "dealScore")]
    pub deal_score: Option<i32>,
    #[serde(rename = "currentPrice")]
    pub current_price: Option<f64>,
    #[serde(rename = "marketAverage")]
    pub market_average: Option<f64>,
    #[serde(rename = "savingsPercentage")]
    pub savings_percentage: Option<f64>,
    #[serde(rename = "priceTrend")]
    pub price_trend: Option<String>,
    pub recommendation: Option<String>,
    #[serde(rename = "bookingUrl")]
    pub booking_url: Option<String>,
}

/// Historical price observation for a match/provider pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceSnapshot {
    #[serde(default)]
    pub id: i64,
    #[serde(rename = "matchId")]
    pub match_id: i64,
    #[serde(rename = "providerName")]
    pub provider_name: String,
    pub category: Option<String>,
    #[serde(rename = "totalPrice")]
    pub total_price: Option<f64>,
    pub currency: Option<String>,
    #[serde(rename = "fetchedAt")]
    pub fetched_at: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketOverview {
    #[serde(rename = "totalMatches", default)]
    pub total_matches: i32,
    #[serde(rename = "totalProviders", default)]
    pub total_providers: i32,
    #[serde(rename = "totalDeals", default)]
    pub total_deals: i32,
    #[serde(rename = "overallLowestPrice")]
    pub overall_lowest_price: Option<f64>,
    #[serde(rename = "overallHighestPrice")]
    pub overall_highest_price: Option<f64>,
    #[serde(rename = "averagePrice")]
    pub average_price: Option<f64>,
    #[serde(rename = "averageDealScore", default)]
    pub average_deal_score: f64,
    #[serde(rename = "hotDealCount", default)]
    pub hot_deal_count: i32,
    #[serde(rename = "pricesDownCount", default)]
    pub prices_down_count: i32,
    #[serde(rename = "pricesUpCount", default)]
    pub prices_up_count: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendingMatch {
    #[serde(rename = "matchId")]
    pub match_id: i64,
    #[serde(default)]
    pub rank: i32,
    #[serde(rename = "popularityScore", default)]
    pub popularity_score: i32,
    #[serde(rename = "bestDealScore", default)]
    pub best_deal_score: i32,
    #[serde(rename = "lowestPrice")]
    pub lowest_price: Option<f64>,
    #[serde(rename = "averagePrice")]
    pub average_price: Option<f64>,
    #[serde(rename = "priceTrend")]
    pub price_trend: Option<String>,
    #[serde(rename = "bestProviderName")]
    pub best_provider_name: Option<String>,
    #[serde(rename = "trendingReason")]
    pub trending_reason: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_summary_wire_format() {
        let json = r#"{
            "matchId": 12,
            "category": "CAT_1",
            "lowestPrice": 95.0,
            "highestPrice": 410.5,
            "averagePrice": 210.0,
            "bestProviderName": "SeatGeek",
            "bestDealScore": 87,
            "numProviders": 4,
            "overallTrend": "DOWN"
        }"#;
        let s: DealSummary = serde_json::from_str(json).unwrap();
        assert_eq!(s.match_id, 12);
        assert_eq!(s.best_provider_name.as_deref(), Some("SeatGeek"));
        assert_eq!(s.num_providers, Some(4));
    }
}
