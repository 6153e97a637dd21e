//! Offer ranking for one match's ticket listings.
//!
//! Order: available offers first, then not-yet-available, sold-out last;
//! within each class, ascending price; ties keep their original order. The
//! top entry is marked "best" only when it is actually available and there
//! is at least one other non-sold-out offer to compare against — a sole
//! option is not a deal relative to anything.

use crate::models::{AvailabilityStatus, TicketOffer};

#[derive(Debug, Clone)]
pub struct RankedOffer {
    pub offer: TicketOffer,
    pub best: bool,
}

/// Pure projection: each call ranks from scratch, no state held across calls.
pub fn rank_offers(offers: &[TicketOffer]) -> Vec<RankedOffer> {
    let mut ordered: Vec<TicketOffer> = offers.to_vec();
    // Stable sort preserves input order for equal (class, price) pairs.
    // An offer with no price yet compares as zero, so it sorts ahead of
    // priced offers in its class.
    ordered.sort_by_key(|offer| {
        (
            offer.availability_status.rank(),
            offer.min_price.unwrap_or(0),
        )
    });

    let purchasable = ordered
        .iter()
        .filter(|o| o.availability_status != AvailabilityStatus::SoldOut)
        .count();

    ordered
        .into_iter()
        .enumerate()
        .map(|(index, offer)| {
            let best = index == 0
                && offer.availability_status == AvailabilityStatus::Available
                && purchasable > 1;
            RankedOffer { offer, best }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offer(provider: &str, price: i64, status: AvailabilityStatus) -> TicketOffer {
        TicketOffer {
            id: 0,
            match_id: 1,
            provider_name: provider.to_string(),
            booking_url: None,
            price_range: None,
            min_price: Some(price),
            availability_status: status,
            priority: None,
        }
    }

    #[test]
    fn test_sold_out_sorts_last_available_by_price() {
        let offers = vec![
            offer("A", 120, AvailabilityStatus::Available),
            offer("B", 90, AvailabilityStatus::SoldOut),
            offer("C", 150, AvailabilityStatus::Available),
        ];
        let ranked = rank_offers(&offers);

        let order: Vec<&str> = ranked.iter().map(|r| r.offer.provider_name.as_str()).collect();
        assert_eq!(order, vec!["A", "C", "B"]);
        assert!(ranked[0].best);
        assert!(!ranked[1].best);
        assert!(!ranked[2].best);
    }

    #[test]
    fn test_not_yet_available_sorts_between() {
        let offers = vec![
            offer("A", 80, AvailabilityStatus::SoldOut),
            offer("B", 200, AvailabilityStatus::NotYetAvailable),
            offer("C", 100, AvailabilityStatus::Available),
        ];
        let ranked = rank_offers(&offers);
        let order: Vec<&str> = ranked.iter().map(|r| r.offer.provider_name.as_str()).collect();
        assert_eq!(order, vec!["C", "B", "A"]);
    }

    #[test]
    fn test_single_available_offer_not_marked_best() {
        let offers = vec![offer("A", 120, AvailabilityStatus::Available)];
        let ranked = rank_offers(&offers);
        assert!(!ranked[0].best);
    }

    #[test]
    fn test_single_available_among_sold_out_not_marked_best() {
        let offers = vec![
            offer("A", 120, AvailabilityStatus::Available),
            offer("B", 90, AvailabilityStatus::SoldOut),
        ];
        let ranked = rank_offers(&offers);
        assert!(!ranked[0].best);
    }

    #[test]
    fn test_no_best_when_cheapest_slot_not_available() {
        // Two purchasable offers, but the top one is not yet on sale
        let offers = vec![
            offer("A", 50, AvailabilityStatus::NotYetAvailable),
            offer("B", 90, AvailabilityStatus::NotYetAvailable),
        ];
        let ranked = rank_offers(&offers);
        assert!(ranked.iter().all(|r| !r.best));
    }

    #[test]
    fn test_unpriced_offer_sorts_before_priced_in_class() {
        let offers = vec![
            offer("A", 100, AvailabilityStatus::Available),
            TicketOffer {
                min_price: None,
                ..offer("B", 0, AvailabilityStatus::Available)
            },
        ];
        let ranked = rank_offers(&offers);
        let order: Vec<&str> = ranked.iter().map(|r| r.offer.provider_name.as_str()).collect();
        assert_eq!(order, vec!["B", "A"]);
        assert!(ranked[0].best);
    }

    #[test]
    fn test_price_ties_keep_input_order() {
        let offers = vec![
            offer("A", 100, AvailabilityStatus::Available),
            offer("B", 100, AvailabilityStatus::Available),
        ];
        let ranked = rank_offers(&offers);
        let order: Vec<&str> = ranked.iter().map(|r| r.offer.provider_name.as_str()).collect();
        assert_eq!(order, vec!["A", "B"]);
        assert!(ranked[0].best);
    }

    #[test]
    fn test_empty_input() {
        assert!(rank_offers(&[]).is_empty());
    }
}
