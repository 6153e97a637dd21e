//! Cascading venue filters over a cached match collection.
//!
//! Country is the coarse facet, city the fine one: the city option set is
//! always computed against the currently chosen country, and choosing a new
//! country clears a chosen city that the new option set no longer contains.

use crate::models::Match;

/// Active facet selection for the match list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VenueFilter {
    pub country: Option<String>,
    pub city: Option<String>,
}

/// Distinct venue countries across a collection, ascending, deduplicated.
pub fn country_options(matches: &[Match]) -> Vec<String> {
    let mut countries: Vec<String> = matches
        .iter()
        .filter_map(|m| m.venue_country.clone())
        .collect();
    countries.sort();
    countries.dedup();
    countries
}

impl VenueFilter {
    /// Distinct venue cities, restricted to the chosen country when one is
    /// set, ascending, deduplicated.
    pub fn city_options(&self, matches: &[Match]) -> Vec<String> {
        let mut cities: Vec<String> = matches
            .iter()
            .filter(|m| match &self.country {
                Some(country) => m.venue_country.as_deref() == Some(country.as_str()),
                None => true,
            })
            .filter_map(|m| m.venue_city.clone())
            .collect();
        cities.sort();
        cities.dedup();
        cities
    }

    /// Choose (or clear) the country facet. A previously chosen city is
    /// kept only if it is still a valid option under the new country.
    pub fn select_country(&mut self, matches: &[Match], country: Option<String>) {
        self.country = country;
        let city_still_valid = match &self.city {
            Some(city) => self.city_options(matches).iter().any(|c| c == city),
            None => true,
        };
        if !city_still_valid {
            self.city = None;
        }
    }

    pub fn select_city(&mut self, city: Option<String>) {
        self.city = city;
    }

    /// Records matching every chosen facet.
    pub fn apply<'a>(&self, matches: &'a [Match]) -> Vec<&'a Match> {
        matches
            .iter()
            .filter(|m| match &self.country {
                Some(country) => m.venue_country.as_deref() == Some(country.as_str()),
                None => true,
            })
            .filter(|m| match &self.city {
                Some(city) => m.venue_city.as_deref() == Some(city.as_str()),
                None => true,
            })
            .collect()
    }
}
