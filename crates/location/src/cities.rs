//! Known-city allow-list and the default region.

use bitelist_features::word_pattern;
use once_cell::sync::Lazy;
use regex::Regex;

/// State assumed when a city is found without one.
pub const DEFAULT_REGION: &str = "Virginia";

/// Abbreviation of [`DEFAULT_REGION`].
pub const DEFAULT_REGION_ABBREVIATION: &str = "VA";

/// High-confidence city anchors. Scan order is declaration order.
pub static KNOWN_CITIES: &[&str] = &[
    "Clarendon",
    "Ashburn",
    "Sterling",
    "Tysons",
    "Chantilly",
    "Herndon",
    "Arlington",
    "Fairfax",
    "Vienna",
    "Falls Church",
    "Alexandria",
    "McLean",
    "Reston",
    "Leesburg",
    "Manassas",
    "Woodbridge",
    "Springfield",
    "Burke",
];

static CITY_PATTERNS: Lazy<Vec<(&'static str, Regex)>> = Lazy::new(|| {
    KNOWN_CITIES
        .iter()
        .map(|city| (*city, word_pattern(city)))
        .collect()
});

static REGION_ABBREVIATION: Lazy<Regex> = Lazy::new(|| word_pattern(DEFAULT_REGION_ABBREVIATION));

/// First known city mentioned in `text`, in allow-list order.
pub fn find_known_city(text: &str) -> Option<&'static str> {
    CITY_PATTERNS
        .iter()
        .find(|(_, pattern)| pattern.is_match(text))
        .map(|(city, _)| *city)
}

/// Whether `text` names the default region, by name or abbreviation.
pub fn mentions_default_region(text: &str) -> bool {
    text.to_lowercase().contains(&DEFAULT_REGION.to_lowercase())
        || REGION_ABBREVIATION.is_match(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_known_city() {
        assert_eq!(find_known_city("CHA Street Food (Sterling)"), Some("Sterling"));
        assert_eq!(find_known_city("near FALLS CHURCH"), Some("Falls Church"));
        assert_eq!(find_known_city("Sterlingworth"), None);
    }

    #[test]
    fn test_allow_list_order_breaks_ties() {
        assert_eq!(find_known_city("Reston or Ashburn"), Some("Ashburn"));
    }

    #[test]
    fn test_mentions_default_region() {
        assert!(mentions_default_region("somewhere in virginia"));
        assert!(mentions_default_region("Sterling, VA"));
        assert!(!mentions_default_region("Java Hut"));
    }
}
