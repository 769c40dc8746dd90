//! Map search query construction.
//!
//! Turns a restaurant name plus whatever location signal exists into a
//! single map search phrase, then into an outbound URL:
//! - An explicit user link always wins
//! - Otherwise the most specific `Name, City, State` phrasing available
//! - Location text that merely repeats the name is not echoed back

use bitelist_features::{
    char_len, is_generic, significant_tokens, strip_prefix_ignore_case, NameOverlap, TokenMatch,
};
use bitelist_location::{find_known_city, mentions_default_region, Normalizer, DEFAULT_REGION};
use bitelist_model::{NormalizedLocation, Restaurant};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Share of name tokens a location must repeat to count as a restatement.
pub const SIMILARITY_RATIO: f32 = 0.6;

/// Stricter ratio used when deciding whether a label already shows the name.
pub const LABEL_SIMILARITY_RATIO: f32 = 0.7;

const QUERY_SEPARATORS: &[char] = &[',', '-', '–', '—', '|'];

/// Characters `encodeURIComponent` leaves alone.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-encode a URL component.
pub fn encode_component(text: &str) -> String {
    utf8_percent_encode(text, URI_COMPONENT).to_string()
}

/// Where a restaurant's outbound link should point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MapQuery {
    /// User-provided link, returned unchanged
    Link(String),
    /// Search phrase for a map provider
    Search(String),
}

impl MapQuery {
    /// The link or the search phrase.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Link(link) => link,
            Self::Search(query) => query,
        }
    }

    /// The outbound URL: the link itself, or a provider search URL.
    pub fn url(&self, provider: &impl MapProvider) -> String {
        match self {
            Self::Link(link) => link.clone(),
            Self::Search(query) => provider.search_url(query),
        }
    }
}

/// Trait for map services that accept a free-text search.
pub trait MapProvider {
    /// Build the search URL for a query phrase.
    fn search_url(&self, query: &str) -> String;

    /// Provider name for logging.
    fn name(&self) -> &'static str;
}

/// Google Maps search URLs.
#[derive(Debug, Default, Clone, Copy)]
pub struct GoogleMaps;

impl GoogleMaps {
    pub const SEARCH_URL: &'static str = "https://www.google.com/maps/search/?api=1&query=";
}

impl MapProvider for GoogleMaps {
    fn search_url(&self, query: &str) -> String {
        format!("{}{}", Self::SEARCH_URL, encode_component(query))
    }

    fn name(&self) -> &'static str {
        "google-maps"
    }
}

/// Pick the best map query for a named place.
///
/// `normalized` is the normalizer's output for `raw_location` (or empty when
/// there is none).
pub fn build_map_query(
    name: &str,
    normalized: &NormalizedLocation,
    raw_location: Option<&str>,
    explicit_link: Option<&str>,
) -> MapQuery {
    if let Some(link) = explicit_link.filter(|l| !l.trim().is_empty()) {
        return MapQuery::Link(link.to_string());
    }

    let name = name.trim();
    let raw = raw_location.map(str::trim).unwrap_or("");
    let display = normalized.display();
    let compared = if raw.is_empty() { display.as_str() } else { raw };
    let similar = NameOverlap::measure(name, compared, TokenMatch::Fuzzy).is_similar(SIMILARITY_RATIO);
    let combined = display.contains(',');
    let search = |location: &str| MapQuery::Search(format!("{}, {}", name, location));

    if normalized.has_state() && char_len(&normalized.city) > 2 {
        return MapQuery::Search(format!("{}, {}, {}", name, normalized.city, normalized.state));
    }

    // Location restates the name: the display string is the better signal.
    if similar && combined {
        return search(&display);
    }

    if combined && display != raw {
        return search(&display);
    }

    let cleaned = strip_leading_name(raw, name);
    if let Some(best) = best_fragment(cleaned, name) {
        return search(best);
    }

    if char_len(cleaned) > 2 && !similar {
        return search(cleaned);
    }

    if mentions_default_region(raw) || mentions_default_region(&display) || find_known_city(raw).is_some() {
        return search(DEFAULT_REGION);
    }

    if char_len(&normalized.city) > 2 {
        return search(&normalized.city);
    }

    MapQuery::Search(name.to_string())
}

/// Drop a leading copy of the name and the separators that follow it.
fn strip_leading_name<'a>(raw: &'a str, name: &str) -> &'a str {
    if name.is_empty() {
        return raw;
    }
    match strip_prefix_ignore_case(raw, name) {
        Some(rest) => rest
            .trim_start_matches(|c: char| c.is_whitespace() || QUERY_SEPARATORS.contains(&c))
            .trim(),
        None => raw,
    }
}

/// Last separated fragment that reads like a place rather than the name.
fn best_fragment<'a>(cleaned: &'a str, name: &str) -> Option<&'a str> {
    let name_tokens: Vec<String> = significant_tokens(name)
        .into_iter()
        .filter(|w| char_len(w) > 4)
        .collect();

    cleaned
        .split(QUERY_SEPARATORS)
        .map(str::trim)
        .filter(|part| {
            let len = char_len(part);
            let lower = part.to_lowercase();
            len > 2
                && len < 50
                && !is_generic(part)
                && !name_tokens.iter().any(|w| lower.contains(w.as_str()))
        })
        .last()
}

/// Map query for a stored restaurant, normalizing its location on the fly.
pub fn restaurant_query(restaurant: &Restaurant, normalizer: &Normalizer) -> MapQuery {
    let location = restaurant.location_text();
    let normalized = location
        .map(|l| normalizer.normalize(l))
        .unwrap_or_default();
    build_map_query(&restaurant.name, &normalized, location, restaurant.explicit_link())
}

/// Card label for a restaurant's location.
///
/// Shows the display string alone when it already carries the name,
/// otherwise `Name - City, State`. `None` when there is nothing to show.
pub fn display_label(name: &str, display: &str) -> Option<String> {
    if display.trim().is_empty() {
        return None;
    }

    let name = name.trim();
    let name_lower = name.to_lowercase();
    let display_lower = display.to_lowercase();
    let contains_name = !name_lower.is_empty() && display_lower.contains(&name_lower);
    let repeats_name =
        NameOverlap::measure(name, display, TokenMatch::Exact).is_similar(LABEL_SIMILARITY_RATIO);

    if contains_name || repeats_name {
        Some(display.to_string())
    } else {
        Some(format!("{} - {}", name, display))
    }
}
