//! The ordered rules of the location normalizer.
//!
//! Each rule is a predicate (`applies`) paired with a transform (`extract`).
//! The normalizer runs them in order and the first extraction wins.

use bitelist_features::{char_len, collapse_whitespace, is_generic, strip_generic};
use bitelist_model::NormalizedLocation;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::cities::{find_known_city, DEFAULT_REGION};
use crate::states::{find_state, resolve_state};

/// Characters that split a location string into fragments.
pub const SEPARATORS: &[char] = &['|', '-', '–', '—', ','];

const DASHES: &[char] = &['-', '–', '—'];

static TRAILING_STATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([^,]+),\s*([A-Za-z\s]+)$").expect("trailing state pattern is valid"));

static PARENTHETICAL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\(([^)]+)\)").expect("parenthetical pattern is valid"));

/// A trimmed location string with its fragments precomputed.
#[derive(Debug, Clone)]
pub struct LocationInput<'a> {
    /// The trimmed raw text
    pub text: &'a str,
    /// Trimmed pieces between separators, longer than one character
    pub fragments: Vec<&'a str>,
    /// Pipe-separated, or carrying two or more dashes
    pub multi_segment: bool,
}

impl<'a> LocationInput<'a> {
    pub fn new(raw: &'a str) -> Self {
        let text = raw.trim();
        let fragments = text
            .split(SEPARATORS)
            .map(str::trim)
            .filter(|f| char_len(f) > 1)
            .collect();
        let dashes = text.chars().filter(|c| DASHES.contains(c)).count();

        Self {
            text,
            fragments,
            multi_segment: text.contains('|') || dashes >= 2,
        }
    }

    pub fn has_separator(&self) -> bool {
        self.text.contains(SEPARATORS)
    }
}

/// One step of the normalizer's fallback chain.
pub trait LocationRule: Send + Sync {
    /// Short identifier used in traces.
    fn name(&self) -> &'static str;

    /// Whether this rule should be tried for `input` at all.
    fn applies(&self, _input: &LocationInput<'_>) -> bool {
        true
    }

    /// Try to infer a location. `None` hands over to the next rule.
    fn extract(&self, input: &LocationInput<'_>) -> Option<NormalizedLocation>;
}

/// Uppercase first letter, 3 to 24 characters, no restaurant-generic noun.
pub fn is_city_shaped(text: &str) -> bool {
    let len = char_len(text);
    (3..=24).contains(&len)
        && text.chars().next().is_some_and(char::is_uppercase)
        && !is_generic(text)
}

fn in_default_region(city: impl Into<String>) -> NormalizedLocation {
    NormalizedLocation::new(city, DEFAULT_REGION)
}

/// `City, ST` or `City, State` at the end of the string.
#[derive(Debug, Default)]
pub struct TrailingState;

impl LocationRule for TrailingState {
    fn name(&self) -> &'static str {
        "trailing-state"
    }

    fn applies(&self, input: &LocationInput<'_>) -> bool {
        input.text.contains(',')
    }

    fn extract(&self, input: &LocationInput<'_>) -> Option<NormalizedLocation> {
        let caps = TRAILING_STATE_RE.captures(input.text)?;
        let state = resolve_state(caps.get(2)?.as_str())?;
        let city = caps.get(1)?.as_str().trim();
        Some(NormalizedLocation::new(city, state.name))
    }
}

/// A state abbreviation or name anywhere in the string; the text before it
/// is the city candidate.
#[derive(Debug, Default)]
pub struct EmbeddedState;

impl LocationRule for EmbeddedState {
    fn name(&self) -> &'static str {
        "embedded-state"
    }

    fn applies(&self, input: &LocationInput<'_>) -> bool {
        !input.multi_segment
    }

    fn extract(&self, input: &LocationInput<'_>) -> Option<NormalizedLocation> {
        let hit = find_state(input.text)?;
        let before: String = input.text[..hit.start]
            .chars()
            .filter(|c| *c != ',' && !DASHES.contains(c))
            .collect();
        let city = strip_generic(&before);

        if char_len(&city) > 2 {
            Some(NormalizedLocation::new(city, hit.state.name))
        } else {
            Some(NormalizedLocation::state_only(hit.state.name))
        }
    }
}

/// A city from the allow-list, placed in the default region.
#[derive(Debug, Default)]
pub struct KnownCity;

impl LocationRule for KnownCity {
    fn name(&self) -> &'static str {
        "known-city"
    }

    fn applies(&self, input: &LocationInput<'_>) -> bool {
        !input.multi_segment
    }

    fn extract(&self, input: &LocationInput<'_>) -> Option<NormalizedLocation> {
        find_known_city(input.text).map(in_default_region)
    }
}

/// `Name (City)`.
#[derive(Debug, Default)]
pub struct Parenthetical;

impl LocationRule for Parenthetical {
    fn name(&self) -> &'static str {
        "parenthetical"
    }

    fn applies(&self, input: &LocationInput<'_>) -> bool {
        !input.multi_segment && input.text.contains('(')
    }

    fn extract(&self, input: &LocationInput<'_>) -> Option<NormalizedLocation> {
        let caps = PARENTHETICAL_RE.captures(input.text)?;
        let inner = caps.get(1)?.as_str().trim();

        if let Some(city) = find_known_city(inner) {
            return Some(in_default_region(city));
        }
        // `(Oakton, Centreville)`: the first city-shaped piece, never the list
        inner
            .split(SEPARATORS)
            .map(str::trim)
            .find(|piece| is_city_shaped(piece))
            .map(in_default_region)
    }
}

/// Fragment-by-fragment scan of separated strings such as
/// `FiLLi Cafe | Chantilly - Virginia`.
#[derive(Debug, Default)]
pub struct SeparatorSplit;

impl LocationRule for SeparatorSplit {
    fn name(&self) -> &'static str {
        "separator-split"
    }

    fn applies(&self, input: &LocationInput<'_>) -> bool {
        input.has_separator()
    }

    fn extract(&self, input: &LocationInput<'_>) -> Option<NormalizedLocation> {
        let mut city: Option<&str> = None;
        let mut state: Option<&str> = None;

        for fragment in &input.fragments {
            let fragment_state = find_state(fragment).map(|hit| hit.state.name);
            if fragment_state.is_some() {
                state = fragment_state;
            }

            if let Some(known) = find_known_city(fragment) {
                city = Some(known);
            } else if city.is_none() && fragment_state.is_none() && is_city_shaped(fragment) {
                city = Some(*fragment);
            }
        }

        match (city, state) {
            (Some(city), Some(state)) => Some(NormalizedLocation::new(city, state)),
            (Some(city), None) => Some(in_default_region(city)),
            (None, Some(state)) => Some(NormalizedLocation::state_only(state)),
            (None, None) => None,
        }
    }
}

/// A lone short fragment that does not read like a restaurant name.
#[derive(Debug, Default)]
pub struct SingleFragment;

impl LocationRule for SingleFragment {
    fn name(&self) -> &'static str {
        "single-fragment"
    }

    fn applies(&self, input: &LocationInput<'_>) -> bool {
        input.fragments.len() == 1
    }

    fn extract(&self, input: &LocationInput<'_>) -> Option<NormalizedLocation> {
        let fragment = *input.fragments.first()?;
        (char_len(fragment) < 30 && !is_generic(fragment))
            .then(|| in_default_region(collapse_whitespace(fragment)))
    }
}

/// Short non-generic text passed through as the city, with no state.
#[derive(Debug, Default)]
pub struct Passthrough;

impl LocationRule for Passthrough {
    fn name(&self) -> &'static str {
        "passthrough"
    }

    fn extract(&self, input: &LocationInput<'_>) -> Option<NormalizedLocation> {
        (char_len(input.text) < 30 && !is_generic(input.text))
            .then(|| NormalizedLocation::new(input.text, ""))
    }
}

/// The standard chain, in order.
pub fn standard_rules() -> Vec<Box<dyn LocationRule>> {
    vec![
        Box::new(TrailingState),
        Box::new(EmbeddedState),
        Box::new(KnownCity),
        Box::new(Parenthetical),
        Box::new(SeparatorSplit),
        Box::new(SingleFragment),
        Box::new(Passthrough),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn run(rule: &dyn LocationRule, raw: &str) -> Option<NormalizedLocation> {
        let input = LocationInput::new(raw);
        if rule.applies(&input) {
            rule.extract(&input)
        } else {
            None
        }
    }

    #[test]
    fn test_input_fragments() {
        let input = LocationInput::new("  FiLLi Cafe | Chantilly - Virginia ");
        assert_eq!(input.text, "FiLLi Cafe | Chantilly - Virginia");
        assert_eq!(input.fragments, vec!["FiLLi Cafe", "Chantilly", "Virginia"]);
        assert!(input.multi_segment);

        let single_dash = LocationInput::new("Falls Church - Virginia");
        assert!(!single_dash.multi_segment);
    }

    #[test]
    fn test_trailing_state_requires_a_state() {
        assert_eq!(
            run(&TrailingState, "123 Main St, Reston, VA"),
            Some(NormalizedLocation::new("Reston", "Virginia"))
        );
        assert_eq!(run(&TrailingState, "AMBAR Restaurant, Clarendon"), None);
    }

    #[test]
    fn test_embedded_state_strips_separators_and_generic_nouns() {
        assert_eq!(
            run(&EmbeddedState, "A2B Indian Vegetarian Restaurant - Virginia"),
            Some(NormalizedLocation::new("A2B", "Virginia"))
        );
    }

    #[test]
    fn test_embedded_state_without_city() {
        assert_eq!(
            run(&EmbeddedState, "Cafe Maryland"),
            Some(NormalizedLocation::state_only("Maryland"))
        );
    }

    #[test]
    fn test_embedded_state_skips_multi_segment() {
        assert_eq!(run(&EmbeddedState, "FiLLi Cafe | Chantilly - Virginia"), None);
    }

    #[test]
    fn test_parenthetical_city_shape() {
        assert_eq!(
            run(&Parenthetical, "Pho Place (Centreville)"),
            Some(NormalizedLocation::new("Centreville", "Virginia"))
        );
        assert_eq!(run(&Parenthetical, "Pho Place (takeout only)"), None);
        assert_eq!(run(&Parenthetical, "Pho Place (Noodle Bar)"), None);
    }

    #[test]
    fn test_parenthetical_list_keeps_one_city() {
        assert_eq!(
            run(&Parenthetical, "Taqueria (Oakton, Centreville)"),
            Some(NormalizedLocation::new("Oakton", "Virginia"))
        );
        assert_eq!(run(&Parenthetical, "Taqueria (to go, delivery)"), None);
    }

    #[test]
    fn test_single_fragment_without_fragments() {
        let input = LocationInput::new("-");
        assert!(input.fragments.is_empty());
        assert_eq!(SingleFragment.extract(&input), None);
    }

    #[test]
    fn test_separator_split_known_city_overrides_shape() {
        assert_eq!(
            run(&SeparatorSplit, "Bamian | Falls Church - VA"),
            Some(NormalizedLocation::new("Falls Church", "Virginia"))
        );
    }

    #[test]
    fn test_separator_split_state_only() {
        assert_eq!(
            run(&SeparatorSplit, "ramen - noodles - Maryland"),
            Some(NormalizedLocation::state_only("Maryland"))
        );
    }

    #[test]
    fn test_single_fragment_rejects_generic() {
        assert_eq!(
            run(&SingleFragment, "Ocean Crab"),
            Some(NormalizedLocation::new("Ocean Crab", "Virginia"))
        );
        assert_eq!(run(&SingleFragment, "Kakatiya Kitchen"), None);
    }

    #[test]
    fn test_passthrough_length_limit() {
        assert_eq!(
            run(&Passthrough, "ab - cd"),
            Some(NormalizedLocation::new("ab - cd", ""))
        );
        assert_eq!(run(&Passthrough, "a very long description of somewhere"), None);
    }

    #[test]
    fn test_city_shape() {
        assert!(is_city_shaped("Centreville"));
        assert!(!is_city_shaped("centreville"));
        assert!(!is_city_shaped("Ny"));
        assert!(!is_city_shaped("Tilly Food Hall"));
    }
}
