//! Location normalization for free-form restaurant location strings.
//!
//! Infers a `City, State` pair from text such as `"CHA Street Food (Sterling)"`
//! or `"FiLLi Cafe | Chantilly - Virginia"`. The inference is a chain of
//! heuristic rules tried in order; the first rule that extracts a location
//! wins. Normalization never fails: with no usable signal it returns an empty
//! location.

pub mod cities;
pub mod rules;
pub mod states;

use bitelist_model::NormalizedLocation;
use once_cell::sync::Lazy;

pub use cities::{find_known_city, mentions_default_region, DEFAULT_REGION, KNOWN_CITIES};
pub use rules::{is_city_shaped, standard_rules, LocationInput, LocationRule};
pub use states::{find_state, resolve_state, StateHit, UsState, STATES};

static DEFAULT_NORMALIZER: Lazy<Normalizer> = Lazy::new(Normalizer::default);

/// Runs location rules in order.
pub struct Normalizer {
    rules: Vec<Box<dyn LocationRule>>,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self {
            rules: standard_rules(),
        }
    }
}

impl std::fmt::Debug for Normalizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Normalizer")
            .field("rules", &self.rule_names())
            .finish()
    }
}

impl Normalizer {
    /// A normalizer with no rules; every input normalizes to empty.
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// Append a rule to the end of the chain.
    pub fn with_rule(mut self, rule: impl LocationRule + 'static) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Insert a rule at `index` (clamped to the chain length).
    pub fn insert_rule(mut self, index: usize, rule: impl LocationRule + 'static) -> Self {
        let index = index.min(self.rules.len());
        self.rules.insert(index, Box::new(rule));
        self
    }

    /// Rule names in evaluation order.
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Infer a location from raw text.
    pub fn normalize(&self, raw: &str) -> NormalizedLocation {
        let input = LocationInput::new(raw);
        if input.text.is_empty() {
            return NormalizedLocation::default();
        }

        for rule in &self.rules {
            if !rule.applies(&input) {
                continue;
            }
            if let Some(location) = rule.extract(&input) {
                tracing::trace!(rule = rule.name(), input = input.text, location = %location, "location rule matched");
                return location;
            }
        }

        tracing::trace!(input = input.text, "no location rule matched");
        NormalizedLocation::default()
    }
}

/// Normalize with the standard rule chain.
pub fn normalize(raw: &str) -> NormalizedLocation {
    DEFAULT_NORMALIZER.normalize(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn loc(city: &str, state: &str) -> NormalizedLocation {
        NormalizedLocation::new(city, state)
    }

    #[test]
    fn test_known_city_without_state() {
        assert_eq!(normalize("AMBAR Restaurant, Clarendon"), loc("Clarendon", "Virginia"));
    }

    #[test]
    fn test_city_in_parentheses() {
        assert_eq!(normalize("CHA Street Food (Sterling)"), loc("Sterling", "Virginia"));
    }

    #[test]
    fn test_pipe_and_dash_separated() {
        assert_eq!(normalize("FiLLi Cafe | Chantilly - Virginia"), loc("Chantilly", "Virginia"));
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(normalize(""), NormalizedLocation::default());
        assert_eq!(normalize("   \t "), NormalizedLocation::default());
    }

    #[test]
    fn test_every_abbreviation_expands() {
        for state in STATES.iter() {
            let result = normalize(&format!("Foo, {}", state.abbreviation));
            assert_eq!(result, loc("Foo", state.name), "abbreviation {}", state.abbreviation);
        }
    }

    #[test]
    fn test_lowercase_abbreviation_expands() {
        assert_eq!(normalize("Reston, va"), loc("Reston", "Virginia"));
    }

    #[test]
    fn test_state_without_city() {
        assert_eq!(normalize("Virginia"), NormalizedLocation::state_only("Virginia"));
        assert_eq!(normalize("West Virginia"), NormalizedLocation::state_only("West Virginia"));
    }

    #[test]
    fn test_embedded_state_with_city() {
        assert_eq!(normalize("Falls Church - Virginia"), loc("Falls Church", "Virginia"));
        assert_eq!(normalize("Bethesda MD"), loc("Bethesda", "Maryland"));
    }

    #[test]
    fn test_generic_only_text_is_dropped() {
        assert_eq!(normalize("Dolan Uyghur Restaurant"), NormalizedLocation::default());
        assert_eq!(normalize("Tilly Kitchen Food Hall"), NormalizedLocation::default());
    }

    #[test]
    fn test_short_name_defaults_to_region() {
        assert_eq!(normalize("Ocean Crab"), loc("Ocean Crab", "Virginia"));
    }

    #[test]
    fn test_lossy_abbreviation_match_is_preserved() {
        // "de" reads as Delaware; the chain has no way to know better.
        assert_eq!(normalize("Chateau de Chantilly Cafe"), loc("Chateau", "Delaware"));
    }

    #[test]
    fn test_idempotent_on_display() {
        let samples = [
            "AMBAR Restaurant, Clarendon",
            "CHA Street Food (Sterling)",
            "FiLLi Cafe | Chantilly - Virginia",
            "A2B Indian Vegetarian Restaurant - Virginia",
            "Peter Chang Herndon",
            "Nando's PERi-PERi",
            "Celebration by Rupa Vira - Modern Indian Cuisine",
            "Charleston West Virginia",
            "ramen - noodles - Maryland",
            "ab - cd",
            "Calabash African Cuisine & Bar",
            "123 Main St, Reston, VA",
            "Pho Place (Centreville)",
            "Taqueria (Oakton, Centreville)",
        ];
        for raw in samples {
            let first = normalize(raw);
            let second = normalize(&first.display());
            assert_eq!(second, first, "input {raw:?}");
        }
    }

    #[test]
    fn test_inserted_rule_runs_in_position() {
        struct Always;
        impl LocationRule for Always {
            fn name(&self) -> &'static str {
                "always"
            }
            fn extract(&self, _input: &LocationInput<'_>) -> Option<NormalizedLocation> {
                Some(NormalizedLocation::state_only("Nowhere"))
            }
        }

        let normalizer = Normalizer::default().insert_rule(0, Always);
        assert_eq!(normalizer.rule_names()[0], "always");
        assert_eq!(normalizer.normalize("Reston, VA"), NormalizedLocation::state_only("Nowhere"));

        let normalizer = Normalizer::default().with_rule(Always);
        assert_eq!(normalizer.normalize("Reston, VA"), loc("Reston", "Virginia"));
    }

    #[test]
    fn test_empty_normalizer() {
        assert_eq!(Normalizer::empty().normalize("Reston, VA"), NormalizedLocation::default());
    }
}
