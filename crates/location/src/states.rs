//! US state reference table (50 states + DC).

use bitelist_features::word_pattern;
use once_cell::sync::Lazy;
use regex::Regex;

/// One row of the state table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UsState {
    pub abbreviation: &'static str,
    pub name: &'static str,
}

const fn state(abbreviation: &'static str, name: &'static str) -> UsState {
    UsState { abbreviation, name }
}

/// Declaration order is the scan order: when a string mentions two states,
/// the one declared first wins.
pub static STATES: [UsState; 51] = [
    state("AL", "Alabama"),
    state("AK", "Alaska"),
    state("AZ", "Arizona"),
    state("AR", "Arkansas"),
    state("CA", "California"),
    state("CO", "Colorado"),
    state("CT", "Connecticut"),
    state("DE", "Delaware"),
    state("FL", "Florida"),
    state("GA", "Georgia"),
    state("HI", "Hawaii"),
    state("ID", "Idaho"),
    state("IL", "Illinois"),
    state("IN", "Indiana"),
    state("IA", "Iowa"),
    state("KS", "Kansas"),
    state("KY", "Kentucky"),
    state("LA", "Louisiana"),
    state("ME", "Maine"),
    state("MD", "Maryland"),
    state("MA", "Massachusetts"),
    state("MI", "Michigan"),
    state("MN", "Minnesota"),
    state("MS", "Mississippi"),
    state("MO", "Missouri"),
    state("MT", "Montana"),
    state("NE", "Nebraska"),
    state("NV", "Nevada"),
    state("NH", "New Hampshire"),
    state("NJ", "New Jersey"),
    state("NM", "New Mexico"),
    state("NY", "New York"),
    state("NC", "North Carolina"),
    state("ND", "North Dakota"),
    state("OH", "Ohio"),
    state("OK", "Oklahoma"),
    state("OR", "Oregon"),
    state("PA", "Pennsylvania"),
    state("RI", "Rhode Island"),
    state("SC", "South Carolina"),
    state("SD", "South Dakota"),
    state("TN", "Tennessee"),
    state("TX", "Texas"),
    state("UT", "Utah"),
    state("VT", "Vermont"),
    state("VA", "Virginia"),
    state("WA", "Washington"),
    state("WV", "West Virginia"),
    state("WI", "Wisconsin"),
    state("WY", "Wyoming"),
    state("DC", "District of Columbia"),
];

struct StatePattern {
    state: &'static UsState,
    abbreviation: Regex,
    name: Regex,
}

static PATTERNS: Lazy<Vec<StatePattern>> = Lazy::new(|| {
    STATES
        .iter()
        .map(|state| StatePattern {
            state,
            abbreviation: word_pattern(state.abbreviation),
            name: word_pattern(state.name),
        })
        .collect()
});

/// A state mention found inside a larger string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateHit {
    pub state: &'static UsState,
    /// Byte offset where the mention starts
    pub start: usize,
    /// Byte offset just past the mention
    pub end: usize,
}

/// Resolve a whole token (abbreviation or full name, any case) to a state.
pub fn resolve_state(token: &str) -> Option<&'static UsState> {
    let token = token.trim();
    if token.is_empty() {
        return None;
    }
    STATES.iter().find(|s| {
        s.abbreviation.eq_ignore_ascii_case(token) || s.name.eq_ignore_ascii_case(token)
    })
}

/// Scan `text` for the first state, in table order.
///
/// Each entry checks its abbreviation before its full name. A full-name hit
/// that sits inside a longer state name (`Virginia` in `West Virginia`)
/// resolves to the longer one.
pub fn find_state(text: &str) -> Option<StateHit> {
    for pattern in PATTERNS.iter() {
        if let Some(m) = pattern.abbreviation.find(text) {
            return Some(StateHit {
                state: pattern.state,
                start: m.start(),
                end: m.end(),
            });
        }
        if let Some(m) = pattern.name.find(text) {
            let hit = StateHit {
                state: pattern.state,
                start: m.start(),
                end: m.end(),
            };
            return Some(widen_to_longer_name(text, hit));
        }
    }
    None
}

fn widen_to_longer_name(text: &str, hit: StateHit) -> StateHit {
    PATTERNS
        .iter()
        .filter(|p| p.state.name.len() > hit.state.name.len())
        .filter(|p| p.state.name.ends_with(hit.state.name) || p.state.name.starts_with(hit.state.name))
        .find_map(|p| {
            p.name
                .find_iter(text)
                .find(|m| m.start() <= hit.start && m.end() >= hit.end)
                .map(|m| StateHit {
                    state: p.state,
                    start: m.start(),
                    end: m.end(),
                })
        })
        .unwrap_or(hit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_has_fifty_states_and_dc() {
        assert_eq!(STATES.len(), 51);
        assert_eq!(STATES[STATES.len() - 1].abbreviation, "DC");
    }

    #[test]
    fn test_resolve_state() {
        assert_eq!(resolve_state("va").map(|s| s.name), Some("Virginia"));
        assert_eq!(resolve_state("new york").map(|s| s.name), Some("New York"));
        assert_eq!(resolve_state("Clarendon"), None);
        assert_eq!(resolve_state("  "), None);
    }

    #[test]
    fn test_find_state_prefers_table_order() {
        // MD is declared before VA
        let hit = find_state("Bethesda MD / Arlington VA").unwrap();
        assert_eq!(hit.state.name, "Maryland");
    }

    #[test]
    fn test_find_state_reports_offsets() {
        let text = "Falls Church - Virginia";
        let hit = find_state(text).unwrap();
        assert_eq!(&text[hit.start..hit.end], "Virginia");
    }

    #[test]
    fn test_find_state_widens_west_virginia() {
        let hit = find_state("Charleston West Virginia").unwrap();
        assert_eq!(hit.state.name, "West Virginia");
        assert_eq!(hit.start, "Charleston ".len());
    }

    #[test]
    fn test_abbreviation_needs_word_boundary() {
        assert!(find_state("Javanese").is_none());
        assert!(find_state("Chaatwala").is_none());
    }
}
