//! Cuisine catalog and emoji lookup.
//!
//! Cuisine labels are stored as `Name Emoji`, several of them comma-separated
//! (`"Dessert 🍰, Coffee ☕"`). Filtering works on the bare names.

use serde::Serialize;

/// Emoji used when nothing more specific is known.
pub const DEFAULT_EMOJI: &str = "🍽️";

/// Named cuisines offered when adding a restaurant.
pub static CUISINES: &[(&str, &str)] = &[
    // Asian
    ("Chinese", "🥡"),
    ("Japanese", "🍣"),
    ("Korean", "🥘"),
    ("Thai", "🍜"),
    ("Vietnamese", "🍲"),
    ("Indian", "🍛"),
    ("Pakistani", "🍛"),
    ("Bangladeshi", "🍛"),
    ("Sri Lankan", "🍛"),
    ("Nepalese", "🍛"),
    ("Indonesian", "🍜"),
    ("Malaysian", "🍜"),
    ("Singaporean", "🍜"),
    ("Filipino", "🍜"),
    ("Cambodian", "🍜"),
    ("Laotian", "🍜"),
    ("Burmese", "🍜"),
    ("Mongolian", "🍖"),
    ("Tibetan", "🍜"),
    // Middle Eastern & North African
    ("Middle Eastern", "🥙"),
    ("Lebanese", "🥙"),
    ("Turkish", "🌯"),
    ("Persian", "🍛"),
    ("Afghan", "🍛"),
    ("Armenian", "🥙"),
    ("Israeli", "🥙"),
    ("Moroccan", "🥘"),
    ("Egyptian", "🥙"),
    ("Ethiopian", "🍲"),
    ("Eritrean", "🍲"),
    // European
    ("Italian", "🍝"),
    ("French", "🥐"),
    ("Spanish", "🥘"),
    ("Greek", "🫒"),
    ("German", "🍖"),
    ("British", "🍔"),
    ("Irish", "🍖"),
    ("Portuguese", "🍖"),
    ("Russian", "🥘"),
    ("Polish", "🥘"),
    ("Czech", "🍖"),
    ("Hungarian", "🍖"),
    ("Romanian", "🍖"),
    ("Bulgarian", "🥘"),
    ("Serbian", "🍖"),
    ("Croatian", "🍖"),
    ("Balkan", "🥘"),
    ("Swedish", "🍖"),
    ("Norwegian", "🦞"),
    ("Danish", "🍖"),
    ("Finnish", "🦞"),
    ("Dutch", "🍖"),
    ("Belgian", "🍖"),
    ("Swiss", "🧀"),
    ("Austrian", "🍖"),
    // Americas
    ("American", "🍔"),
    ("Mexican", "🌮"),
    ("Tex-Mex", "🌮"),
    ("Cuban", "🍖"),
    ("Puerto Rican", "🍖"),
    ("Dominican", "🍖"),
    ("Brazilian", "🍖"),
    ("Argentinian", "🥩"),
    ("Peruvian", "🍲"),
    ("Colombian", "🍖"),
    ("Venezuelan", "🍖"),
    ("Chilean", "🦞"),
    ("Ecuadorian", "🍲"),
    ("Jamaican", "🍖"),
    ("Trinidadian", "🍖"),
    ("Haitian", "🍲"),
    ("Southern", "🍗"),
    ("Cajun", "🍲"),
    ("Creole", "🍲"),
    // African
    ("Ghanaian", "🍲"),
    ("Nigerian", "🍲"),
    ("Senegalese", "🍲"),
    ("South African", "🍖"),
    ("Kenyan", "🍲"),
    ("Tanzanian", "🍲"),
    ("West African", "🍲"),
    ("East African", "🍲"),
    // Other regional
    ("Caribbean", "🍖"),
    ("Mediterranean", "🥗"),
    ("Fusion", "🍽️"),
    ("International", "🌍"),
    // Specialty
    ("Seafood", "🦞"),
    ("BBQ", "🍖"),
    ("Pizza", "🍕"),
    ("Sushi", "🍱"),
    ("Steakhouse", "🥩"),
    ("Vegetarian", "🥬"),
    ("Vegan", "🌱"),
    ("Breakfast", "🥞"),
    ("Brunch", "🥞"),
    ("Dessert", "🍰"),
    ("Bakery", "🍞"),
    ("Cafe", "☕"),
    ("Coffee", "☕"),
    ("Ice Cream", "🍦"),
    ("Fast Food", "🍔"),
    ("Food Truck", "🚚"),
    ("Tapas", "🥘"),
    ("Dim Sum", "🥡"),
    ("Ramen", "🍜"),
    ("Noodles", "🍜"),
    ("Soup", "🍲"),
    ("Salad", "🥗"),
    ("Sandwich", "🥪"),
    ("Burger", "🍔"),
    ("Taco", "🌮"),
    ("Burrito", "🌯"),
    ("Other", "🍽️"),
];

// Checked in order; the first keyword hit decides.
static KEYWORD_EMOJI: &[(&[&str], &str)] = &[
    (&["italian", "pasta", "pizza"], "🍝"),
    (&["japanese", "sushi", "ramen"], "🍣"),
    (&["mexican", "taco", "burrito"], "🌮"),
    (&["chinese", "dim sum", "dumpling"], "🥡"),
    (&["indian", "curry", "biryani"], "🍛"),
    (&["french", "bistro"], "🥐"),
    (&["thai"], "🍜"),
    (&["american", "burger", "bbq"], "🍔"),
    (&["korean", "kimchi"], "🥘"),
    (&["mediterranean", "hummus", "falafel"], "🥗"),
    (&["greek"], "🫒"),
    (&["spanish", "tapas"], "🥘"),
    (&["vietnamese", "pho"], "🍲"),
    (&["middle eastern", "lebanese", "turkish"], "🥙"),
    (&["seafood", "fish", "lobster"], "🦞"),
    (&["barbecue", "grill"], "🍖"),
    (&["vegetarian", "veggie"], "🥬"),
    (&["vegan"], "🌱"),
    (&["breakfast", "brunch", "pancake"], "🥞"),
    (&["dessert", "sweet", "bakery"], "🍰"),
    (&["cafe", "coffee", "latte"], "☕"),
    (&["steak"], "🥩"),
    (&["pakistani", "halal"], "🍛"),
    (&["ghanaian", "african"], "🍲"),
    (&["balkan", "eastern european"], "🥘"),
    (&["portuguese"], "🍖"),
    (&["southern", "soul food"], "🍗"),
];

/// Look up the emoji for a cuisine name: catalog first, then keywords.
pub fn cuisine_emoji(name: &str) -> &'static str {
    let normalized = name.trim().to_lowercase();
    if normalized.is_empty() {
        return DEFAULT_EMOJI;
    }

    if let Some((_, emoji)) = CUISINES
        .iter()
        .find(|(catalog_name, _)| catalog_name.to_lowercase() == normalized)
    {
        return emoji;
    }

    KEYWORD_EMOJI
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| normalized.contains(k)))
        .map(|(_, emoji)| *emoji)
        .unwrap_or(DEFAULT_EMOJI)
}

/// Format a cuisine name for storage: `Name Emoji`.
pub fn cuisine_label(name: &str) -> String {
    let name = name.trim();
    format!("{} {}", name, cuisine_emoji(name))
}

/// Strip leading and trailing emoji (and anything else non-alphanumeric).
fn strip_emoji(part: &str) -> &str {
    part.trim_matches(|c: char| !c.is_alphanumeric())
}

/// The emoji carried by a single `Name Emoji` part, if any.
fn embedded_emoji(part: &str) -> Option<&str> {
    let trimmed = part.trim();
    let not_name = |c: char| !c.is_alphanumeric();
    let start = trimmed.len() - trimmed.trim_start_matches(not_name).len();
    let end = trimmed.trim_end_matches(not_name).len();
    if start >= end {
        return None;
    }
    let tail = trimmed[end..].trim();
    let head = trimmed[..start].trim();
    [tail, head].into_iter().find(|s| !s.is_empty())
}

/// Bare cuisine names of a (possibly multi-cuisine) label.
pub fn cuisine_names(cuisine: &str) -> Vec<String> {
    cuisine
        .split(',')
        .map(|part| strip_emoji(part.trim()))
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

/// Bare cuisine names joined back with `, `; the raw label when nothing survives.
pub fn cuisine_display_name(cuisine: &str) -> String {
    let names = cuisine_names(cuisine);
    if names.is_empty() {
        cuisine.trim().to_string()
    } else {
        names.join(", ")
    }
}

/// One entry of the cuisine filter list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CuisineEntry {
    pub name: String,
    pub emoji: String,
}

/// Distinct cuisines (case-insensitive) across labels, sorted by name.
///
/// The emoji comes from the first label that carries one for that cuisine,
/// falling back to [`cuisine_emoji`].
pub fn unique_cuisines<'a>(labels: impl IntoIterator<Item = &'a str>) -> Vec<CuisineEntry> {
    let mut entries: Vec<CuisineEntry> = Vec::new();

    for label in labels {
        for part in label.split(',') {
            let name = strip_emoji(part.trim());
            if name.is_empty() {
                continue;
            }
            let key = name.to_lowercase();
            if entries.iter().any(|e| e.name.to_lowercase() == key) {
                continue;
            }
            let emoji = embedded_emoji(part).unwrap_or_else(|| cuisine_emoji(name));
            entries.push(CuisineEntry {
                name: name.to_string(),
                emoji: emoji.to_string(),
            });
        }
    }

    entries.sort_by(|a, b| {
        a.name
            .to_lowercase()
            .cmp(&b.name.to_lowercase())
            .then_with(|| a.name.cmp(&b.name))
    });
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_cuisine_names_strip_emoji() {
        assert_eq!(cuisine_names("Indian 🍛"), vec!["Indian"]);
        assert_eq!(cuisine_names("Dessert 🍰, Coffee ☕"), vec!["Dessert", "Coffee"]);
        assert_eq!(cuisine_names("Other 🍽️"), vec!["Other"]);
        assert_eq!(cuisine_names("🌮 Tex-Mex"), vec!["Tex-Mex"]);
        assert!(cuisine_names("").is_empty());
    }

    #[test]
    fn test_cuisine_emoji_lookup() {
        assert_eq!(cuisine_emoji("Japanese"), "🍣");
        assert_eq!(cuisine_emoji("bakery"), "🍞");
        // keyword fallback
        assert_eq!(cuisine_emoji("Neapolitan Pizza"), "🍝");
        assert_eq!(cuisine_emoji("Soul Food Kitchen"), "🍗");
        assert_eq!(cuisine_emoji("Klingon"), DEFAULT_EMOJI);
    }

    #[test]
    fn test_cuisine_label() {
        assert_eq!(cuisine_label(" Thai "), "Thai 🍜");
    }

    #[test]
    fn test_unique_cuisines() {
        let labels = ["Indian 🍛", "indian 🍛", "Dessert 🍰, Coffee ☕", "Balkan 🥘"];
        let entries = unique_cuisines(labels);
        let names: Vec<_> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Balkan", "Coffee", "Dessert", "Indian"]);
        assert_eq!(entries[1].emoji, "☕");
    }

    #[test]
    fn test_embedded_emoji_on_either_side() {
        assert_eq!(embedded_emoji("Coffee ☕"), Some("☕"));
        assert_eq!(embedded_emoji("🌮 Tex-Mex"), Some("🌮"));
        assert_eq!(embedded_emoji("Korean"), None);
        assert_eq!(embedded_emoji("🍽️"), None);
    }

    #[test]
    fn test_unique_cuisines_uses_lookup_without_embedded_emoji() {
        let entries = unique_cuisines(["Korean"]);
        assert_eq!(entries[0].emoji, "🥘");
    }
}
