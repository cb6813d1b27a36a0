//! Collapses known spellings of the same creative entity into one
//! canonical label used for grouping and ranking.

/// Label for rows with no usable director text. Kept in the source
/// language of the dataset; excluded from top-director rankings.
pub const UNKNOWN_DIRECTOR: &str = "Sconosciuto";

/// Known alias phrases and the canonical label each collapses to.
/// Matched as case-insensitive substrings of the raw director cell.
const KNOWN_ALIASES: &[(&str, &str)] = &[
    ("joel coen", "Joel & Ethan Coen"),
    ("ethan coen", "Joel & Ethan Coen"),
    ("joel & ethan coen", "Joel & Ethan Coen"),
    ("ethan & joel coen", "Joel & Ethan Coen"),
    ("coen brothers", "Joel & Ethan Coen"),
    ("fratelli coen", "Joel & Ethan Coen"),
];

pub struct DirectorResolver {
    // Lowercased, deduplicated, longest phrase first so resolution
    // never depends on table order.
    aliases: Vec<(String, String)>,
}

impl DirectorResolver {
    pub fn new() -> Self {
        Self::with_aliases(KNOWN_ALIASES)
    }

    pub fn with_aliases(table: &[(&str, &str)]) -> Self {
        let mut aliases: Vec<(String, String)> = table
            .iter()
            .map(|(alias, canonical)| (alias.trim().to_lowercase(), canonical.to_string()))
            .collect();
        aliases.sort_by(|(a, _), (b, _)| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        aliases.dedup_by(|(a, _), (b, _)| a == b);
        Self { aliases }
    }

    /// Resolve a raw director cell to its canonical label.
    ///
    /// Missing or empty input maps to [`UNKNOWN_DIRECTOR`]. Resolution
    /// is idempotent: an already-canonical label resolves to itself.
    pub fn resolve(&self, raw: &str) -> String {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return UNKNOWN_DIRECTOR.to_string();
        }

        let lowered = trimmed.to_lowercase();
        for (alias, canonical) in &self.aliases {
            if lowered.contains(alias.as_str()) {
                return canonical.clone();
            }
        }
        trimmed.to_string()
    }

    pub fn is_unknown(label: &str) -> bool {
        label == UNKNOWN_DIRECTOR
    }
}

impl Default for DirectorResolver {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_input_maps_to_unknown() {
        let resolver = DirectorResolver::new();
        assert_eq!(resolver.resolve(""), UNKNOWN_DIRECTOR);
        assert_eq!(resolver.resolve("   "), UNKNOWN_DIRECTOR);
    }

    #[test]
    fn test_all_alias_variants_collapse_to_one_label() {
        let resolver = DirectorResolver::new();
        for raw in [
            "Joel Coen",
            "Ethan Coen",
            "Joel & Ethan Coen",
            "ETHAN & JOEL COEN",
            "Coen Brothers",
            "fratelli coen",
        ] {
            assert_eq!(resolver.resolve(raw), "Joel & Ethan Coen", "variant {:?}", raw);
        }
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let resolver = DirectorResolver::new();
        let canonical = resolver.resolve("coen brothers");
        assert_eq!(resolver.resolve(&canonical), canonical);

        // Names outside the alias table pass through unchanged
        assert_eq!(resolver.resolve("Akira Kurosawa"), "Akira Kurosawa");
        assert_eq!(
            resolver.resolve(&resolver.resolve("Akira Kurosawa")),
            "Akira Kurosawa"
        );
    }

    #[test]
    fn test_overlapping_aliases_prefer_longest_phrase() {
        let resolver = DirectorResolver::with_aliases(&[
            ("lana wachowski", "Lana Wachowski"),
            ("wachowski", "The Wachowskis"),
        ]);
        assert_eq!(resolver.resolve("Lana Wachowski"), "Lana Wachowski");
        assert_eq!(resolver.resolve("Lilly Wachowski"), "The Wachowskis");
    }

    #[test]
    fn test_substring_match_inside_multi_name_cell() {
        let resolver = DirectorResolver::new();
        assert_eq!(
            resolver.resolve("Joel Coen, Ethan Coen"),
            "Joel & Ethan Coen"
        );
    }
}
