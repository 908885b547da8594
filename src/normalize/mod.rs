//! Team name normalization.
//!
//! Raw CSV names come with corporate suffixes and accents ("AS Monaco FC",
//! "AS Saint-Étienne"). Two derived forms are produced from a raw name:
//! - a canonical display name, via an alias table with suffix stripping as fallback
//! - a comparison key, used for fuzzy team matching and as the last sort key

use std::collections::HashMap;

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Full CSV names mapped to the short names shown in tables.
pub const DEFAULT_TEAM_NAMES: &[(&str, &str)] = &[
    ("Paris Saint-Germain FC", "Paris Saint-Germain"),
    ("Olympique de Marseille", "Marseille"),
    ("AS Monaco FC", "Monaco"),
    ("OGC Nice", "Nice"),
    ("Lille OSC", "Lille"),
    ("Olympique Lyonnais", "Lyon"),
    ("RC Strasbourg Alsace", "Strasbourg"),
    ("Racing Club de Lens", "Lens"),
    ("Stade Brestois 29", "Brest"),
    ("Toulouse FC", "Toulouse"),
    ("AJ Auxerre", "Auxerre"),
    ("Stade Rennais FC 1901", "Rennes"),
    ("FC Nantes", "Nantes"),
    ("Angers SCO", "Angers"),
    ("Le Havre AC", "Le Havre"),
    ("Stade de Reims", "Reims"),
    ("AS Saint-Étienne", "Saint-Etienne"),
    ("Montpellier HSC", "Montpellier"),
];

/// Suffixes removed from names missing from the alias table, in order.
const CORPORATE_SUFFIXES: &[&str] = &[" FC", " AC", " HSC", " OSC", " SCO"];

/// Alias table from raw team names to canonical display names.
#[derive(Debug, Clone)]
pub struct TeamNames {
    aliases: HashMap<String, String>,
}

impl Default for TeamNames {
    fn default() -> Self {
        Self::from_pairs(DEFAULT_TEAM_NAMES.iter().copied())
    }
}

impl TeamNames {
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            aliases: pairs
                .into_iter()
                .map(|(raw, canonical)| (raw.into(), canonical.into()))
                .collect(),
        }
    }

    /// Add or override aliases. Later entries win.
    pub fn with_aliases<I, K, V>(mut self, extra: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (raw, canonical) in extra {
            self.aliases.insert(raw.into(), canonical.into());
        }
        self
    }

    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }

    /// Canonical display name for a raw CSV team name.
    pub fn canonical(&self, raw: &str) -> String {
        let trimmed = raw.trim();
        if let Some(name) = self.aliases.get(trimmed) {
            return name.clone();
        }

        let mut cleaned = trimmed.to_string();
        for suffix in CORPORATE_SUFFIXES {
            cleaned = cleaned.replace(suffix, "");
        }
        cleaned.trim().to_string()
    }
}

/// Case, accent and punctuation insensitive key for a team name.
///
/// "AS Saint-Étienne" and "as saint etienne" both become "assaintetienne".
pub fn comparison_key(name: &str) -> String {
    name.nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
        .replace('&', "and")
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        .collect()
}

/// Whether a team name matches an already-computed query key.
///
/// Keys match when equal or when one contains the other. An empty key on
/// either side never matches.
pub fn teams_match(query_key: &str, team_name: &str) -> bool {
    if query_key.is_empty() {
        return false;
    }
    let team_key = comparison_key(team_name);
    if team_key.is_empty() {
        return false;
    }
    team_key == query_key || team_key.contains(query_key) || query_key.contains(&team_key)
}
