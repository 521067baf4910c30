// crates/ecoglobe-core/src/alias.rs

//! Curated spelling variants that the ISO name table does not cover.
//!
//! Keys are stored already normalized (see [`normalize`]), so a lookup is
//! a plain map hit on the key the resolver computes anyway.

use crate::text::normalize;
use once_cell::sync::Lazy;
use std::collections::BTreeMap;

/// Built-in `(normalized name, ISO-3166 alpha-3)` pairs.
///
/// Mostly the abbreviated labels of the Natural Earth / world-atlas
/// geometry (`dem rep congo`, `s sudan`, `fr s antarctic lands`) and
/// common short forms (`russia`, `laos`).
pub const BUILTIN_ALIASES: &[(&str, &str)] = &[
    ("antarctica", "ATA"),
    ("antartica", "ATA"),
    ("bahamas", "BHS"),
    ("bolivia", "BOL"),
    ("bosnia and herz", "BIH"),
    ("bosnia and herzegovina", "BIH"),
    ("brunei", "BRN"),
    ("cape verde", "CPV"),
    ("central african rep", "CAF"),
    ("central african republic", "CAF"),
    ("congo", "COG"),
    ("cote d ivoire", "CIV"),
    ("czechia", "CZE"),
    ("dem rep congo", "COD"),
    ("democratic republic of the congo", "COD"),
    ("dominican rep", "DOM"),
    ("dominican republic", "DOM"),
    ("egypt", "EGY"),
    ("eq guinea", "GNQ"),
    ("equatorial guinea", "GNQ"),
    ("eswatini", "SWZ"),
    ("falkland islands", "FLK"),
    ("fr s antarctic lands", "ATF"),
    ("fr s antartic lands", "ATF"),
    ("french southern and antarctic lands", "ATF"),
    ("french southern antarctic lands", "ATF"),
    ("french southern territories", "ATF"),
    ("gambia", "GMB"),
    ("iran", "IRN"),
    ("iran islamic republic of", "IRN"),
    ("ivory coast", "CIV"),
    ("korea democratic people s republic of", "PRK"),
    ("korea republic of", "KOR"),
    ("kyrgyzstan", "KGZ"),
    ("laos", "LAO"),
    ("macedonia", "MKD"),
    ("myanmar", "MMR"),
    ("north korea", "PRK"),
    ("north macedonia", "MKD"),
    ("palestine", "PSE"),
    ("puerto rico", "PRI"),
    ("republic of moldova", "MDA"),
    ("republic of the congo", "COG"),
    ("russia", "RUS"),
    ("s sudan", "SSD"),
    ("slovakia", "SVK"),
    ("solomon is", "SLB"),
    ("solomon islands", "SLB"),
    ("somaliland", "SOM"),
    ("south korea", "KOR"),
    ("south sudan", "SSD"),
    ("state of palestine", "PSE"),
    ("syria", "SYR"),
    ("syrian arab republic", "SYR"),
    ("taiwan", "TWN"),
    ("tanzania", "TZA"),
    ("turkey", "TUR"),
    ("turkiye", "TUR"),
    ("united states of america", "USA"),
    ("venezuela", "VEN"),
    ("vietnam", "VNM"),
    ("w sahara", "ESH"),
    ("western sahara", "ESH"),
    ("yemen", "YEM"),
];

static BUILTIN: Lazy<AliasTable> = Lazy::new(|| AliasTable::from_pairs(BUILTIN_ALIASES.iter().copied()));

/// Immutable, ordered `normalized name → code` mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AliasTable {
    entries: BTreeMap<String, String>,
}

impl AliasTable {
    /// The curated table shipped with the crate.
    pub fn builtin() -> &'static AliasTable {
        &BUILTIN
    }

    /// An empty table: resolution falls through to the name table only.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a table from arbitrary spellings.
    ///
    /// Keys are normalized and codes trimmed and uppercased; later pairs
    /// overwrite earlier ones with the same key.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let entries = pairs
            .into_iter()
            .map(|(k, v)| (normalize(k.as_ref()), v.as_ref().trim().to_ascii_uppercase()))
            .filter(|(k, v)| !k.is_empty() && !v.is_empty())
            .collect();
        Self { entries }
    }

    /// Looks up an already-normalized key.
    #[inline]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
