// crates/ecoglobe-core/src/resolve.rs

//! Country-name → ISO-3166 alpha-3 resolution.

use crate::alias::AliasTable;
use crate::model::{GeometryFeature, NameRecord};
use crate::text::normalize;
use crate::traits::Named;
use std::collections::{BTreeSet, HashMap};

/// Resolves display names against the curated aliases, then the name table.
///
/// The alias table always wins for a key present in both, so it can
/// override ambiguous or wrong rows of the name table.
#[derive(Debug, Clone)]
pub struct CodeResolver {
    aliases: AliasTable,
    names: HashMap<String, String>,
}

impl CodeResolver {
    /// Builds the `normalized name → code` lookup from `name_table`.
    ///
    /// Later rows overwrite earlier rows with the same key. Rows whose name
    /// normalizes to nothing or whose code is empty are left out.
    pub fn new(name_table: &[NameRecord], aliases: AliasTable) -> Self {
        let mut names = HashMap::with_capacity(name_table.len());
        for record in name_table {
            let code = record.iso_a3.trim();
            if code.is_empty() {
                continue;
            }
            if let Some(key) = record.name_key() {
                names.insert(key, code.to_ascii_uppercase());
            }
        }
        Self { aliases, names }
    }

    /// Resolver over the built-in alias table.
    pub fn with_builtin_aliases(name_table: &[NameRecord]) -> Self {
        Self::new(name_table, AliasTable::builtin().clone())
    }

    /// Resolves a free-text name. `None` for an empty name or a miss.
    pub fn resolve_name(&self, name: &str) -> Option<&str> {
        let key = normalize(name);
        if key.is_empty() {
            return None;
        }
        self.aliases
            .get(&key)
            .or_else(|| self.names.get(&key).map(String::as_str))
    }

    /// Resolves anything with a display name, typically a [`GeometryFeature`].
    pub fn resolve<T: Named + ?Sized>(&self, item: &T) -> Option<&str> {
        item.display_name().and_then(|n| self.resolve_name(n))
    }

    /// Every code a resolution can return, sorted.
    pub fn known_codes(&self) -> BTreeSet<&str> {
        self.aliases
            .iter()
            .map(|(_, code)| code)
            .chain(self.names.values().map(String::as_str))
            .collect()
    }

    pub fn aliases(&self) -> &AliasTable {
        &self.aliases
    }
}

/// `code → feature` for every feature that resolves.
///
/// Holds positions into the feature slice it was built from. When two
/// features resolve to the same code the later one wins.
#[derive(Debug, Clone, Default)]
pub struct ResolvedIndex {
    by_code: HashMap<String, usize>,
    codes: Vec<Option<String>>,
}

impl ResolvedIndex {
    pub fn build(features: &[GeometryFeature], resolver: &CodeResolver) -> Self {
        let codes: Vec<Option<String>> = features
            .iter()
            .map(|f| resolver.resolve(f).map(str::to_owned))
            .collect();
        let mut by_code = HashMap::with_capacity(codes.len());
        for (i, code) in codes.iter().enumerate() {
            if let Some(code) = code {
                by_code.insert(code.clone(), i);
            }
        }
        Self { by_code, codes }
    }

    /// Position of the feature drawn for `code`.
    pub fn position(&self, code: &str) -> Option<usize> {
        self.by_code.get(code).copied()
    }

    pub fn contains(&self, code: &str) -> bool {
        self.by_code.contains_key(code)
    }

    /// Code of the feature at `position`, as resolved at build time.
    pub fn code_at(&self, position: usize) -> Option<&str> {
        self.codes.get(position).and_then(|c| c.as_deref())
    }

    /// Number of distinct codes with a feature.
    pub fn len(&self) -> usize {
        self.by_code.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_code.is_empty()
    }

    /// Number of features that resolved to some code.
    pub fn mapped_features(&self) -> usize {
        self.codes.iter().filter(|c| c.is_some()).count()
    }
}
