// crates/ecoglobe-core/src/traits.rs
use crate::model::{GeometryFeature, NameRecord};
use crate::text::normalize;

/// Name-based matching helpers for types that expose a display name.
///
/// Implementors provide the raw display spelling through
/// [`Named::display_name`] and get the normalized key and an
/// accent-insensitive comparison for free.
///
/// # Examples
/// ```rust
/// use ecoglobe_core::traits::Named;
///
/// struct Place(&'static str);
/// impl Named for Place {
///     fn display_name(&self) -> Option<&str> { Some(self.0) }
/// }
///
/// assert!(Place("Côte d'Ivoire").is_named("cote d ivoire"));
/// assert_eq!(Place("S. Sudan").name_key().as_deref(), Some("s sudan"));
/// ```
pub trait Named {
    /// The display spelling, `None` when the item carries no name.
    fn display_name(&self) -> Option<&str>;

    /// Normalized key of the display name; `None` when absent or when it
    /// normalizes to nothing.
    fn name_key(&self) -> Option<String> {
        self.display_name()
            .map(normalize)
            .filter(|k| !k.is_empty())
    }

    /// Accent-, case- and punctuation-insensitive name comparison.
    #[inline]
    fn is_named(&self, q: &str) -> bool {
        self.name_key().is_some_and(|k| k == normalize(q))
    }
}

impl Named for GeometryFeature {
    fn display_name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

impl Named for NameRecord {
    fn display_name(&self) -> Option<&str> {
        Some(&self.name)
    }
}

impl Named for str {
    fn display_name(&self) -> Option<&str> {
        Some(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_or_symbol_names_have_no_key() {
        assert_eq!(GeometryFeature::default().name_key(), None);
        assert_eq!(GeometryFeature::named("").name_key(), None);
        assert_eq!(GeometryFeature::named("'.'").name_key(), None);
    }

    #[test]
    fn feature_name_matching_is_folded() {
        let f = GeometryFeature::named("Dem. Rep. Congo");
        assert!(f.is_named("dem rep congo"));
        assert!(!f.is_named("congo"));
        assert!("Türkiye".is_named("TURKIYE"));
    }
}
