// crates/ecoglobe-core/src/text.rs

//! Text helpers: the country-name key and the tolerant number parser.

/// Convert a free-text country name into a comparable key.
///
/// This performs:
/// 1) Transliterate Unicode → ASCII with `deunicode`, which drops the
///    diacritic marks (`Côte` → `Cote`, `Türkiye` → `Turkiye`)
/// 2) Lowercase
/// 3) Treat everything outside `[a-z0-9-]` as a word break (apostrophes,
///    dots, commas), so `d'Ivoire` and `d Ivoire` agree
/// 4) Collapse whitespace runs and trim
///
/// The output only contains characters the function keeps, so applying it
/// twice yields the same key.
///
/// # Examples
///
/// ```rust
/// use ecoglobe_core::text::normalize;
///
/// assert_eq!(normalize("Côte d'Ivoire"), "cote d ivoire");
/// assert_eq!(normalize("  Bosnia and Herz. "), "bosnia and herz");
/// assert_eq!(normalize("S. Sudan"), normalize("S Sudan"));
/// ```
pub fn normalize(name: &str) -> String {
    let folded = deunicode::deunicode(name).to_lowercase();

    let mut out = String::with_capacity(folded.len());
    let mut pending_space = false;
    for ch in folded.chars() {
        if !(ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '-') {
            pending_space = !out.is_empty();
            continue;
        }
        if pending_space {
            out.push(' ');
            pending_space = false;
        }
        out.push(ch);
    }
    out
}

/// Parses a numeric cell, tolerating locale and placeholder noise.
///
/// - trims the input and replaces the first `,` with `.` (`"1,5"` → 1.5)
/// - `""`, `"na"` and `"null"` (any case) are absent
/// - anything that does not parse to a finite `f64` is absent
///
/// Never panics and never yields NaN or infinity.
///
/// # Examples
///
/// ```rust
/// use ecoglobe_core::text::parse_number;
///
/// assert_eq!(parse_number(Some(" 1,5 ")), Some(1.5));
/// assert_eq!(parse_number(Some("NA")), None);
/// assert_eq!(parse_number(None), None);
/// ```
pub fn parse_number(raw: Option<&str>) -> Option<f64> {
    let s = raw?.trim().replacen(',', ".", 1);
    if s.is_empty() || s.eq_ignore_ascii_case("na") || s.eq_ignore_ascii_case("null") {
        return None;
    }
    s.parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_strips_accents_and_punctuation() {
        assert_eq!(normalize("Côte d'Ivoire"), normalize("Cote d Ivoire"));
        assert_eq!(normalize("Côte d’Ivoire"), "cote d ivoire");
        assert_eq!(normalize("Bosnia and Herz.Extra"), "bosnia and herz extra");
        assert_eq!(normalize("Türkiye"), "turkiye");
        assert_eq!(normalize("Dem. Rep. Congo"), "dem rep congo");
        assert_eq!(normalize("Korea, Republic of"), "korea republic of");
    }

    #[test]
    fn normalize_keeps_hyphen_and_digits() {
        assert_eq!(normalize("Guinea-Bissau"), "guinea-bissau");
        assert_eq!(normalize("Area 51"), "area 51");
    }

    #[test]
    fn normalize_collapses_and_trims_whitespace() {
        assert_eq!(normalize("  United \t States\n of  America "), "united states of america");
        assert_eq!(normalize(" ' "), "");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn normalize_is_idempotent() {
        for s in [
            "Côte d'Ivoire",
            "São Tomé and Príncipe",
            "Fr. S. Antarctic Lands",
            "  Bosnia and Herz. ",
            "Curaçao",
            "Åland",
            "x - y",
        ] {
            let once = normalize(s);
            assert_eq!(normalize(&once), once, "not idempotent for {s:?}");
        }
    }

    #[test]
    fn parse_number_handles_tokens() {
        assert_eq!(parse_number(Some("1,5")), Some(1.5));
        assert_eq!(parse_number(Some("")), None);
        assert_eq!(parse_number(Some("   ")), None);
        assert_eq!(parse_number(Some("NA")), None);
        assert_eq!(parse_number(Some("Null")), None);
        assert_eq!(parse_number(Some("abc")), None);
        assert_eq!(parse_number(Some("-3.25")), Some(-3.25));
        assert_eq!(parse_number(Some("1e3")), Some(1000.0));
    }

    #[test]
    fn parse_number_rejects_non_finite() {
        assert_eq!(parse_number(Some("inf")), None);
        assert_eq!(parse_number(Some("NaN")), None);
        assert_eq!(parse_number(Some("1e400")), None);
    }

    #[test]
    fn parse_number_only_swaps_first_comma() {
        assert_eq!(parse_number(Some("1,234,5")), None);
    }
}
