// crates/ecoglobe-core/src/scale.rs

//! Min-max normalisation and the quantile color scale.

use crate::error::GlobeError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An sRGB color written as `#RRGGBB` (or `#RRGGBBAA`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)?;
        if self.a != 255 {
            write!(f, "{:02X}", self.a)?;
        }
        Ok(())
    }
}

impl FromStr for Color {
    type Err = GlobeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || GlobeError::InvalidData(format!("not a hex color: {s:?}"));
        let hex = s.trim().strip_prefix('#').ok_or_else(bad)?;
        if !(hex.len() == 6 || hex.len() == 8) || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(bad());
        }
        let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| bad());
        Ok(Self {
            r: byte(0)?,
            g: byte(2)?,
            b: byte(4)?,
            a: if hex.len() == 8 { byte(6)? } else { 255 },
        })
    }
}

impl TryFrom<String> for Color {
    type Error = GlobeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Color> for String {
    fn from(c: Color) -> Self {
        c.to_string()
    }
}

/// Fill of countries without a code or without a score.
pub const UNKNOWN_COLOR: Color = Color::rgb(0x18, 0x25, 0x35);

/// Ordered class colors, lowest class first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Color>", into = "Vec<Color>")]
pub struct Palette(Vec<Color>);

impl Palette {
    /// Needs at least two colors.
    pub fn new(colors: Vec<Color>) -> Result<Self, GlobeError> {
        if colors.len() < 2 {
            return Err(GlobeError::InvalidData(format!(
                "a palette needs at least 2 colors, got {}",
                colors.len()
            )));
        }
        Ok(Self(colors))
    }

    /// Parses hex strings.
    pub fn from_hex<S: AsRef<str>>(colors: &[S]) -> Result<Self, GlobeError> {
        let colors = colors
            .iter()
            .map(|c| c.as_ref().parse())
            .collect::<Result<Vec<Color>, _>>()?;
        Self::new(colors)
    }

    /// Five blues, deep to light (the globe's default).
    pub fn ocean() -> Self {
        Self(vec![
            Color::rgb(0x00, 0x45, 0xAD),
            Color::rgb(0x04, 0x6D, 0xC4),
            Color::rgb(0x04, 0x9A, 0xD5),
            Color::rgb(0x00, 0xB4, 0xCD),
            Color::rgb(0x9C, 0xE3, 0xFB),
        ])
    }

    /// Five classes from red to green.
    pub fn traffic() -> Self {
        Self(vec![
            Color::rgb(0x8B, 0x10, 0x24),
            Color::rgb(0xE3, 0x69, 0x2C),
            Color::rgb(0xF5, 0xD3, 0x7A),
            Color::rgb(0xB8, 0xE0, 0x7A),
            Color::rgb(0x2F, 0x99, 0x5A),
        ])
    }

    /// Looks up a built-in palette by name (`ocean`, `traffic`).
    pub fn preset(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "ocean" => Some(Self::ocean()),
            "traffic" => Some(Self::traffic()),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn colors(&self) -> &[Color] {
        &self.0
    }

    pub fn contains(&self, c: &Color) -> bool {
        self.0.contains(c)
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::ocean()
    }
}

impl TryFrom<Vec<Color>> for Palette {
    type Error = GlobeError;

    fn try_from(colors: Vec<Color>) -> Result<Self, Self::Error> {
        Self::new(colors)
    }
}

impl From<Palette> for Vec<Color> {
    fn from(p: Palette) -> Self {
        p.0
    }
}

/// One legend swatch: class color and its normalized bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LegendEntry {
    pub color: Color,
    pub lower: f64,
    pub upper: f64,
}

impl LegendEntry {
    /// Lower bound as a whole percentage, e.g. `"40%"`.
    pub fn label(&self) -> String {
        format!("{:.0}%", self.lower * 100.0)
    }
}

/// Quantile color scale over min-max normalized scores.
///
/// Built from the observed raw scores: K-1 breakpoints split the normalized
/// distribution into K equal-count classes, class `i` takes palette color
/// `i`. Degenerate inputs fall back to evenly spaced breakpoints:
/// - no scores: bounds are `[0, 1]`,
/// - all scores equal: every score normalizes to `0.5` (the middle class).
#[derive(Debug, Clone, PartialEq)]
pub struct ColorScale {
    palette: Palette,
    unknown: Color,
    min: f64,
    max: f64,
    thresholds: Vec<f64>,
    observed: usize,
}

impl ColorScale {
    /// Non-finite scores are ignored.
    pub fn build<I>(scores: I, palette: Palette, unknown: Color) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        let scores: Vec<f64> = scores.into_iter().filter(|v| v.is_finite()).collect();
        let (min, max) = if scores.is_empty() {
            (0.0, 1.0)
        } else {
            scores
                .iter()
                .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)))
        };

        let k = palette.len();
        let thresholds = if max > min {
            let mut domain: Vec<f64> = scores.iter().map(|v| (v - min) / (max - min)).collect();
            domain.sort_by(f64::total_cmp);
            if domain.is_empty() {
                uniform_thresholds(k)
            } else {
                (1..k).map(|i| quantile_sorted(&domain, i as f64 / k as f64)).collect()
            }
        } else {
            uniform_thresholds(k)
        };

        Self {
            palette,
            unknown,
            min,
            max,
            thresholds,
            observed: scores.len(),
        }
    }

    /// `true` when fewer than two distinct scores were observed.
    pub fn is_degenerate(&self) -> bool {
        !(self.max > self.min) || self.observed == 0
    }

    /// Raw score range used for normalisation.
    pub fn bounds(&self) -> (f64, f64) {
        (self.min, self.max)
    }

    /// Number of scores the scale was built from.
    pub fn observed(&self) -> usize {
        self.observed
    }

    /// Rescales a raw score to `[0, 1]` (values outside the observed range
    /// land outside it). `None` for absent or non-finite input.
    pub fn normalize(&self, raw: Option<f64>) -> Option<f64> {
        let v = raw.filter(|v| v.is_finite())?;
        if self.max > self.min {
            Some((v - self.min) / (self.max - self.min))
        } else if self.observed > 0 {
            Some(0.5)
        } else {
            Some(v)
        }
    }

    /// Class of a normalized score: below the first breakpoint → 0,
    /// at or above the last → K-1.
    pub fn class_of(&self, normalized: f64) -> usize {
        self.thresholds.partition_point(|t| *t <= normalized)
    }

    /// Color of a normalized score; the unknown color for `None`/NaN.
    pub fn color_normalized(&self, normalized: Option<f64>) -> Color {
        match normalized.filter(|v| v.is_finite()) {
            Some(v) => self.palette.colors()[self.class_of(v)],
            None => self.unknown,
        }
    }

    /// Color of a raw score.
    pub fn color_for(&self, raw: Option<f64>) -> Color {
        self.color_normalized(self.normalize(raw))
    }

    /// The K-1 inner breakpoints, ascending.
    pub fn breakpoints(&self) -> &[f64] {
        &self.thresholds
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn unknown_color(&self) -> Color {
        self.unknown
    }

    /// One entry per palette color with bounds `[0, b1, .., b(K-1), 1]`.
    pub fn legend(&self) -> Vec<LegendEntry> {
        let stops: Vec<f64> = std::iter::once(0.0)
            .chain(self.thresholds.iter().copied())
            .chain(std::iter::once(1.0))
            .collect();
        self.palette
            .colors()
            .iter()
            .zip(stops.windows(2))
            .map(|(&color, w)| LegendEntry {
                color,
                lower: w[0],
                upper: w[1],
            })
            .collect()
    }
}

fn uniform_thresholds(k: usize) -> Vec<f64> {
    (1..k).map(|i| i as f64 / k as f64).collect()
}

/// Linear-interpolated quantile of sorted, non-empty data (R-7).
fn quantile_sorted(sorted: &[f64], p: f64) -> f64 {
    let n = sorted.len();
    if n == 1 {
        return sorted[0];
    }
    let h = (n - 1) as f64 * p;
    let lo = h.floor() as usize;
    let hi = (lo + 1).min(n - 1);
    sorted[lo] + (sorted[hi] - sorted[lo]) * (h - lo as f64)
}
