//! Built-in spacing, font-size and font-weight scales, plus the custom scale.
//!
//! The built-in tables are fixed process-wide and never mutated. Each
//! [`ScaleResolver`] additionally owns one [`CustomScale`] whose entries can
//! override or extend the built-in numeric scale under the precedence rules
//! implemented in [`ScaleResolver::spacing_token`].

use std::collections::HashMap;
use std::sync::OnceLock;

use regex::Regex;

use crate::error::{PxwindError, PxwindResult};

/// Tolerance when matching a pixel value against the integer spacing scale.
pub const SPACING_EPSILON: f64 = 0.0001;

/// Font sizes are commonly typed as near-integers with float drift, so the
/// tolerance is wider than for spacing.
pub const FONT_SIZE_EPSILON: f64 = 0.1;

// ─── Built-in tables ─────────────────────────────────────────────────────────

/// Default spacing scale: scale key → pixel value, standard Tailwind steps.
pub static SPACING_SCALE: &[(&str, f64)] = &[
    ("0", 0.0),
    ("0.5", 2.0),
    ("1", 4.0),
    ("1.5", 6.0),
    ("2", 8.0),
    ("2.5", 10.0),
    ("3", 12.0),
    ("3.5", 14.0),
    ("4", 16.0),
    ("5", 20.0),
    ("6", 24.0),
    ("7", 28.0),
    ("8", 32.0),
    ("9", 36.0),
    ("10", 40.0),
    ("11", 44.0),
    ("12", 48.0),
    ("14", 56.0),
    ("16", 64.0),
    ("20", 80.0),
    ("24", 96.0),
    ("28", 112.0),
    ("32", 128.0),
    ("36", 144.0),
    ("40", 160.0),
    ("44", 176.0),
    ("48", 192.0),
    ("52", 208.0),
    ("56", 224.0),
    ("60", 240.0),
    ("64", 256.0),
    ("72", 288.0),
    ("80", 320.0),
    ("96", 384.0),
];

/// Font sizes: pixel value → canonical class token.
static FONT_SIZES: &[(f64, &str)] = &[
    (12.0, "text-xs"),
    (14.0, "text-sm"),
    (16.0, "text-base"),
    (18.0, "text-lg"),
    (20.0, "text-xl"),
    (24.0, "text-2xl"),
    (30.0, "text-3xl"),
    (36.0, "text-4xl"),
    (48.0, "text-5xl"),
    (60.0, "text-6xl"),
    (72.0, "text-7xl"),
    (96.0, "text-8xl"),
    (128.0, "text-9xl"),
];

/// Font weights: numeric weight → canonical class token.
static FONT_WEIGHTS: &[(i64, &str)] = &[
    (100, "font-thin"),
    (200, "font-extralight"),
    (300, "font-light"),
    (400, "font-normal"),
    (500, "font-medium"),
    (600, "font-semibold"),
    (700, "font-bold"),
    (800, "font-extrabold"),
    (900, "font-black"),
];

/// Reverse spacing table: integer pixel value → scale key.
/// Last write wins when two keys share a pixel value.
fn spacing_reverse() -> &'static HashMap<i64, &'static str> {
    static REVERSE: OnceLock<HashMap<i64, &'static str>> = OnceLock::new();
    REVERSE.get_or_init(|| {
        let mut map = HashMap::new();
        for &(key, px) in SPACING_SCALE {
            map.insert(px as i64, key);
        }
        map
    })
}

fn font_size_for(px: i64) -> Option<&'static str> {
    FONT_SIZES
        .iter()
        .find(|&&(value, _)| value as i64 == px)
        .map(|&(_, token)| token)
}

/// Pixel value for a known font-size class token (e.g. `text-base` → 16).
pub fn font_size_value(token: &str) -> Option<f64> {
    FONT_SIZES
        .iter()
        .find(|&&(_, t)| t == token)
        .map(|&(value, _)| value)
}

// ─── Custom scale ────────────────────────────────────────────────────────────

/// A user- or project-supplied name → pixel-value table.
///
/// Every name must be non-empty and every value a finite number ≥ 0;
/// construction rejects the whole table on the first violation. The reverse
/// index (rounded pixel value → name) is derived wholesale at construction,
/// never patched, and only holds entries whose value is integral within
/// [`SPACING_EPSILON`]; other values are found by the tolerance scan.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CustomScale {
    entries: HashMap<String, f64>,
    reverse: HashMap<i64, String>,
}

impl CustomScale {
    pub fn new(entries: HashMap<String, f64>) -> PxwindResult<Self> {
        for (name, &value) in &entries {
            if name.is_empty() {
                return Err(PxwindError::InvalidScaleEntry {
                    name: name.clone(),
                    reason: "name must be a non-empty string".to_string(),
                });
            }
            if !value.is_finite() || value < 0.0 {
                return Err(PxwindError::InvalidScaleEntry {
                    name: name.clone(),
                    reason: format!("value {} must be a finite number >= 0", value),
                });
            }
        }

        let reverse = Self::build_reverse(&entries);
        Ok(Self { entries, reverse })
    }

    fn build_reverse(entries: &HashMap<String, f64>) -> HashMap<i64, String> {
        let mut reverse = HashMap::new();
        for (name, &value) in entries {
            if (value - value.round()).abs() <= SPACING_EPSILON {
                reverse.insert(value.round() as i64, name.clone());
            }
        }
        reverse
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Pixel value for a custom scale name.
    pub fn get(&self, name: &str) -> Option<f64> {
        self.entries.get(name).copied()
    }

    /// Pixel value for a key that spells the same number as an entry name
    /// (e.g. key `4` finding an entry named `4.0`).
    pub fn get_numeric(&self, key: &str) -> Option<f64> {
        let wanted: f64 = key.parse().ok()?;
        self.entries
            .iter()
            .find(|(name, _)| name.parse::<f64>().map_or(false, |n| n == wanted))
            .map(|(_, &value)| value)
    }

    /// Name whose entry matches the pixel value: exact rounded-index hit
    /// first, else a tolerance scan over all entries.
    pub fn name_for(&self, px: f64) -> Option<&str> {
        let rounded = px.round();
        if (px - rounded).abs() <= SPACING_EPSILON {
            if let Some(name) = self.reverse.get(&(rounded as i64)) {
                return Some(name);
            }
        }
        self.entries
            .iter()
            .find(|(_, &value)| (value - px).abs() <= SPACING_EPSILON)
            .map(|(name, _)| name.as_str())
    }
}

/// Whether a custom name may override a built-in scale key.
///
/// Purely numeric names and bulk-generated `scale-N` names never do.
fn is_semantic_name(name: &str) -> bool {
    static NUMERIC_REGEX: OnceLock<Regex> = OnceLock::new();
    static GENERATED_REGEX: OnceLock<Regex> = OnceLock::new();
    let numeric = NUMERIC_REGEX.get_or_init(|| Regex::new(r"^\d+$").unwrap());
    let generated = GENERATED_REGEX.get_or_init(|| Regex::new(r"^scale-\d+$").unwrap());
    !numeric.is_match(name) && !generated.is_match(name)
}

// ─── Resolver ────────────────────────────────────────────────────────────────

/// Resolves pixel values to scale tokens and scale tokens back to values.
///
/// Immutable with respect to the built-in tables; the custom scale is
/// replaced atomically by [`ScaleResolver::update_custom_scale`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScaleResolver {
    custom: CustomScale,
}

impl ScaleResolver {
    /// Resolver with an empty custom scale.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_custom_scale(entries: HashMap<String, f64>) -> PxwindResult<Self> {
        Ok(Self {
            custom: CustomScale::new(entries)?,
        })
    }

    pub fn custom_scale(&self) -> &CustomScale {
        &self.custom
    }

    /// Replace the custom scale. The new table is validated in full before
    /// the swap; on error the previous scale is retained unchanged.
    pub fn update_custom_scale(&mut self, entries: HashMap<String, f64>) -> PxwindResult<()> {
        self.custom = CustomScale::new(entries)?;
        Ok(())
    }

    /// Spacing token for a pixel value, e.g. `(16, "p", "16")` → `p-4`.
    ///
    /// A built-in key wins over a custom name unless the custom name is
    /// semantic; with no match at all the output falls back to arbitrary
    /// bracket syntax preserving `literal` exactly as typed.
    pub fn spacing_token(&self, px: f64, property: &str, literal: &str) -> String {
        let rounded = px.round();
        let default_key = if (px - rounded).abs() <= SPACING_EPSILON {
            spacing_reverse().get(&(rounded as i64)).copied()
        } else {
            None
        };
        let custom_name = self.custom.name_for(px);

        let key = match (default_key, custom_name) {
            (Some(_), Some(name)) if is_semantic_name(name) => Some(name),
            (Some(key), _) => Some(key),
            (None, Some(name)) => Some(name),
            (None, None) => None,
        };

        match key {
            Some(key) => format!("{}-{}", property, key),
            None => format!("{}-[{}px]", property, literal),
        }
    }

    /// Font-size token for a pixel value, e.g. `16` → `text-base`.
    pub fn font_size_token(&self, px: f64, literal: &str) -> String {
        let rounded = px.round();
        if (px - rounded).abs() <= FONT_SIZE_EPSILON {
            if let Some(token) = font_size_for(rounded as i64) {
                return token.to_string();
            }
        }
        format!("text-[{}px]", literal)
    }

    /// Font-weight token for a numeric weight, e.g. `700` → `font-bold`.
    pub fn font_weight_token(&self, weight: i64) -> String {
        FONT_WEIGHTS
            .iter()
            .find(|&&(w, _)| w == weight)
            .map(|&(_, token)| token.to_string())
            .unwrap_or_else(|| format!("font-[{}]", weight))
    }

    /// Pixel value behind a scale token (inverse lookup for inspection).
    ///
    /// Supports arbitrary bracket syntax (`prop-[Npx]`), known font-size
    /// class names, and `prop-{key}` where the key is tried against the
    /// custom scale (string key, then numeric-string key) before the
    /// built-in spacing scale.
    pub fn value_of(&self, token: &str, property: &str) -> Option<f64> {
        if let Some(rest) = token.strip_prefix(&format!("{}-[", property)) {
            let pixels = rest.strip_suffix("px]")?;
            return pixels.parse::<f64>().ok().filter(|v| v.is_finite());
        }

        if let Some(px) = font_size_value(token) {
            return Some(px);
        }

        let key = token.strip_prefix(&format!("{}-", property))?;
        if let Some(value) = self.custom.get(key) {
            return Some(value);
        }
        if let Some(value) = self.custom.get_numeric(key) {
            return Some(value);
        }
        SPACING_SCALE
            .iter()
            .find(|&&(k, _)| k == key)
            .map(|&(_, value)| value)
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
