//! Recognition and conversion of pixel-valued class tokens.
//!
//! Two token shapes are convertible: `{property}-{number}px` for the spacing
//! and font-size families, and `{font|font-weight}-{3-digit weight}` for font
//! weights. Everything else is left untouched.

use std::collections::HashMap;
use std::sync::OnceLock;

use regex::Regex;

use crate::error::PxwindResult;
use crate::scale::ScaleResolver;

/// Spacing/positional property prefixes that participate in conversion.
pub static SPACING_PROPERTIES: &[&str] = &[
    "p", "px", "py", "pt", "pr", "pb", "pl", "m", "mx", "my", "mt", "mr", "mb", "ml", "w", "h",
    "gap", "gap-x", "gap-y", "top", "right", "bottom", "left", "inset",
];

/// The three disjoint families of supported properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyKind {
    Spacing,
    FontSize,
    FontWeight,
}

/// Family of a normalized property prefix, or `None` when unsupported.
pub fn property_kind(property: &str) -> Option<PropertyKind> {
    match property {
        "text" => Some(PropertyKind::FontSize),
        "font" | "font-weight" => Some(PropertyKind::FontWeight),
        _ if SPACING_PROPERTIES.contains(&property) => Some(PropertyKind::Spacing),
        _ => None,
    }
}

/// Collapses the `font-weight` alias onto its `font` family.
pub fn normalize_property(property: &str) -> &str {
    if property == "font-weight" {
        "font"
    } else {
        property
    }
}

/// A token recognised as one of the two convertible shapes.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedToken {
    /// Normalized property prefix (`font-weight` becomes `font`).
    pub property: String,
    /// Parsed numeric value (pixels, or the weight for the font family).
    pub value: f64,
    /// Numeric string exactly as typed, for arbitrary-value output.
    pub literal: String,
    pub kind: PropertyKind,
}

fn pixel_token_regex() -> &'static Regex {
    static PIXEL_REGEX: OnceLock<Regex> = OnceLock::new();
    PIXEL_REGEX.get_or_init(|| Regex::new(r"^([a-zA-Z][a-zA-Z-]*)-(\d+(?:\.\d+)?)px$").unwrap())
}

fn font_weight_token_regex() -> &'static Regex {
    static WEIGHT_REGEX: OnceLock<Regex> = OnceLock::new();
    WEIGHT_REGEX.get_or_init(|| Regex::new(r"^(font|font-weight)-(\d{3})$").unwrap())
}

/// Parse a candidate token into one of the convertible shapes.
///
/// Returns `None` for empty input, malformed shapes, unsupported properties,
/// and non-finite values; callers treat all of those as "not convertible".
pub fn parse_token(token: &str) -> Option<ParsedToken> {
    if token.is_empty() {
        return None;
    }

    if let Some(caps) = font_weight_token_regex().captures(token) {
        let literal = caps[2].to_string();
        let value: f64 = literal.parse().ok()?;
        return Some(ParsedToken {
            property: "font".to_string(),
            value,
            literal,
            kind: PropertyKind::FontWeight,
        });
    }

    let caps = pixel_token_regex().captures(token)?;
    let property = normalize_property(caps.get(1)?.as_str());
    let literal = caps[2].to_string();
    let value: f64 = literal.parse().ok()?;
    if !value.is_finite() || value < 0.0 {
        return None;
    }

    match property_kind(property)? {
        // pixel-suffixed weights are not a recognised shape
        PropertyKind::FontWeight => None,
        kind => Some(ParsedToken {
            property: property.to_string(),
            value,
            literal,
            kind,
        }),
    }
}

/// Converts candidate class tokens through a [`ScaleResolver`].
///
/// Deterministic for fixed input and fixed custom scale content; no I/O.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Converter {
    resolver: ScaleResolver,
}

impl Converter {
    /// Converter over the built-in scales only.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_custom_scale(entries: HashMap<String, f64>) -> PxwindResult<Self> {
        Ok(Self {
            resolver: ScaleResolver::with_custom_scale(entries)?,
        })
    }

    pub fn resolver(&self) -> &ScaleResolver {
        &self.resolver
    }

    /// Atomically replace the custom scale (see [`ScaleResolver::update_custom_scale`]).
    pub fn update_custom_scale(&mut self, entries: HashMap<String, f64>) -> PxwindResult<()> {
        self.resolver.update_custom_scale(entries)
    }

    /// Whether the token matches a convertible shape with a supported property.
    pub fn is_convertible(&self, token: &str) -> bool {
        parse_token(token).is_some()
    }

    /// Converted form of the token, or `None` when it is not convertible.
    pub fn convert(&self, token: &str) -> Option<String> {
        parse_token(token).map(|parsed| self.convert_parsed(&parsed))
    }

    /// Converted form of an already-parsed token.
    pub fn convert_parsed(&self, parsed: &ParsedToken) -> String {
        match parsed.kind {
            PropertyKind::Spacing => {
                self.resolver
                    .spacing_token(parsed.value, &parsed.property, &parsed.literal)
            }
            PropertyKind::FontSize => self.resolver.font_size_token(parsed.value, &parsed.literal),
            PropertyKind::FontWeight => self.resolver.font_weight_token(parsed.value as i64),
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_builtin_entry_round_trips() {
        let converter = Converter::new();
        for &(key, px) in crate::scale::SPACING_SCALE {
            let token = format!("p-{}px", px);
            assert_eq!(converter.convert(&token), Some(format!("p-{}", key)));
            assert_eq!(
                converter.resolver().value_of(&format!("p-{}", key), "p"),
                Some(px)
            );
        }
    }

    #[test]
    fn spacing_conversions() {
        let converter = Converter::new();
        assert_eq!(converter.convert("p-16px"), Some("p-4".to_string()));
        assert_eq!(converter.convert("m-8px"), Some("m-2".to_string()));
        assert_eq!(converter.convert("gap-x-16px"), Some("gap-x-4".to_string()));
        assert_eq!(converter.convert("inset-0px"), Some("inset-0".to_string()));
        assert_eq!(converter.convert("w-100px"), Some("w-[100px]".to_string()));
    }

    #[test]
    fn decimal_literal_preserved_in_fallback() {
        let converter = Converter::new();
        assert_eq!(converter.convert("m-2.5px"), Some("m-[2.5px]".to_string()));
        assert_eq!(converter.convert("m-2px"), Some("m-0.5".to_string()));
    }

    #[test]
    fn font_size_conversions() {
        let converter = Converter::new();
        assert_eq!(converter.convert("text-16px"), Some("text-base".to_string()));
        assert_eq!(
            converter.convert("text-17px"),
            Some("text-[17px]".to_string())
        );
    }

    #[test]
    fn font_weight_conversions() {
        let converter = Converter::new();
        assert_eq!(converter.convert("font-700"), Some("font-bold".to_string()));
        assert_eq!(
            converter.convert("font-weight-600"),
            Some("font-semibold".to_string())
        );
        assert_eq!(converter.convert("font-350"), Some("font-[350]".to_string()));
    }

    #[test]
    fn unsupported_properties_rejected() {
        let converter = Converter::new();
        assert_eq!(converter.convert("color-16px"), None);
        assert_eq!(converter.convert("bg-8px"), None);
        assert!(!converter.is_convertible("color-16px"));
        assert!(!converter.is_convertible("bg-8px"));
    }

    #[test]
    fn malformed_tokens_rejected() {
        let converter = Converter::new();
        assert_eq!(converter.convert("p-16"), None);
        assert_eq!(converter.convert("p-px"), None);
        assert_eq!(converter.convert("16px"), None);
        assert_eq!(converter.convert("p-16em"), None);
        assert_eq!(converter.convert(""), None);
        assert_eq!(converter.convert("p-"), None);
        assert_eq!(converter.convert("font-70"), None);
        assert_eq!(converter.convert("font-7000"), None);
        assert_eq!(converter.convert("font-100px"), None);
    }

    #[test]
    fn custom_scale_changes_output() {
        let entries: HashMap<String, f64> = [("huge".to_string(), 100.0)].into_iter().collect();
        let converter = Converter::with_custom_scale(entries).unwrap();
        assert_eq!(converter.convert("p-100px"), Some("p-huge".to_string()));
        // built-in entries untouched
        assert_eq!(converter.convert("p-16px"), Some("p-4".to_string()));
    }

    #[test]
    fn property_kind_families() {
        assert_eq!(property_kind("p"), Some(PropertyKind::Spacing));
        assert_eq!(property_kind("gap-y"), Some(PropertyKind::Spacing));
        assert_eq!(property_kind("text"), Some(PropertyKind::FontSize));
        assert_eq!(property_kind("font"), Some(PropertyKind::FontWeight));
        assert_eq!(property_kind("font-weight"), Some(PropertyKind::FontWeight));
        assert_eq!(property_kind("color"), None);
    }

    #[test]
    fn parse_token_extracts_fields() {
        let parsed = parse_token("gap-x-2.5px").unwrap();
        assert_eq!(parsed.property, "gap-x");
        assert_eq!(parsed.value, 2.5);
        assert_eq!(parsed.literal, "2.5");
        assert_eq!(parsed.kind, PropertyKind::Spacing);

        let parsed = parse_token("font-weight-600").unwrap();
        assert_eq!(parsed.property, "font");
        assert_eq!(parsed.value, 600.0);
    }
}
