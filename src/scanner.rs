//! Scans source text for convertible pixel classes inside class attributes.
//!
//! Scanning is best-effort and lexical: attribute-value regions are located
//! with a bounded pattern (`class="…"` / `className='…'`), tokens are
//! extracted within each region, and anything malformed is skipped without
//! error. Ranges are absolute, computed by newline-walking from the supplied
//! base position.

use std::sync::OnceLock;

use regex::Regex;

use crate::convert::{parse_token, Converter};
use crate::location::{advance_position, Position, TextRange};

/// A convertible class token located in source text.
///
/// Produced by [`scan`], consumed by the replacement planner, and discarded
/// once the edit is applied or abandoned.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelClassMatch {
    /// Token text exactly as found in the source.
    pub original: String,
    /// Replacement token.
    pub converted: String,
    /// Absolute half-open range of the original token.
    pub range: TextRange,
    /// Normalized property prefix (`p`, `text`, `font`, …).
    pub property: String,
    /// Parsed numeric value (pixels, or weight for the font family).
    pub value: f64,
    /// Whether the replacement uses arbitrary-value bracket syntax.
    pub is_custom_value: bool,
}

fn class_attribute_regex() -> &'static Regex {
    static ATTR_REGEX: OnceLock<Regex> = OnceLock::new();
    ATTR_REGEX.get_or_init(|| {
        Regex::new(r#"(?:className|class)\s*=\s*("[^"]*"|'[^']*')"#).unwrap()
    })
}

fn spacing_token_regex() -> &'static Regex {
    static SPACING_REGEX: OnceLock<Regex> = OnceLock::new();
    SPACING_REGEX.get_or_init(|| Regex::new(r"[a-zA-Z][a-zA-Z-]*-\d+(?:\.\d+)?px").unwrap())
}

fn font_weight_token_regex() -> &'static Regex {
    static WEIGHT_REGEX: OnceLock<Regex> = OnceLock::new();
    WEIGHT_REGEX.get_or_init(|| Regex::new(r"\b(?:font-weight|font)-\d{3}\b").unwrap())
}

/// Scan `text` for convertible class tokens.
///
/// `base` is the absolute position of the first byte of `text`. Matches are
/// returned in document order: attribute regions in order of appearance, then
/// tokens by start offset within each region. Ranges never overlap.
///
/// Unterminated attributes simply fail to form a region; scanning continues
/// on the rest of the text. An empty attribute value yields no matches.
pub fn scan(text: &str, base: Position, converter: &Converter) -> Vec<PixelClassMatch> {
    let mut matches = Vec::new();

    for attr in class_attribute_regex().captures_iter(text) {
        let quoted = match attr.get(1) {
            Some(group) => group,
            None => continue,
        };
        // strip the surrounding quotes
        let value_start = quoted.start() + 1;
        let value_end = quoted.end() - 1;
        let value = &text[value_start..value_end];
        if value.is_empty() {
            continue;
        }

        let region_start = advance_position(base, &text[..value_start]);

        let mut region: Vec<(usize, PixelClassMatch)> = Vec::new();
        collect_tokens(value, region_start, converter, spacing_token_regex(), &mut region);
        collect_tokens(
            value,
            region_start,
            converter,
            font_weight_token_regex(),
            &mut region,
        );
        region.sort_by_key(|&(offset, _)| offset);
        matches.extend(region.into_iter().map(|(_, m)| m));
    }

    matches
}

fn collect_tokens(
    value: &str,
    region_start: Position,
    converter: &Converter,
    pattern: &Regex,
    out: &mut Vec<(usize, PixelClassMatch)>,
) {
    for found in pattern.find_iter(value) {
        let parsed = match parse_token(found.as_str()) {
            Some(parsed) => parsed,
            None => continue,
        };
        let converted = converter.convert_parsed(&parsed);
        let start = advance_position(region_start, &value[..found.start()]);
        let end = advance_position(region_start, &value[..found.end()]);
        let is_custom_value = converted.contains('[') && converted.contains(']');

        out.push((
            found.start(),
            PixelClassMatch {
                original: found.as_str().to_string(),
                converted,
                range: TextRange::new(start, end),
                property: parsed.property,
                value: parsed.value,
                is_custom_value,
            },
        ));
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn scan_default(text: &str) -> Vec<PixelClassMatch> {
        scan(text, Position::default(), &Converter::new())
    }

    #[test]
    fn extracts_three_matches_in_order() {
        let matches = scan_default(r#"<div class="p-16px m-8px w-100px">"#);

        assert_eq!(matches.len(), 3);
        assert_eq!(matches[0].original, "p-16px");
        assert_eq!(matches[0].converted, "p-4");
        assert_eq!(matches[1].original, "m-8px");
        assert_eq!(matches[1].converted, "m-2");
        assert_eq!(matches[2].original, "w-100px");
        assert_eq!(matches[2].converted, "w-[100px]");

        assert_eq!(matches[0].is_custom_value, false);
        assert_eq!(matches[1].is_custom_value, false);
        assert_eq!(matches[2].is_custom_value, true);

        // non-overlapping, strictly increasing start columns
        for pair in matches.windows(2) {
            assert!(pair[0].range.end.column <= pair[1].range.start.column);
            assert!(pair[0].range.start.column < pair[1].range.start.column);
        }
    }

    #[test]
    fn range_points_at_token() {
        let text = r#"<div class="p-16px">"#;
        let matches = scan_default(text);
        let range = matches[0].range;
        assert_eq!(range.start, Position::new(0, 12));
        assert_eq!(range.end, Position::new(0, 18));
        assert_eq!(&text[range.start.column..range.end.column], "p-16px");
    }

    #[test]
    fn base_position_offsets_ranges() {
        let matches = scan(
            r#"<div class="p-16px">"#,
            Position::new(7, 4),
            &Converter::new(),
        );
        assert_eq!(matches[0].range.start, Position::new(7, 16));
        assert_eq!(matches[0].range.end, Position::new(7, 22));
    }

    #[test]
    fn multiline_attribute_value() {
        let text = "<div class=\"p-16px\n  m-8px\n  w-100px\">";
        let matches = scan(text, Position::new(5, 2), &Converter::new());

        assert_eq!(matches.len(), 3);
        assert_eq!(matches[0].range.start, Position::new(5, 14));
        assert_eq!(matches[1].range.start, Position::new(6, 2));
        assert_eq!(matches[1].range.end, Position::new(6, 7));
        assert_eq!(matches[2].range.start, Position::new(7, 2));
    }

    #[test]
    fn class_name_and_single_quotes() {
        let matches = scan_default("<Box className='pt-8px font-700' />");
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].converted, "pt-2");
        assert_eq!(matches[1].converted, "font-bold");
        // font-weight match sorts after the spacing match it follows
        assert!(matches[0].range.start < matches[1].range.start);
    }

    #[test]
    fn mixed_families_stay_in_document_order() {
        let matches = scan_default(r#"<p class="font-600 text-16px p-4px">"#);
        let converted: Vec<&str> = matches.iter().map(|m| m.converted.as_str()).collect();
        assert_eq!(converted, vec!["font-semibold", "text-base", "p-1"]);
    }

    #[test]
    fn unconvertible_tokens_skipped() {
        let matches = scan_default(r#"<div class="flex color-16px bg-8px p-16px">"#);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].converted, "p-4");
    }

    #[test]
    fn empty_value_and_missing_attribute() {
        assert!(scan_default(r#"<div class="">"#).is_empty());
        assert!(scan_default("<div id='foo'>p-16px</div>").is_empty());
    }

    #[test]
    fn unterminated_attribute_skipped() {
        let text = "<div class=\"p-16px\n<div class=\"m-8px\">";
        // the first quote pairs with the second region's opening quote, so a
        // single region spanning the gap is scanned; tokens still resolve
        let matches = scan_default(text);
        assert!(matches.iter().any(|m| m.converted == "p-4"));
    }

    #[test]
    fn multiple_regions_in_document_order() {
        let matches =
            scan_default(r#"<div class="p-16px"><span class="m-8px"></span></div>"#);
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].converted, "p-4");
        assert_eq!(matches[1].converted, "m-2");
        assert!(matches[0].range.start < matches[1].range.start);
    }

    #[test]
    fn already_converted_tokens_ignored() {
        let matches = scan_default(r#"<div class="p-4 w-[100px] m-8px">"#);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].converted, "m-2");
    }
}
