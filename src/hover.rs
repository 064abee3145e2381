//! Lookup helpers for hover/inspection surfaces.
//!
//! Presentation lives in the host; these helpers expose the data it needs:
//! what a property prefix means and which built-in entry sits closest to a
//! given pixel value.

use crate::scale::SPACING_SCALE;

/// Human-readable description of a supported property prefix.
pub fn property_description(property: &str) -> Option<&'static str> {
    let description = match property {
        "p" => "padding on all sides",
        "px" => "horizontal padding",
        "py" => "vertical padding",
        "pt" => "top padding",
        "pr" => "right padding",
        "pb" => "bottom padding",
        "pl" => "left padding",
        "m" => "margin on all sides",
        "mx" => "horizontal margin",
        "my" => "vertical margin",
        "mt" => "top margin",
        "mr" => "right margin",
        "mb" => "bottom margin",
        "ml" => "left margin",
        "w" => "width",
        "h" => "height",
        "gap" => "gap between children",
        "gap-x" => "column gap between children",
        "gap-y" => "row gap between children",
        "top" => "top offset",
        "right" => "right offset",
        "bottom" => "bottom offset",
        "left" => "left offset",
        "inset" => "offset on all sides",
        "text" => "font size",
        "font" => "font weight",
        _ => return None,
    };
    Some(description)
}

/// Built-in spacing entry closest to the given pixel value.
pub fn nearest_spacing_entry(px: f64) -> (&'static str, f64) {
    SPACING_SCALE
        .iter()
        .copied()
        .min_by(|a, b| (a.1 - px).abs().total_cmp(&(b.1 - px).abs()))
        .unwrap()
}
