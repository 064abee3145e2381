//! # pxwind — pixel classes to spacing-scale tokens
//!
//! Converts pixel-valued utility classes found in markup (`p-16px`,
//! `text-17px`, `font-600`) into canonical scale tokens (`p-4`,
//! `text-[17px]`, `font-semibold`), with an arbitrary-value fallback and
//! support for user- or project-supplied custom spacing scales.
//!
//! ## Pipeline
//! 1. [`scan`] locates convertible tokens inside `class="…"` /
//!    `className='…'` attributes and records each one with its absolute
//!    text range and converted form.
//! 2. [`plan`] re-validates the matches against the live buffer, drops
//!    stale ones, and orders the rest bottom-up for atomic application.
//! 3. [`apply_with_retry`] pushes the batch through an [`EditSink`]
//!    (the host editor, or the bundled [`TextBuffer`]).
//!
//! ## Example
//! ```
//! use pxwind::{scan, Converter, Position};
//!
//! let converter = Converter::new();
//! let html = r#"<div class="p-16px m-8px w-100px">"#;
//! let matches = scan(html, Position::default(), &converter);
//!
//! assert_eq!(matches[0].converted, "p-4");
//! assert_eq!(matches[2].converted, "w-[100px]");
//! ```

pub mod buffer;
pub mod config;
pub mod convert;
pub mod error;
pub mod hover;
pub mod location;
pub mod planner;
pub mod scale;
pub mod scanner;

// --- Core types ---
pub use buffer::TextBuffer;
pub use config::Config;
pub use convert::{parse_token, Converter, ParsedToken, PropertyKind};
pub use error::{PxwindError, PxwindResult};
pub use location::{Position, TextRange};
pub use planner::{apply_with_retry, plan, ConversionStats, EditSink, Replacement};
pub use scale::{CustomScale, ScaleResolver, SPACING_SCALE};
pub use scanner::{scan, PixelClassMatch};

/// Convert a single class token against the built-in scales only.
pub fn convert_class(token: &str) -> Option<String> {
    Converter::new().convert(token)
}
