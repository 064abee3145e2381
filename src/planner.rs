//! Turns located matches into a validated, reverse-ordered replacement batch.
//!
//! Matches are computed asynchronously from the buffer they describe, so the
//! planner re-validates every match against the live text and silently drops
//! anything stale before ordering the survivors for atomic application.

use std::collections::BTreeSet;
use std::thread;
use std::time::Duration;

use crate::error::{PxwindError, PxwindResult};
use crate::location::TextRange;
use crate::scanner::PixelClassMatch;

const MAX_APPLY_ATTEMPTS: usize = 3;
const APPLY_RETRY_DELAY: Duration = Duration::from_millis(100);

/// A single range replacement, ready for the host editing API.
#[derive(Debug, Clone, PartialEq)]
pub struct Replacement {
    pub range: TextRange,
    pub text: String,
}

/// Host text-edit contract.
///
/// An implementation must apply the whole batch as one transaction or none
/// of it, and report the outcome. Batches produced by [`plan`] arrive in
/// descending document order with non-overlapping ranges.
pub trait EditSink {
    fn apply_edit(&mut self, batch: &[Replacement]) -> bool;
}

/// Validate `matches` against the live text and produce a replacement batch.
///
/// A match survives only if its range lies within the buffer and the text at
/// that range still equals the recorded original; stale matches are dropped
/// silently. Survivors are sorted in descending document order (start line,
/// then start column) so that applying from the bottom up never shifts a
/// still-pending range.
pub fn plan(live_text: &str, matches: &[PixelClassMatch]) -> Vec<Replacement> {
    let lines: Vec<&str> = live_text.lines().collect();

    let mut survivors: Vec<&PixelClassMatch> = matches
        .iter()
        .filter(|m| text_at(&lines, m.range).is_some_and(|text| text == m.original))
        .collect();

    survivors.sort_by(|a, b| {
        (b.range.start.line, b.range.start.column).cmp(&(a.range.start.line, a.range.start.column))
    });

    survivors
        .into_iter()
        .map(|m| Replacement {
            range: m.range,
            text: m.converted.clone(),
        })
        .collect()
}

/// Text currently at `range`, or `None` when the range falls outside the
/// buffer or off a character boundary.
fn text_at(lines: &[&str], range: TextRange) -> Option<String> {
    let TextRange { start, end } = range;
    if start.line >= lines.len() || end.line >= lines.len() || end.line < start.line {
        return None;
    }

    if start.line == end.line {
        let line = lines[start.line];
        if start.column > end.column
            || end.column > line.len()
            || !line.is_char_boundary(start.column)
            || !line.is_char_boundary(end.column)
        {
            return None;
        }
        return Some(line[start.column..end.column].to_string());
    }

    let first = lines[start.line];
    let last = lines[end.line];
    if start.column > first.len()
        || end.column > last.len()
        || !first.is_char_boundary(start.column)
        || !last.is_char_boundary(end.column)
    {
        return None;
    }

    let mut text = String::from(&first[start.column..]);
    for line in &lines[start.line + 1..end.line] {
        text.push('\n');
        text.push_str(line);
    }
    text.push('\n');
    text.push_str(&last[..end.column]);
    Some(text)
}

/// Apply a batch through the sink, retrying on failure.
///
/// The batch is reused verbatim across attempts; stale entries are dropped
/// at plan time, not here. After [`MAX_APPLY_ATTEMPTS`] failed attempts the
/// error is surfaced to the caller and no further retry happens.
pub fn apply_with_retry(sink: &mut dyn EditSink, batch: &[Replacement]) -> PxwindResult<()> {
    for attempt in 1..=MAX_APPLY_ATTEMPTS {
        if sink.apply_edit(batch) {
            return Ok(());
        }
        if attempt < MAX_APPLY_ATTEMPTS {
            thread::sleep(APPLY_RETRY_DELAY);
        }
    }
    Err(PxwindError::ApplyFailed {
        attempts: MAX_APPLY_ATTEMPTS,
    })
}

/// Aggregate counts over a match set. Reporting only, never control flow.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConversionStats {
    pub total: usize,
    /// Matches converted to a scale token.
    pub standard: usize,
    /// Matches converted to arbitrary bracket syntax.
    pub custom: usize,
    /// Distinct property prefixes touched.
    pub properties: BTreeSet<String>,
}

impl ConversionStats {
    pub fn from_matches(matches: &[PixelClassMatch]) -> Self {
        let mut stats = Self::default();
        for m in matches {
            stats.total += 1;
            if m.is_custom_value {
                stats.custom += 1;
            } else {
                stats.standard += 1;
            }
            stats.properties.insert(m.property.clone());
        }
        stats
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
