//! Span registry enforcing first-claimed-wins over detected entities

use crate::buffer::Edit;
use mailmask_core::{Classification, EntitySpan, RejectReason};
use once_cell::sync::Lazy;
use regex::Regex;

/// Any bracketed word token, e.g. `[email]`
static PLACEHOLDER_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[\w+\]").unwrap());

/// A detected span before it is finalized
///
/// Byte offsets address the buffer snapshot the candidate was found in;
/// character offsets are what gets exposed once the span is registered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateSpan {
    pub classification: Classification,

    /// Byte range of the entity value
    pub start: usize,
    pub end: usize,

    /// Character range of the entity value
    pub char_start: usize,
    pub char_end: usize,

    /// The entity value
    pub entity: String,

    /// Lead-in text left in place before the placeholder
    pub context: Option<String>,

    /// Character range of the lead-in text (empty when there is none)
    pub context_position: [usize; 2],
}

impl CandidateSpan {
    /// Drop the transient context fields
    pub fn into_entity(self) -> EntitySpan {
        EntitySpan::new(self.char_start, self.char_end, self.classification, self.entity)
    }
}

/// Ordered collection of accepted spans for one masking call
///
/// Besides the spans themselves, the registry tracks where each claimed
/// region sits in the buffer as it stands now: the value's byte range until
/// its pass is applied, then its placeholder's range, shifted by every later
/// edit. Candidates are checked against these live ranges, never against the
/// detection-time positions that end up in [`EntitySpan`].
#[derive(Debug, Default)]
pub struct SpanRegistry {
    spans: Vec<CandidateSpan>,
    claimed: Vec<(usize, usize)>,
}

impl SpanRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.spans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    pub fn spans(&self) -> &[CandidateSpan] {
        &self.spans
    }

    /// Decide whether a candidate may be registered
    pub fn check(&self, candidate: &CandidateSpan) -> Result<(), RejectReason> {
        let overlaps = self
            .claimed
            .iter()
            .any(|&(start, end)| candidate.start < end && start < candidate.end);
        if overlaps {
            return Err(RejectReason::Overlap);
        }

        if PLACEHOLDER_REGEX.is_match(&candidate.entity) {
            return Err(RejectReason::PlaceholderCollision);
        }

        Ok(())
    }

    /// Register a candidate if it passes [`SpanRegistry::check`]
    pub fn register(&mut self, candidate: CandidateSpan) -> Result<(), RejectReason> {
        self.check(&candidate)?;
        self.claimed.push((candidate.start, candidate.end));
        self.spans.push(candidate);
        Ok(())
    }

    /// Byte ranges the registered spans occupy in the current buffer
    pub fn claimed(&self) -> &[(usize, usize)] {
        &self.claimed
    }

    /// Move the claimed ranges past one pass worth of edits
    ///
    /// Must be called with the same edits, in the same buffer coordinates,
    /// that are about to be applied to the buffer.
    pub fn rebase(&mut self, edits: &[Edit]) {
        let mut edits: Vec<&Edit> = edits.iter().collect();
        edits.sort_by(|a, b| b.start.cmp(&a.start));

        for edit in edits {
            let replaced = edit.replacement.len();
            for range in &mut self.claimed {
                if *range == (edit.start, edit.end) {
                    *range = (edit.start, edit.start + replaced);
                } else if range.0 >= edit.end {
                    range.0 = range.0 - (edit.end - edit.start) + replaced;
                    range.1 = range.1 - (edit.end - edit.start) + replaced;
                }
            }
        }
    }

    /// Finalize the registered spans in detection order
    pub fn into_entities(self) -> Vec<EntitySpan> {
        self.spans.into_iter().map(CandidateSpan::into_entity).collect()
    }
}
