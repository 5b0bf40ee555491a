//! Masking engine
//!
//! One call runs `clean -> dates -> rule[0] -> ... -> rule[n-1]` over a
//! freshly allocated buffer and registry. Every stage runs regardless of how
//! many spans the previous one claimed.

use crate::buffer::{Edit, TextBuffer};
use crate::clean::clean;
use crate::detector::{DateEntityDetector, PatternCascade};
use crate::registry::{CandidateSpan, SpanRegistry};
use mailmask_core::{DateRecognizer, EntitySpan, Error, MaskObserver, Result};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

/// Result of masking one text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaskOutput {
    pub masked_text: String,

    /// Entities in detection order
    pub entities: Vec<EntitySpan>,
}

impl MaskOutput {
    /// Decode output previously written as JSON
    pub fn from_json(bytes: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Replaces PII with typed placeholders
pub struct MaskingEngine {
    dates: Option<DateEntityDetector>,
    cascade: PatternCascade,
    observer: Option<Arc<dyn MaskObserver>>,
}

impl MaskingEngine {
    /// Engine with the standard cascade and the given date recognizer
    pub fn new(recognizer: Arc<dyn DateRecognizer>) -> Result<Self> {
        Ok(Self {
            dates: Some(DateEntityDetector::new(recognizer)),
            cascade: PatternCascade::standard()?,
            observer: None,
        })
    }

    /// Engine with the standard cascade and no date detection
    pub fn without_recognizer() -> Result<Self> {
        Ok(Self {
            dates: None,
            cascade: PatternCascade::standard()?,
            observer: None,
        })
    }

    pub fn with_cascade(mut self, cascade: PatternCascade) -> Self {
        self.cascade = cascade;
        self
    }

    pub fn with_observer(mut self, observer: Arc<dyn MaskObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    pub fn cascade(&self) -> &PatternCascade {
        &self.cascade
    }

    /// Clean and mask raw email text
    pub fn mask(&self, raw: &str) -> Result<MaskOutput> {
        if raw.is_empty() {
            return Err(Error::EmptyInput);
        }
        self.mask_cleaned(&clean(raw))
    }

    /// Mask text that has already been cleaned
    pub fn mask_cleaned(&self, cleaned: &str) -> Result<MaskOutput> {
        let started = Instant::now();
        let mut buffer = TextBuffer::new(cleaned);
        let mut registry = SpanRegistry::new();

        if let Some(dates) = &self.dates {
            let candidates = dates.detect(buffer.as_str())?;
            let applied = self.run_pass(&mut buffer, &mut registry, candidates);
            debug!(backend = dates.backend_id(), applied, "Date pass complete");
        }

        for (index, rule) in self.cascade.rules().iter().enumerate() {
            let candidates = rule.candidates(buffer.as_str());
            let applied = self.run_pass(&mut buffer, &mut registry, candidates);
            debug!(
                rule = index,
                classification = %rule.classification(),
                applied,
                "Rule pass complete"
            );
        }

        let entities = registry.into_entities();
        let elapsed = started.elapsed();
        info!(entities = entities.len(), elapsed_us = elapsed.as_micros() as u64, "Masked text");
        if let Some(observer) = &self.observer {
            observer.on_mask_completed(entities.len(), elapsed);
        }

        Ok(MaskOutput {
            masked_text: buffer.into_string(),
            entities,
        })
    }

    /// Register one pass worth of candidates right to left, then rewrite the buffer
    fn run_pass(
        &self,
        buffer: &mut TextBuffer,
        registry: &mut SpanRegistry,
        mut candidates: Vec<CandidateSpan>,
    ) -> usize {
        candidates.sort_by(|a, b| b.start.cmp(&a.start));

        let mut edits = Vec::new();
        for candidate in candidates {
            let classification = candidate.classification;
            let edit = Edit::new(candidate.start, candidate.end, classification.placeholder());

            match registry.register(candidate) {
                Ok(()) => {
                    edits.push(edit);
                    if let Some(observer) = &self.observer {
                        observer.on_masked(classification);
                    }
                }
                Err(reason) => {
                    debug!(
                        classification = %classification,
                        reason = reason.as_str(),
                        "Skipping candidate"
                    );
                    if let Some(observer) = &self.observer {
                        observer.on_rejected(classification, reason);
                    }
                }
            }
        }

        registry.rebase(&edits);
        buffer.apply_edits(edits)
    }
}
