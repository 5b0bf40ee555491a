//! Date detection on top of a named-entity recognizer

use crate::buffer::char_offset;
use crate::registry::CandidateSpan;
use mailmask_core::{Classification, DATE_LABEL, DateRecognizer, Error, RecognizedEntity, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::Arc;

/// Grouped card numbers a recognizer may mislabel as dates
static CARD_SHAPE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:\d{4}[- ]\d{4}[- ]\d{4}[- ]\d{4}|\d{4}\s\d{4}\s\d{4})").unwrap()
});

/// What a calendar date has to look like to be masked
static DATE_SHAPE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\d{1,2}[./]\d{1,2}[./]\d{2,4}|\d{1,2}[- ]\w+[- ]\d{2,4}").unwrap()
});

/// Turns recognizer dates into `dob` candidates
pub struct DateEntityDetector {
    recognizer: Arc<dyn DateRecognizer>,
}

impl DateEntityDetector {
    pub fn new(recognizer: Arc<dyn DateRecognizer>) -> Self {
        Self { recognizer }
    }

    pub fn backend_id(&self) -> &str {
        self.recognizer.backend_id()
    }

    /// Whether a recognized date should be masked
    pub fn accepts(text: &str) -> bool {
        !CARD_SHAPE_REGEX.is_match(text) && DATE_SHAPE_REGEX.is_match(text)
    }

    /// Detect dates, returned in descending start order
    pub fn detect(&self, text: &str) -> Result<Vec<CandidateSpan>> {
        let recognized = self.recognizer.recognize(text)?;

        let mut candidates = Vec::new();
        for entity in recognized.into_iter().filter(RecognizedEntity::is_date) {
            let value = text.get(entity.start..entity.end).ok_or_else(|| {
                Error::Recognizer(format!(
                    "{} reported span {}..{} outside the text",
                    self.recognizer.backend_id(),
                    entity.start,
                    entity.end
                ))
            })?;

            if !Self::accepts(value) {
                tracing::debug!(start = entity.start, end = entity.end, "Recognized date filtered out");
                continue;
            }

            let char_start = char_offset(text, entity.start);
            candidates.push(CandidateSpan {
                classification: Classification::Dob,
                start: entity.start,
                end: entity.end,
                char_start,
                char_end: char_start + value.chars().count(),
                entity: value.to_string(),
                context: None,
                context_position: [char_start, char_start],
            });
        }

        candidates.sort_by(|a, b| b.start.cmp(&a.start));
        Ok(candidates)
    }
}

const MONTHS: &str = r"jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|june?|july?|aug(?:ust)?|sep(?:t(?:ember)?)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?";

/// Built-in recognizer labelling common date spellings as `DATE`
///
/// Stands in for a statistical model when none is wired up. It is
/// deliberately generous; [`DateEntityDetector`] decides what gets masked.
pub struct RuleDateRecognizer {
    date_regex: Regex,
}

impl RuleDateRecognizer {
    pub fn new() -> Result<Self> {
        let pattern = format!(
            r"(?i)\b(?:\d{{1,2}}[./-]\d{{1,2}}[./-]\d{{2,4}}|\d{{4}}-\d{{1,2}}-\d{{1,2}}|\d{{1,2}}(?:st|nd|rd|th)?[- ](?:{MONTHS})[- ,]+\d{{2,4}}|(?:{MONTHS}) \d{{1,2}}(?:st|nd|rd|th)?,? \d{{4}})\b"
        );
        Ok(Self {
            date_regex: Regex::new(&pattern)?,
        })
    }
}

impl DateRecognizer for RuleDateRecognizer {
    fn backend_id(&self) -> &str {
        "rules"
    }

    fn recognize(&self, text: &str) -> Result<Vec<RecognizedEntity>> {
        Ok(self
            .date_regex
            .find_iter(text)
            .map(|m| RecognizedEntity {
                label: DATE_LABEL.to_string(),
                start: m.start(),
                end: m.end(),
                text: m.as_str().to_string(),
            })
            .collect())
    }
}
