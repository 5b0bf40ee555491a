//! Ordered, context-aware pattern rules
//!
//! Each rule pattern defines a named `entity` group holding the PII value.
//! Context rules also define a `context` group: lead-in text such as
//! `"email is "` that stays in the masked text in front of the placeholder.
//! A rule may consume trailing text after `entity` to require a terminator;
//! that text is not part of the match and may start the next one. The
//! Aadhaar rule also consumes one leading character so a 12-digit run inside
//! a 4-4-4-4 card group is left for the card rule.

use crate::buffer::char_offset;
use crate::registry::CandidateSpan;
use mailmask_core::{Classification, Error, Result};
use regex::Regex;

/// The standard rule set, in priority order
const STANDARD_RULES: &[(Classification, bool, &str)] = &[
    (
        Classification::FullName,
        true,
        r"(?P<context>(?:My name is|name[:]+|My full name is) )(?P<entity>[A-Z][a-z]+(?: [A-Z][a-z]+){1,2})(?:\s|$|\.|,)",
    ),
    (
        Classification::FullName,
        false,
        r"(?:^|\. |, )(?P<entity>[A-Z][a-z]+ [A-Z][a-z]+)(?:$|\. |,)",
    ),
    (
        Classification::Email,
        true,
        r"(?P<context>(?:email(?:[ ]?(?:me|is|at))?:? |reach me at |contact(?:[ ]?(?:me|at))?:? ))(?P<entity>\S+@\S+\.\S+?)(?:[,. ]|$)",
    ),
    (
        Classification::Email,
        false,
        r"(?P<entity>\S+@\S+\.\S+?)(?:[,. ]|$)",
    ),
    (
        Classification::PhoneNumber,
        true,
        r"(?P<context>(?:phone(?:[ ]?(?:is|at|number))?|contact(?: number)?(?: is)?|call me at )[: ]*)?\b(?P<entity>(?:\+\d{1,3}[- ]?)?\(?\d{3}\)?[- ]?\d{3}[- ]?\d{4})\b",
    ),
    (
        Classification::AadharNum,
        true,
        r"(?:(?P<context>Aadhar(?:[ ]?(?:is|number))?:? )|^\s?|[^\d\s]|\D\s)(?P<entity>\d{4}\s\d{4}\s\d{4})\b(?:$|[^\d\s]|\s(?:$|\D))",
    ),
    (
        Classification::CreditDebitNo,
        true,
        r"(?P<context>(?:card(?:[ ]?(?:is|number))?:? ))?(?P<entity>\b\d{4}[- ]?\d{4}[- ]?\d{4}[- ]?\d{4}\b)",
    ),
    (
        Classification::CvvNo,
        true,
        r"(?P<context>(?:CVV:? ))(?P<entity>\d{3})\b",
    ),
    (
        Classification::ExpiryNo,
        true,
        r"(?P<context>(?:expiry:? ))(?P<entity>\d{2}/\d{2})\b",
    ),
    (
        Classification::ExpiryNo,
        false,
        r"\b(?P<entity>(?:0[1-9]|1[0-2])/[0-9]{2})\b",
    ),
];

/// A single case-insensitive detection rule
#[derive(Debug, Clone)]
pub struct PatternRule {
    classification: Classification,
    has_context: bool,
    pattern: String,
    regex: Regex,
}

impl PatternRule {
    /// Compile a rule; the pattern is matched case-insensitively
    pub fn new(classification: Classification, pattern: &str, has_context: bool) -> Result<Self> {
        let regex = Regex::new(&format!("(?i){}", pattern))?;

        let names: Vec<&str> = regex.capture_names().flatten().collect();
        if !names.contains(&"entity") {
            return Err(Error::Config(format!(
                "{} rule must define an `entity` group: {}",
                classification, pattern
            )));
        }
        if has_context != names.contains(&"context") {
            return Err(Error::Config(format!(
                "{} rule has_context={} does not match its `context` group: {}",
                classification, has_context, pattern
            )));
        }

        Ok(Self {
            classification,
            has_context,
            pattern: pattern.to_string(),
            regex,
        })
    }

    pub fn classification(&self) -> Classification {
        self.classification
    }

    pub fn has_context(&self) -> bool {
        self.has_context
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Find all non-overlapping candidates, in descending start order
    pub fn candidates(&self, text: &str) -> Vec<CandidateSpan> {
        let mut candidates = Vec::new();
        let mut at = 0;

        while at <= text.len() {
            let Some(caps) = self.regex.captures_at(text, at) else {
                break;
            };
            let Some(entity) = caps.name("entity") else {
                break;
            };

            let (context, context_start) = match caps.name("context") {
                Some(context) => (Some(context.as_str().to_string()), context.start()),
                None => (None, entity.start()),
            };

            let char_start = char_offset(text, entity.start());
            let context_char_start = char_start - text[context_start..entity.start()].chars().count();
            candidates.push(CandidateSpan {
                classification: self.classification,
                start: entity.start(),
                end: entity.end(),
                char_start,
                char_end: char_start + entity.as_str().chars().count(),
                entity: entity.as_str().to_string(),
                context,
                context_position: [context_char_start, char_start],
            });

            // Trailing terminator text is lookahead only
            at = if entity.end() > at {
                entity.end()
            } else {
                match text[at..].chars().next() {
                    Some(c) => at + c.len_utf8(),
                    None => break,
                }
            };
        }

        candidates.reverse();
        candidates
    }
}

/// Pattern rules applied in listed order; earlier rules claim spans first
#[derive(Debug, Clone)]
pub struct PatternCascade {
    rules: Vec<PatternRule>,
}

impl PatternCascade {
    pub fn new(rules: Vec<PatternRule>) -> Self {
        Self { rules }
    }

    /// The standard name, email, phone, Aadhaar, card, CVV and expiry rules
    pub fn standard() -> Result<Self> {
        let rules = STANDARD_RULES
            .iter()
            .map(|(classification, has_context, pattern)| {
                PatternRule::new(*classification, pattern, *has_context)
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(rules))
    }

    /// Append a lower-priority rule
    pub fn with_rule(mut self, rule: PatternRule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn rules(&self) -> &[PatternRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
