//! PII detectors
//!
//! Two kinds of detector feed the masking engine, in this order:
//! - [`DateEntityDetector`] filters a named-entity recognizer's dates
//! - [`PatternCascade`] runs context-aware pattern rules in priority order

mod cascade;
mod date;

pub use cascade::{PatternCascade, PatternRule};
pub use date::{DateEntityDetector, RuleDateRecognizer};
