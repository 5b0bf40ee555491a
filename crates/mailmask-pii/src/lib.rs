//! Mailmask PII Masking and Demasking
//!
//! This crate provides the reversible PII rewriting pipeline:
//! - Email cleaning and classifier-input normalization
//! - Date detection on top of an injected named-entity recognizer
//! - An ordered cascade of context-aware pattern rules
//! - Masking with typed placeholders and lossless demasking

pub mod buffer;
pub mod clean;
pub mod demasker;
pub mod detector;
pub mod masker;
pub mod pipeline;
pub mod registry;

pub use buffer::{Edit, TextBuffer};
pub use clean::{clean, clean_bytes, normalize_for_classification};
pub use demasker::{demask, demask_with_report, DemaskOutcome};
pub use detector::{DateEntityDetector, PatternCascade, PatternRule, RuleDateRecognizer};
pub use masker::{MaskOutput, MaskingEngine};
pub use pipeline::{ArgmaxClassifier, CategoryScorer, ClassificationReport, EmailPipeline};
pub use registry::{CandidateSpan, SpanRegistry};

pub use mailmask_core::{
    Category, Classification, Classifier, DateRecognizer, EntitySpan, Error, MaskObserver,
    RecognizedEntity, RejectReason, Result,
};
