//! Collaborator traits consumed by the masking pipeline
//!
//! Both collaborators are constructed by the caller and handed to the
//! engine explicitly; nothing in Mailmask holds a process-wide model.

use crate::{Category, Result};
use serde::{Deserialize, Serialize};

/// Label a recognizer attaches to calendar dates
pub const DATE_LABEL: &str = "DATE";

/// A labelled span reported by a named-entity recognizer
///
/// `start`/`end` are byte offsets into the text passed to the recognizer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecognizedEntity {
    pub label: String,
    pub start: usize,
    pub end: usize,
    pub text: String,
}

impl RecognizedEntity {
    pub fn is_date(&self) -> bool {
        self.label == DATE_LABEL
    }
}

/// Named-entity recognizer used for date detection
pub trait DateRecognizer: Send + Sync {
    /// Human-readable backend identifier (e.g. "rules", "spacy")
    fn backend_id(&self) -> &str;

    /// Recognize entities in the given text
    fn recognize(&self, text: &str) -> Result<Vec<RecognizedEntity>>;
}

/// Email category classifier
pub trait Classifier: Send + Sync {
    /// Classify already-masked, normalized text
    fn classify(&self, text: &str) -> Result<Category>;
}
