//! Mask-then-classify pipeline
//!
//! The classifier only ever sees masked, normalized text.

use crate::clean::normalize_for_classification;
use crate::masker::MaskingEngine;
use mailmask_core::{Category, Classifier, EntitySpan, Error, Result};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Everything a caller needs to answer a classification request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationReport {
    pub input_email_body: String,
    pub list_of_masked_entities: Vec<EntitySpan>,
    pub masked_email: String,
    pub category_of_the_email: Category,
}

/// A model producing one score per category, in [`Category::from_index`] order
pub trait CategoryScorer: Send + Sync {
    fn scores(&self, text: &str) -> Result<Vec<f32>>;
}

/// Classifier picking the highest-scoring category of a [`CategoryScorer`]
pub struct ArgmaxClassifier<S> {
    scorer: S,
}

impl<S: CategoryScorer> ArgmaxClassifier<S> {
    pub fn new(scorer: S) -> Self {
        Self { scorer }
    }
}

impl<S: CategoryScorer> Classifier for ArgmaxClassifier<S> {
    fn classify(&self, text: &str) -> Result<Category> {
        let scores = self.scorer.scores(text)?;
        let (index, _) = scores
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.total_cmp(b))
            .ok_or_else(|| Error::Classifier("scorer returned no scores".to_string()))?;

        Category::from_index(index)
            .ok_or_else(|| Error::Classifier(format!("score index {} has no category", index)))
    }
}

pub struct EmailPipeline {
    engine: MaskingEngine,
    classifier: Arc<dyn Classifier>,
}

impl EmailPipeline {
    pub fn new(engine: MaskingEngine, classifier: Arc<dyn Classifier>) -> Self {
        Self { engine, classifier }
    }

    pub fn engine(&self) -> &MaskingEngine {
        &self.engine
    }

    pub fn process(&self, raw: &str) -> Result<ClassificationReport> {
        let output = self.engine.mask(raw)?;
        let category = self
            .classifier
            .classify(&normalize_for_classification(&output.masked_text))?;

        tracing::info!(category = %category, entities = output.entities.len(), "Classified email");

        Ok(ClassificationReport {
            input_email_body: raw.to_string(),
            list_of_masked_entities: output.entities,
            masked_email: output.masked_text,
            category_of_the_email: category,
        })
    }
}
