//! Demasking: put original values back in place of placeholders

use mailmask_core::{Classification, EntitySpan};
use tracing::{info, warn};

/// Result of demasking, including how much padding was needed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemaskOutcome {
    pub text: String,

    /// Placeholders filled by repeating the last entity of their class
    pub padded: Vec<(Classification, usize)>,
}

/// Restore the original text from masked text and its entity list
pub fn demask(masked: &str, entities: &[EntitySpan]) -> String {
    demask_with_report(masked, entities).text
}

/// Like [`demask`], also reporting placeholder/entity count mismatches
///
/// Entities are grouped by classification in order of first appearance in
/// the list; within a group they are ordered by position. Each placeholder
/// occurrence is replaced left to right with the next entity of its group.
/// When a placeholder occurs more often than its group has entities, the
/// last entity is repeated.
pub fn demask_with_report(masked: &str, entities: &[EntitySpan]) -> DemaskOutcome {
    let mut groups: Vec<(Classification, Vec<&EntitySpan>)> = Vec::new();
    for entity in entities {
        match groups.iter_mut().find(|(c, _)| *c == entity.classification) {
            Some((_, group)) => group.push(entity),
            None => groups.push((entity.classification, vec![entity])),
        }
    }

    let mut text = masked.to_string();
    let mut padded = Vec::new();

    for (classification, mut group) in groups {
        group.sort_by_key(|entity| entity.start());

        let placeholder = classification.placeholder();
        let occurrences = text.matches(placeholder.as_str()).count();
        if occurrences > group.len() {
            let extra = occurrences - group.len();
            warn!(
                classification = %classification,
                placeholders = occurrences,
                entities = group.len(),
                "More placeholders than entities, repeating the last one"
            );
            padded.push((classification, extra));
        }

        for index in 0..occurrences {
            let Some(entity) = group.get(index).or(group.last()) else {
                break;
            };
            if let Some(at) = text.find(placeholder.as_str()) {
                text.replace_range(at..at + placeholder.len(), &entity.entity);
            }
        }
    }

    info!(entities = entities.len(), padded = padded.len(), "Demasked text");
    DemaskOutcome { text, padded }
}
