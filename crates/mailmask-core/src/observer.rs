//! Hooks for observing masking runs without coupling to a metrics backend

use crate::Classification;
use std::time::Duration;

/// Why a candidate span was skipped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RejectReason {
    /// The span overlaps one already registered
    Overlap,

    /// The span's text already contains a placeholder token
    PlaceholderCollision,
}

impl RejectReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            RejectReason::Overlap => "overlap",
            RejectReason::PlaceholderCollision => "placeholder_collision",
        }
    }
}

/// Receives events from the masking and demasking engines
///
/// All methods default to no-ops so implementors pick what they need.
pub trait MaskObserver: Send + Sync {
    fn on_masked(&self, _classification: Classification) {}

    fn on_rejected(&self, _classification: Classification, _reason: RejectReason) {}

    fn on_mask_completed(&self, _entities: usize, _elapsed: Duration) {}

    fn on_demask_completed(&self, _padded: &[(Classification, usize)]) {}
}
