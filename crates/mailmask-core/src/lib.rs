//! Mailmask Core Types and Traits
//!
//! This crate provides the fundamental types and traits used throughout Mailmask:
//! - Entity classifications and finalized entity spans
//! - Collaborator traits for date recognition and email classification
//! - Core error types

pub mod error;
pub mod observer;
pub mod recognizer;
pub mod types;

pub use error::{Error, Result};
pub use observer::{MaskObserver, RejectReason};
pub use recognizer::{Classifier, DateRecognizer, RecognizedEntity, DATE_LABEL};
pub use types::{Category, Classification, EntitySpan};
