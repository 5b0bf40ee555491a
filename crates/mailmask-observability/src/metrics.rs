//! Metrics collection with Prometheus
//!
//! This module provides Prometheus metrics for Mailmask:
//! - Mask and demask call counts
//! - Masked entities by classification
//! - Skipped candidates by classification and reason
//! - Demask padding by classification
//! - Masking latency

use mailmask_core::{Classification, MaskObserver, RejectReason};
use prometheus::{Counter, CounterVec, Encoder, Histogram, HistogramOpts, Opts, Registry, TextEncoder};
use std::sync::Arc;
use std::time::Duration;

/// Metrics collector for Mailmask
#[derive(Clone)]
pub struct Metrics {
    /// Prometheus registry
    registry: Arc<Registry>,

    /// Completed masking calls
    pub mask_requests_total: Counter,
    /// Entities masked
    pub entities_masked_total: CounterVec,
    /// Candidates skipped because of an earlier claim
    pub candidates_rejected_total: CounterVec,
    /// Masking duration
    pub mask_duration_seconds: Histogram,

    /// Completed demasking calls
    pub demask_requests_total: Counter,
    /// Placeholders filled by repeating the last entity
    pub demask_padded_total: CounterVec,
}

impl Metrics {
    /// Create a new metrics collector
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let mask_requests_total = Counter::with_opts(Opts::new(
            "mailmask_mask_requests_total",
            "Total number of masking calls",
        ))?;

        let entities_masked_total = CounterVec::new(
            Opts::new("mailmask_entities_masked_total", "Total number of masked entities"),
            &["classification"],
        )?;

        let candidates_rejected_total = CounterVec::new(
            Opts::new(
                "mailmask_candidates_rejected_total",
                "Candidate spans skipped during masking",
            ),
            &["classification", "reason"],
        )?;

        let mask_duration_seconds = Histogram::with_opts(
            HistogramOpts::new("mailmask_mask_duration_seconds", "Masking duration in seconds")
                .buckets(vec![0.0001, 0.0005, 0.001, 0.0025, 0.005, 0.01, 0.025, 0.05, 0.1]),
        )?;

        let demask_requests_total = Counter::with_opts(Opts::new(
            "mailmask_demask_requests_total",
            "Total number of demasking calls",
        ))?;

        let demask_padded_total = CounterVec::new(
            Opts::new(
                "mailmask_demask_padded_total",
                "Placeholders filled by repeating the last entity of their class",
            ),
            &["classification"],
        )?;

        registry.register(Box::new(mask_requests_total.clone()))?;
        registry.register(Box::new(entities_masked_total.clone()))?;
        registry.register(Box::new(candidates_rejected_total.clone()))?;
        registry.register(Box::new(mask_duration_seconds.clone()))?;
        registry.register(Box::new(demask_requests_total.clone()))?;
        registry.register(Box::new(demask_padded_total.clone()))?;

        Ok(Self {
            registry: Arc::new(registry),
            mask_requests_total,
            entities_masked_total,
            candidates_rejected_total,
            mask_duration_seconds,
            demask_requests_total,
            demask_padded_total,
        })
    }

    /// Get the Prometheus registry for exporting metrics
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Render all metrics in the Prometheus text exposition format
    pub fn gather_text(&self) -> Result<String, prometheus::Error> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}

impl MaskObserver for Metrics {
    fn on_masked(&self, classification: Classification) {
        self.entities_masked_total
            .with_label_values(&[classification.as_str()])
            .inc();
    }

    fn on_rejected(&self, classification: Classification, reason: RejectReason) {
        self.candidates_rejected_total
            .with_label_values(&[classification.as_str(), reason.as_str()])
            .inc();
    }

    fn on_mask_completed(&self, _entities: usize, elapsed: Duration) {
        self.mask_requests_total.inc();
        self.mask_duration_seconds.observe(elapsed.as_secs_f64());
    }

    fn on_demask_completed(&self, padded: &[(Classification, usize)]) {
        self.demask_requests_total.inc();
        for (classification, count) in padded {
            self.demask_padded_total
                .with_label_values(&[classification.as_str()])
                .inc_by(*count as f64);
        }
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new().expect("Failed to create metrics")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_creation() {
        let metrics = Metrics::new().unwrap();
        assert!(!metrics.registry().gather().is_empty());
    }

    #[test]
    fn test_record_masked_entities() {
        let metrics = Metrics::new().unwrap();
        metrics.on_masked(Classification::Email);
        metrics.on_masked(Classification::Email);
        metrics.on_masked(Classification::CvvNo);

        assert_eq!(
            metrics
                .entities_masked_total
                .with_label_values(&["email"])
                .get(),
            2.0
        );
        assert_eq!(
            metrics
                .entities_masked_total
                .with_label_values(&["cvv_no"])
                .get(),
            1.0
        );
    }

    #[test]
    fn test_record_rejection() {
        let metrics = Metrics::new().unwrap();
        metrics.on_rejected(Classification::FullName, RejectReason::Overlap);

        assert_eq!(
            metrics
                .candidates_rejected_total
                .with_label_values(&["full_name", "overlap"])
                .get(),
            1.0
        );
    }

    #[test]
    fn test_record_completion() {
        let metrics = Metrics::new().unwrap();
        metrics.on_mask_completed(3, Duration::from_millis(2));
        metrics.on_demask_completed(&[(Classification::CvvNo, 2)]);

        assert_eq!(metrics.mask_requests_total.get(), 1.0);
        assert_eq!(metrics.mask_duration_seconds.get_sample_count(), 1);
        assert_eq!(metrics.demask_requests_total.get(), 1.0);
        assert_eq!(
            metrics
                .demask_padded_total
                .with_label_values(&["cvv_no"])
                .get(),
            2.0
        );
    }

    #[test]
    fn test_gather_text() {
        let metrics = Metrics::new().unwrap();
        metrics.on_masked(Classification::Dob);

        let text = metrics.gather_text().unwrap();
        assert!(text.contains("mailmask_entities_masked_total{classification=\"dob\"} 1"));
        assert!(text.contains("mailmask_mask_requests_total 0"));
    }
}
