//! Tests for core entity types

use super::*;

#[test]
fn test_classification_serialization() {
    for classification in Classification::all() {
        let json = serde_json::to_string(&classification).unwrap();
        assert_eq!(json, format!("\"{}\"", classification.as_str()));
        let deserialized: Classification = serde_json::from_str(&json).unwrap();
        assert_eq!(classification, deserialized);
    }
}

#[test]
fn test_placeholder_format() {
    assert_eq!(Classification::Email.placeholder(), "[email]");
    assert_eq!(Classification::CreditDebitNo.placeholder(), "[credit_debit_no]");
    assert_eq!(Classification::Dob.placeholder(), "[dob]");
}

#[test]
fn test_classification_from_str() {
    assert_eq!("cvv_no".parse::<Classification>().unwrap(), Classification::CvvNo);
    assert!("ssn".parse::<Classification>().is_err());
}

#[test]
fn test_entity_span_json_shape() {
    let span = EntitySpan::new(9, 25, Classification::Email, "jane@example.com");
    let json = serde_json::to_value(&span).unwrap();

    assert_eq!(json["position"], serde_json::json!([9, 25]));
    assert_eq!(json["classification"], "email");
    assert_eq!(json["entity"], "jane@example.com");
    assert_eq!(json.as_object().unwrap().len(), 3);
}

#[test]
fn test_entity_span_overlap() {
    let span = EntitySpan::new(10, 20, Classification::FullName, "John Smith");

    assert!(span.overlaps(15, 25));
    assert!(span.overlaps(5, 11));
    assert!(span.overlaps(12, 18));
    assert!(!span.overlaps(20, 30));
    assert!(!span.overlaps(0, 10));
}

#[test]
fn test_category_from_index() {
    assert_eq!(Category::from_index(0), Some(Category::Change));
    assert_eq!(Category::from_index(3), Some(Category::Request));
    assert_eq!(Category::from_index(4), None);
    assert_eq!(Category::Incident.to_string(), "Incident");
}
