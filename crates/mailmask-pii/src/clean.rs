//! Email cleaning and classifier-input normalization

use std::borrow::Cow;

/// Greetings that mark where the body starts when no blank line follows the subject
const SALUTATIONS: &[&str] = &["Sehr geehrte", "Dear ", "Hallo "];

const SUBJECT_MARKER: &str = "Subject:";

/// Clean an email body before detection
///
/// Repairs UTF-8 that was misread as Latin-1, normalizes line endings,
/// strips the subject header and collapses all whitespace runs to a single
/// space.
pub fn clean(text: &str) -> String {
    let text = repair_mojibake(text);
    clean_decoded(&text)
}

/// Clean raw bytes, dropping any sequences that are not valid UTF-8
pub fn clean_bytes(bytes: &[u8]) -> String {
    let text = decode_lossy(bytes);
    clean_decoded(&text)
}

/// Normalize masked text before handing it to a classifier
pub fn normalize_for_classification(text: &str) -> String {
    let text = text.replace(['\n', '\r'], " ").to_lowercase();
    collapse_whitespace(&text)
}

fn clean_decoded(text: &str) -> String {
    let text = text.replace("\r\n", "\n").replace('\r', "\n");
    collapse_whitespace(strip_subject(&text))
}

/// Drop everything up to the body when a subject header is present
fn strip_subject(text: &str) -> &str {
    if !text.contains(SUBJECT_MARKER) {
        return text;
    }

    if let Some((_, body)) = text.split_once("\n\n") {
        return body;
    }

    for salutation in SALUTATIONS {
        if let Some(idx) = text.find(salutation) {
            return &text[idx..];
        }
    }

    text.split_once(SUBJECT_MARKER)
        .map(|(_, rest)| rest.trim())
        .unwrap_or(text)
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Undo a UTF-8 -> Latin-1 misdecode when the repair is itself valid UTF-8
fn repair_mojibake(text: &str) -> Cow<'_, str> {
    if text.is_ascii() || text.chars().any(|c| u32::from(c) > 0xFF) {
        return Cow::Borrowed(text);
    }

    let bytes: Vec<u8> = text.chars().map(|c| u32::from(c) as u8).collect();
    match String::from_utf8(bytes) {
        Ok(repaired) => {
            tracing::debug!("Repaired Latin-1 misdecoded input");
            Cow::Owned(repaired)
        }
        Err(_) => Cow::Borrowed(text),
    }
}

fn decode_lossy(bytes: &[u8]) -> Cow<'_, str> {
    if let Ok(text) = std::str::from_utf8(bytes) {
        return Cow::Borrowed(text);
    }

    let mut decoded = String::with_capacity(bytes.len());
    let mut dropped = 0;
    for chunk in bytes.utf8_chunks() {
        decoded.push_str(chunk.valid());
        dropped += chunk.invalid().len();
    }
    tracing::warn!(dropped_bytes = dropped, "Input is not valid UTF-8, ignoring undecodable bytes");
    Cow::Owned(decoded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapses_whitespace() {
        assert_eq!(clean("  Hello\r\n\tworld  \n\n again "), "Hello world again");
    }

    #[test]
    fn test_strips_subject_before_blank_line() {
        let raw = "Subject: Card blocked\r\n\r\nDear team,\nmy card is blocked.";
        assert_eq!(clean(raw), "Dear team, my card is blocked.");
    }

    #[test]
    fn test_strips_subject_up_to_salutation() {
        let raw = "Subject: Anfrage Sehr geehrte Damen und Herren, bitte helfen.";
        assert_eq!(clean(raw), "Sehr geehrte Damen und Herren, bitte helfen.");
    }

    #[test]
    fn test_strips_subject_marker_without_salutation() {
        let raw = "Subject: Printer offline since Monday";
        assert_eq!(clean(raw), "Printer offline since Monday");
    }

    #[test]
    fn test_text_without_subject_untouched() {
        assert_eq!(clean("email is jane@example.com."), "email is jane@example.com.");
    }

    #[test]
    fn test_repairs_mojibake() {
        assert_eq!(clean("GrÃ¼ÃŸe"), "GrÃ¼ÃŸe");
        assert_eq!(clean("GrÃ¼e"), "Grüe");
    }

    #[test]
    fn test_keeps_genuine_latin1() {
        assert_eq!(clean("café au lait"), "café au lait");
    }

    #[test]
    fn test_clean_bytes_drops_invalid_sequences() {
        let bytes = b"Hello \xff\xfeworld";
        assert_eq!(clean_bytes(bytes), "Hello world");
    }

    #[test]
    fn test_normalize_for_classification() {
        assert_eq!(
            normalize_for_classification("My Card\nIS [credit_debit_no]\r\n  Blocked"),
            "my card is [credit_debit_no] blocked"
        );
    }
}
