//! Working text buffer for a single masking call

/// Replacement of the byte range `start..end` with `replacement`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    pub start: usize,
    pub end: usize,
    pub replacement: String,
}

impl Edit {
    pub fn new(start: usize, end: usize, replacement: impl Into<String>) -> Self {
        Self {
            start,
            end,
            replacement: replacement.into(),
        }
    }
}

/// The text a masking call rewrites in place
///
/// Each detection pass computes its candidates against the buffer as it
/// stands before the pass. The accepted edits of that pass are then applied
/// in descending start order, so applying one edit never shifts the offsets
/// of an edit still waiting to be applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextBuffer {
    text: String,
}

impl TextBuffer {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Character offset of a byte offset
    pub fn char_offset(&self, byte: usize) -> usize {
        char_offset(&self.text, byte)
    }

    /// Apply one pass worth of edits, returning how many were applied
    ///
    /// Edits are applied right to left. An edit whose range is out of bounds,
    /// splits a character, or overlaps an edit to its right is dropped.
    pub fn apply_edits(&mut self, mut edits: Vec<Edit>) -> usize {
        edits.sort_by(|a, b| b.start.cmp(&a.start));

        let mut applied = 0;
        let mut limit = self.text.len();
        for edit in edits {
            if edit.start > edit.end
                || edit.end > limit
                || !self.text.is_char_boundary(edit.start)
                || !self.text.is_char_boundary(edit.end)
            {
                tracing::warn!(
                    start = edit.start,
                    end = edit.end,
                    "Dropping edit outside the writable range"
                );
                continue;
            }
            self.text.replace_range(edit.start..edit.end, &edit.replacement);
            limit = edit.start;
            applied += 1;
        }
        applied
    }

    pub fn into_string(self) -> String {
        self.text
    }
}

/// Number of characters in `text[..byte]`
pub(crate) fn char_offset(text: &str, byte: usize) -> usize {
    text[..byte].chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_edits_right_to_left() {
        let mut buffer = TextBuffer::new("call 555-123-4567 or 555-987-6543 today");
        let applied = buffer.apply_edits(vec![
            Edit::new(5, 17, "[phone_number]"),
            Edit::new(21, 33, "[phone_number]"),
        ]);

        assert_eq!(applied, 2);
        assert_eq!(buffer.as_str(), "call [phone_number] or [phone_number] today");
    }

    #[test]
    fn test_overlapping_edit_dropped() {
        let mut buffer = TextBuffer::new("abcdefghij");
        let applied = buffer.apply_edits(vec![Edit::new(2, 6, "X"), Edit::new(4, 8, "Y")]);

        assert_eq!(applied, 1);
        assert_eq!(buffer.as_str(), "abcdYij");
    }

    #[test]
    fn test_out_of_bounds_edit_dropped() {
        let mut buffer = TextBuffer::new("short");
        assert_eq!(buffer.apply_edits(vec![Edit::new(3, 40, "X")]), 0);
        assert_eq!(buffer.as_str(), "short");
    }

    #[test]
    fn test_char_offset_multibyte() {
        let buffer = TextBuffer::new("Grüße an jane@example.com");
        let byte = buffer.as_str().find("jane").unwrap();

        assert_eq!(byte, 11);
        assert_eq!(buffer.char_offset(byte), 9);
    }
}
