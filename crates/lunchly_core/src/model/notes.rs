//! Free-text notes normalization shared by all entities.

/// Normalizes caller-supplied notes into the stored representation.
///
/// Missing input and the empty string both become `""`; anything else is
/// kept verbatim (no trimming), so notes round-trip exactly as typed.
pub fn normalize_notes(value: Option<&str>) -> String {
    match value {
        Some(text) if !text.is_empty() => text.to_string(),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::normalize_notes;

    #[test]
    fn missing_and_empty_notes_become_empty_string() {
        assert_eq!(normalize_notes(None), "");
        assert_eq!(normalize_notes(Some("")), "");
    }

    #[test]
    fn non_empty_notes_are_kept_verbatim() {
        assert_eq!(normalize_notes(Some("  window seat ")), "  window seat ");
    }
}
