//! File-name sanitization for export artifacts.

/// Maximum length of a sanitized file-name stem.
const MAX_STEM_LEN: usize = 50;

/// Sanitize a topic string for use as a file-name stem.
///
/// Every character outside `[A-Za-z0-9]` becomes `_`, consecutive `_`
/// collapse into one, and the result is truncated to 50 characters.
///
/// # Examples
///
/// ```
/// use quill_export::sanitize_file_name;
///
/// assert_eq!(sanitize_file_name("My Topic!! 2024"), "My_Topic_2024");
/// ```
#[must_use]
pub fn sanitize_file_name(name: &str) -> String {
    let mut stem = String::with_capacity(name.len().min(MAX_STEM_LEN));
    let mut last_was_underscore = false;
    for c in name.chars() {
        // Output is pure ASCII, so byte length equals character count.
        if stem.len() == MAX_STEM_LEN {
            break;
        }
        if c.is_ascii_alphanumeric() {
            stem.push(c);
            last_was_underscore = false;
        } else if !last_was_underscore {
            stem.push('_');
            last_was_underscore = true;
        }
    }
    stem
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_replaces_and_collapses() {
        assert_eq!(sanitize_file_name("My Topic!! 2024"), "My_Topic_2024");
        assert_eq!(sanitize_file_name("a///b"), "a_b");
    }

    #[test]
    fn test_alphanumeric_untouched() {
        assert_eq!(sanitize_file_name("Report2024"), "Report2024");
    }

    #[test]
    fn test_non_ascii_becomes_underscore() {
        assert_eq!(sanitize_file_name("café au lait"), "caf_au_lait");
    }

    #[test]
    fn test_leading_and_trailing_markers_kept() {
        assert_eq!(sanitize_file_name("!topic!"), "_topic_");
    }

    #[test]
    fn test_truncates_to_fifty() {
        let long = "a b".repeat(40);
        let stem = sanitize_file_name(&long);
        assert_eq!(stem.len(), 50);

        let exact = "x".repeat(80);
        assert_eq!(sanitize_file_name(&exact).len(), 50);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(sanitize_file_name(""), "");
    }
}
