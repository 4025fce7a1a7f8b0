//! Input validation helpers.
//!
//! Pure functions used by the request handlers to check presence and
//! shape of incoming fields before anything touches the database.

/// Titles an author may register with.
pub const VALID_TITLES: [&str; 4] = ["Mr", "Mrs", "Miss", "Mast"];

/// Check that an optional string field is present and non-blank.
///
/// A field consisting only of whitespace counts as absent, matching the
/// behavior clients already rely on.
pub fn has_content(value: Option<&str>) -> bool {
    matches!(value, Some(s) if !s.trim().is_empty())
}

/// Check that a title is one of the accepted honorifics.
pub fn is_valid_title(title: &str) -> bool {
    VALID_TITLES.contains(&title)
}

/// Check that an email has a standard shape: a non-empty local part,
/// a single `@`, and a dotted domain whose final label is 2-3 characters.
///
/// Allowed characters are word characters plus `.` and `-` as separators,
/// with no leading, trailing, or doubled separators.
pub fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if !is_separated_word(local) {
        return false;
    }
    // Domain needs at least one dot; the final label is the TLD.
    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };
    if !(2..=3).contains(&tld.len()) || !tld.chars().all(|c| c.is_ascii_alphanumeric()) {
        return false;
    }
    is_separated_word(host)
}

/// A run of word characters optionally separated by single `.` or `-`.
fn is_separated_word(s: &str) -> bool {
    if s.is_empty() {
        return false;
    }
    let mut prev_was_separator = true; // rejects a leading separator
    for c in s.chars() {
        if c.is_ascii_alphanumeric() || c == '_' {
            prev_was_separator = false;
        } else if c == '.' || c == '-' {
            if prev_was_separator {
                return false;
            }
            prev_was_separator = true;
        } else {
            return false;
        }
    }
    !prev_was_separator // rejects a trailing separator
}

/// De-duplicate a list of strings, preserving first-occurrence order.
///
/// Tags and subcategories have set semantics: `["a", "a", "b"]` is
/// stored as `["a", "b"]`.
pub fn dedup(values: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    values
        .into_iter()
        .filter(|v| seen.insert(v.clone()))
        .collect()
}

/// Split a comma-separated query value into trimmed, de-duplicated items.
///
/// `"rust, web,rust"` becomes `["rust", "web"]`.
pub fn split_csv(value: &str) -> Vec<String> {
    dedup(
        value
            .split(',')
            .map(|item| item.trim().to_string())
            .filter(|item| !item.is_empty())
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn has_content_rejects_missing_and_blank() {
        assert!(has_content(Some("Jane")));
        assert!(!has_content(None));
        assert!(!has_content(Some("")));
        assert!(!has_content(Some("   ")));
    }

    #[test]
    fn title_must_be_an_accepted_honorific() {
        for title in VALID_TITLES {
            assert!(is_valid_title(title));
        }
        assert!(!is_valid_title("Dr"));
        assert!(!is_valid_title("mr"));
        assert!(!is_valid_title(""));
    }

    #[test]
    fn accepts_ordinary_email_addresses() {
        assert!(is_valid_email("a@b.com"));
        assert!(is_valid_email("jane.doe@example.co"));
        assert!(is_valid_email("jane_doe@mail-server.example.org"));
    }

    #[test]
    fn rejects_malformed_email_addresses() {
        assert!(!is_valid_email("plainaddress"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("jane@"));
        assert!(!is_valid_email("jane@example"));
        assert!(!is_valid_email("jane@example.c"));
        assert!(!is_valid_email("jane@example.commm"));
        assert!(!is_valid_email("jane..doe@example.com"));
        assert!(!is_valid_email(".jane@example.com"));
        assert!(!is_valid_email("jane@example.com "));
    }

    #[test]
    fn dedup_preserves_first_occurrence_order() {
        let tags = vec!["a".to_string(), "a".to_string(), "b".to_string()];
        assert_eq!(dedup(tags), vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn split_csv_trims_and_dedups() {
        assert_eq!(
            split_csv("rust, web,rust"),
            vec!["rust".to_string(), "web".to_string()]
        );
        assert_eq!(split_csv(" , ,"), Vec::<String>::new());
    }
}
