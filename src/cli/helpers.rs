//! Shared helper functions for CLI commands

/// Canonicalize a user-entered item name to capitalized-first-letter form
/// ("GROUND beef" -> "Ground beef"). Every name-keyed lookup relies on
/// names having passed through this.
pub fn canonical_name(raw: &str) -> String {
    let lower = raw.trim().to_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => lower,
    }
}

/// Escape a string for CSV output
///
/// Handles commas, quotes, and newlines according to RFC 4180.
pub fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_name() {
        assert_eq!(canonical_name("milk"), "Milk");
        assert_eq!(canonical_name("MILK"), "Milk");
        assert_eq!(canonical_name("  ground beef "), "Ground beef");
        assert_eq!(canonical_name("Chicken Breast"), "Chicken breast");
        assert_eq!(canonical_name(""), "");
    }

    #[test]
    fn test_canonical_name_is_idempotent() {
        let once = canonical_name("sTrAwBeRrIeS");
        assert_eq!(canonical_name(&once), once);
    }

    #[test]
    fn test_escape_csv() {
        assert_eq!(escape_csv("plain"), "plain");
        assert_eq!(escape_csv("a,b"), "\"a,b\"");
        assert_eq!(escape_csv("say \"hi\""), "\"say \"\"hi\"\"\"");
    }
}
