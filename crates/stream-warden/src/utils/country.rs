//! Country detection for discovered streams

/// Codes scanned against candidate names, in priority order
pub const COUNTRY_CODES: [&str; 10] = [
    "SY", "SA", "AE", "QA", "EG", "LB", "JO", "KW", "BH", "OM",
];

/// Pick a country code for a candidate.
///
/// Scans the fixed code set against the name (case-insensitive substring,
/// first match wins), then falls back to the playlist's `tvg-country` hint,
/// then to the configured default.
pub fn detect_country(name: &str, hint: Option<&str>, default: &str) -> String {
    let name_lower = name.to_lowercase();
    for code in COUNTRY_CODES {
        if name_lower.contains(&code.to_lowercase()) {
            return code.to_string();
        }
    }

    match hint {
        Some(h) if !h.trim().is_empty() => h.trim().to_string(),
        _ => default.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_match_wins_over_hint() {
        assert_eq!(detect_country("SY News HD", Some("EG"), "SA"), "SY");
        assert_eq!(detect_country("al-qa channel", None, "SY"), "QA");
    }

    #[test]
    fn falls_back_to_hint_then_default() {
        assert_eq!(detect_country("World Movies", Some("FR"), "SY"), "FR");
        assert_eq!(detect_country("World Movies", Some("  "), "SY"), "SY");
        assert_eq!(detect_country("World Movies", None, "SY"), "SY");
    }

    #[test]
    fn first_listed_code_wins_on_ties() {
        // contains both "sa" and "eg"
        assert_eq!(detect_country("mesa segment", None, "SY"), "SA");
    }
}
