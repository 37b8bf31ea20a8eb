//! Slug derivation for public stream URLs

/// Fold a display name into a URL-safe slug.
///
/// Lowercases, maps every non-alphanumeric run to a single dash and trims
/// leading/trailing dashes. A name with no usable characters falls back to
/// `stream` so the derived output URL never carries an empty path segment.
/// Uniqueness is the caller's problem (see the numeric-suffix loop in the
/// lifecycle manager).
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut last_was_dash = false;

    for c in name.to_lowercase().chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c);
            last_was_dash = false;
        } else if !last_was_dash {
            slug.push('-');
            last_was_dash = true;
        }
    }

    let slug = slug.trim_matches('-').to_string();
    if slug.is_empty() {
        "stream".to_string()
    } else {
        slug
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_and_dashes() {
        assert_eq!(slugify("Al Jazeera HD"), "al-jazeera-hd");
    }

    #[test]
    fn collapses_symbol_runs() {
        assert_eq!(slugify("News  -- 24/7 (Arabic)"), "news-24-7-arabic");
    }

    #[test]
    fn trims_edge_dashes() {
        assert_eq!(slugify("***Sports***"), "sports");
    }

    #[test]
    fn empty_or_symbol_only_names_fall_back() {
        assert_eq!(slugify(""), "stream");
        assert_eq!(slugify("!!!"), "stream");
    }

    #[test]
    fn non_ascii_folds_to_dashes() {
        assert_eq!(slugify("قناة 1"), "1");
    }
}
