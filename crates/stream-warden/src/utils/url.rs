//! Public restream URL derivation

/// Build the public output URL for a slug.
///
/// The result is fixed at record creation; regenerating it later would
/// orphan previously shared links.
pub fn build_output_url(base_url: &str, slug: &str) -> String {
    format!(
        "{}/stream/{}",
        base_url.trim_end_matches('/'),
        urlencoding::encode(slug)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_base_and_slug() {
        assert_eq!(
            build_output_url("http://panel.example.com", "al-jazeera-hd"),
            "http://panel.example.com/stream/al-jazeera-hd"
        );
    }

    #[test]
    fn trailing_slash_is_not_doubled() {
        assert_eq!(
            build_output_url("http://panel.example.com/", "news-1"),
            "http://panel.example.com/stream/news-1"
        );
    }
}
