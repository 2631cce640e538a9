//! Advisory severity label extraction
//!
//! The advisory source is a scraped HTML page, which makes this the most
//! brittle edge of the system. The `LabelExtractor` trait keeps that
//! fragility behind a narrow seam so the resolver's caching and mapping
//! logic can be tested with a fake extractor, independent of markup.
//!
//! Extraction never fails loudly: a page without the expected section,
//! container, or text yields `None`, which the resolver maps to the
//! conservative default.

use regex_lite::Regex;

/// Extracts the raw severity label from an advisory page body.
pub trait LabelExtractor: Send + Sync {
    /// Return the severity label (e.g. "Mild"), or `None` if the page does
    /// not carry the expected advisory markup.
    fn extract_label(&self, html: &str) -> Option<String>;
}

/// Production extractor for the nudity advisory section.
///
/// Locates the `advisory-nudity` section, then the severity-vote container
/// within it, strips markup, and returns the first whitespace-delimited
/// token of the remaining text.
pub struct NudityAdvisoryExtractor {
    section_re: Regex,
    container_re: Regex,
    tag_re: Regex,
}

impl NudityAdvisoryExtractor {
    // Patterns are static and known-valid; construction cannot fail.
    #[allow(clippy::unwrap_used)]
    pub fn new() -> Self {
        Self {
            section_re: Regex::new(r#"(?s)<section[^>]*\bid="advisory-nudity"[^>]*>(.*?)</section>"#)
                .unwrap(),
            container_re: Regex::new(
                r#"(?s)<div[^>]*\bclass="[^"]*advisory-severity-vote__container[^"]*"[^>]*>(.*?)</div>"#,
            )
            .unwrap(),
            tag_re: Regex::new(r"<[^>]*>").unwrap(),
        }
    }
}

impl Default for NudityAdvisoryExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl LabelExtractor for NudityAdvisoryExtractor {
    fn extract_label(&self, html: &str) -> Option<String> {
        let section = self.section_re.captures(html)?.get(1)?.as_str().to_owned();
        let container = self
            .container_re
            .captures(&section)?
            .get(1)?
            .as_str()
            .to_owned();
        let text = self.tag_re.replace_all(&container, " ");
        text.split_whitespace().next().map(str::to_owned)
    }
}
