use std::sync::OnceLock;

use regex::Regex;

fn blank_line_runs() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\n{2,}").expect("valid regex"))
}

fn page_footers() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)page \d+ of \d+").expect("valid regex"))
}

/// Cleans up raw OCR output before filtering and extraction: drops
/// `Page X of Y` footers, collapses runs of blank lines and trims.
pub fn clean_ocr_text(text: &str) -> String {
    let without_footers = page_footers().replace_all(text, "");
    let collapsed = blank_line_runs().replace_all(&without_footers, "\n");
    collapsed.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_blank_line_runs() {
        let cleaned = clean_ocr_text("coverage\n\n\n\npremium\n\nclaim");
        assert_eq!(cleaned, "coverage\npremium\nclaim");
    }

    #[test]
    fn strips_page_footers() {
        let cleaned = clean_ocr_text("terms apply\nPage 2 of 14\nexclusions follow");
        assert!(!cleaned.contains("Page 2 of 14"));
        assert!(cleaned.contains("terms apply"));
        assert!(cleaned.contains("exclusions follow"));
    }

    #[test]
    fn trims_surrounding_whitespace() {
        assert_eq!(clean_ocr_text("\n\n  policy text  \n\n"), "policy text");
    }
}
