pub mod datetime;
pub mod table;

pub use datetime::*;
pub use table::*;

use html_escape::decode_html_entities;
use once_cell::sync::Lazy;
use regex::Regex;

static TAG_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)<[^>]+>").expect("Invalid tag regex")
});

/// Clean and normalize text by decoding HTML entities and collapsing all
/// whitespace runs (including newlines) to single spaces. Idempotent.
pub fn clean_text(text: &str) -> String {
    let decoded = decode_html_entities(text);
    decoded
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string()
}

/// Remove all markup tags from a fragment, leaving only its text.
pub fn strip_tags(markup: &str) -> String {
    TAG_REGEX.replace_all(markup, "").into_owned()
}

/// Plain text of a markup fragment: tags stripped, entities decoded,
/// whitespace collapsed.
pub fn cell_text(markup: &str) -> String {
    clean_text(&strip_tags(markup))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_text_collapses_whitespace_and_decodes_entities() {
        // U+00A0 from &nbsp; is Unicode whitespace and collapses too
        assert_eq!(clean_text("  DELL&nbsp;XPS\n\t13  "), "DELL XPS 13");
        assert_eq!(clean_text("A &amp; B"), "A & B");
        assert_eq!(clean_text(" one \n two\r\n three "), "one two three");
    }

    #[test]
    fn clean_text_is_idempotent() {
        let once = clean_text("  Battery &amp; Power\n report  ");
        assert_eq!(clean_text(&once), once);
    }

    #[test]
    fn cell_text_strips_tags() {
        assert_eq!(cell_text("<span class=\"x\">45,000</span> <b>mWh</b>"), "45,000 mWh");
        assert_eq!(cell_text("plain"), "plain");
    }
}
