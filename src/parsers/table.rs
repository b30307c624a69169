use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};
use scraper::{Html, Selector};
use std::collections::HashSet;

use super::{cell_text, clean_text};
use crate::models::RowTable;

/// Cells whose entire content is dashes (hyphen, en dash, em dash) or
/// whitespace carry no information. Keep exactly this character set; a
/// wider class could drop legitimate short values.
static NULL_CELL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[-\u{2013}\u{2014}\s]*$").expect("Invalid null cell regex")
});

fn structural_regex(pattern: &str) -> Regex {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .dot_matches_new_line(true)
        .build()
        .expect("Invalid structural regex")
}

/// Locate the table whose nearest preceding `<h2>` heading matches the
/// given text, tolerating intervening chart/figure elements, and return the
/// markup between the table tags. Empty string when not found. Intended for
/// whitespace-collapsed documents; the heading match itself is
/// case-insensitive.
pub fn find_table_by_heading(html: &str, heading: &str) -> String {
    let pattern = format!(
        r"<h2[^>]*>\s*{}\s*</h2>\s*(?:<(?:div|canvas)[^>]*>.*?</(?:div|canvas)>\s*)*<table[^>]*>(.*?)</table>",
        regex::escape(heading)
    );
    match structural_regex(&pattern).captures(html) {
        Some(caps) => caps[1].to_string(),
        None => String::new(),
    }
}

/// Within a table fragment, find the header/data cell whose text equals the
/// label and return the normalized text of the immediately following cell in
/// the same row. Empty string when the label is absent.
pub fn cell_after_label(fragment: &str, label: &str) -> String {
    let pattern = format!(
        r"<t[dh][^>]*>\s*(?:<span[^>]*>)?\s*{}\s*(?:</span>)?\s*</t[dh]>\s*<t[dh][^>]*>(.*?)</t[dh]>",
        regex::escape(label)
    );
    match structural_regex(&pattern).captures(fragment) {
        Some(caps) => cell_text(&caps[1]),
        None => String::new(),
    }
}

/// Split a table fragment into rows of normalized cell text. Header and
/// data cells both count; rows without cells are discarded.
pub fn table_rows(fragment: &str) -> RowTable {
    if fragment.trim().is_empty() {
        return Vec::new();
    }
    let document = Html::parse_fragment(&format!("<table>{}</table>", fragment));
    let row_selector = Selector::parse("tr").unwrap();
    let cell_selector = Selector::parse("th, td").unwrap();

    let mut rows = Vec::new();
    for row in document.select(&row_selector) {
        let cells: Vec<String> = row
            .select(&cell_selector)
            .map(|cell| clean_text(&cell.text().collect::<String>()))
            .collect();
        if !cells.is_empty() {
            rows.push(cells);
        }
    }
    rows
}

/// A data row carrying no real information: every cell is blank or composed
/// only of dash characters.
pub fn is_all_null_row(row: &[String]) -> bool {
    row.iter().all(|cell| NULL_CELL_REGEX.is_match(cell))
}

/// Uppercased, trimmed cell-text set for header matching.
pub fn upper_set(row: &[String]) -> HashSet<String> {
    row.iter().map(|cell| cell.trim().to_uppercase()).collect()
}

/// Order-independent, case-insensitive header match: the row's cell set
/// must be a superset of the expected column-name tokens.
pub fn row_matches_headers(row: &[String], expected: &[&str]) -> bool {
    let set = upper_set(row);
    expected.iter().all(|token| set.contains(*token))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn owned(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn finds_table_after_heading() {
        let html = "<h2>Usage history</h2> <table><tr><td>x</td></tr></table>";
        assert_eq!(find_table_by_heading(html, "Usage history"), "<tr><td>x</td></tr>");
        assert_eq!(find_table_by_heading(html, "Recent usage"), "");
    }

    #[test]
    fn tolerates_chart_elements_between_heading_and_table() {
        let html = "<h2>Battery capacity history</h2> \
                    <div class=\"chart\">stuff</div> <canvas id=\"c\">x</canvas> \
                    <table><tr><td>42</td></tr></table>";
        assert_eq!(
            find_table_by_heading(html, "Battery capacity history"),
            "<tr><td>42</td></tr>"
        );
    }

    #[test]
    fn heading_match_is_case_insensitive() {
        let html = "<h2>RECENT USAGE</h2> <table><tr><td>y</td></tr></table>";
        assert_eq!(find_table_by_heading(html, "Recent usage"), "<tr><td>y</td></tr>");
    }

    #[test]
    fn reads_cell_after_label() {
        let tbl = "<tr><td><span>COMPUTER NAME</span></td><td>PC1</td></tr> \
                   <tr><th>BIOS</th><td> 1.2.3 <b>2024</b> </td></tr>";
        assert_eq!(cell_after_label(tbl, "COMPUTER NAME"), "PC1");
        assert_eq!(cell_after_label(tbl, "BIOS"), "1.2.3 2024");
        assert_eq!(cell_after_label(tbl, "OS BUILD"), "");
    }

    #[test]
    fn splits_rows_and_cells() {
        let tbl = "<tr><th>PERIOD</th><th>ACTIVE</th></tr> \
                   <tr><td> 2024-01-01 - 2024-01-07 </td><td>5:00:00</td></tr> \
                   <tr></tr>";
        let rows = table_rows(tbl);
        assert_eq!(
            rows,
            vec![
                owned(&["PERIOD", "ACTIVE"]),
                owned(&["2024-01-01 - 2024-01-07", "5:00:00"]),
            ]
        );
        assert!(table_rows("").is_empty());
    }

    #[test]
    fn classifies_all_null_rows() {
        assert!(is_all_null_row(&owned(&["-", "\u{2014}", ""])));
        assert!(is_all_null_row(&owned(&["\u{2013}", "  "])));
        assert!(!is_all_null_row(&owned(&["-", "5", ""])));
    }

    #[test]
    fn header_match_ignores_order_and_case() {
        let row = owned(&["state", "START TIME", "Source", "Capacity Remaining"]);
        assert!(row_matches_headers(
            &row,
            &["START TIME", "STATE", "SOURCE", "CAPACITY REMAINING"]
        ));
        assert!(!row_matches_headers(&row, &["START TIME", "DURATION"]));
    }
}
