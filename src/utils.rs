//! Text helpers shared by the scrapers.
//!
//! - Element text extraction with per-node trimming
//! - String truncation for logging

use itertools::Itertools;
use scraper::ElementRef;

/// Collect the text of an element and all its descendants.
///
/// Each text node is trimmed, empty nodes are dropped, and the rest are
/// joined with `separator`. With `""` adjacent nodes run together, which is
/// how anchor titles are read; paragraphs and breadcrumb items use `" "`.
///
/// # Examples
///
/// ```ignore
/// // <p> Hello <b>world</b> </p>
/// assert_eq!(element_text(p, " "), "Hello world");
/// ```
pub fn element_text(element: ElementRef<'_>, separator: &str) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .join(separator)
}

/// Truncate a string for logging purposes.
///
/// Long strings are cut to at most `max` bytes on a char boundary, with an
/// ellipsis and the number of dropped bytes appended.
pub fn truncate_for_log(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}…(+{} bytes)", &s[..end], s.len() - end)
}
