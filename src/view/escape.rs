//! HTML escaping and text-content extraction for rendered fragments.

use once_cell::sync::Lazy;
use regex::Regex;

/// Escape the five HTML-significant characters.
///
/// Every string that originates from the server goes through this before
/// being placed in a fragment.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len() + 16);
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

static RE_TAGS: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").unwrap());

/// The text a user would select in a rendered fragment: tags removed and
/// the entities produced by [`escape_html`] decoded. Not trimmed.
pub fn text_content(fragment: &str) -> String {
    let stripped = RE_TAGS.replace_all(fragment, "");
    // `&amp;` last so "&amp;lt;" decodes to "&lt;", not "<".
    stripped
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}
