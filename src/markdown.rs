//! Markdown to HTML for question bodies and explanation text.
//!
//! Pure text transform: no link checking, no image fetching. Raw HTML in the
//! source passes through untouched since datasets come from our own tooling.

use pulldown_cmark::{html, Options, Parser};

/// Render markdown (including pipe tables) into an HTML fragment.
///
/// Blank input renders to an empty string.
pub fn render(text: &str) -> String {
    if text.trim().is_empty() {
        return String::new();
    }

    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);

    let parser = Parser::new_ext(text, options);
    let mut out = String::with_capacity(text.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}
