//! Module section headers inserted where the document moves to a new folder.

use super::question::PAGE_BREAK;
use html_escape::encode_text;
use std::path::Path;

/// Display title for a module folder.
///
/// `output_<N>` folders become `Module <N>`; anything else has underscores
/// replaced with spaces and is title-cased.
pub fn module_title(folder: &Path) -> String {
    let name = folder
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_default();

    if let Some(number) = name.strip_prefix("output_") {
        if !number.is_empty() && number.chars().all(|c| c.is_ascii_digit()) {
            return format!("Module {number}");
        }
    }

    title_case(&name.replace('_', " "))
}

/// Full-page header for the module in `folder`, followed by a page break.
pub fn render(folder: &Path) -> String {
    format!(
        concat!(
            r#"<section class="module-header"><h1 class="module-title">{}</h1></section>"#,
            "\n{}\n"
        ),
        encode_text(&module_title(folder)),
        PAGE_BREAK
    )
}

/// Upper-case every letter that follows a non-letter and lower-case the rest.
fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut previous_is_letter = false;
    for c in text.chars() {
        if c.is_alphabetic() {
            if previous_is_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            previous_is_letter = true;
        } else {
            out.push(c);
            previous_is_letter = false;
        }
    }
    out
}
