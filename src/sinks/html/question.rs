//! Rendering of a single question as an HTML fragment.
//!
//! The fragment always has the same shape: heading, body, optional image,
//! options with a separate correct-answer line, optional labels, explanation,
//! then a page break. Missing or malformed optional fields only ever remove
//! their own piece of markup.

use crate::markdown;
use crate::media;
use crate::question::{display_value, ExplanationElement, QuestionRecord};
use html_escape::{encode_double_quoted_attribute, encode_text};
use serde_json::{Map, Value};
use std::fmt::Write;
use std::path::Path;

/// Marker that forces the printed document onto a new page.
pub const PAGE_BREAK: &str = r#"<div class="page-break"></div>"#;

/// Render `question`, resolving its media relative to `base_path`.
pub fn render(question: &QuestionRecord, base_path: &Path) -> String {
    let mut html = String::with_capacity(1024);

    let _ = writeln!(
        html,
        "<h1>Question {}</h1>",
        encode_text(&question.display_number())
    );
    let _ = writeln!(
        html,
        r#"<div class="question-text">{}</div>"#,
        markdown::render(&question.text)
    );

    if let Some(path) = question.media_path() {
        push_image(&mut html, base_path, path, "question-image", "Question Image");
    }

    html.push_str("<div class=\"options\">\n");
    for option in &question.options {
        let _ = writeln!(html, "<p>{}</p>", encode_text(&option.text));
    }
    html.push_str("</div>\n");
    let _ = writeln!(
        html,
        r#"<p class="correct-answer"><b>Correct Answer: {}</b></p>"#,
        encode_text(question.correct_answer())
    );

    if !question.labels.is_empty() {
        html.push_str(r#"<div class="labels">"#);
        for label in &question.labels {
            let _ = write!(html, r#"<span class="label">{}</span>"#, encode_text(label));
        }
        html.push_str("</div>\n");
    }

    html.push_str("<h2>Explanation</h2>\n");
    for element in &question.explanation_elements {
        match element {
            ExplanationElement::Text { content } => {
                html.push_str(&markdown::render(content));
            }
            ExplanationElement::Image { path } => {
                push_image(&mut html, base_path, path, "explanation-image", "Explanation Image");
            }
            ExplanationElement::Table { rows } => {
                html.push_str(&render_table(rows));
            }
            ExplanationElement::Unsupported { .. } => {}
        }
    }

    html.push_str(PAGE_BREAK);
    html.push('\n');
    html
}

fn push_image(html: &mut String, base_path: &Path, reference: &str, class: &str, alt: &str) {
    if let Some(media) = media::resolve(base_path, reference) {
        let _ = writeln!(
            html,
            r#"<img class="{class}" src="{src}" alt="{alt}"/>"#,
            src = encode_double_quoted_attribute(&media.data_uri()),
        );
    }
}

/// Render table rows using the first row's keys as the columns.
///
/// Later rows are looked up by those keys only: a missing key gives an empty
/// cell and keys the first row doesn't have are not shown. A first row with no
/// keys means no columns, so nothing is rendered.
fn render_table(rows: &[Map<String, Value>]) -> String {
    let Some(first) = rows.first().filter(|row| !row.is_empty()) else {
        return String::new();
    };
    let headers: Vec<&String> = first.keys().collect();

    let mut html = String::from("<table><thead><tr>");
    for header in &headers {
        let _ = write!(html, "<th>{}</th>", encode_text(header));
    }
    html.push_str("</tr></thead><tbody>");
    for row in rows {
        html.push_str("<tr>");
        for header in &headers {
            let cell = row.get(header.as_str()).map(display_value).unwrap_or_default();
            let _ = write!(html, "<td>{}</td>", encode_text(&cell));
        }
        html.push_str("</tr>");
    }
    html.push_str("</tbody></table>\n");
    html
}
