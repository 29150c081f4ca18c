//! Assembly of the merged question bank document.
//!
//! Records from every folder are emitted in order as one self-contained HTML
//! page: a module header wherever the source folder changes, one fragment per
//! question, all wrapped in a fixed shell with the stylesheet embedded. The
//! result has no references to local files and can be printed by any
//! HTML-to-PDF renderer.

pub mod question;
pub mod section;
mod styles;

pub use styles::{FONT_STYLESHEET_URL, STYLESHEET};

use crate::error::JobError;
use crate::source::{self, LoadStep, SourcedRecord};
use log::warn;
use std::path::{Path, PathBuf};

/// Load the datasets of `folders` and render them into one document.
///
/// Missing dataset files are logged and skipped. Fails with
/// [`JobError::NoQuestions`] if no folder contributed any records.
pub fn assemble(folders: &[PathBuf], dataset_file: &str) -> Result<String, JobError> {
    let records = source::load_all(folders, dataset_file, |step| {
        if let LoadStep::Missing(folder) = step {
            warn!("{dataset_file} not found in {}", folder.display());
        }
    })
    .map_err(JobError::Dataset)?;

    render_document(&records)
}

/// Render already-loaded records into a complete HTML document.
pub fn render_document(records: &[SourcedRecord]) -> Result<String, JobError> {
    if records.is_empty() {
        return Err(JobError::NoQuestions);
    }

    let mut html = String::with_capacity(records.len() * 2048);
    html.push_str(&format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<title>Question Bank</title>
<link href="{font}" rel="stylesheet">
<style>{styles}</style>
</head>
<body>
"#,
        font = FONT_STYLESHEET_URL,
        styles = STYLESHEET,
    ));

    let mut current_folder: Option<&Path> = None;
    for sourced in records {
        let folder: &Path = &sourced.base_path;
        if current_folder != Some(folder) {
            html.push_str(&section::render(folder));
            current_folder = Some(folder);
        }
        html.push_str(&question::render(&sourced.record, folder));
    }

    html.push_str("</body>\n</html>\n");
    Ok(html)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::question::QuestionRecord;
    use crate::source::DEFAULT_DATASET_FILE;
    use serde_json::json;
    use std::sync::Arc;

    fn sourced(folder: &Path, number: u32) -> SourcedRecord {
        SourcedRecord {
            base_path: Arc::from(folder),
            record: QuestionRecord::from_value(json!({ "question_number": number })),
        }
    }

    #[test]
    fn empty_input_is_an_error() {
        assert!(matches!(render_document(&[]), Err(JobError::NoQuestions)));
    }

    #[test]
    fn document_has_fixed_shell() {
        let html = render_document(&[sourced(Path::new("/x/output_1"), 1)]).expect("renders");
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains(r#"<meta charset="UTF-8">"#));
        assert!(html.contains(FONT_STYLESHEET_URL));
        assert!(html.contains(".page-break"));
        assert!(html.trim_end().ends_with("</html>"));
    }

    #[test]
    fn headers_follow_folder_transitions_in_order() {
        let orders = [
            ["output_1", "output_2", "extra_notes"],
            ["extra_notes", "output_2", "output_1"],
        ];
        for order in orders {
            let mut records = Vec::new();
            for (i, name) in order.iter().enumerate() {
                let folder = Path::new("/bank").join(name);
                records.push(sourced(&folder, i as u32 * 10 + 1));
                records.push(sourced(&folder, i as u32 * 10 + 2));
            }

            let html = render_document(&records).expect("renders");
            assert_eq!(html.matches(r#"class="module-header""#).count(), 3);

            let mut cursor = 0;
            for (i, name) in order.iter().enumerate() {
                let header = section::render(&Path::new("/bank").join(name));
                let first_question = format!("<h1>Question {}</h1>", i * 10 + 1);
                let at = cursor + html[cursor..].find(&header).expect("header present");
                if i > 0 {
                    assert!(
                        html[..at].ends_with(&format!("{}\n", question::PAGE_BREAK)),
                        "header for {name} must follow a page break"
                    );
                }
                let after = at + header.len();
                assert!(
                    html[after..].starts_with(&first_question),
                    "header for {name} must be followed by its first record"
                );
                cursor = after;
            }
        }
    }

    #[test]
    fn returning_to_a_folder_starts_a_new_section() {
        let a = Path::new("/bank/output_1");
        let b = Path::new("/bank/output_2");
        let html =
            render_document(&[sourced(a, 1), sourced(b, 2), sourced(a, 3)]).expect("renders");
        assert_eq!(html.matches("Module 1").count(), 2);
        assert_eq!(html.matches("Module 2").count(), 1);
    }

    #[test]
    fn assemble_fails_when_no_folder_has_questions() {
        let root = tempfile::tempdir().expect("can create temp dir");
        let empty = root.path().join("empty");
        let missing = root.path().join("missing");
        std::fs::create_dir_all(&empty).expect("can create folder");
        std::fs::create_dir_all(&missing).expect("can create folder");
        std::fs::write(empty.join(DEFAULT_DATASET_FILE), "[]").expect("can write dataset");

        assert!(matches!(
            assemble(&[empty, missing], DEFAULT_DATASET_FILE),
            Err(JobError::NoQuestions)
        ));
    }

    #[test]
    fn assemble_renders_loaded_folders() {
        let root = tempfile::tempdir().expect("can create temp dir");
        let folder = root.path().join("output_4");
        std::fs::create_dir_all(&folder).expect("can create folder");
        std::fs::write(
            folder.join(DEFAULT_DATASET_FILE),
            r#"[{"question_number": 1, "text": "Hello *there*"}]"#,
        )
        .expect("can write dataset");

        let html = assemble(&[folder], DEFAULT_DATASET_FILE).expect("assembles");
        assert!(html.contains("Module 4"));
        assert!(html.contains("<em>there</em>"));
    }
}
