//! Question records as they appear in a folder's dataset file.
//!
//! Dataset files are produced by upstream extraction tooling and are not always
//! consistent: fields go missing, turn up as `null`, or carry the wrong JSON type.
//! Every field here decodes on its own and falls back to its default instead of
//! rejecting the whole record, so one odd field never costs a question its place
//! in the book.

use serde::de::{DeserializeOwned, Deserializer};
use serde::Deserialize;
use serde_json::{Map, Value};

/// Shown in place of the correct answer when no option is flagged.
pub const NO_CORRECT_ANSWER: &str = "N/A";

/// A single question from a dataset file.
///
/// Each field accepts its snake_case wire name and, failing that, its
/// camelCase alias. When both spellings are present the snake_case one wins.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuestionRecord {
    /// Display-only identifier; may be a string, a number, or missing entirely.
    pub question_number: Value,
    /// Markdown body of the question.
    pub text: String,
    /// Folder-relative path to an image shown below the question body.
    pub question_media_path: Option<String>,
    pub options: Vec<QuestionOption>,
    pub explanation_elements: Vec<ExplanationElement>,
    pub labels: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionOption {
    pub text: String,
    pub is_correct_answer: bool,
}

impl QuestionOption {
    /// Decode one option; anything that isn't a JSON object is not an option.
    pub fn from_value(value: &Value) -> Option<QuestionOption> {
        let fields = value.as_object()?;
        Some(QuestionOption {
            text: field(fields, &["text"]),
            is_correct_answer: field(fields, &["is_correct_answer", "isCorrectAnswer"]),
        })
    }
}

/// One entry of a question's explanation.
#[derive(Debug, Clone, PartialEq)]
pub enum ExplanationElement {
    /// Markdown paragraph(s).
    Text { content: String },
    /// Folder-relative image path.
    Image { path: String },
    /// Table rows in source order; each row keeps its keys in source order.
    ///
    /// Entries that aren't objects are kept as empty rows so the first entry
    /// always decides the columns.
    Table { rows: Vec<Map<String, Value>> },
    /// Anything with a `type` we don't know how to render.
    Unsupported { kind: String },
}

impl ExplanationElement {
    pub fn from_value(value: &Value) -> ExplanationElement {
        let kind = value.get("type").and_then(Value::as_str).unwrap_or_default();
        match kind {
            "text" => ExplanationElement::Text {
                content: string_field(value, "content"),
            },
            "image" => ExplanationElement::Image {
                path: string_field(value, "path"),
            },
            "table_processed_vlm" => {
                let rows = value
                    .get("data")
                    .and_then(|data| data.get("table"))
                    .and_then(Value::as_array)
                    .map(|rows| {
                        rows.iter()
                            .map(|row| row.as_object().cloned().unwrap_or_default())
                            .collect()
                    })
                    .unwrap_or_default();
                ExplanationElement::Table { rows }
            }
            other => ExplanationElement::Unsupported {
                kind: other.to_string(),
            },
        }
    }
}

impl<'de> Deserialize<'de> for ExplanationElement {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(ExplanationElement::from_value(&value))
    }
}

impl<'de> Deserialize<'de> for QuestionRecord {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(QuestionRecord::from_value(value))
    }
}

impl QuestionRecord {
    /// Decode a record from an arbitrary JSON value. Values that aren't objects
    /// produce an all-default record.
    pub fn from_value(value: Value) -> QuestionRecord {
        let Value::Object(fields) = value else {
            return QuestionRecord::default();
        };

        QuestionRecord {
            question_number: lookup(&fields, &["question_number", "questionNumber"])
                .cloned()
                .unwrap_or_default(),
            text: field(&fields, &["text"]),
            question_media_path: field(&fields, &["question_media_path", "questionMediaPath"]),
            options: list(&fields, &["options"], QuestionOption::from_value),
            explanation_elements: list(
                &fields,
                &["explanation_elements", "explanationElements"],
                |element| Some(ExplanationElement::from_value(element)),
            ),
            labels: list(&fields, &["labels"], |label| label.as_str().map(str::to_string)),
        }
    }

    /// The question number as it should appear in the heading.
    pub fn display_number(&self) -> String {
        display_value(&self.question_number)
    }

    /// The text of the *last* option flagged as correct, or "N/A".
    ///
    /// Several flagged options are not an error; later ones overwrite earlier ones.
    pub fn correct_answer(&self) -> &str {
        let mut answer = NO_CORRECT_ANSWER;
        for option in &self.options {
            if option.is_correct_answer {
                answer = option.text.as_str();
            }
        }
        answer
    }

    /// The question image reference, ignoring blank paths.
    pub fn media_path(&self) -> Option<&str> {
        self.question_media_path
            .as_deref()
            .filter(|path| !path.trim().is_empty())
    }
}

/// Render a loose JSON value as display text: strings verbatim, `null` as empty,
/// everything else as its JSON text.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn string_field(value: &Value, key: &str) -> String {
    value
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// The first of `names` present in `fields`.
fn lookup<'a>(fields: &'a Map<String, Value>, names: &[&str]) -> Option<&'a Value> {
    names.iter().find_map(|name| fields.get(*name))
}

/// Decode one field on its own; missing or mistyped values give the default.
fn field<T>(fields: &Map<String, Value>, names: &[&str]) -> T
where
    T: DeserializeOwned + Default,
{
    lookup(fields, names)
        .and_then(|value| T::deserialize(value).ok())
        .unwrap_or_default()
}

/// Decode a list item by item; items `decode` rejects are dropped and a
/// non-list value becomes an empty list.
fn list<T, F>(fields: &Map<String, Value>, names: &[&str], decode: F) -> Vec<T>
where
    F: Fn(&Value) -> Option<T>,
{
    match lookup(fields, names) {
        Some(Value::Array(items)) => items.iter().filter_map(decode).collect(),
        _ => Vec::new(),
    }
}
