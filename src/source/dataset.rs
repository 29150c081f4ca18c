use crate::question::QuestionRecord;
use anyhow::{anyhow, Context, Result};
use serde_json::Value;
use std::path::Path;

/// The records found in one folder's dataset file, in file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    pub records: Vec<QuestionRecord>,
}

impl Dataset {
    /// Load a dataset file.
    ///
    /// Returns `Ok(None)` if the file doesn't exist. The top level must be a JSON
    /// array; individual entries are decoded leniently.
    pub fn load(path: &Path) -> Result<Option<Dataset>> {
        if !path.is_file() {
            return Ok(None);
        }

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Dataset::parse(&contents)
            .with_context(|| format!("Failed to parse {}", path.display()))
            .map(Some)
    }

    pub fn parse(contents: &str) -> Result<Dataset> {
        let value: Value = serde_json::from_str(contents).with_context(|| "Invalid JSON")?;
        let Value::Array(entries) = value else {
            return Err(anyhow!("Expected a list of questions at the top level"));
        };

        Ok(Dataset {
            records: entries.into_iter().map(QuestionRecord::from_value).collect(),
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn can_parse_dataset() {
        let dataset = Dataset::parse(
            r#"[
                {"question_number": 1, "text": "one"},
                "garbage",
                {"question_number": 3, "text": "three"}
            ]"#,
        )
        .expect("can parse dataset");

        assert_eq!(dataset.records.len(), 3);
        assert_eq!(dataset.records[0].text, "one");
        assert_eq!(dataset.records[1], QuestionRecord::default());
        assert_eq!(dataset.records[2].display_number(), "3");
    }

    #[test]
    fn empty_list_is_an_empty_dataset() {
        let dataset = Dataset::parse("[]").expect("can parse dataset");
        assert!(dataset.records.is_empty());
    }

    #[test]
    fn top_level_object_is_rejected() {
        assert!(Dataset::parse(r#"{"questions": []}"#).is_err());
    }

    #[test]
    fn missing_file_is_none() {
        let dir = tempfile::tempdir().expect("can create temp dir");
        let loaded = Dataset::load(&dir.path().join("questions.json")).expect("load succeeds");
        assert_eq!(loaded, None);
    }
}
