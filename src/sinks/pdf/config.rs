use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// External HTML-to-PDF renderer configuration.
///
/// The renderer is invoked as `program args... <document.html> <output.pdf>`
/// and must exit with status zero once it has written the output file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalRenderer {
    /// Executable to launch, looked up on `PATH` if not a path
    #[serde(default = "default_program")]
    pub program: PathBuf,
    /// Leading arguments, placed before the document and output paths
    #[serde(default = "default_args")]
    pub args: Vec<String>,
}

fn default_program() -> PathBuf {
    PathBuf::from("node")
}
fn default_args() -> Vec<String> {
    vec!["generate_pdf.js".to_string()]
}

impl Default for ExternalRenderer {
    fn default() -> Self {
        ExternalRenderer {
            program: default_program(),
            args: default_args(),
        }
    }
}

impl ExternalRenderer {
    pub fn new<P: Into<PathBuf>>(program: P) -> ExternalRenderer {
        ExternalRenderer {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg<S: ToString>(mut self, arg: S) -> ExternalRenderer {
        self.args.push(arg.to_string());
        self
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn can_serialize_renderer() {
        let renderer = ExternalRenderer::default();
        toml::to_string(&renderer).expect("can serialize renderer to TOML");
    }

    #[test]
    fn missing_fields_take_defaults() {
        let renderer: ExternalRenderer =
            toml::from_str(r#"program = "wkhtmltopdf""#).expect("can deserialize");
        assert_eq!(renderer.program, PathBuf::from("wkhtmltopdf"));
        assert_eq!(renderer.args, default_args());
    }
}
