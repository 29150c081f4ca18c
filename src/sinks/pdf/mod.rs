//! PDF output through an external HTML renderer.
//!
//! We don't lay out pages ourselves; the assembled HTML document is handed to
//! a headless-browser script (or any compatible program) that prints it. The
//! call blocks until that process exits.

mod config;
pub use config::ExternalRenderer;

use log::debug;
use std::path::Path;
use std::process::Command;

/// Why the delegated renderer didn't produce a PDF.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Failed to launch PDF renderer `{program}`: {source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("PDF renderer failed: {detail}")]
    Failed { status: Option<i32>, detail: String },
}

/// Something that turns an HTML document on disk into a PDF on disk.
pub trait DocumentRenderer: Send + Sync {
    fn render(&self, document: &Path, output: &Path) -> Result<(), RenderError>;
}

impl DocumentRenderer for ExternalRenderer {
    fn render(&self, document: &Path, output: &Path) -> Result<(), RenderError> {
        let mut command = Command::new(&self.program);
        command.args(&self.args).arg(document).arg(output);

        #[cfg(windows)]
        {
            use std::os::windows::process::CommandExt;
            const CREATE_NO_WINDOW: u32 = 0x0800_0000;
            command.creation_flags(CREATE_NO_WINDOW);
        }

        debug!("Running {command:?}");
        let result = command.output().map_err(|source| RenderError::Launch {
            program: self.program.display().to_string(),
            source,
        })?;

        if result.status.success() {
            return Ok(());
        }

        let stderr = String::from_utf8_lossy(&result.stderr);
        let stderr = stderr.trim_end();
        let detail = if stderr.is_empty() {
            format!("exited with {}", result.status)
        } else {
            stderr.to_string()
        };
        Err(RenderError::Failed {
            status: result.status.code(),
            detail,
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn missing_program_is_a_launch_error() {
        let dir = tempfile::tempdir().expect("can create temp dir");
        let renderer = ExternalRenderer::new(dir.path().join("no-such-renderer"));
        let err = renderer
            .render(&dir.path().join("in.html"), &dir.path().join("out.pdf"))
            .expect_err("renderer can't launch");

        assert!(matches!(err, RenderError::Launch { .. }));
        assert!(err.to_string().starts_with("Failed to launch PDF renderer"));
    }

    #[cfg(unix)]
    #[test]
    fn passes_document_and_output_as_trailing_arguments() {
        let dir = tempfile::tempdir().expect("can create temp dir");
        let document = dir.path().join("in.html");
        let output = dir.path().join("out.pdf");
        std::fs::write(&document, "<html></html>").expect("can write document");

        // with `sh -c`, the next two arguments become $0 and $1
        let renderer = ExternalRenderer::new("sh").arg("-c").arg(r#"cp "$0" "$1""#);
        renderer.render(&document, &output).expect("renderer succeeds");

        assert_eq!(
            std::fs::read_to_string(&output).expect("output exists"),
            "<html></html>"
        );
    }

    #[cfg(unix)]
    #[test]
    fn non_zero_exit_surfaces_stderr() {
        let dir = tempfile::tempdir().expect("can create temp dir");
        let renderer = ExternalRenderer::new("sh")
            .arg("-c")
            .arg("echo 'TimeoutError: Navigation timeout' >&2; exit 3");
        let err = renderer
            .render(&dir.path().join("in.html"), &dir.path().join("out.pdf"))
            .expect_err("renderer fails");

        match &err {
            RenderError::Failed { status, detail } => {
                assert_eq!(*status, Some(3));
                assert_eq!(detail, "TimeoutError: Navigation timeout");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(
            err.to_string(),
            "PDF renderer failed: TimeoutError: Navigation timeout"
        );
    }

    #[cfg(unix)]
    #[test]
    fn silent_failure_reports_exit_status() {
        let dir = tempfile::tempdir().expect("can create temp dir");
        let renderer = ExternalRenderer::new("sh").arg("-c").arg("exit 1");
        let err = renderer
            .render(&dir.path().join("in.html"), &dir.path().join("out.pdf"))
            .expect_err("renderer fails");
        assert!(err.to_string().starts_with("PDF renderer failed: exited with"));
    }
}
