//! The stylesheet embedded in every generated document.
//!
//! Sized for printing: the renderer lays the document out on A4/Letter pages
//! with a 1cm margin, so everything is specified in points.

/// Web font loaded by the renderer before printing.
pub const FONT_STYLESHEET_URL: &str =
    "https://fonts.googleapis.com/css2?family=Roboto:wght@400;700&display=swap";

pub const STYLESHEET: &str = r#"
@page { margin: 1cm; }
body { font-family: 'Roboto', 'Noto Color Emoji', sans-serif; font-size: 13pt; font-weight: 400; line-height: 1.5; color: #1a1a1a; margin: 0; }
h1 { font-size: 12pt; font-weight: bold; color: #000; margin-top: 1.5em; margin-bottom: 8px; padding-bottom: 4px; border-bottom: 1px solid #eaeaea; }
h1:first-child { margin-top: 0; }
h2 { font-size: 11pt; font-weight: bold; color: #333; margin-top: 1em; margin-bottom: 0.5em; }
p { margin-top: 0; margin-bottom: 1em; }
pre { background-color: #f4f4f4; border: 1px solid #ddd; border-radius: 4px; padding: 1em; white-space: pre-wrap; word-wrap: break-word; }
code { font-family: 'Courier New', Courier, monospace; font-size: 12pt; }
img { max-width: 100%; height: auto; }
table { width: 100%; border-collapse: collapse; margin-bottom: 1em; font-size: 11pt; background: #fff; }
table th { background: #f7f7f7; color: #333; font-weight: bold; padding: 10px 8px; border: 1px solid #e0e0e0; text-align: left; }
table td { padding: 10px 8px; border: 1px solid #e0e0e0; color: #222; }
table tr:nth-child(even) { background: #fafafa; }
.correct-answer { color: #0b6e2e; }
.labels { margin-bottom: 1em; }
.label { display: inline-block; font-size: 9pt; padding: 2px 8px; margin: 0 4px 4px 0; border-radius: 10px; background: #eef2ff; color: #3730a3; border: 1px solid #c7d2fe; }
.page-break { page-break-after: always; break-after: page; }
.module-header { display: flex; align-items: center; justify-content: center; height: 90vh; }
.module-title { font-size: 32pt; border-bottom: none; text-align: center; }
"#;
