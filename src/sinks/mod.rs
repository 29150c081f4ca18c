//! Output stages: HTML assembly and delegated PDF rendering.

pub mod html;
pub mod pdf;

pub use pdf::{DocumentRenderer, ExternalRenderer, RenderError};
