//! Static site generation pipeline.
//!
//! Turns a tree of markdown sources into a mirrored tree of HTML pages.
//! The pipeline has three phases: clear the output directory, copy static
//! assets into it, then walk the content directory and render every
//! markdown file through the page template.
//!
//! [`assets`] handles the destructive output reset and the asset copy;
//! [`generator`] owns the template and the markdown-to-page conversion.

pub mod assets;
pub mod generator;

use std::path::PathBuf;

pub use assets::{clean_output, copy_static};
pub use generator::{SiteGenerator, CONTENT_PLACEHOLDER, TITLE_PLACEHOLDER};

/// Error produced by the site generation pipeline.
#[derive(Debug, thiserror::Error)]
pub enum SiteError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Template file is missing a required placeholder.
    #[error("Template {} is missing the {placeholder} placeholder", .path.display())]
    MissingPlaceholder {
        /// Path to the template file.
        path: PathBuf,
        /// The placeholder that was not found.
        placeholder: &'static str,
    },
    /// A markdown source failed to convert.
    #[error("Failed to convert {}: {source}", .path.display())]
    Convert {
        /// Path to the markdown source file.
        path: PathBuf,
        /// Underlying conversion error.
        source: mdsite_markdown::DocumentError,
    },
    /// A converted document tree failed to render.
    #[error("Failed to render {}: {source}", .path.display())]
    Render {
        /// Path to the markdown source file.
        path: PathBuf,
        /// Underlying render error.
        source: mdsite_markdown::RenderError,
    },
}
