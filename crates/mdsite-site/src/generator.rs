//! Markdown-to-HTML page generation.
//!
//! The generator walks the content tree and renders each markdown file
//! through the page template, mirroring the directory structure into the
//! output tree (`content/blog/post.md` becomes `public/blog/post.html`).

use std::fs;
use std::path::{Path, PathBuf};

use mdsite_markdown::{build, extract_title};

use crate::SiteError;

/// Placeholder in the template replaced with the rendered page body.
pub const CONTENT_PLACEHOLDER: &str = "{{ Content }}";

/// Placeholder in the template replaced with the page title.
pub const TITLE_PLACEHOLDER: &str = "{{ Title }}";

/// Renders markdown pages through a shared HTML template.
///
/// The template is read once and validated up front; a template missing
/// either placeholder would silently produce broken pages for every file,
/// so it is rejected before any page is generated.
#[derive(Debug)]
pub struct SiteGenerator {
    template: String,
}

impl SiteGenerator {
    /// Create a generator from an HTML template string.
    ///
    /// # Errors
    ///
    /// Returns `SiteError::MissingPlaceholder` if the template lacks
    /// `{{ Content }}` or `{{ Title }}`.
    pub fn new(template: String) -> Result<Self, SiteError> {
        Self::validate_template(&template, Path::new("<inline>"))?;
        Ok(Self { template })
    }

    /// Create a generator by reading the template from a file.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file can't be read, or
    /// `SiteError::MissingPlaceholder` if a placeholder is absent.
    pub fn from_template_file(path: &Path) -> Result<Self, SiteError> {
        let template = fs::read_to_string(path)?;
        Self::validate_template(&template, path)?;
        Ok(Self { template })
    }

    fn validate_template(template: &str, path: &Path) -> Result<(), SiteError> {
        for placeholder in [TITLE_PLACEHOLDER, CONTENT_PLACEHOLDER] {
            if !template.contains(placeholder) {
                return Err(SiteError::MissingPlaceholder {
                    path: path.to_path_buf(),
                    placeholder,
                });
            }
        }
        Ok(())
    }

    /// Generate HTML pages for every markdown file under `content_dir`.
    ///
    /// Walks the content tree recursively. Each `.md` file produces an
    /// `.html` file at the mirrored location under `output_dir`; other
    /// files are ignored. Returns the number of pages generated.
    ///
    /// # Errors
    ///
    /// Any I/O, conversion, or render failure aborts the whole run.
    pub fn generate_site(&self, content_dir: &Path, output_dir: &Path) -> Result<usize, SiteError> {
        let mut generated = 0;
        self.generate_directory(content_dir, output_dir, &mut generated)?;
        Ok(generated)
    }

    fn generate_directory(
        &self,
        src_dir: &Path,
        dest_dir: &Path,
        generated: &mut usize,
    ) -> Result<(), SiteError> {
        for entry in fs::read_dir(src_dir)? {
            let entry = entry?;
            let src_path = entry.path();

            if entry.file_type()?.is_dir() {
                self.generate_directory(&src_path, &dest_dir.join(entry.file_name()), generated)?;
            } else if is_markdown(&src_path) {
                let dest_path = dest_dir.join(PathBuf::from(entry.file_name()).with_extension("html"));
                self.generate_page(&src_path, &dest_path)?;
                *generated += 1;
            }
        }
        Ok(())
    }

    /// Render a single markdown file into an HTML page.
    ///
    /// # Errors
    ///
    /// Returns an error if the source can't be read, conversion or
    /// rendering fails, or the output can't be written.
    pub fn generate_page(&self, src_path: &Path, dest_path: &Path) -> Result<(), SiteError> {
        tracing::info!(
            source = %src_path.display(),
            dest = %dest_path.display(),
            "generating page"
        );

        let markdown = fs::read_to_string(src_path)?;
        let page = self.render_page(&markdown, src_path)?;

        if let Some(parent) = dest_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(dest_path, page)?;
        Ok(())
    }

    /// Substitute a markdown document into the template.
    fn render_page(&self, markdown: &str, src_path: &Path) -> Result<String, SiteError> {
        let document = build(markdown).map_err(|source| SiteError::Convert {
            path: src_path.to_path_buf(),
            source,
        })?;
        let content = document.render().map_err(|source| SiteError::Render {
            path: src_path.to_path_buf(),
            source,
        })?;
        let title = extract_title(markdown).map_err(|source| SiteError::Convert {
            path: src_path.to_path_buf(),
            source,
        })?;

        Ok(self
            .template
            .replace(TITLE_PLACEHOLDER, &title)
            .replace(CONTENT_PLACEHOLDER, &content))
    }
}

/// Markdown check by file extension, case-insensitive.
fn is_markdown(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("md"))
}
