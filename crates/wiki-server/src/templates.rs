//! HTML templates.
//!
//! The template set is compiled once at startup and shared read-only by all
//! handlers. Built-in templates are embedded in the binary; a template
//! directory can override any of them by file name.

use std::path::{Path, PathBuf};

use minijinja::{Environment, context};
use wiki_storage::{Page, RECORD_EXTENSION};

/// Template showing a single page.
pub(crate) const VIEW: &str = "view.html";
/// Template with the page edit form.
pub(crate) const EDIT: &str = "edit.html";
/// Template listing all pages.
pub(crate) const FRONT_PAGE: &str = "front_page.html";

const BUILTIN: [(&str, &str); 3] = [
    (VIEW, include_str!("../templates/view.html")),
    (EDIT, include_str!("../templates/edit.html")),
    (FRONT_PAGE, include_str!("../templates/front_page.html")),
];

/// Error loading templates at startup.
#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    /// Template directory could not be turned into a glob pattern.
    #[error("Invalid template pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    /// Directory entry could not be read while matching.
    #[error("Template directory error: {0}")]
    Glob(#[from] glob::GlobError),

    /// Template file could not be read.
    #[error("Failed to read template {}: {source}", path.display())]
    Io {
        /// Template file path.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },

    /// Template failed to compile.
    #[error("Template syntax error: {0}")]
    Syntax(#[from] minijinja::Error),
}

/// Compiled template set.
#[derive(Debug)]
pub(crate) struct Templates {
    env: Environment<'static>,
}

impl Templates {
    /// Load the built-in templates, then every `*.html` file in `dir`.
    ///
    /// A file in `dir` replaces the built-in template with the same name.
    pub(crate) fn load(dir: Option<&Path>) -> Result<Self, TemplateError> {
        let mut env = Environment::new();
        env.add_filter("strip_ext", strip_ext);

        for (name, source) in BUILTIN {
            env.add_template(name, source)?;
        }

        if let Some(dir) = dir {
            let pattern = format!("{}/*.html", glob::Pattern::escape(&dir.to_string_lossy()));
            for entry in glob::glob(&pattern)? {
                let path = entry?;
                let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                    continue;
                };
                let source = std::fs::read_to_string(&path).map_err(|source| {
                    TemplateError::Io {
                        path: path.clone(),
                        source,
                    }
                })?;
                tracing::debug!(template = name, path = %path.display(), "Loaded template");
                env.add_template_owned(name.to_owned(), source)?;
            }
        }

        Ok(Self { env })
    }

    /// Load the built-in templates only.
    #[cfg(test)]
    pub(crate) fn builtin() -> Self {
        Self::load(None).unwrap()
    }

    /// Render a page template (`view.html` or `edit.html`).
    pub(crate) fn render_page(&self, name: &str, page: &Page) -> Result<String, minijinja::Error> {
        self.env.get_template(name)?.render(page)
    }

    /// Render the front page with the list of page identifiers.
    pub(crate) fn render_front_page(&self, pages: &[String]) -> Result<String, minijinja::Error> {
        self.env
            .get_template(FRONT_PAGE)?
            .render(context! { pages => pages })
    }
}

/// Remove the page record suffix from a stored file name.
fn strip_ext(value: &str) -> String {
    value.replace(&format!(".{RECORD_EXTENSION}"), "")
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    fn page() -> Page {
        Page {
            path: "Home".to_owned(),
            title: "Welcome".to_owned(),
            body: "Hello <b>world</b>".to_owned(),
            footer: "The end".to_owned(),
        }
    }

    #[test]
    fn test_view_renders_fields() {
        let html = Templates::builtin().render_page(VIEW, &page()).unwrap();

        assert!(html.contains("<title>Welcome</title>"));
        assert!(html.contains("The end"));
        assert!(html.contains("href=\"/edit/Home\""));
    }

    #[test]
    fn test_view_escapes_body() {
        let html = Templates::builtin().render_page(VIEW, &page()).unwrap();

        assert!(html.contains("Hello &lt;b&gt;world&lt;"));
        assert!(!html.contains("<b>"));
    }

    #[test]
    fn test_edit_renders_form() {
        let html = Templates::builtin().render_page(EDIT, &page()).unwrap();

        assert!(html.contains("action=\"/save/Home\""));
        assert!(html.contains("name=\"title\" value=\"Welcome\""));
        assert!(html.contains("name=\"body\""));
        assert!(html.contains("name=\"footer\""));
    }

    #[test]
    fn test_front_page_lists_pages() {
        let pages = vec!["Alpha".to_owned(), "Beta".to_owned()];

        let html = Templates::builtin().render_front_page(&pages).unwrap();

        assert!(html.contains("href=\"/view/Alpha\""));
        assert!(html.contains("href=\"/view/Beta\""));
        assert!(!html.contains("No pages yet"));
    }

    #[test]
    fn test_front_page_empty() {
        let html = Templates::builtin().render_front_page(&[]).unwrap();

        assert!(html.contains("No pages yet"));
        assert!(!html.contains("/view/"));
    }

    #[test]
    fn test_strip_ext() {
        assert_eq!(strip_ext("Home.json"), "Home");
        assert_eq!(strip_ext("Home"), "Home");
        assert_eq!(strip_ext("Home.txt"), "Home.txt");
    }

    #[test]
    fn test_directory_overrides_builtin() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(
            temp_dir.path().join("view.html"),
            "custom {{ Title }} / {{ Path | strip_ext }}",
        )
        .unwrap();

        let templates = Templates::load(Some(temp_dir.path())).unwrap();
        let html = templates.render_page(VIEW, &page()).unwrap();

        assert_eq!(html, "custom Welcome / Home");
        // Untouched templates keep the built-in version
        let edit = templates.render_page(EDIT, &page()).unwrap();
        assert!(edit.contains("action=\"/save/Home\""));
    }

    #[test]
    fn test_directory_ignores_non_html_files() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("view.txt"), "{{ broken").unwrap();

        let templates = Templates::load(Some(temp_dir.path())).unwrap();

        assert!(templates.render_page(VIEW, &page()).is_ok());
    }

    #[test]
    fn test_directory_syntax_error_fails_load() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("edit.html"), "{% if %}").unwrap();

        let err = Templates::load(Some(temp_dir.path())).unwrap_err();

        assert!(matches!(err, TemplateError::Syntax(_)));
    }

    #[test]
    fn test_missing_directory_keeps_builtins() {
        let temp_dir = TempDir::new().unwrap();

        let templates = Templates::load(Some(&temp_dir.path().join("absent"))).unwrap();

        assert!(templates.render_front_page(&[]).is_ok());
    }
}
