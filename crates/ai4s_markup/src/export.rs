use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use ai4s_core::{Error, Result};

use crate::markdown::html_to_markdown;
use crate::slug::slugify;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Html,
    Markdown,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Html => "html",
            ExportFormat::Markdown => "md",
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            ExportFormat::Html => "text/html",
            ExportFormat::Markdown => "text/markdown",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportFormat::Html => write!(f, "html"),
            ExportFormat::Markdown => write!(f, "markdown"),
        }
    }
}

impl FromStr for ExportFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "html" => Ok(ExportFormat::Html),
            "markdown" | "md" => Ok(ExportFormat::Markdown),
            other => Err(Error::Validation(format!("Unknown export format: {other}"))),
        }
    }
}

pub fn export_file_name(topic: &str, format: ExportFormat) -> String {
    format!("{}.{}", slugify(topic), format.extension())
}

/// File body for an export: the HTML verbatim, or its Markdown approximation.
pub fn render_export(content: &str, format: ExportFormat) -> String {
    match format {
        ExportFormat::Html => content.to_string(),
        ExportFormat::Markdown => html_to_markdown(content),
    }
}

/// Write an export into `dir`, returning the path of the new file.
pub fn write_export(dir: &Path, topic: &str, content: &str, format: ExportFormat) -> Result<PathBuf> {
    let path = dir.join(export_file_name(topic, format));
    std::fs::write(&path, render_export(content, format))?;
    tracing::info!(path = %path.display(), format = %format, "article exported");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_names() {
        assert_eq!(export_file_name("AI & the Future!", ExportFormat::Html), "ai---the-future.html");
        assert_eq!(export_file_name("AI & the Future!", ExportFormat::Markdown), "ai---the-future.md");
    }

    #[test]
    fn test_parse_format() {
        assert_eq!("HTML".parse::<ExportFormat>().unwrap(), ExportFormat::Html);
        assert_eq!("md".parse::<ExportFormat>().unwrap(), ExportFormat::Markdown);
        assert!("pdf".parse::<ExportFormat>().is_err());
    }

    #[test]
    fn test_write_exports() {
        let dir = tempfile::tempdir().unwrap();
        let content = "<h1>Title</h1><p>Body</p><ul><li>Item</li></ul>";

        let html_path = write_export(dir.path(), "My Title", content, ExportFormat::Html).unwrap();
        assert_eq!(html_path.file_name().unwrap(), "my-title.html");
        assert_eq!(std::fs::read_to_string(&html_path).unwrap(), content);

        let md_path = write_export(dir.path(), "My Title", content, ExportFormat::Markdown).unwrap();
        assert_eq!(md_path.file_name().unwrap(), "my-title.md");
        assert_eq!(std::fs::read_to_string(&md_path).unwrap(), "# Title\n\nBody\n\n- Item\n");
    }
}
