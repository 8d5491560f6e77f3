use std::path::{Path, PathBuf};

use ai4s_core::{GeneratedArticle, Result};
use ai4s_markup::{write_export, ExportFormat};

use crate::copy::CopyAcknowledgement;

/// Export actions available on the last generated article.
pub trait ArticleExports {
    /// Raw HTML for the clipboard; raises `ack`.
    fn copy_html(&self, ack: &CopyAcknowledgement) -> &str;

    /// Write `<slug>.html` into `dir`.
    fn export_html(&self, dir: &Path) -> Result<PathBuf>;

    /// Write `<slug>.md` into `dir`.
    fn export_markdown(&self, dir: &Path) -> Result<PathBuf>;
}

impl ArticleExports for GeneratedArticle {
    fn copy_html(&self, ack: &CopyAcknowledgement) -> &str {
        ack.raise();
        self.clipboard_text()
    }

    fn export_html(&self, dir: &Path) -> Result<PathBuf> {
        write_export(dir, self.topic(), self.content(), ExportFormat::Html)
    }

    fn export_markdown(&self, dir: &Path) -> Result<PathBuf> {
        write_export(dir, self.topic(), self.content(), ExportFormat::Markdown)
    }
}
