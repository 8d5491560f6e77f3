//! Conversions applied to generated article content.
//!
//! The two directions are independent one-way transforms:
//! [`markdown_to_html`] normalizes oracle output on the service side, and
//! [`html_to_markdown`] produces the lossy Markdown export on the client side.

pub mod export;
pub mod html;
pub mod markdown;
pub mod slug;

pub use export::{export_file_name, render_export, write_export, ExportFormat};
pub use html::{markdown_to_html, strip_code_fence};
pub use markdown::html_to_markdown;
pub use slug::slugify;
