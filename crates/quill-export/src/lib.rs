//! Export orchestration for Quill.
//!
//! Converts generated markdown into the two export payloads and hands
//! them to external collaborators: a [`PdfRasterizer`] for the PDF path
//! and a [`DocPackager`] for the Word path. The conversion itself never
//! fails; only collaborator failures surface, as exactly one condition
//! per format ([`ExportError`]).
//!
//! Each export is a one-shot, independent operation. Every call assembles
//! its own block sequence; nothing is cached or shared between calls.

mod error;
mod filename;
mod page;

use std::time::{SystemTime, UNIX_EPOCH};

use quill_markdown::{BlockRenderer, DocParagraph, DocRenderer, HtmlRenderer, assemble};

pub use error::{CollaboratorError, ExportError};
pub use filename::sanitize_file_name;
pub use page::page_document;

/// External collaborator turning a printable HTML page into PDF bytes.
pub trait PdfRasterizer {
    /// Rasterize a complete HTML document into PDF bytes.
    fn rasterize(&self, html: &str) -> Result<Vec<u8>, CollaboratorError>;
}

/// External collaborator packaging a paragraph tree into a document blob.
pub trait DocPackager {
    /// Package the paragraph tree into document bytes.
    fn package(&self, paragraphs: &[DocParagraph]) -> Result<Vec<u8>, CollaboratorError>;
}

/// A finished export: suggested file name plus payload bytes.
#[derive(Debug)]
pub struct Export {
    /// Suggested file name, `{sanitized-topic}_{unix-millis}.{ext}`.
    pub file_name: String,
    /// Payload produced by the collaborator.
    pub data: Vec<u8>,
}

/// Export markdown as a PDF via the given rasterizer.
///
/// # Errors
///
/// Returns [`ExportError::Pdf`] when the rasterizer fails; the cause is
/// logged and kept as the error source.
pub fn export_pdf(
    markdown: &str,
    topic: &str,
    rasterizer: &impl PdfRasterizer,
) -> Result<Export, ExportError> {
    let blocks = assemble(markdown);
    let html = page_document(&HtmlRenderer.render(&blocks));
    let data = rasterizer.rasterize(&html).map_err(|cause| {
        tracing::error!("PDF rasterization failed: {cause}");
        ExportError::Pdf(cause)
    })?;
    Ok(Export {
        file_name: export_file_name(topic, "pdf"),
        data,
    })
}

/// Export markdown as a Word document via the given packager.
///
/// The document tree gets a title paragraph from `topic` before packaging.
///
/// # Errors
///
/// Returns [`ExportError::Word`] when the packager fails; the cause is
/// logged and kept as the error source.
pub fn export_word(
    markdown: &str,
    topic: &str,
    packager: &impl DocPackager,
) -> Result<Export, ExportError> {
    let blocks = assemble(markdown);
    let paragraphs = DocRenderer::new(topic).render(&blocks);
    let data = packager.package(&paragraphs).map_err(|cause| {
        tracing::error!("Word packaging failed: {cause}");
        ExportError::Word(cause)
    })?;
    Ok(Export {
        file_name: export_file_name(topic, "docx"),
        data,
    })
}

/// Build the `{stem}_{timestamp}.{ext}` artifact name.
fn export_file_name(topic: &str, extension: &str) -> String {
    format!(
        "{}_{}.{extension}",
        sanitize_file_name(topic),
        unix_millis()
    )
}

fn unix_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_millis())
}
