//! `quill export` command implementation.
//!
//! Rasterization and document packaging are external collaborators: the
//! PDF path drives a headless browser binary, the Word path writes the
//! paragraph tree as JSON for the downstream document packager.

use std::fs;
use std::path::PathBuf;
use std::process::Command;

use clap::{Args, ValueEnum};
use quill_config::{CliSettings, Config};
use quill_export::{
    CollaboratorError, DocPackager, PdfRasterizer, export_pdf, export_word,
};
use quill_history::HistoryStore;
use quill_markdown::DocParagraph;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the export command.
#[derive(Args)]
pub(crate) struct ExportArgs {
    /// Markdown file to export.
    #[arg(required_unless_present = "entry", conflicts_with = "entry")]
    input: Option<PathBuf>,

    /// Export a history entry by id instead of a file.
    #[arg(short, long)]
    entry: Option<String>,

    /// Export format.
    #[arg(short, long, value_enum)]
    format: ExportFormat,

    /// Document title (default: the input file stem or the entry topic).
    #[arg(short, long)]
    title: Option<String>,

    /// Output directory (overrides config).
    #[arg(short, long)]
    out_dir: Option<PathBuf>,

    /// Headless browser binary used for PDF rasterization.
    #[arg(long, default_value = "chromium")]
    browser: String,

    /// Path to configuration file (default: auto-discover quill.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

/// Export target format.
#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ExportFormat {
    /// Rasterized PDF document.
    Pdf,
    /// Word paragraph tree (JSON, consumed by the document packager).
    Word,
}

impl ExportArgs {
    /// Execute the export command.
    ///
    /// # Errors
    ///
    /// Returns an error when the source cannot be read, the collaborator
    /// fails, or the artifact cannot be written.
    pub(crate) fn execute(self, output: &Output) -> Result<(), CliError> {
        let cli_settings = CliSettings {
            output_dir: self.out_dir.clone(),
            ..Default::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        let (markdown, title) = self.load_source(&config)?;

        let (file_name, data) = match self.format {
            ExportFormat::Pdf => {
                let rasterizer = BrowserRasterizer {
                    binary: self.browser.clone(),
                };
                let export = export_pdf(&markdown, &title, &rasterizer)?;
                (export.file_name, export.data)
            }
            ExportFormat::Word => {
                let export = export_word(&markdown, &title, &JsonPackager)?;
                // The JSON tree is the packager input, not a finished .docx.
                (format!("{}.json", export.file_name), export.data)
            }
        };

        fs::create_dir_all(&config.export_resolved.output_dir)?;
        let target = config.export_resolved.output_dir.join(file_name);
        fs::write(&target, data)?;
        output.success(&format!("Exported {}", target.display()));
        Ok(())
    }

    /// Resolve the markdown source and document title.
    fn load_source(&self, config: &Config) -> Result<(String, String), CliError> {
        if let Some(id) = &self.entry {
            let store = HistoryStore::new(config.history_resolved.path.clone());
            let entry = store
                .load()
                .into_iter()
                .find(|entry| entry.id == *id)
                .ok_or_else(|| {
                    CliError::Validation(format!("no history entry with id {id}"))
                })?;
            let title = self.title.clone().unwrap_or_else(|| entry.topic.clone());
            return Ok((entry.content, title));
        }

        let Some(input) = &self.input else {
            return Err(CliError::Validation(
                "either a markdown file or --entry is required".to_owned(),
            ));
        };
        let markdown = fs::read_to_string(input)?;
        let title = self.title.clone().unwrap_or_else(|| {
            input
                .file_stem()
                .map_or_else(|| "Untitled".to_owned(), |stem| stem.to_string_lossy().into_owned())
        });
        Ok((markdown, title))
    }
}

/// Rasterizes the printable page by driving a headless browser binary.
struct BrowserRasterizer {
    binary: String,
}

impl PdfRasterizer for BrowserRasterizer {
    fn rasterize(&self, html: &str) -> Result<Vec<u8>, CollaboratorError> {
        let scratch = tempfile::tempdir()?;
        let page = scratch.path().join("page.html");
        let pdf = scratch.path().join("page.pdf");
        fs::write(&page, html)?;

        tracing::debug!("rasterizing with {}", self.binary);
        let status = Command::new(&self.binary)
            .arg("--headless")
            .arg("--disable-gpu")
            .arg(format!("--print-to-pdf={}", pdf.display()))
            .arg(&page)
            .status()?;
        if !status.success() {
            return Err(format!("{} exited with {status}", self.binary).into());
        }
        Ok(fs::read(&pdf)?)
    }
}

/// Packages the paragraph tree as pretty-printed JSON for the document
/// packager.
struct JsonPackager;

impl DocPackager for JsonPackager {
    fn package(&self, paragraphs: &[DocParagraph]) -> Result<Vec<u8>, CollaboratorError> {
        Ok(serde_json::to_vec_pretty(paragraphs)?)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use quill_export::DocPackager;
    use quill_markdown::{BlockRenderer, DocRenderer, assemble};

    use super::JsonPackager;

    #[test]
    fn test_json_packager_round_trips() {
        let paragraphs = DocRenderer::new("Topic").render(&assemble("# H\n\ntext"));
        let bytes = JsonPackager.package(&paragraphs).unwrap();
        let parsed: Vec<quill_markdown::DocParagraph> =
            serde_json::from_slice(&bytes).unwrap();
        assert_eq!(parsed, paragraphs);
    }
}
