//! `quill generate` command implementation.

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use clap::Args;
use quill_client::{GenerationClient, GenerationRequest, Tone, build_prompt};
use quill_config::Config;
use quill_export::sanitize_file_name;
use quill_history::{HistoryEntry, HistoryStore};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the generate command.
#[derive(Args)]
pub(crate) struct GenerateArgs {
    /// Topic to write about.
    topic: String,

    /// Tone of voice (professional, casual, enthusiastic, informative,
    /// humorous, persuasive).
    #[arg(short, long, default_value = "professional")]
    tone: String,

    /// Comma-separated keywords to incorporate.
    #[arg(short, long, default_value = "")]
    keywords: String,

    /// Approximate length in words (50-1000, default 200).
    #[arg(short, long)]
    length: Option<u32>,

    /// Output markdown file (default: derived from the topic).
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// Print the composed prompt instead of calling the backend.
    #[arg(long)]
    dry_run: bool,

    /// Do not record the result in the local history.
    #[arg(long)]
    no_save: bool,

    /// Path to configuration file (default: auto-discover quill.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl GenerateArgs {
    /// Execute the generate command.
    ///
    /// # Errors
    ///
    /// Returns an error on invalid parameters, backend failure, or when
    /// writing the output file fails.
    pub(crate) fn execute(self, output: &Output) -> Result<(), CliError> {
        let config = Config::load(self.config.as_deref(), None)?;
        let tone: Tone = self.tone.parse()?;
        let request = GenerationRequest::new(&self.topic, tone, &self.keywords, self.length)?;

        if self.dry_run {
            output.highlight("Prompt that would be sent:");
            output.info(&build_prompt(&request));
            return Ok(());
        }

        let client = GenerationClient::with_timeout(
            &config.api.base_url,
            Duration::from_secs(config.api.timeout_secs),
        );
        output.info(&format!("Requesting content from {}", config.api.base_url));
        let generated = client.generate(&request)?;

        let path = self.out.unwrap_or_else(|| {
            PathBuf::from(format!("{}.md", sanitize_file_name(&request.topic)))
        });
        fs::write(&path, &generated.content)?;
        output.success(&format!("Wrote {}", path.display()));

        if let Some(metadata) = &generated.metadata {
            output.info(&format!(
                "Generated {} words (requested {})",
                metadata.actual_length, metadata.requested_length
            ));
        }

        if !self.no_save {
            let store = HistoryStore::new(config.history_resolved.path.clone());
            store.record(HistoryEntry::new(
                &request.topic,
                tone.label(),
                &request.keywords,
                request.content_length,
                &generated.content,
            ))?;
            tracing::info!("recorded history entry at {}", store.path().display());
        }

        Ok(())
    }
}
