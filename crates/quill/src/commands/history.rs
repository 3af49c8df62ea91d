//! `quill history` command implementation.

use std::path::PathBuf;

use clap::{Args, Subcommand};
use quill_config::Config;
use quill_history::HistoryStore;

use crate::error::CliError;
use crate::output::Output;

/// Shared options for history subcommands.
#[derive(Args)]
pub(crate) struct StoreArgs {
    /// Path to configuration file (default: auto-discover quill.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl StoreArgs {
    fn open(&self) -> Result<HistoryStore, CliError> {
        let config = Config::load(self.config.as_deref(), None)?;
        Ok(HistoryStore::new(config.history_resolved.path))
    }
}

/// History subcommands.
#[derive(Subcommand)]
pub(crate) enum HistoryCommand {
    /// List stored generation records, newest first.
    List(StoreArgs),
    /// Show one record's content.
    Show {
        /// Record id.
        id: String,
        #[command(flatten)]
        store: StoreArgs,
    },
    /// Delete one record.
    Delete {
        /// Record id.
        id: String,
        #[command(flatten)]
        store: StoreArgs,
    },
    /// Delete all records.
    Clear(StoreArgs),
    /// Write the history as pretty-printed JSON.
    Export {
        /// Target JSON file.
        out: PathBuf,
        #[command(flatten)]
        store: StoreArgs,
    },
}

impl HistoryCommand {
    /// Execute the history command.
    ///
    /// # Errors
    ///
    /// Returns an error when the store cannot be read or written, or the
    /// requested record does not exist.
    pub(crate) fn execute(self, output: &Output) -> Result<(), CliError> {
        match self {
            Self::List(args) => {
                let entries = args.open()?.load();
                if entries.is_empty() {
                    output.info("History is empty");
                    return Ok(());
                }
                output.highlight(&format!("{} record(s):", entries.len()));
                for entry in entries {
                    output.info(&format!(
                        "{}  {} [{}], {} words",
                        entry.id, entry.topic, entry.tone, entry.content_length
                    ));
                }
                Ok(())
            }
            Self::Show { id, store } => {
                let entry = store
                    .open()?
                    .load()
                    .into_iter()
                    .find(|entry| entry.id == id)
                    .ok_or_else(|| {
                        CliError::Validation(format!("no history entry with id {id}"))
                    })?;
                output.highlight(&entry.topic);
                output.info(&entry.content);
                Ok(())
            }
            Self::Delete { id, store } => {
                if store.open()?.remove(&id)? {
                    output.success("Deleted");
                    Ok(())
                } else {
                    Err(CliError::Validation(format!(
                        "no history entry with id {id}"
                    )))
                }
            }
            Self::Clear(args) => {
                args.open()?.clear()?;
                output.success("History cleared");
                Ok(())
            }
            Self::Export { out, store } => {
                store.open()?.export_to(&out)?;
                output.success(&format!("Exported {}", out.display()));
                Ok(())
            }
        }
    }
}
