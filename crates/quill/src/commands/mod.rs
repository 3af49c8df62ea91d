//! CLI command implementations.

pub(crate) mod export;
pub(crate) mod generate;
pub(crate) mod history;

pub(crate) use export::ExportArgs;
pub(crate) use generate::GenerateArgs;
pub(crate) use history::HistoryCommand;
