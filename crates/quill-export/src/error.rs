//! Export error types.

/// Failure cause reported by an external collaborator.
pub type CollaboratorError = Box<dyn std::error::Error + Send + Sync>;

/// Export failure, distinguished only by export format.
///
/// The underlying collaborator cause is logged at the failure site and
/// carried as the error source; it is not classified any further.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// PDF rasterization failed.
    #[error("failed to export as PDF")]
    Pdf(#[source] CollaboratorError),

    /// Word-document packaging failed.
    #[error("failed to export as Word document")]
    Word(#[source] CollaboratorError),
}
