use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PatchError {
    #[error("No patch blocks found.")]
    NoBlocks,
    #[error("No \"*** Update File:\" line found between markers.")]
    MissingUpdateDirective,
    /// Restates the required marker syntax around the underlying extraction error.
    #[error(
        "Failed to parse patch header. Make sure your patch includes the markers and file path: \n\
         *** Begin Patch\n\
         *** Update File: /path/to/your/file\n\
         *** End Patch\n\
         Parsing error: {0}"
    )]
    Header(Box<PatchError>),

    #[error("Hunk without context (no \"-\" lines) encountered")]
    HunkWithoutContext,
    #[error("No hunks found – patch body is empty or mis-formatted")]
    NoHunks,
    #[error("No hunks found in unified diff")]
    NoUnifiedHunks,
    #[error(
        "Patch parse failed – no hunks detected.\n\
         Ensure each change block starts with one or more \"-\" lines\n\
         and the patch is wrapped between *** Begin Patch / *** End Patch."
    )]
    NothingRecognized,

    #[error("Hunk {index}: context not found – failed to locate \"{snippet}...\" in target file")]
    ContextNotFound { index: usize, snippet: String },

    #[error("Strict parser error: {strict}.\nFallback parser also failed: {fallback}")]
    Exhausted {
        strict: Box<PatchError>,
        fallback: Box<PatchError>,
    },

    #[error("File not found: {}", path.display())]
    FileNotFound { path: PathBuf },
    #[error("Unable to read {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("Permission denied when writing to {}: {source}", path.display())]
    WriteDenied { path: PathBuf, source: io::Error },
    #[error("Failed to write changes to {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },
}

/// Coarse classification used by callers that react to a failure rather than print it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Format,
    ContextNotFound,
    Io,
}

impl PatchError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PatchError::ContextNotFound { .. } => ErrorKind::ContextNotFound,
            PatchError::FileNotFound { .. }
            | PatchError::Read { .. }
            | PatchError::WriteDenied { .. }
            | PatchError::Write { .. } => ErrorKind::Io,
            PatchError::Exhausted { fallback, .. } => fallback.kind(),
            _ => ErrorKind::Format,
        }
    }

    pub(crate) fn read(path: PathBuf, source: io::Error) -> Self {
        match source.kind() {
            io::ErrorKind::NotFound => PatchError::FileNotFound { path },
            _ => PatchError::Read { path, source },
        }
    }

    pub(crate) fn write(path: PathBuf, source: io::Error) -> Self {
        match source.kind() {
            io::ErrorKind::PermissionDenied => PatchError::WriteDenied { path, source },
            _ => PatchError::Write { path, source },
        }
    }
}
