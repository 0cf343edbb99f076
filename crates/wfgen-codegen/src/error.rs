//! Error types for code generation
//!
//! Nothing a user writes in their sources produces one of these: unresolvable
//! or incomplete declarations are excluded during extraction. An `Error` out
//! of a pass means the generator itself is broken.

use thiserror::Error;

/// Result type for codegen operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during code generation
#[derive(Error, Debug)]
pub enum Error {
    /// Two artifacts were emitted under the same file name in one pass
    #[error("artifact '{file_name}' was emitted more than once in the same pass")]
    DuplicateArtifact {
        /// File name key
        file_name: String,
    },

    /// Invalid or failing Jinja template
    #[error("template error: {0}")]
    InvalidTemplate(#[from] minijinja::Error),

    /// Failed to generate source text
    #[error("code generation failed: {0}")]
    GenerationError(String),

    /// Error from wfgen-core
    #[error(transparent)]
    Core(#[from] wfgen_core::Error),
}
