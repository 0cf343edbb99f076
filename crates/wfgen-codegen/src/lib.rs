//! wfgen Code Generation
//!
//! This crate turns annotated declarations into generated source files.
//!
//! # Pipeline Overview
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │ Compilation │────▶│  Extract    │────▶│     IR      │────▶│   Render    │
//! │ (snapshot)  │     │ (markers)   │     │(descriptors)│     │ (artifacts) │
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use wfgen_codegen::Pipeline;
//! use wfgen_core::{Compilation, GeneratorConfig};
//!
//! let pipeline = Pipeline::new(GeneratorConfig::temporal())?;
//! let output = pipeline.run(&Compilation::load("snapshots/sample.yaml")?)?;
//! for artifact in output.artifacts.iter() {
//!     println!("{}", artifact.file_name());
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod diagnostics;
pub mod error;
pub mod extract;
pub mod ir;
pub mod pipeline;
pub mod render;

pub use diagnostics::{Diagnostic, Severity};
pub use error::{Error, Result};
pub use ir::{
    Artifact, ArtifactSet, DeclarationDescriptor, MockDoubleDescriptor, ParameterDescriptor,
    ReturnShape, TypeReference,
};
pub use pipeline::{ExtractedModel, GenerationOutput, Pipeline};
