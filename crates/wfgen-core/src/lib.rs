//! wfgen Core Library
//!
//! This crate provides the host-facing half of wfgen:
//! - Compilation snapshots (the declarations a host compiler hands over)
//! - Type syntax parsing and the semantic model used to resolve names
//! - Generator configuration (marker names, output namespaces, file names)
//! - Project configuration for the CLI host
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  Snapshot   │────▶│  Semantic   │────▶│  Extractors │
//! │ (YAML/JSON) │     │    Model    │     │  (codegen)  │
//! └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use wfgen_core::{Compilation, SemanticModel};
//!
//! let compilation = Compilation::load("snapshots/sample.yaml")?;
//! let model = SemanticModel::new(&compilation);
//! for declaration in compilation.declarations() {
//!     println!("{}", declaration.name());
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod semantic;
pub mod symbols;
pub mod type_syntax;

pub use config::{
    ActivityTarget, Config, GeneratorConfig, MarkerSource, MockTarget, ProjectConfig, TaskType,
    WorkflowTarget,
};
pub use error::{Error, Result};
pub use semantic::{SemanticModel, SymbolResolver};
pub use symbols::{
    Compilation, Declaration, MemberDecl, MemberKind, MemberRef, ParameterDecl, Scope,
    SnapshotFormat, SourceFile, TypeDecl, TypeDeclRef, TypeKind,
};
pub use type_syntax::TypeSyntax;
