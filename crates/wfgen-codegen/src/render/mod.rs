//! Template rendering
//!
//! Each target renderer turns a group of descriptors into one
//! [`GeneratedFile`]. Descriptors are sorted before rendering, so the output
//! only depends on the set of descriptors, never on discovery order.

pub mod activity;
pub mod builder;
pub mod emit;
pub mod marker;
pub mod mock;
pub mod workflow;

pub use builder::{ClassBuilder, FileBuilder, FileModel, MethodBuilder, PropertyBuilder};
pub use emit::{Emitter, TemplateEmitter};

use wfgen_core::TaskType;

use crate::error::Result;
use crate::ir::{Artifact, DeclarationDescriptor, ParameterDescriptor, ReturnShape};

/// A rendered file model and the name it is emitted under
#[derive(Debug, Clone)]
pub struct GeneratedFile {
    /// Artifact file name
    pub file_name: String,

    /// File contents
    pub model: FileModel,
}

impl GeneratedFile {
    /// Emit text and freeze it into an artifact
    pub fn emit(self, emitter: &dyn Emitter) -> Result<Artifact> {
        let content = emitter.emit(&self.model)?;
        Ok(Artifact::new(self.file_name, content, self.model.imports))
    }
}

/// Descriptors in rendering order
pub fn sorted(descriptors: &[DeclarationDescriptor]) -> Vec<&DeclarationDescriptor> {
    let mut sorted: Vec<_> = descriptors.iter().collect();
    sorted.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
    sorted
}

/// `<verb><entity><suffix>`
pub fn wrapper_name(verb: &str, entity: &str, suffix: &str) -> String {
    format!("{verb}{entity}{suffix}")
}

/// The asynchronous return type a wrapper exposes for `shape`
///
/// `Void` and `Wrapped(None)` become the bare task; a value `T` or an
/// already wrapped `T` becomes `Task<T>`.
pub fn task_return_type(task: &TaskType, shape: &ReturnShape) -> String {
    match shape.result_type() {
        Some(result) => format!("{}<{}>", task.name, result.display),
        None => task.name.clone(),
    }
}

/// `preferred`, or `preferred` followed by underscores until it does not
/// clash with a parameter name
pub fn unique_name(preferred: &str, parameters: &[ParameterDescriptor]) -> String {
    let mut name = preferred.to_string();
    while parameters.iter().any(|parameter| parameter.name == name) {
        name.push('_');
    }
    name
}
