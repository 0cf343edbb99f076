//! Pipeline orchestration
//!
//! One [`Pipeline::run`] is one generation pass: extract every target's
//! descriptors from the compilation, render each group into its artifact and
//! report collisions. A pipeline holds only its configuration and emitter, so
//! passes never see each other.

use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;

use wfgen_core::symbols::qualify;
use wfgen_core::{Compilation, Declaration, GeneratorConfig, SemanticModel, SymbolResolver};

use crate::diagnostics::Diagnostic;
use crate::error::Result;
use crate::extract::{extract_all, ActivityExtractor, MockExtractor, WorkflowExtractor};
use crate::ir::{ArtifactSet, DeclarationDescriptor, MockDoubleDescriptor};
use crate::render::{self, Emitter, TemplateEmitter};

/// Descriptors of one pass, grouped by target
///
/// A target whose primary marker type is absent from the compilation is
/// `None` and renders nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExtractedModel {
    /// Workflow entry points
    pub workflows: Option<Vec<DeclarationDescriptor>>,

    /// Activity methods
    pub activities: Option<Vec<DeclarationDescriptor>>,

    /// Mock doubles, one per class
    pub mocks: Vec<MockDoubleDescriptor>,
}

/// Result of a pass
#[derive(Debug, Clone)]
pub struct GenerationOutput {
    /// Generated files
    pub artifacts: ArtifactSet,

    /// Problems found in the user's declarations
    pub diagnostics: Vec<Diagnostic>,
}

/// Extraction → rendering pipeline
pub struct Pipeline {
    config: GeneratorConfig,
    emitter: Box<dyn Emitter + Send + Sync>,
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Pipeline {
    /// Create a pipeline emitting through the bundled template
    pub fn new(config: GeneratorConfig) -> Result<Self> {
        Ok(Self::with_emitter(config, TemplateEmitter::new()?))
    }

    /// Create a pipeline with a custom emitter
    pub fn with_emitter(
        config: GeneratorConfig,
        emitter: impl Emitter + Send + Sync + 'static,
    ) -> Self {
        Self {
            config,
            emitter: Box::new(emitter),
        }
    }

    /// Generator configuration
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Extract and group descriptors without rendering
    pub fn extract(&self, compilation: &Compilation) -> ExtractedModel {
        let config = &self.config;
        let model = SemanticModel::new(compilation).with_types(
            config
                .marker_sources()
                .iter()
                .map(|source| qualify(Some(source.namespace.as_str()), &source.name)),
        );

        let declarations: Vec<Declaration<'_>> = compilation
            .declarations()
            .filter(|declaration| !declaration.file().is_generated(&config.generated_file_suffix))
            .collect();

        let workflows = model.contains_type(&config.workflows.marker).then(|| {
            let extractor = WorkflowExtractor::new(&config.workflows, &config.task);
            normalize(extract_all(&extractor, &model, &declarations))
        });

        let activities = model.contains_type(&config.activities.marker).then(|| {
            let extractor = ActivityExtractor::new(&config.activities.marker, &config.task);
            normalize(extract_all(&extractor, &model, &declarations))
        });

        let extractor =
            MockExtractor::new(&config.mocks, &config.activities.marker, &config.task);
        let mut doubles = BTreeMap::new();
        for double in extract_all(&extractor, &model, &declarations) {
            // partial classes: one double per qualified name
            doubles.entry(double.qualified_name()).or_insert(double);
        }

        ExtractedModel {
            workflows,
            activities,
            mocks: doubles.into_values().collect(),
        }
    }

    /// Run one generation pass
    pub fn run(&self, compilation: &Compilation) -> Result<GenerationOutput> {
        let config = &self.config;
        let extracted = self.extract(compilation);
        let emitter: &dyn Emitter = self.emitter.as_ref();

        let mut artifacts = ArtifactSet::new();
        for source in config.marker_sources() {
            artifacts.insert(render::marker::render(config, &source)?.emit(emitter)?)?;
        }
        if let Some(workflows) = &extracted.workflows {
            artifacts.insert(render::workflow::render(config, workflows)?.emit(emitter)?)?;
        }
        if let Some(activities) = &extracted.activities {
            artifacts.insert(render::activity::render(config, activities)?.emit(emitter)?)?;
        }
        for double in &extracted.mocks {
            artifacts.insert(render::mock::render(config, double)?.emit(emitter)?)?;
        }

        let diagnostics = self.collisions(&extracted);
        for diagnostic in &diagnostics {
            tracing::warn!("{}", diagnostic);
        }

        tracing::info!(
            "Generated {} artifacts for '{}' ({} workflows, {} activities, {} mock doubles)",
            artifacts.len(),
            compilation.name,
            extracted.workflows.as_ref().map_or(0, Vec::len),
            extracted.activities.as_ref().map_or(0, Vec::len),
            extracted.mocks.len()
        );

        Ok(GenerationOutput {
            artifacts,
            diagnostics,
        })
    }

    /// Load a snapshot file and run one pass over it
    pub fn run_snapshot(&self, path: impl AsRef<Path>) -> Result<GenerationOutput> {
        let compilation = Compilation::load(path)?;
        self.run(&compilation)
    }

    /// Wrappers generated more than once with the same signature
    fn collisions(&self, extracted: &ExtractedModel) -> Vec<Diagnostic> {
        let config = &self.config;
        let mut diagnostics = Vec::new();

        if let Some(workflows) = &extracted.workflows {
            let wrappers = workflows.iter().flat_map(|workflow| {
                render::workflow::method_names(config, workflow)
                    .into_iter()
                    .map(move |name| (name, workflow))
            });
            diagnostics.extend(duplicates(&config.workflows.class_name, wrappers));
        }

        if let Some(activities) = &extracted.activities {
            let wrappers = activities
                .iter()
                .map(|activity| (render::activity::method_name(config, activity), activity));
            diagnostics.extend(duplicates(&config.activities.class_name, wrappers));
        }

        diagnostics
    }
}

/// Sort and drop exact duplicates
fn normalize(mut descriptors: Vec<DeclarationDescriptor>) -> Vec<DeclarationDescriptor> {
    descriptors.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
    descriptors.dedup();
    descriptors
}

fn duplicates<'a>(
    container: &str,
    wrappers: impl Iterator<Item = (String, &'a DeclarationDescriptor)>,
) -> Vec<Diagnostic> {
    // overloads with different parameter types do not collide
    let mut groups: BTreeMap<(String, Vec<&str>), Vec<String>> = BTreeMap::new();
    for (name, descriptor) in wrappers {
        let signature = descriptor
            .parameters
            .iter()
            .map(|parameter| parameter.type_name.as_str())
            .collect();
        groups
            .entry((name, signature))
            .or_default()
            .push(format!("{}.{}", descriptor.qualified_type_name(), descriptor.name));
    }

    groups
        .into_iter()
        .filter(|(_, sources)| sources.len() > 1)
        .map(|((name, _), sources)| Diagnostic::duplicate_wrapper(container, &name, &sources))
        .collect()
}
