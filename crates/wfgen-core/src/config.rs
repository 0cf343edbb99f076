//! Configuration
//!
//! Two kinds of configuration live here:
//!
//! - [`GeneratorConfig`]: the marker names, output namespaces, file names and
//!   the code shapes each generator target emits. It is built in code and
//!   handed to the pipeline at construction; it is not read from user files.
//! - [`ProjectConfig`] / [`Config`]: the CLI host's `wfgen.yaml`, which only
//!   says where snapshots are and where generated files go.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Banner emitted at the top of every generated file
pub const AUTO_GENERATED_BANNER: &str = "\
//------------------------------------------------------------------------------
// <auto-generated>
//     This code was generated.
//
//     Changes to this file may cause incorrect behavior and will be lost if
//     the code is regenerated.
// </auto-generated>
//------------------------------------------------------------------------------";

/// Everything a pipeline needs to know about markers and outputs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Banner comment reproduced verbatim at the top of each artifact
    pub banner: String,

    /// The asynchronous result type generated methods return
    pub task: TaskType,

    /// Files whose path ends with this suffix are generator output and never scanned
    pub generated_file_suffix: String,

    /// Suffix of every generated wrapper method name
    pub method_suffix: String,

    /// Workflow client extensions
    pub workflows: WorkflowTarget,

    /// Activity invocation helpers
    pub activities: ActivityTarget,

    /// Activity mock doubles
    pub mocks: MockTarget,
}

/// The wrapper task type (`Task` / `Task<T>`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskType {
    /// Fully qualified name, compared exactly against resolved return types
    pub full_name: String,

    /// Namespace imported by generated files
    pub namespace: String,

    /// Name written in generated code
    pub name: String,
}

/// Workflow target: `Start<Workflow>Async` / `Execute<Workflow>Async` client extensions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowTarget {
    /// Class marker identifying a workflow
    pub marker: String,

    /// Class marker opting a workflow into generation (`None` means every workflow)
    pub opt_in_marker: Option<String>,

    /// Method marker identifying the workflow's entry point
    pub entry_marker: String,

    /// Output namespace
    pub output_namespace: String,

    /// Static container class name
    pub class_name: String,

    /// Artifact file name
    pub file_name: String,

    /// Namespaces every workflow artifact imports
    pub imports: Vec<String>,

    /// Type of the leading client parameter
    pub client_type: String,

    /// Type of the trailing options parameter
    pub options_type: String,

    /// Generic handle returned by `Start`
    pub handle_type: String,

    /// Verb of the method that waits for the result
    pub execute_verb: String,

    /// Verb of the method that returns a handle
    pub start_verb: String,
}

/// Activity target: `Execute<Activity>Async` helpers used from workflow code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityTarget {
    /// Method marker identifying an activity
    pub marker: String,

    /// Output namespace
    pub output_namespace: String,

    /// Static container class name
    pub class_name: String,

    /// Artifact file name
    pub file_name: String,

    /// Namespaces every activity artifact imports
    pub imports: Vec<String>,

    /// Type of the trailing options parameter
    pub options_type: String,

    /// Generic invocation the generated body forwards to
    pub invoke: String,

    /// Verb of generated methods
    pub verb: String,
}

/// Mock target: partial test doubles for activity classes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockTarget {
    /// Class marker requesting a double
    pub marker: String,

    /// Generic base class whose type argument names the activity class
    pub base_type: String,

    /// Namespaces every double imports
    pub imports: Vec<String>,

    /// Attribute written on generated activity methods
    pub activity_attribute: String,

    /// Prefix of generated mock delegate properties
    pub property_prefix: String,

    /// Factory expression for delegate substitutes; `{}` is the delegate type
    pub substitute: String,
}

/// Source of a type the generator itself contributes to the compilation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerSource {
    /// Artifact file name
    pub file_name: String,

    /// Namespace of the type
    pub namespace: String,

    /// Simple type name
    pub name: String,

    /// Class declaration line
    pub declaration: String,

    /// Attributes written above the declaration
    pub attributes: Vec<String>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self::temporal()
    }
}

impl GeneratorConfig {
    /// Configuration for the Temporal .NET SDK
    pub fn temporal() -> Self {
        Self {
            banner: AUTO_GENERATED_BANNER.to_string(),
            task: TaskType {
                full_name: "System.Threading.Tasks.Task".to_string(),
                namespace: "System.Threading.Tasks".to_string(),
                name: "Task".to_string(),
            },
            generated_file_suffix: ".g.cs".to_string(),
            method_suffix: "Async".to_string(),
            workflows: WorkflowTarget {
                marker: "Temporalio.Workflows.WorkflowAttribute".to_string(),
                opt_in_marker: Some(
                    "Temporalio.Generators.Workflows.GenerateWorkflowExtensionAttribute"
                        .to_string(),
                ),
                entry_marker: "Temporalio.Workflows.WorkflowRunAttribute".to_string(),
                output_namespace: "Temporalio.Generators.Workflows".to_string(),
                class_name: "TemporalClientExtensions".to_string(),
                file_name: "TemporalClientExtensions.g.cs".to_string(),
                imports: vec![
                    "Temporalio.Client".to_string(),
                    "Temporalio.Workflows".to_string(),
                ],
                client_type: "ITemporalClient".to_string(),
                options_type: "WorkflowOptions".to_string(),
                handle_type: "WorkflowHandle".to_string(),
                execute_verb: "Execute".to_string(),
                start_verb: "Start".to_string(),
            },
            activities: ActivityTarget {
                marker: "Temporalio.Activities.ActivityAttribute".to_string(),
                output_namespace: "Temporalio.Generators.Activities".to_string(),
                class_name: "Activities".to_string(),
                file_name: "TemporalActivityExtensions.g.cs".to_string(),
                imports: vec!["Temporalio.Workflows".to_string()],
                options_type: "ActivityOptions".to_string(),
                invoke: "Workflow.ExecuteActivityAsync".to_string(),
                verb: "Execute".to_string(),
            },
            mocks: MockTarget {
                marker: "Temporalio.Generators.Testing.GenerateNSubstituteMocksAttribute"
                    .to_string(),
                base_type: "Temporalio.Generators.Testing.ActivityMockBase".to_string(),
                imports: vec![
                    "NSubstitute".to_string(),
                    "System".to_string(),
                    "Temporalio.Activities".to_string(),
                ],
                activity_attribute: "Activity".to_string(),
                property_prefix: "Mock".to_string(),
                substitute: "Substitute.For<{}>()".to_string(),
            },
        }
    }

    /// Types the generator emits itself, so user code can reference them
    pub fn marker_sources(&self) -> Vec<MarkerSource> {
        let mut sources = Vec::new();

        if let Some(opt_in) = &self.workflows.opt_in_marker {
            sources.push(attribute_source(opt_in));
        }
        sources.push(attribute_source(&self.mocks.marker));

        let (namespace, name) = split_full_name(&self.mocks.base_type);
        sources.push(MarkerSource {
            file_name: format!("{name}.g.cs"),
            namespace: namespace.to_string(),
            name: name.to_string(),
            declaration: format!("public abstract class {name}<TActivities>"),
            attributes: Vec::new(),
        });

        sources
    }
}

fn attribute_source(full_name: &str) -> MarkerSource {
    let (namespace, name) = split_full_name(full_name);
    MarkerSource {
        file_name: format!("{name}.g.cs"),
        namespace: namespace.to_string(),
        name: name.to_string(),
        declaration: format!("public sealed class {name} : System.Attribute"),
        attributes: vec!["[System.AttributeUsage(System.AttributeTargets.Class)]".to_string()],
    }
}

fn split_full_name(full_name: &str) -> (&str, &str) {
    full_name.rsplit_once('.').unwrap_or(("", full_name))
}

/// Project configuration from `wfgen.yaml`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Project name
    pub name: String,

    /// Snapshot files or directories, relative to the project
    #[serde(default = "default_inputs")]
    pub inputs: Vec<String>,

    /// Directory generated files are written to, relative to the project
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
}

fn default_inputs() -> Vec<String> {
    vec!["snapshots".to_string()]
}

fn default_output_dir() -> String {
    "generated".to_string()
}

/// Main configuration container
#[derive(Debug, Clone)]
pub struct Config {
    /// Project configuration
    pub project: ProjectConfig,

    /// Base path of the project
    pub base_path: PathBuf,
}

impl Config {
    /// Load configuration from a directory or a `wfgen.yaml` file
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let config = Config::load("./my-project")?;
    /// println!("Project: {}", config.project.name);
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let (config_path, base_path) = if path.is_dir() {
            (path.join("wfgen.yaml"), path.to_path_buf())
        } else {
            (
                path.to_path_buf(),
                path.parent().unwrap_or(Path::new(".")).to_path_buf(),
            )
        };

        if !config_path.exists() {
            return Err(Error::ConfigNotFound {
                path: config_path.display().to_string(),
            });
        }

        let contents = std::fs::read_to_string(&config_path)?;
        let project: ProjectConfig = serde_yaml::from_str(&contents)?;
        if project.inputs.is_empty() {
            return Err(Error::ConfigInvalid {
                message: "'inputs' must list at least one snapshot file or directory".to_string(),
            });
        }

        Ok(Self { project, base_path })
    }

    /// Input paths resolved against the project directory
    pub fn input_paths(&self) -> Vec<PathBuf> {
        self.project
            .inputs
            .iter()
            .map(|input| self.base_path.join(input))
            .collect()
    }

    /// Output directory resolved against the project directory
    pub fn output_dir(&self) -> PathBuf {
        self.base_path.join(&self.project.output_dir)
    }
}
