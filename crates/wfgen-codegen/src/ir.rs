//! Intermediate Representation
//!
//! Descriptors are the plain, serializable records extraction produces and
//! rendering consumes. They carry no references into the compilation, so
//! renderers never see the host's symbol model.

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

use crate::error::{Error, Result};

/// A type as used by generated code
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeReference {
    /// Normalized text as declared (keywords stay keywords)
    pub display: String,

    /// Fully qualified text including generic arguments, `None` when the
    /// type could not be resolved
    pub qualified: Option<String>,

    /// Namespace of the outermost type
    pub namespace: Option<String>,

    /// Every namespace `display` needs imported, generic arguments included
    pub namespaces: BTreeSet<String>,
}

impl TypeReference {
    /// An unresolved type, kept as its literal declared text
    pub fn literal(text: impl Into<String>) -> Self {
        Self {
            display: text.into().trim().to_string(),
            qualified: None,
            namespace: None,
            namespaces: BTreeSet::new(),
        }
    }

    /// Fully qualified name where resolvable, the declared text otherwise
    pub fn type_name(&self) -> &str {
        self.qualified.as_deref().unwrap_or(&self.display)
    }

    /// Whether the outermost type was resolved
    pub fn is_resolved(&self) -> bool {
        self.qualified.is_some()
    }
}

/// What a declaration returns
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "type", rename_all = "snake_case")]
pub enum ReturnShape {
    /// No result
    Void,
    /// A plain value
    Value(TypeReference),
    /// Already an asynchronous task, possibly carrying a result type
    Wrapped(Option<TypeReference>),
}

impl ReturnShape {
    /// The result type callers eventually receive, if any
    pub fn result_type(&self) -> Option<&TypeReference> {
        match self {
            ReturnShape::Void | ReturnShape::Wrapped(None) => None,
            ReturnShape::Value(ty) | ReturnShape::Wrapped(Some(ty)) => Some(ty),
        }
    }
}

/// One parameter of a matched declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParameterDescriptor {
    /// Parameter name
    pub name: String,

    /// Fully qualified type where resolvable, else the declared text
    pub type_name: String,

    /// Namespace of the parameter type, when resolvable and not the
    /// containing type's namespace
    pub optional_namespace: Option<String>,

    /// Full type information used for rendering
    #[serde(rename = "type")]
    pub ty: TypeReference,
}

impl ParameterDescriptor {
    /// Describe a parameter declared inside `containing_namespace`
    pub fn new(
        name: impl Into<String>,
        ty: TypeReference,
        containing_namespace: Option<&str>,
    ) -> Self {
        let optional_namespace = ty
            .namespace
            .clone()
            .filter(|namespace| Some(namespace.as_str()) != containing_namespace);
        Self {
            name: name.into(),
            type_name: ty.type_name().to_string(),
            optional_namespace,
            ty,
        }
    }
}

/// One matched declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeclarationDescriptor {
    /// Member name
    pub name: String,

    /// Simple name of the declaring type
    pub containing_type_name: String,

    /// Namespace of the declaring type (`None` for the global namespace)
    pub containing_namespace: Option<String>,

    /// Whether the member is static
    pub is_static: bool,

    /// Parameters in declaration order
    pub parameters: Vec<ParameterDescriptor>,

    /// Return shape
    pub return_shape: ReturnShape,
}

impl DeclarationDescriptor {
    /// Names are non-empty and parameter names are unique
    pub fn is_well_formed(&self) -> bool {
        if self.name.is_empty() || self.containing_type_name.is_empty() {
            return false;
        }
        let mut seen = BTreeSet::new();
        self.parameters
            .iter()
            .all(|parameter| !parameter.name.is_empty() && seen.insert(parameter.name.as_str()))
    }

    /// Total ordering key: declaring type, member, namespace, then the
    /// parameter types and staticness so overloads order the same way
    pub fn sort_key(&self) -> (&str, &str, &str, Vec<&str>, bool) {
        (
            &self.containing_type_name,
            &self.name,
            self.containing_namespace.as_deref().unwrap_or_default(),
            self.parameters
                .iter()
                .map(|parameter| parameter.type_name.as_str())
                .collect(),
            self.is_static,
        )
    }

    /// `Namespace.Type`
    pub fn qualified_type_name(&self) -> String {
        wfgen_core::symbols::qualify(
            self.containing_namespace.as_deref(),
            &self.containing_type_name,
        )
    }

    /// Parameter names joined for a call site
    pub fn argument_list(&self) -> String {
        self.parameters
            .iter()
            .map(|parameter| parameter.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Namespaces generated code needs to refer to this declaration unqualified
    pub fn namespaces(&self) -> BTreeSet<String> {
        let mut namespaces = BTreeSet::new();
        namespaces.extend(self.containing_namespace.clone());
        for parameter in &self.parameters {
            namespaces.extend(parameter.ty.namespaces.iter().cloned());
        }
        if let Some(result) = self.return_shape.result_type() {
            namespaces.extend(result.namespaces.iter().cloned());
        }
        namespaces
    }
}

/// A test double requested for an activity class
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MockDoubleDescriptor {
    /// Simple name of the double
    pub name: String,

    /// Namespace of the double
    pub namespace: String,

    /// Simple name of the activity class being doubled
    pub target_name: String,

    /// Namespace of the activity class
    pub target_namespace: Option<String>,

    /// The activity class's activities
    pub activities: Vec<DeclarationDescriptor>,
}

impl MockDoubleDescriptor {
    /// `Namespace.Name`
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.namespace, self.name)
    }
}

/// One generated source file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Artifact {
    file_name: String,
    content: String,
    imports: BTreeSet<String>,
}

impl Artifact {
    /// Create an artifact
    pub fn new(file_name: impl Into<String>, content: String, imports: BTreeSet<String>) -> Self {
        Self {
            file_name: file_name.into(),
            content,
            imports,
        }
    }

    /// File name (unique key within a pass)
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Source text
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Imported namespaces in lexical order
    pub fn imports(&self) -> &BTreeSet<String> {
        &self.imports
    }

    /// SHA-256 of the content, hex encoded
    pub fn content_hash(&self) -> String {
        content_hash(&self.content)
    }
}

/// SHA-256 of some text, hex encoded
pub fn content_hash(content: &str) -> String {
    use sha2::{Digest, Sha256};

    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    hex::encode(hasher.finalize())
}

/// The artifacts of one pass, keyed by file name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArtifactSet {
    artifacts: BTreeMap<String, Artifact>,
}

impl ArtifactSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an artifact; a second artifact with the same file name is a defect
    pub fn insert(&mut self, artifact: Artifact) -> Result<()> {
        if self.artifacts.contains_key(artifact.file_name()) {
            return Err(Error::DuplicateArtifact {
                file_name: artifact.file_name,
            });
        }
        self.artifacts.insert(artifact.file_name.clone(), artifact);
        Ok(())
    }

    /// Look up an artifact by file name
    pub fn get(&self, file_name: &str) -> Option<&Artifact> {
        self.artifacts.get(file_name)
    }

    /// Artifacts in file name order
    pub fn iter(&self) -> impl Iterator<Item = &Artifact> {
        self.artifacts.values()
    }

    /// File names in order
    pub fn file_names(&self) -> impl Iterator<Item = &str> {
        self.artifacts.keys().map(String::as_str)
    }

    /// Number of artifacts
    pub fn len(&self) -> usize {
        self.artifacts.len()
    }

    /// Whether the set is empty
    pub fn is_empty(&self) -> bool {
        self.artifacts.is_empty()
    }
}

impl IntoIterator for ArtifactSet {
    type Item = Artifact;
    type IntoIter = std::collections::btree_map::IntoValues<String, Artifact>;

    fn into_iter(self) -> Self::IntoIter {
        self.artifacts.into_values()
    }
}
