//! Compilation snapshots
//!
//! A [`Compilation`] is the host's view of a program: source files with their
//! namespace and `using` imports, the types and members they declare, the
//! attributes (markers) written on them, and the fully qualified names of the
//! library types the compilation references.
//!
//! Snapshots are plain serde documents so any host with reflection or an
//! AST + type resolver can produce one.
//!
//! ```yaml
//! name: Sample
//! references:
//!   - System.Threading.Tasks.Task
//!   - Temporalio.Workflows.WorkflowAttribute
//! files:
//!   - path: GreetingWorkflow.cs
//!     namespace: Sample
//!     usings: [System.Threading.Tasks, Temporalio.Workflows]
//!     types:
//!       - name: GreetingWorkflow
//!         attributes: [Workflow]
//!         members:
//!           - name: RunAsync
//!             attributes: [WorkflowRun]
//!             returns: Task<string>
//!             parameters:
//!               - { name: name, type: string }
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Error, Result};

/// Serialization format of a snapshot file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotFormat {
    /// `.yaml` / `.yml`
    Yaml,
    /// `.json`
    Json,
}

impl SnapshotFormat {
    /// Pick the format from a file extension
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml") | Some("yml") => Ok(Self::Yaml),
            Some("json") => Ok(Self::Json),
            _ => Err(Error::UnsupportedSnapshot {
                path: path.display().to_string(),
            }),
        }
    }
}

/// A snapshot of one compilation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Compilation {
    /// Compilation (assembly) name
    #[serde(default)]
    pub name: String,

    /// Fully qualified names of types provided by referenced libraries
    #[serde(default)]
    pub references: Vec<String>,

    /// Source files in the compilation
    #[serde(default)]
    pub files: Vec<SourceFile>,
}

/// One source file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceFile {
    /// Path of the file (used to recognise generated files)
    pub path: String,

    /// Namespace the file's types are declared in (`None` is the global namespace)
    #[serde(default)]
    pub namespace: Option<String>,

    /// Namespaces imported with `using`
    #[serde(default)]
    pub usings: Vec<String>,

    /// Type declarations
    #[serde(default)]
    pub types: Vec<TypeDecl>,
}

/// A type declaration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TypeDecl {
    /// Simple type name
    pub name: String,

    /// Declaration kind
    #[serde(default)]
    pub kind: TypeKind,

    /// Declared `static`
    #[serde(default, rename = "static")]
    pub is_static: bool,

    /// Attributes as written, e.g. `Workflow` or `Activity("name")`
    #[serde(default)]
    pub attributes: Vec<String>,

    /// Base types as written, e.g. `ActivityMockBase<MyActivities>`
    #[serde(default)]
    pub base_types: Vec<String>,

    /// Members in declaration order
    #[serde(default)]
    pub members: Vec<MemberDecl>,
}

/// Kind of type declaration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeKind {
    /// `class`
    #[default]
    Class,
    /// `record`
    Record,
    /// `struct`
    Struct,
    /// `interface`
    Interface,
}

/// A member declaration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemberDecl {
    /// Member name
    pub name: String,

    /// Member kind
    #[serde(default)]
    pub kind: MemberKind,

    /// Declared `static`
    #[serde(default, rename = "static")]
    pub is_static: bool,

    /// Attributes as written
    #[serde(default)]
    pub attributes: Vec<String>,

    /// Return type as written
    #[serde(default = "default_return_type")]
    pub returns: String,

    /// Parameters in declaration order
    #[serde(default)]
    pub parameters: Vec<ParameterDecl>,
}

fn default_return_type() -> String {
    "void".to_string()
}

/// Kind of member
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberKind {
    /// Ordinary method
    #[default]
    Method,
    /// Constructor
    Constructor,
    /// Property
    Property,
}

/// A parameter declaration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParameterDecl {
    /// Parameter name
    pub name: String,

    /// Parameter type as written
    #[serde(rename = "type")]
    pub type_name: String,
}

/// Name lookup scope of a declaration: its namespace plus the file's imports
#[derive(Debug, Clone, Copy)]
pub struct Scope<'a> {
    /// Enclosing namespace
    pub namespace: Option<&'a str>,
    /// `using` imports of the file
    pub usings: &'a [String],
}

/// A type declaration together with the file declaring it
#[derive(Debug, Clone, Copy)]
pub struct TypeDeclRef<'a> {
    /// Declaring file
    pub file: &'a SourceFile,
    /// The declaration
    pub decl: &'a TypeDecl,
}

/// A member declaration together with its owner and file
#[derive(Debug, Clone, Copy)]
pub struct MemberRef<'a> {
    /// Declaring file
    pub file: &'a SourceFile,
    /// Declaring type
    pub owner: &'a TypeDecl,
    /// The member
    pub member: &'a MemberDecl,
}

/// Any declaration the host reports to a generator
#[derive(Debug, Clone, Copy)]
pub enum Declaration<'a> {
    /// A type
    Type(TypeDeclRef<'a>),
    /// A member of a type
    Member(MemberRef<'a>),
}

impl Compilation {
    /// Create an empty compilation
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Parse a YAML snapshot
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Parse a JSON snapshot
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse a snapshot in the given format
    pub fn parse(content: &str, format: SnapshotFormat) -> Result<Self> {
        match format {
            SnapshotFormat::Yaml => Self::from_yaml(content),
            SnapshotFormat::Json => Self::from_json(content),
        }
    }

    /// Load a snapshot file, choosing the format from its extension
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let format = SnapshotFormat::from_path(path)?;
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content, format)
    }

    /// Every type and member declaration, file by file in source order
    pub fn declarations(&self) -> impl Iterator<Item = Declaration<'_>> {
        self.type_declarations().flat_map(|ty| {
            std::iter::once(Declaration::Type(ty)).chain(ty.decl.members.iter().map(
                move |member| {
                    Declaration::Member(MemberRef {
                        file: ty.file,
                        owner: ty.decl,
                        member,
                    })
                },
            ))
        })
    }

    /// Every type declaration
    pub fn type_declarations(&self) -> impl Iterator<Item = TypeDeclRef<'_>> {
        self.files
            .iter()
            .flat_map(|file| file.types.iter().map(move |decl| TypeDeclRef { file, decl }))
    }
}

impl SourceFile {
    /// Lookup scope for declarations in this file
    pub fn scope(&self) -> Scope<'_> {
        Scope {
            namespace: self.namespace.as_deref(),
            usings: &self.usings,
        }
    }

    /// Whether this file was produced by a generator (never re-scanned)
    pub fn is_generated(&self, suffix: &str) -> bool {
        !suffix.is_empty() && self.path.ends_with(suffix)
    }
}

impl<'a> TypeDeclRef<'a> {
    /// Fully qualified name of the type
    pub fn full_name(&self) -> String {
        qualify(self.file.namespace.as_deref(), &self.decl.name)
    }

    /// Lookup scope of the declaration
    pub fn scope(&self) -> Scope<'a> {
        self.file.scope()
    }
}

impl<'a> MemberRef<'a> {
    /// Lookup scope of the declaration
    pub fn scope(&self) -> Scope<'a> {
        self.file.scope()
    }
}

impl<'a> Declaration<'a> {
    /// Declared name
    pub fn name(&self) -> &'a str {
        match self {
            Declaration::Type(ty) => &ty.decl.name,
            Declaration::Member(member) => &member.member.name,
        }
    }

    /// Declaring file
    pub fn file(&self) -> &'a SourceFile {
        match self {
            Declaration::Type(ty) => ty.file,
            Declaration::Member(member) => member.file,
        }
    }

    /// Attributes as written
    pub fn attributes(&self) -> &'a [String] {
        match self {
            Declaration::Type(ty) => &ty.decl.attributes,
            Declaration::Member(member) => &member.member.attributes,
        }
    }
}

/// Join a namespace and a simple name
pub fn qualify(namespace: Option<&str>, name: &str) -> String {
    match namespace {
        Some(ns) if !ns.is_empty() => format!("{ns}.{name}"),
        _ => name.to_string(),
    }
}
