//! Declarative source file builder
//!
//! Renderers describe a file as namespace → class → members, and the builder
//! flattens that into a [`FileModel`]: plain data an [`Emitter`] turns into
//! text. Nothing here knows about the output template.
//!
//! [`Emitter`]: super::Emitter

use serde::Serialize;
use std::collections::BTreeSet;

use crate::error::{Error, Result};

const INDENT: &str = "    ";

/// A source file ready for emission
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileModel {
    /// Banner comment
    pub banner: String,

    /// Imported namespaces, sorted and de-duplicated
    pub imports: BTreeSet<String>,

    /// File namespace
    pub namespace: String,

    /// Attributes written above the class
    pub class_attributes: Vec<String>,

    /// Class declaration line
    pub declaration: String,

    /// Class members, each as its lines relative to the class body
    pub members: Vec<Vec<String>>,
}

/// Builds a [`FileModel`]
#[derive(Debug, Clone)]
pub struct FileBuilder {
    banner: String,
    namespace: String,
    imports: BTreeSet<String>,
}

impl FileBuilder {
    /// Start a file in `namespace`
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            banner: String::new(),
            namespace: namespace.into(),
            imports: BTreeSet::new(),
        }
    }

    /// Set the banner comment
    pub fn with_banner(mut self, banner: impl Into<String>) -> Self {
        self.banner = banner.into();
        self
    }

    /// Import a namespace; empty names and the file's own namespace are ignored
    pub fn add_import(mut self, namespace: impl Into<String>) -> Self {
        let namespace = namespace.into();
        if !namespace.is_empty() && namespace != self.namespace {
            self.imports.insert(namespace);
        }
        self
    }

    /// Import several namespaces
    pub fn add_imports<I, S>(self, namespaces: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        namespaces
            .into_iter()
            .fold(self, |builder, namespace| builder.add_import(namespace))
    }

    /// Finish the file with its single class
    pub fn build(self, class: ClassBuilder) -> Result<FileModel> {
        if self.namespace.is_empty() {
            return Err(Error::GenerationError(
                "generated files need a namespace".to_string(),
            ));
        }
        let declaration = class.declaration()?;
        let members = class
            .members
            .iter()
            .map(Member::lines)
            .collect::<Result<Vec<_>>>()?;

        Ok(FileModel {
            banner: self.banner,
            imports: self.imports,
            namespace: self.namespace,
            class_attributes: class.attributes,
            declaration,
            members,
        })
    }
}

/// Builds a class declaration and its members
#[derive(Debug, Clone, Default)]
pub struct ClassBuilder {
    name: String,
    declaration: Option<String>,
    is_public: bool,
    is_static: bool,
    is_partial: bool,
    attributes: Vec<String>,
    members: Vec<Member>,
}

#[derive(Debug, Clone)]
enum Member {
    Method(MethodBuilder),
    Property(PropertyBuilder),
}

impl Member {
    fn lines(&self) -> Result<Vec<String>> {
        match self {
            Member::Method(method) => method.lines(),
            Member::Property(property) => property.lines(),
        }
    }
}

impl ClassBuilder {
    /// A class named `name`
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// A class whose declaration line is given verbatim
    pub fn declared(name: impl Into<String>, declaration: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            declaration: Some(declaration.into()),
            ..Default::default()
        }
    }

    /// `public`
    pub fn make_public(mut self) -> Self {
        self.is_public = true;
        self
    }

    /// `static`
    pub fn make_static(mut self) -> Self {
        self.is_static = true;
        self
    }

    /// `partial`
    pub fn make_partial(mut self) -> Self {
        self.is_partial = true;
        self
    }

    /// Add an attribute line (brackets included)
    pub fn add_attribute(mut self, attribute: impl Into<String>) -> Self {
        self.attributes.push(attribute.into());
        self
    }

    /// Add a method
    pub fn add_method(&mut self, method: MethodBuilder) -> &mut Self {
        self.members.push(Member::Method(method));
        self
    }

    /// Add a property
    pub fn add_property(&mut self, property: PropertyBuilder) -> &mut Self {
        self.members.push(Member::Property(property));
        self
    }

    fn declaration(&self) -> Result<String> {
        if self.name.is_empty() {
            return Err(Error::GenerationError(
                "generated classes need a name".to_string(),
            ));
        }
        if let Some(declaration) = &self.declaration {
            return Ok(declaration.clone());
        }

        let mut parts = Vec::new();
        if self.is_public {
            parts.push("public");
        }
        if self.is_static {
            parts.push("static");
        }
        if self.is_partial {
            parts.push("partial");
        }
        parts.push("class");
        parts.push(&self.name);
        Ok(parts.join(" "))
    }
}

/// Builds a method with a single-statement body
#[derive(Debug, Clone, Default)]
pub struct MethodBuilder {
    name: String,
    return_type: String,
    is_public: bool,
    is_static: bool,
    attributes: Vec<String>,
    parameters: Vec<(String, String)>,
    body: Vec<String>,
}

impl MethodBuilder {
    /// A method returning `return_type`
    pub fn new(name: impl Into<String>, return_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            return_type: return_type.into(),
            ..Default::default()
        }
    }

    /// `public`
    pub fn make_public(mut self) -> Self {
        self.is_public = true;
        self
    }

    /// `static`
    pub fn make_static(mut self) -> Self {
        self.is_static = true;
        self
    }

    /// Add an attribute line (brackets included)
    pub fn add_attribute(mut self, attribute: impl Into<String>) -> Self {
        self.attributes.push(attribute.into());
        self
    }

    /// Append a parameter
    pub fn add_parameter(mut self, ty: impl Into<String>, name: impl Into<String>) -> Self {
        self.parameters.push((ty.into(), name.into()));
        self
    }

    /// Append a body statement
    pub fn with_statement(mut self, statement: impl Into<String>) -> Self {
        self.body.push(statement.into());
        self
    }

    fn lines(&self) -> Result<Vec<String>> {
        if self.name.is_empty() || self.return_type.is_empty() {
            return Err(Error::GenerationError(format!(
                "method '{}' needs a name and a return type",
                self.name
            )));
        }
        let mut seen = BTreeSet::new();
        if let Some((_, name)) = self
            .parameters
            .iter()
            .find(|(_, name)| !seen.insert(name.as_str()))
        {
            return Err(Error::GenerationError(format!(
                "method '{}' declares parameter '{}' twice",
                self.name, name
            )));
        }

        let mut signature = String::new();
        if self.is_public {
            signature.push_str("public ");
        }
        if self.is_static {
            signature.push_str("static ");
        }
        let parameters = self
            .parameters
            .iter()
            .map(|(ty, name)| format!("{ty} {name}"))
            .collect::<Vec<_>>()
            .join(", ");
        signature.push_str(&format!("{} {}({})", self.return_type, self.name, parameters));

        let mut lines = self.attributes.clone();
        lines.push(signature);
        lines.push("{".to_string());
        lines.extend(self.body.iter().map(|statement| format!("{INDENT}{statement}")));
        lines.push("}".to_string());
        Ok(lines)
    }
}

/// Builds a get-only auto property with an initializer
#[derive(Debug, Clone)]
pub struct PropertyBuilder {
    name: String,
    ty: String,
    initializer: String,
}

impl PropertyBuilder {
    /// `public {ty} {name} { get; } = {initializer};`
    pub fn new(
        name: impl Into<String>,
        ty: impl Into<String>,
        initializer: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            initializer: initializer.into(),
        }
    }

    fn lines(&self) -> Result<Vec<String>> {
        if self.name.is_empty() {
            return Err(Error::GenerationError(
                "properties need a name".to_string(),
            ));
        }
        Ok(vec![format!(
            "public {} {} {{ get; }} = {};",
            self.ty, self.name, self.initializer
        )])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_file_model() {
        let mut class = ClassBuilder::new("Extensions").make_public().make_static();
        class.add_method(
            MethodBuilder::new("ExecuteAsync", "Task")
                .make_public()
                .make_static()
                .add_parameter("this Client", "client")
                .add_parameter("Options", "options")
                .with_statement("return client.RunAsync(options);"),
        );

        let file = FileBuilder::new("Out")
            .with_banner("// banner")
            .add_imports(["B", "A", "", "Out", "A"])
            .build(class)
            .unwrap();

        assert_eq!(file.imports.iter().collect::<Vec<_>>(), vec!["A", "B"]);
        assert_eq!(file.declaration, "public static class Extensions");
        assert_eq!(
            file.members,
            vec![vec![
                "public static Task ExecuteAsync(this Client client, Options options)".to_string(),
                "{".to_string(),
                "    return client.RunAsync(options);".to_string(),
                "}".to_string(),
            ]]
        );
    }

    #[test]
    fn test_declared_class_and_property() {
        let mut class = ClassBuilder::declared("Marker", "public sealed class Marker : Base")
            .add_attribute("[Usage]");
        class.add_property(PropertyBuilder::new("MockRun", "Action", "Make()"));
        let file = FileBuilder::new("Out").build(class).unwrap();

        assert_eq!(file.declaration, "public sealed class Marker : Base");
        assert_eq!(file.class_attributes, vec!["[Usage]"]);
        assert_eq!(
            file.members,
            vec![vec!["public Action MockRun { get; } = Make();".to_string()]]
        );
    }

    #[test]
    fn test_partial_class() {
        let class = ClassBuilder::new("Mocks").make_public().make_partial();
        let file = FileBuilder::new("Tests").build(class).unwrap();
        assert_eq!(file.declaration, "public partial class Mocks");
        assert!(file.members.is_empty());
    }

    #[test]
    fn test_duplicate_parameter_is_an_error() {
        let mut class = ClassBuilder::new("C");
        class.add_method(
            MethodBuilder::new("M", "void")
                .add_parameter("int", "a")
                .add_parameter("int", "a"),
        );
        let result = FileBuilder::new("N").build(class);
        assert!(matches!(result, Err(Error::GenerationError(_))));
    }

    #[test]
    fn test_missing_namespace_is_an_error() {
        let result = FileBuilder::new("").build(ClassBuilder::new("C"));
        assert!(matches!(result, Err(Error::GenerationError(_))));
    }
}
