//! Symbol model extraction
//!
//! An [`Extractor`] works in two stages. [`Extractor::is_candidate`] is a
//! structural predicate run on every declaration, so it must stay cheap and
//! never touch the resolver. [`Extractor::resolve`] does the semantic work and
//! returns `None` for anything that does not resolve or is not eligible yet.

pub mod activity;
pub mod mock;
pub mod workflow;

pub use activity::ActivityExtractor;
pub use mock::MockExtractor;
pub use workflow::WorkflowExtractor;

use std::collections::BTreeSet;

use wfgen_core::semantic::keyword_type;
use wfgen_core::{Declaration, MemberRef, Scope, SymbolResolver, TaskType, TypeSyntax};

use crate::ir::{DeclarationDescriptor, ParameterDescriptor, ReturnShape, TypeReference};

/// Turns matching declarations into descriptors
pub trait Extractor {
    /// Descriptor produced for a match
    type Output;

    /// Cheap structural filter, no name resolution
    fn is_candidate(&self, declaration: &Declaration<'_>) -> bool;

    /// Semantic matching; `None` when the declaration does not qualify
    fn resolve(
        &self,
        resolver: &dyn SymbolResolver,
        declaration: &Declaration<'_>,
    ) -> Option<Self::Output>;
}

/// Run an extractor over a set of declarations
pub fn extract_all<E: Extractor>(
    extractor: &E,
    resolver: &dyn SymbolResolver,
    declarations: &[Declaration<'_>],
) -> Vec<E::Output> {
    declarations
        .iter()
        .filter(|declaration| extractor.is_candidate(declaration))
        .filter_map(|declaration| extractor.resolve(resolver, declaration))
        .collect()
}

/// Whether any attribute resolves to exactly `marker`
pub fn has_marker(
    resolver: &dyn SymbolResolver,
    scope: Scope<'_>,
    attributes: &[String],
    marker: &str,
) -> bool {
    attributes
        .iter()
        .any(|attribute| resolver.resolve_attribute(scope, attribute).as_deref() == Some(marker))
}

/// Describe type text written in `scope`
///
/// Text outside the supported grammar is kept literally.
pub fn type_reference(resolver: &dyn SymbolResolver, scope: Scope<'_>, text: &str) -> TypeReference {
    match TypeSyntax::parse(text) {
        Some(syntax) => describe_syntax(resolver, scope, &syntax),
        None => TypeReference::literal(text),
    }
}

fn describe_syntax(
    resolver: &dyn SymbolResolver,
    scope: Scope<'_>,
    syntax: &TypeSyntax,
) -> TypeReference {
    let arguments: Vec<TypeReference> = syntax
        .arguments
        .iter()
        .map(|argument| describe_syntax(resolver, scope, argument))
        .collect();

    let mut namespaces: BTreeSet<String> = arguments
        .iter()
        .flat_map(|argument| argument.namespaces.iter().cloned())
        .collect();

    // keywords need no import and display as written
    let (name, qualified_name, namespace) = if keyword_type(syntax.base_name()).is_some() {
        (syntax.name.clone(), Some(syntax.name.clone()), None)
    } else {
        match resolver.resolve_type_name(scope, &syntax.name) {
            Some(full) => {
                let namespace = wfgen_core::semantic::namespace_of(&full).map(str::to_string);
                if syntax.base_name().contains('.') {
                    // written qualified: emit the full name, nothing to import
                    (full.clone(), Some(full), namespace)
                } else {
                    namespaces.extend(namespace.clone());
                    (syntax.name.clone(), Some(full), namespace)
                }
            }
            None => (syntax.name.clone(), None, None),
        }
    };

    let display = render_type(&name, arguments.iter().map(|a| a.display.as_str()), &syntax.suffix);
    let qualified = qualified_name.and_then(|outer| {
        let inner: Option<Vec<&str>> = arguments.iter().map(|a| a.qualified.as_deref()).collect();
        inner.map(|inner| render_type(&outer, inner.into_iter(), &syntax.suffix))
    });

    TypeReference {
        display,
        qualified,
        namespace,
        namespaces,
    }
}

fn render_type<'a>(name: &str, arguments: impl Iterator<Item = &'a str>, suffix: &str) -> String {
    let arguments: Vec<&str> = arguments.collect();
    if arguments.is_empty() {
        format!("{name}{suffix}")
    } else {
        format!("{name}<{}>{suffix}", arguments.join(", "))
    }
}

/// Classify a declared return type against the wrapper task type
///
/// Only an exact match on the resolved fully qualified name counts as
/// already wrapped.
pub fn return_shape(
    resolver: &dyn SymbolResolver,
    scope: Scope<'_>,
    task: &TaskType,
    text: &str,
) -> ReturnShape {
    let Some(syntax) = TypeSyntax::parse(text) else {
        return ReturnShape::Value(TypeReference::literal(text));
    };

    if syntax.base_name() == "void" && syntax.suffix.is_empty() {
        return ReturnShape::Void;
    }

    let is_task = syntax.suffix.is_empty()
        && resolver.resolve_type_name(scope, &syntax.name).as_deref() == Some(task.full_name.as_str());
    if is_task {
        match syntax.arguments.as_slice() {
            [] => return ReturnShape::Wrapped(None),
            [inner] => {
                return ReturnShape::Wrapped(Some(describe_syntax(resolver, scope, inner)));
            }
            _ => {}
        }
    }

    ReturnShape::Value(describe_syntax(resolver, scope, &syntax))
}

/// Build the descriptor for a method; `None` if it would be malformed
pub fn describe_method(
    resolver: &dyn SymbolResolver,
    task: &TaskType,
    method: MemberRef<'_>,
) -> Option<DeclarationDescriptor> {
    let scope = method.scope();
    let containing_namespace = method
        .file
        .namespace
        .clone()
        .filter(|namespace| !namespace.is_empty());

    let parameters = method
        .member
        .parameters
        .iter()
        .map(|parameter| {
            ParameterDescriptor::new(
                parameter.name.trim(),
                type_reference(resolver, scope, &parameter.type_name),
                containing_namespace.as_deref(),
            )
        })
        .collect();

    let descriptor = DeclarationDescriptor {
        name: method.member.name.trim().to_string(),
        containing_type_name: method.owner.name.trim().to_string(),
        containing_namespace,
        is_static: method.member.is_static || method.owner.is_static,
        parameters,
        return_shape: return_shape(resolver, scope, task, &method.member.returns),
    };

    if descriptor.is_well_formed() {
        Some(descriptor)
    } else {
        tracing::debug!(
            "Skipping malformed declaration '{}.{}'",
            descriptor.containing_type_name,
            descriptor.name
        );
        None
    }
}
