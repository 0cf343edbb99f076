//! Semantic model
//!
//! [`SymbolResolver`] is the narrow seam between generators and the host
//! compiler: it answers "what fully qualified type does this written name
//! refer to here?" and "where is this type declared?". [`SemanticModel`] is
//! the implementation backed by a [`Compilation`] snapshot.
//!
//! Lookup follows the usual C# order for a simple name: enclosing namespaces
//! (innermost first), then `using` imports, then the global namespace. A name
//! imported by more than one `using` is ambiguous and does not resolve.
//! Generic arity is not part of a type's identity here.

use std::collections::{BTreeSet, HashMap};

use crate::symbols::{Compilation, Scope, TypeDeclRef};

/// Name resolution provided by the host
pub trait SymbolResolver {
    /// Resolve a type name as written (no generic arguments) to its fully
    /// qualified name
    fn resolve_type_name(&self, scope: Scope<'_>, written: &str) -> Option<String>;

    /// Whether a fully qualified type exists in the compilation or its references
    fn contains_type(&self, full_name: &str) -> bool;

    /// Declaration of a type declared in the compilation's own sources
    ///
    /// For a partial type this is the first part.
    fn find_type(&self, full_name: &str) -> Option<TypeDeclRef<'_>> {
        self.type_parts(full_name).into_iter().next()
    }

    /// Every part of a type declared in the compilation's own sources, in
    /// declaration order
    fn type_parts(&self, full_name: &str) -> Vec<TypeDeclRef<'_>>;

    /// Resolve an attribute as written (`Workflow`, `WorkflowAttribute`,
    /// `Activity("name")`) to the fully qualified attribute type
    fn resolve_attribute(&self, scope: Scope<'_>, written: &str) -> Option<String> {
        let name = written.split('(').next().unwrap_or(written).trim();
        if name.is_empty() {
            return None;
        }
        if name.ends_with("Attribute") {
            if let Some(resolved) = self.resolve_type_name(scope, name) {
                return Some(resolved);
            }
        }
        self.resolve_type_name(scope, &format!("{name}Attribute"))
            .or_else(|| self.resolve_type_name(scope, name))
    }
}

/// Semantic model over a compilation snapshot
#[derive(Debug, Clone)]
pub struct SemanticModel<'c> {
    known: BTreeSet<String>,
    declared: HashMap<String, Vec<TypeDeclRef<'c>>>,
}

impl<'c> SemanticModel<'c> {
    /// Index the references and declared types of a compilation
    pub fn new(compilation: &'c Compilation) -> Self {
        let mut known: BTreeSet<String> = compilation
            .references
            .iter()
            .map(|reference| reference.trim().to_string())
            .filter(|reference| !reference.is_empty())
            .collect();

        let mut declared: HashMap<String, Vec<TypeDeclRef<'c>>> = HashMap::new();
        for ty in compilation.type_declarations() {
            let full_name = ty.full_name();
            known.insert(full_name.clone());
            declared.entry(full_name).or_default().push(ty);
        }

        Self { known, declared }
    }

    /// Make additional types visible, e.g. sources a generator emits
    /// alongside the compilation
    pub fn with_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.known.extend(types.into_iter().map(Into::into));
        self
    }

    fn lookup_simple(&self, scope: Scope<'_>, name: &str) -> Option<String> {
        for namespace in enclosing_namespaces(scope.namespace) {
            let candidate = format!("{namespace}.{name}");
            if self.known.contains(&candidate) {
                return Some(candidate);
            }
        }

        let mut imported = scope
            .usings
            .iter()
            .map(|using| format!("{}.{name}", using.trim()))
            .filter(|candidate| self.known.contains(candidate));
        match (imported.next(), imported.next()) {
            (Some(found), None) => return Some(found),
            (Some(first), Some(second)) => {
                tracing::debug!("'{}' is ambiguous between {} and {}", name, first, second);
                return None;
            }
            _ => {}
        }

        self.known.contains(name).then(|| name.to_string())
    }

    fn lookup_qualified(&self, scope: Scope<'_>, name: &str) -> Option<String> {
        if self.known.contains(name) {
            return Some(name.to_string());
        }
        enclosing_namespaces(scope.namespace)
            .map(|namespace| format!("{namespace}.{name}"))
            .find(|candidate| self.known.contains(candidate))
    }
}

impl SymbolResolver for SemanticModel<'_> {
    fn resolve_type_name(&self, scope: Scope<'_>, written: &str) -> Option<String> {
        let written = written.trim();
        if let Some(global) = written.strip_prefix("global::") {
            return self.known.contains(global).then(|| global.to_string());
        }
        if let Some(keyword) = keyword_type(written) {
            return Some(keyword.to_string());
        }
        if written.contains('.') {
            self.lookup_qualified(scope, written)
        } else {
            self.lookup_simple(scope, written)
        }
    }

    fn contains_type(&self, full_name: &str) -> bool {
        self.known.contains(full_name)
    }

    fn type_parts(&self, full_name: &str) -> Vec<TypeDeclRef<'_>> {
        self.declared.get(full_name).cloned().unwrap_or_default()
    }
}

/// `A.B.C` → `A.B.C`, `A.B`, `A`
fn enclosing_namespaces(namespace: Option<&str>) -> impl Iterator<Item = &str> {
    std::iter::successors(namespace.filter(|ns| !ns.is_empty()), |&ns| {
        ns.rsplit_once('.').map(|(parent, _)| parent)
    })
}

/// The `System` type a C# keyword type stands for
pub fn keyword_type(name: &str) -> Option<&'static str> {
    let full = match name {
        "bool" => "System.Boolean",
        "byte" => "System.Byte",
        "sbyte" => "System.SByte",
        "char" => "System.Char",
        "decimal" => "System.Decimal",
        "double" => "System.Double",
        "float" => "System.Single",
        "int" => "System.Int32",
        "uint" => "System.UInt32",
        "long" => "System.Int64",
        "ulong" => "System.UInt64",
        "short" => "System.Int16",
        "ushort" => "System.UInt16",
        "nint" => "System.IntPtr",
        "nuint" => "System.UIntPtr",
        "object" | "dynamic" => "System.Object",
        "string" => "System.String",
        "void" => "System.Void",
        _ => return None,
    };
    Some(full)
}

/// Namespace part of a fully qualified name
pub fn namespace_of(full_name: &str) -> Option<&str> {
    full_name.rsplit_once('.').map(|(namespace, _)| namespace)
}
