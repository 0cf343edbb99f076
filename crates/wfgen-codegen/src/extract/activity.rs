//! Activity methods

use wfgen_core::{Declaration, MemberKind, SymbolResolver, TaskType};

use super::{describe_method, has_marker, Extractor};
use crate::ir::DeclarationDescriptor;

/// Matches methods carrying the activity marker
pub struct ActivityExtractor<'a> {
    marker: &'a str,
    task: &'a TaskType,
}

impl<'a> ActivityExtractor<'a> {
    /// Create an extractor for an activity marker
    pub fn new(marker: &'a str, task: &'a TaskType) -> Self {
        Self { marker, task }
    }
}

impl Extractor for ActivityExtractor<'_> {
    type Output = DeclarationDescriptor;

    fn is_candidate(&self, declaration: &Declaration<'_>) -> bool {
        matches!(
            declaration,
            Declaration::Member(m) if m.member.kind == MemberKind::Method && !m.member.attributes.is_empty()
        )
    }

    fn resolve(
        &self,
        resolver: &dyn SymbolResolver,
        declaration: &Declaration<'_>,
    ) -> Option<DeclarationDescriptor> {
        let Declaration::Member(method) = declaration else {
            return None;
        };
        if !has_marker(resolver, method.scope(), &method.member.attributes, self.marker) {
            return None;
        }
        describe_method(resolver, self.task, *method)
    }
}
