//! Activity mock doubles
//!
//! A double is a class carrying the mock marker whose first base type is the
//! generic mock base, e.g. `TestMocks : ActivityMockBase<TestActivities>`. The
//! type argument must be declared in the compilation; its activity methods
//! become the double's members.

use wfgen_core::{
    Declaration, MemberKind, MemberRef, MockTarget, SymbolResolver, TaskType, TypeKind, TypeSyntax,
};

use super::{describe_method, has_marker, Extractor};
use crate::ir::MockDoubleDescriptor;

/// Matches mock double classes
pub struct MockExtractor<'a> {
    target: &'a MockTarget,
    activity_marker: &'a str,
    task: &'a TaskType,
}

impl<'a> MockExtractor<'a> {
    /// Create an extractor for a mock target; `activity_marker` selects the
    /// doubled methods
    pub fn new(target: &'a MockTarget, activity_marker: &'a str, task: &'a TaskType) -> Self {
        Self {
            target,
            activity_marker,
            task,
        }
    }
}

impl Extractor for MockExtractor<'_> {
    type Output = MockDoubleDescriptor;

    fn is_candidate(&self, declaration: &Declaration<'_>) -> bool {
        matches!(
            declaration,
            Declaration::Type(ty) if ty.decl.kind == TypeKind::Class
                && !ty.decl.attributes.is_empty()
                && !ty.decl.base_types.is_empty()
        )
    }

    fn resolve(
        &self,
        resolver: &dyn SymbolResolver,
        declaration: &Declaration<'_>,
    ) -> Option<MockDoubleDescriptor> {
        let Declaration::Type(ty) = declaration else {
            return None;
        };
        let scope = ty.scope();

        let marked = resolver
            .type_parts(&ty.full_name())
            .iter()
            .chain(std::iter::once(ty))
            .any(|part| {
                has_marker(resolver, part.scope(), &part.decl.attributes, &self.target.marker)
            });
        if !marked {
            return None;
        }

        let Some(namespace) = ty.file.namespace.clone().filter(|ns| !ns.is_empty()) else {
            tracing::debug!("Mock double '{}' is in the global namespace, skipping", ty.decl.name);
            return None;
        };

        let base = TypeSyntax::parse(ty.decl.base_types.first()?)?;
        if resolver.resolve_type_name(scope, &base.name).as_deref() != Some(self.target.base_type.as_str()) {
            return None;
        }
        let [argument] = base.arguments.as_slice() else {
            return None;
        };

        let target_name = resolver.resolve_type_name(scope, &argument.name)?;
        let parts = resolver.type_parts(&target_name);
        let Some(target) = parts.first().copied() else {
            tracing::debug!(
                "Mock double '{}' targets '{}' which is not declared in this compilation",
                ty.full_name(),
                target_name
            );
            return None;
        };

        let activities = parts
            .iter()
            .flat_map(|part| {
                part.decl.members.iter().map(move |member| MemberRef {
                    file: part.file,
                    owner: part.decl,
                    member,
                })
            })
            .filter(|method| {
                method.member.kind == MemberKind::Method
                    && has_marker(
                        resolver,
                        method.scope(),
                        &method.member.attributes,
                        self.activity_marker,
                    )
            })
            .filter_map(|method| describe_method(resolver, self.task, method))
            .collect();

        Some(MockDoubleDescriptor {
            name: ty.decl.name.clone(),
            namespace,
            target_name: target.decl.name.clone(),
            target_namespace: target.file.namespace.clone().filter(|ns| !ns.is_empty()),
            activities,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::extract_all;
    use wfgen_core::{Compilation, GeneratorConfig, SemanticModel};

    const SNAPSHOT: &str = r#"
name: Sample
references:
  - System.Threading.Tasks.Task
  - Temporalio.Activities.ActivityAttribute
files:
  - path: TestActivities.cs
    namespace: Sample.Activities
    usings: [System.Threading.Tasks, Temporalio.Activities]
    types:
      - name: TestActivities
        members:
          - name: RunAsync
            attributes: [Activity]
            returns: Task<string>
            parameters:
              - { name: name, type: string }
          - name: NotAnActivity
  - path: Mocks.cs
    namespace: Sample.Tests
    usings: [Sample.Activities, Temporalio.Generators.Testing]
    types:
      - name: TestMocks
        attributes: [GenerateNSubstituteMocks]
        base_types: [ActivityMockBase<TestActivities>]
      - name: ExternalMocks
        attributes: [GenerateNSubstituteMocks]
        base_types: [ActivityMockBase<Temporalio.Activities.ActivityAttribute>]
      - name: WrongBase
        attributes: [GenerateNSubstituteMocks]
        base_types: [Object]
      - name: Unmarked
        attributes: [Serializable]
        base_types: [ActivityMockBase<TestActivities>]
  - path: Global.cs
    usings: [Sample.Activities, Temporalio.Generators.Testing]
    types:
      - name: GlobalMocks
        attributes: [GenerateNSubstituteMocks]
        base_types: [ActivityMockBase<TestActivities>]
"#;

    #[test]
    fn test_mock_double_is_described() {
        let compilation = Compilation::from_yaml(SNAPSHOT).unwrap();
        let config = GeneratorConfig::temporal();
        let model = SemanticModel::new(&compilation)
            .with_types([config.mocks.marker.clone(), config.mocks.base_type.clone()]);
        let extractor =
            MockExtractor::new(&config.mocks, &config.activities.marker, &config.task);

        let declarations: Vec<_> = compilation.declarations().collect();
        let doubles = extract_all(&extractor, &model, &declarations);

        assert_eq!(doubles.len(), 1);
        let double = &doubles[0];
        assert_eq!(double.qualified_name(), "Sample.Tests.TestMocks");
        assert_eq!(double.target_name, "TestActivities");
        assert_eq!(double.target_namespace.as_deref(), Some("Sample.Activities"));
        assert_eq!(double.activities.len(), 1);
        assert_eq!(double.activities[0].name, "RunAsync");
    }

    #[test]
    fn test_mock_marker_must_resolve() {
        let compilation = Compilation::from_yaml(SNAPSHOT).unwrap();
        let config = GeneratorConfig::temporal();
        let model = SemanticModel::new(&compilation);
        let extractor =
            MockExtractor::new(&config.mocks, &config.activities.marker, &config.task);

        let declarations: Vec<_> = compilation.declarations().collect();
        assert!(extract_all(&extractor, &model, &declarations).is_empty());
    }

    #[test]
    fn test_partial_target_contributes_every_part() {
        let compilation = Compilation::from_yaml(
            r#"
references:
  - Temporalio.Activities.ActivityAttribute
files:
  - path: A1.cs
    namespace: P
    usings: [Temporalio.Activities]
    types:
      - name: Acts
        members:
          - { name: One, attributes: [Activity] }
  - path: A2.cs
    namespace: P
    usings: [Temporalio.Activities]
    types:
      - name: Acts
        members:
          - { name: Two, attributes: [Activity] }
  - path: ActsDouble.cs
    namespace: P.Tests
    usings: [P, Temporalio.Generators.Testing]
    types:
      - name: ActsDouble
        attributes: [GenerateNSubstituteMocks]
        base_types: [ActivityMockBase<Acts>]
"#,
        )
        .unwrap();
        let config = GeneratorConfig::temporal();
        let model = SemanticModel::new(&compilation)
            .with_types([config.mocks.marker.clone(), config.mocks.base_type.clone()]);
        let extractor =
            MockExtractor::new(&config.mocks, &config.activities.marker, &config.task);

        let declarations: Vec<_> = compilation.declarations().collect();
        let doubles = extract_all(&extractor, &model, &declarations);

        assert_eq!(doubles.len(), 1);
        let names: Vec<_> = doubles[0].activities.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["One", "Two"]);
    }
}
