//! Workflow classes and their entry point

use wfgen_core::{
    Declaration, MemberKind, MemberRef, SymbolResolver, TaskType, TypeKind, WorkflowTarget,
};

use super::{describe_method, has_marker, Extractor};
use crate::ir::DeclarationDescriptor;

/// Matches workflow classes and describes their entry-point method
pub struct WorkflowExtractor<'a> {
    target: &'a WorkflowTarget,
    task: &'a TaskType,
}

impl<'a> WorkflowExtractor<'a> {
    /// Create an extractor for a workflow target
    pub fn new(target: &'a WorkflowTarget, task: &'a TaskType) -> Self {
        Self { target, task }
    }
}

impl Extractor for WorkflowExtractor<'_> {
    type Output = DeclarationDescriptor;

    fn is_candidate(&self, declaration: &Declaration<'_>) -> bool {
        matches!(
            declaration,
            Declaration::Type(ty) if ty.decl.kind == TypeKind::Class && !ty.decl.attributes.is_empty()
        )
    }

    fn resolve(
        &self,
        resolver: &dyn SymbolResolver,
        declaration: &Declaration<'_>,
    ) -> Option<DeclarationDescriptor> {
        let Declaration::Type(ty) = declaration else {
            return None;
        };
        let full_name = ty.full_name();

        // attributes and members of a partial class may live in any part
        let mut parts = resolver.type_parts(&full_name);
        if parts.is_empty() {
            parts.push(*ty);
        }
        let marked = |marker: &str| {
            parts
                .iter()
                .any(|part| has_marker(resolver, part.scope(), &part.decl.attributes, marker))
        };

        if !marked(&self.target.marker) {
            return None;
        }
        if let Some(opt_in) = &self.target.opt_in_marker {
            if !marked(opt_in) {
                tracing::debug!("Workflow '{}' has not opted in, skipping", full_name);
                return None;
            }
        }

        let Some(entry) = parts.iter().find_map(|part| {
            part.decl
                .members
                .iter()
                .find(|member| {
                    member.kind == MemberKind::Method
                        && has_marker(
                            resolver,
                            part.scope(),
                            &member.attributes,
                            &self.target.entry_marker,
                        )
                })
                .map(|member| MemberRef {
                    file: part.file,
                    owner: part.decl,
                    member,
                })
        }) else {
            tracing::debug!("Workflow '{}' has no entry point, skipping", full_name);
            return None;
        };

        describe_method(resolver, self.task, entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::extract_all;
    use crate::ir::ReturnShape;
    use wfgen_core::{Compilation, GeneratorConfig, SemanticModel};

    const SNAPSHOT: &str = r#"
name: Sample
references:
  - System.Threading.Tasks.Task
  - Temporalio.Workflows.WorkflowAttribute
  - Temporalio.Workflows.WorkflowRunAttribute
files:
  - path: Workflows.cs
    namespace: Sample
    usings: [System.Threading.Tasks, Temporalio.Workflows, Temporalio.Generators.Workflows]
    types:
      - name: Greet
        attributes: [Workflow, GenerateWorkflowExtension]
        members:
          - name: Greet
            kind: constructor
            attributes: [WorkflowRun]
          - name: Helper
          - name: RunAsync
            attributes: [WorkflowRun]
            returns: Task<string>
          - name: OtherAsync
            attributes: [WorkflowRun]
      - name: NotOptedIn
        attributes: [Workflow]
        members:
          - name: RunAsync
            attributes: [WorkflowRun]
      - name: NoEntry
        attributes: [Workflow, GenerateWorkflowExtension]
        members:
          - name: RunAsync
      - name: Plain
        attributes: [Serializable]
      - name: IWorkflowLike
        kind: interface
        attributes: [Workflow, GenerateWorkflowExtension]
"#;

    fn run(config: &GeneratorConfig) -> Vec<DeclarationDescriptor> {
        let compilation = Compilation::from_yaml(SNAPSHOT).unwrap();
        let model = SemanticModel::new(&compilation)
            .with_types(config.workflows.opt_in_marker.clone());
        let declarations: Vec<_> = compilation.declarations().collect();
        let extractor = WorkflowExtractor::new(&config.workflows, &config.task);
        extract_all(&extractor, &model, &declarations)
    }

    #[test]
    fn test_first_entry_point_is_described() {
        let workflows = run(&GeneratorConfig::temporal());
        assert_eq!(workflows.len(), 1);

        let greet = &workflows[0];
        assert_eq!(greet.containing_type_name, "Greet");
        assert_eq!(greet.name, "RunAsync");
        assert!(greet.parameters.is_empty());
        assert!(matches!(
            greet.return_shape,
            ReturnShape::Wrapped(Some(ref ty)) if ty.display == "string"
        ));
    }

    #[test]
    fn test_without_opt_in_marker_every_workflow_qualifies() {
        let mut config = GeneratorConfig::temporal();
        config.workflows.opt_in_marker = None;
        let names: Vec<_> = run(&config)
            .into_iter()
            .map(|d| d.containing_type_name)
            .collect();
        assert_eq!(names, vec!["Greet", "NotOptedIn"]);
    }

    #[test]
    fn test_entry_point_in_another_partial_part() {
        let compilation = Compilation::from_yaml(
            r#"
references:
  - System.Threading.Tasks.Task
  - Temporalio.Workflows.WorkflowAttribute
  - Temporalio.Workflows.WorkflowRunAttribute
files:
  - path: W1.cs
    namespace: P
    usings: [Temporalio.Workflows, Temporalio.Generators.Workflows]
    types:
      - name: Wf
        attributes: [Workflow, GenerateWorkflowExtension]
  - path: W2.cs
    namespace: P
    usings: [System.Threading.Tasks, Temporalio.Workflows]
    types:
      - name: Wf
        attributes: [Serializable]
        members:
          - name: RunAsync
            attributes: [WorkflowRun]
            returns: Task
"#,
        )
        .unwrap();
        let config = GeneratorConfig::temporal();
        let model = SemanticModel::new(&compilation)
            .with_types(config.workflows.opt_in_marker.clone());
        let declarations: Vec<_> = compilation.declarations().collect();
        let extractor = WorkflowExtractor::new(&config.workflows, &config.task);
        let workflows = extract_all(&extractor, &model, &declarations);

        // both parts are candidates and describe the same entry point
        assert_eq!(workflows.len(), 2);
        assert_eq!(workflows[0], workflows[1]);
        assert_eq!(workflows[0].containing_type_name, "Wf");
        assert_eq!(workflows[0].name, "RunAsync");
    }

    #[test]
    fn test_candidate_filter_is_structural() {
        let compilation = Compilation::from_yaml(SNAPSHOT).unwrap();
        let config = GeneratorConfig::temporal();
        let extractor = WorkflowExtractor::new(&config.workflows, &config.task);
        let candidates: Vec<_> = compilation
            .declarations()
            .filter(|d| extractor.is_candidate(d))
            .map(|d| d.name())
            .collect();
        assert_eq!(candidates, vec!["Greet", "NotOptedIn", "NoEntry", "Plain"]);
    }
}
