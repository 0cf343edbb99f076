//! Client extensions for workflows

use wfgen_core::GeneratorConfig;

use super::{
    sorted, task_return_type, unique_name, wrapper_name, ClassBuilder, FileBuilder,
    GeneratedFile, MethodBuilder,
};
use crate::error::Result;
use crate::ir::DeclarationDescriptor;

/// Names of the `Execute` and `Start` wrappers generated for a workflow
pub fn method_names(config: &GeneratorConfig, workflow: &DeclarationDescriptor) -> [String; 2] {
    let target = &config.workflows;
    [&target.execute_verb, &target.start_verb]
        .map(|verb| wrapper_name(verb, &workflow.containing_type_name, &config.method_suffix))
}

/// Render the workflow extensions file; no workflows renders an empty class
pub fn render(
    config: &GeneratorConfig,
    workflows: &[DeclarationDescriptor],
) -> Result<GeneratedFile> {
    let target = &config.workflows;
    let mut file = FileBuilder::new(&target.output_namespace)
        .with_banner(&config.banner)
        .add_imports(&target.imports);
    let mut class = ClassBuilder::new(&target.class_name)
        .make_public()
        .make_static()
        .make_partial();

    for workflow in sorted(workflows) {
        file = file
            .add_import(&config.task.namespace)
            .add_imports(workflow.namespaces());

        let [execute, start] = method_names(config, workflow);
        let handle = match workflow.return_shape.result_type() {
            Some(result) => format!(
                "{}<{}, {}>",
                target.handle_type, workflow.containing_type_name, result.display
            ),
            None => format!("{}<{}>", target.handle_type, workflow.containing_type_name),
        };

        class
            .add_method(workflow_method(
                config,
                workflow,
                &execute,
                &target.execute_verb,
                task_return_type(&config.task, &workflow.return_shape),
            ))
            .add_method(workflow_method(
                config,
                workflow,
                &start,
                &target.start_verb,
                format!("{}<{}>", config.task.name, handle),
            ));
    }

    Ok(GeneratedFile {
        file_name: target.file_name.clone(),
        model: file.build(class)?,
    })
}

fn workflow_method(
    config: &GeneratorConfig,
    workflow: &DeclarationDescriptor,
    name: &str,
    verb: &str,
    return_type: String,
) -> MethodBuilder {
    let target = &config.workflows;
    let client = unique_name("client", &workflow.parameters);
    let options = unique_name("options", &workflow.parameters);
    let instance = unique_name("wf", &workflow.parameters);

    let method = MethodBuilder::new(name, return_type)
        .make_public()
        .make_static()
        .add_parameter(format!("this {}", target.client_type), &client);
    let method = workflow.parameters.iter().fold(method, |method, parameter| {
        method.add_parameter(&parameter.ty.display, &parameter.name)
    });

    method
        .add_parameter(&target.options_type, &options)
        .with_statement(format!(
            "return {client}.{verb}Workflow{suffix}(({ty} {instance}) => {instance}.{run}({arguments}), {options});",
            suffix = config.method_suffix,
            ty = workflow.containing_type_name,
            run = workflow.name,
            arguments = workflow.argument_list(),
        ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{ParameterDescriptor, ReturnShape, TypeReference};

    fn greet(return_shape: ReturnShape) -> DeclarationDescriptor {
        DeclarationDescriptor {
            name: "RunAsync".to_string(),
            containing_type_name: "Greet".to_string(),
            containing_namespace: Some("Sample".to_string()),
            is_static: false,
            parameters: Vec::new(),
            return_shape,
        }
    }

    fn lines(file: &GeneratedFile) -> Vec<String> {
        file.model.members.iter().flatten().cloned().collect()
    }

    #[test]
    fn test_greet_with_result() {
        let config = GeneratorConfig::temporal();
        let workflow = greet(ReturnShape::Wrapped(Some(TypeReference::literal("string"))));
        let file = render(&config, &[workflow]).unwrap();

        assert_eq!(file.file_name, "TemporalClientExtensions.g.cs");
        assert_eq!(file.model.namespace, "Temporalio.Generators.Workflows");
        assert_eq!(
            lines(&file),
            vec![
                "public static Task<string> ExecuteGreetAsync(this ITemporalClient client, WorkflowOptions options)",
                "{",
                "    return client.ExecuteWorkflowAsync((Greet wf) => wf.RunAsync(), options);",
                "}",
                "public static Task<WorkflowHandle<Greet, string>> StartGreetAsync(this ITemporalClient client, WorkflowOptions options)",
                "{",
                "    return client.StartWorkflowAsync((Greet wf) => wf.RunAsync(), options);",
                "}",
            ]
        );
        assert_eq!(
            file.model.imports.iter().collect::<Vec<_>>(),
            vec![
                "Sample",
                "System.Threading.Tasks",
                "Temporalio.Client",
                "Temporalio.Workflows"
            ]
        );
    }

    #[test]
    fn test_no_result_handle() {
        let config = GeneratorConfig::temporal();
        let file = render(&config, &[greet(ReturnShape::Wrapped(None))]).unwrap();
        let lines = lines(&file);
        assert!(lines[0].starts_with("public static Task ExecuteGreetAsync("));
        assert!(lines[4].starts_with("public static Task<WorkflowHandle<Greet>> StartGreetAsync("));
    }

    #[test]
    fn test_parameters_are_kept_in_order_between_client_and_options() {
        let config = GeneratorConfig::temporal();
        let mut workflow = greet(ReturnShape::Void);
        workflow.parameters = vec![
            ParameterDescriptor::new("name", TypeReference::literal("string"), None),
            ParameterDescriptor::new("options", TypeReference::literal("int"), None),
        ];
        let file = render(&config, &[workflow]).unwrap();
        let lines = lines(&file);
        assert_eq!(
            lines[0],
            "public static Task ExecuteGreetAsync(this ITemporalClient client, string name, int options, WorkflowOptions options_)"
        );
        assert_eq!(
            lines[2],
            "    return client.ExecuteWorkflowAsync((Greet wf) => wf.RunAsync(name, options), options_);"
        );
    }

    #[test]
    fn test_empty_container() {
        let config = GeneratorConfig::temporal();
        let file = render(&config, &[]).unwrap();
        assert!(file.model.members.is_empty());
        assert_eq!(
            file.model.declaration,
            "public static partial class TemporalClientExtensions"
        );
        assert_eq!(
            file.model.imports.iter().collect::<Vec<_>>(),
            vec!["Temporalio.Client", "Temporalio.Workflows"]
        );
    }
}
