//! Activity invocation helpers for workflow code

use wfgen_core::GeneratorConfig;

use super::{
    sorted, task_return_type, unique_name, wrapper_name, ClassBuilder, FileBuilder,
    GeneratedFile, MethodBuilder,
};
use crate::error::Result;
use crate::ir::DeclarationDescriptor;

/// Name of the helper generated for an activity
///
/// The entity is the method name without its async suffix, so both `Charge`
/// and `ChargeAsync` become `ExecuteChargeAsync`.
pub fn method_name(config: &GeneratorConfig, activity: &DeclarationDescriptor) -> String {
    let suffix = &config.method_suffix;
    let entity = activity
        .name
        .strip_suffix(suffix.as_str())
        .filter(|entity| !entity.is_empty())
        .unwrap_or(activity.name.as_str());
    wrapper_name(&config.activities.verb, entity, suffix)
}

/// Render the activity helpers file; no activities renders an empty class
pub fn render(
    config: &GeneratorConfig,
    activities: &[DeclarationDescriptor],
) -> Result<GeneratedFile> {
    let target = &config.activities;
    let mut file = FileBuilder::new(&target.output_namespace)
        .with_banner(&config.banner)
        .add_imports(&target.imports);
    let mut class = ClassBuilder::new(&target.class_name)
        .make_public()
        .make_static()
        .make_partial();

    for activity in sorted(activities) {
        file = file
            .add_import(&config.task.namespace)
            .add_imports(activity.namespaces());

        let options = unique_name("options", &activity.parameters);
        let ty = activity.qualified_type_name();
        let call = if activity.is_static {
            format!("() => {ty}.{}({})", activity.name, activity.argument_list())
        } else {
            let instance = unique_name("x", &activity.parameters);
            format!(
                "({ty} {instance}) => {instance}.{}({})",
                activity.name,
                activity.argument_list()
            )
        };

        let method = MethodBuilder::new(
            method_name(config, activity),
            task_return_type(&config.task, &activity.return_shape),
        )
        .make_public()
        .make_static();
        let method = activity.parameters.iter().fold(method, |method, parameter| {
            method.add_parameter(&parameter.ty.display, &parameter.name)
        });
        class.add_method(
            method
                .add_parameter(&target.options_type, &options)
                .with_statement(format!("return {}({call}, {options});", target.invoke)),
        );
    }

    Ok(GeneratedFile {
        file_name: target.file_name.clone(),
        model: file.build(class)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{ParameterDescriptor, ReturnShape, TypeReference};
    use rstest::rstest;

    fn activity(name: &str, is_static: bool, return_shape: ReturnShape) -> DeclarationDescriptor {
        DeclarationDescriptor {
            name: name.to_string(),
            containing_type_name: "TestActivities".to_string(),
            containing_namespace: Some("Sample".to_string()),
            is_static,
            parameters: vec![ParameterDescriptor::new(
                "input",
                TypeReference::literal("TestActivityInput"),
                Some("Sample"),
            )],
            return_shape,
        }
    }

    #[rstest]
    #[case("RunMethod1", "ExecuteRunMethod1Async")]
    #[case("ChargeAsync", "ExecuteChargeAsync")]
    #[case("Async", "ExecuteAsyncAsync")]
    fn test_method_name(#[case] name: &str, #[case] expected: &str) {
        let config = GeneratorConfig::temporal();
        assert_eq!(
            method_name(&config, &activity(name, false, ReturnShape::Void)),
            expected
        );
    }

    #[test]
    fn test_instance_activity() {
        let config = GeneratorConfig::temporal();
        let file = render(
            &config,
            &[activity(
                "RunMethod1",
                false,
                ReturnShape::Value(TypeReference::literal("string")),
            )],
        )
        .unwrap();

        assert_eq!(file.file_name, "TemporalActivityExtensions.g.cs");
        assert_eq!(
            file.model.members[0],
            vec![
                "public static Task<string> ExecuteRunMethod1Async(TestActivityInput input, ActivityOptions options)",
                "{",
                "    return Workflow.ExecuteActivityAsync((Sample.TestActivities x) => x.RunMethod1(input), options);",
                "}",
            ]
        );
    }

    #[test]
    fn test_static_activity_and_ordering() {
        let config = GeneratorConfig::temporal();
        let file = render(
            &config,
            &[
                activity("Second", true, ReturnShape::Wrapped(None)),
                activity("First", true, ReturnShape::Void),
            ],
        )
        .unwrap();

        assert_eq!(file.model.members.len(), 2);
        assert!(file.model.members[0][0].contains("ExecuteFirstAsync"));
        assert_eq!(
            file.model.members[1][2],
            "    return Workflow.ExecuteActivityAsync(() => Sample.TestActivities.Second(input), options);"
        );
        assert_eq!(
            file.model.imports.iter().collect::<Vec<_>>(),
            vec!["Sample", "System.Threading.Tasks", "Temporalio.Workflows"]
        );
    }
}
