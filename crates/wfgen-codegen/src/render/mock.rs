//! Activity mock doubles
//!
//! Each activity becomes a substitute delegate property (`Mock<Name>`) and an
//! activity method forwarding to it, so tests can stub and verify calls on
//! the delegate.

use wfgen_core::GeneratorConfig;

use super::{sorted, ClassBuilder, FileBuilder, GeneratedFile, MethodBuilder, PropertyBuilder};
use crate::error::Result;
use crate::ir::{DeclarationDescriptor, MockDoubleDescriptor, ReturnShape};

/// `<Namespace>.<Class>.g.cs`
pub fn file_name(config: &GeneratorConfig, double: &MockDoubleDescriptor) -> String {
    format!("{}{}", double.qualified_name(), config.generated_file_suffix)
}

/// Render one double as a partial class in its own namespace
pub fn render(config: &GeneratorConfig, double: &MockDoubleDescriptor) -> Result<GeneratedFile> {
    let target = &config.mocks;
    let mut file = FileBuilder::new(&double.namespace)
        .with_banner(&config.banner)
        .add_imports(&target.imports)
        .add_import(&config.task.namespace)
        .add_imports(double.target_namespace.clone());
    let mut class = ClassBuilder::new(&double.name).make_public().make_partial();

    for activity in sorted(&double.activities) {
        file = file.add_imports(activity.namespaces());

        let return_type = declared_return_type(config, activity);
        let delegate = delegate_type(activity, &return_type);
        let property = format!("{}{}", target.property_prefix, activity.name);
        let call = format!("{property}({})", activity.argument_list());

        class.add_property(PropertyBuilder::new(
            &property,
            &delegate,
            target.substitute.replace("{}", &delegate),
        ));

        let method = MethodBuilder::new(&activity.name, &return_type)
            .make_public()
            .add_attribute(format!("[{}]", target.activity_attribute));
        let method = activity.parameters.iter().fold(method, |method, parameter| {
            method.add_parameter(&parameter.ty.display, &parameter.name)
        });
        class.add_method(match activity.return_shape {
            ReturnShape::Void => method.with_statement(format!("{call};")),
            _ => method.with_statement(format!("return {call};")),
        });
    }

    Ok(GeneratedFile {
        file_name: file_name(config, double),
        model: file.build(class)?,
    })
}

/// The activity's return type as declared
fn declared_return_type(config: &GeneratorConfig, activity: &DeclarationDescriptor) -> String {
    match &activity.return_shape {
        ReturnShape::Void => "void".to_string(),
        ReturnShape::Value(ty) => ty.display.clone(),
        ReturnShape::Wrapped(None) => config.task.name.clone(),
        ReturnShape::Wrapped(Some(ty)) => format!("{}<{}>", config.task.name, ty.display),
    }
}

/// `Action<…>` for void activities, `Func<…, R>` otherwise
fn delegate_type(activity: &DeclarationDescriptor, return_type: &str) -> String {
    let mut arguments: Vec<&str> = activity
        .parameters
        .iter()
        .map(|parameter| parameter.ty.display.as_str())
        .collect();
    let delegate = if activity.return_shape == ReturnShape::Void {
        "Action"
    } else {
        arguments.push(return_type);
        "Func"
    };
    if arguments.is_empty() {
        delegate.to_string()
    } else {
        format!("{delegate}<{}>", arguments.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{ParameterDescriptor, TypeReference};

    fn double(activities: Vec<DeclarationDescriptor>) -> MockDoubleDescriptor {
        MockDoubleDescriptor {
            name: "TestMocks".to_string(),
            namespace: "Sample.Tests".to_string(),
            target_name: "TestActivities".to_string(),
            target_namespace: Some("Sample".to_string()),
            activities,
        }
    }

    fn activity(name: &str, return_shape: ReturnShape) -> DeclarationDescriptor {
        DeclarationDescriptor {
            name: name.to_string(),
            containing_type_name: "TestActivities".to_string(),
            containing_namespace: Some("Sample".to_string()),
            is_static: false,
            parameters: vec![ParameterDescriptor::new(
                "name",
                TypeReference::literal("string"),
                Some("Sample"),
            )],
            return_shape,
        }
    }

    #[test]
    fn test_value_activity() {
        let config = GeneratorConfig::temporal();
        let file = render(
            &config,
            &double(vec![activity(
                "RunAsync",
                ReturnShape::Wrapped(Some(TypeReference::literal("string"))),
            )]),
        )
        .unwrap();

        assert_eq!(file.file_name, "Sample.Tests.TestMocks.g.cs");
        assert_eq!(file.model.declaration, "public partial class TestMocks");
        assert_eq!(
            file.model.members,
            vec![
                vec!["public Func<string, Task<string>> MockRunAsync { get; } = Substitute.For<Func<string, Task<string>>>();"],
                vec![
                    "[Activity]",
                    "public Task<string> RunAsync(string name)",
                    "{",
                    "    return MockRunAsync(name);",
                    "}",
                ],
            ]
        );
        assert_eq!(
            file.model.imports.iter().collect::<Vec<_>>(),
            vec![
                "NSubstitute",
                "Sample",
                "System",
                "System.Threading.Tasks",
                "Temporalio.Activities"
            ]
        );
    }

    #[test]
    fn test_void_activity_uses_action() {
        let config = GeneratorConfig::temporal();
        let file = render(&config, &double(vec![activity("Log", ReturnShape::Void)])).unwrap();
        assert_eq!(
            file.model.members[0][0],
            "public Action<string> MockLog { get; } = Substitute.For<Action<string>>();"
        );
        assert_eq!(file.model.members[1][3], "    MockLog(name);");
    }

    #[test]
    fn test_delegate_without_parameters() {
        let mut ping = activity("Ping", ReturnShape::Void);
        ping.parameters.clear();
        assert_eq!(delegate_type(&ping, "void"), "Action");

        let mut count = activity("Count", ReturnShape::Value(TypeReference::literal("int")));
        count.parameters.clear();
        assert_eq!(delegate_type(&count, "int"), "Func<int>");
    }
}
