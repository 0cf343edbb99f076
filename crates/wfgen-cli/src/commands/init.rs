//! Initialize a new wfgen project

use anyhow::Result;
use std::fs;
use std::path::Path;

const SAMPLE_SNAPSHOT: &str = r#"# Compilation snapshot: what the host compiler sees
name: Greeting
references:
  - System.Threading.Tasks.Task
  - Temporalio.Workflows.WorkflowAttribute
  - Temporalio.Workflows.WorkflowRunAttribute
  - Temporalio.Activities.ActivityAttribute
files:
  - path: GreetingActivities.cs
    namespace: Greeting
    usings: [System.Threading.Tasks, Temporalio.Activities]
    types:
      - name: GreetingActivities
        members:
          - name: ComposeAsync
            attributes: [Activity]
            returns: Task<string>
            parameters:
              - { name: name, type: string }
  - path: GreetingWorkflow.cs
    namespace: Greeting
    usings:
      - System.Threading.Tasks
      - Temporalio.Generators.Workflows
      - Temporalio.Workflows
    types:
      - name: GreetingWorkflow
        attributes: [Workflow, GenerateWorkflowExtension]
        members:
          - name: RunAsync
            attributes: [WorkflowRun]
            returns: Task<string>
            parameters:
              - { name: name, type: string }
  - path: GreetingActivitiesDouble.cs
    namespace: Greeting.Tests
    usings: [Greeting, Temporalio.Generators.Testing]
    types:
      - name: GreetingActivitiesDouble
        attributes: [GenerateNSubstituteMocks]
        base_types: [ActivityMockBase<GreetingActivities>]
"#;

/// Run the init command
pub async fn run(path: &str, name: Option<&str>) -> Result<()> {
    let project_dir = Path::new(path);

    if !project_dir.exists() {
        fs::create_dir_all(project_dir)?;
    }

    let abs_path = project_dir.canonicalize()?;

    let project_name = match name {
        Some(n) => n.to_string(),
        None => abs_path
            .file_name()
            .and_then(|n| n.to_str())
            .map(|s| s.to_string())
            .ok_or_else(|| anyhow::anyhow!("Could not determine project name from path"))?,
    };

    if project_dir.join("wfgen.yaml").exists() {
        anyhow::bail!(
            "Directory '{}' already contains a wfgen.yaml",
            project_dir.display()
        );
    }

    tracing::info!("Creating new wfgen project: {}", project_name);

    fs::create_dir_all(project_dir.join("snapshots"))?;

    let config = format!(
        r#"# wfgen Project Configuration
name: {project_name}

# Snapshot files or directories
inputs:
  - snapshots

# Generated sources land in <output_dir>/<compilation name>/
output_dir: generated
"#
    );
    fs::write(project_dir.join("wfgen.yaml"), config)?;
    fs::write(project_dir.join("snapshots/greeting.yaml"), SAMPLE_SNAPSHOT)?;

    tracing::info!("✓ Created wfgen.yaml");
    tracing::info!("✓ Created snapshots/greeting.yaml");
    tracing::info!("");
    tracing::info!("Next steps:");
    tracing::info!("  wfgen --config {} generate", project_dir.display());

    Ok(())
}
