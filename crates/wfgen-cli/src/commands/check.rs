//! Verify generated sources on disk are up to date

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use wfgen_codegen::ir::content_hash;
use wfgen_codegen::ArtifactSet;
use wfgen_core::{Config, GeneratorConfig};

use super::{discover_snapshots, generate_all, leftover_files};

/// Run the check command
pub async fn run(config_path: &str) -> Result<()> {
    let config = Config::load(config_path).context("Failed to load configuration")?;

    tracing::info!("Checking project: {}", config.project.name);

    let snapshots = discover_snapshots(&config.input_paths())?;
    if snapshots.is_empty() {
        anyhow::bail!("No snapshots found");
    }

    let output_dir = config.output_dir();
    let suffix = GeneratorConfig::temporal().generated_file_suffix;
    let mut problems = Vec::new();

    for snapshot in generate_all(snapshots).await? {
        let dir = output_dir.join(&snapshot.name);
        let found = stale_files(&dir, &suffix, &snapshot.output.artifacts)?;
        if found.is_empty() {
            tracing::info!("✓ {}", snapshot.name);
        }
        problems.extend(found);
    }

    if !problems.is_empty() {
        for problem in &problems {
            tracing::error!("{}", problem);
        }
        anyhow::bail!(
            "{} generated files are out of date, run `wfgen generate`",
            problems.len()
        );
    }

    tracing::info!("✓ Generated sources are up to date");
    Ok(())
}

/// Missing, modified and leftover files in one output directory
fn stale_files(dir: &Path, suffix: &str, artifacts: &ArtifactSet) -> Result<Vec<String>> {
    let mut problems = Vec::new();

    for artifact in artifacts.iter() {
        let path = dir.join(artifact.file_name());
        if !path.exists() {
            problems.push(format!("missing: {}", path.display()));
            continue;
        }
        let on_disk = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        if content_hash(&on_disk) != artifact.content_hash() {
            problems.push(format!("modified: {}", path.display()));
        }
    }

    for path in leftover_files(dir, suffix, artifacts)? {
        problems.push(format!("unexpected: {}", path.display()));
    }

    problems.sort();
    Ok(problems)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;
    use wfgen_codegen::Artifact;

    fn artifacts() -> ArtifactSet {
        let mut set = ArtifactSet::new();
        set.insert(Artifact::new("A.g.cs", "a\n".to_string(), BTreeSet::new()))
            .unwrap();
        set.insert(Artifact::new("B.g.cs", "b\n".to_string(), BTreeSet::new()))
            .unwrap();
        set
    }

    #[test]
    fn test_up_to_date() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("A.g.cs"), "a\n").unwrap();
        fs::write(dir.path().join("B.g.cs"), "b\n").unwrap();
        assert!(stale_files(dir.path(), ".g.cs", &artifacts()).unwrap().is_empty());
    }

    #[test]
    fn test_reports_each_problem() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("A.g.cs"), "edited\n").unwrap();
        fs::write(dir.path().join("Old.g.cs"), "old\n").unwrap();
        fs::write(dir.path().join("README.md"), "notes\n").unwrap();

        let problems = stale_files(dir.path(), ".g.cs", &artifacts()).unwrap();
        assert_eq!(problems.len(), 3);
        assert!(problems[0].starts_with("missing:"));
        assert!(problems[1].starts_with("modified:"));
        assert!(problems[2].starts_with("unexpected:"));
    }

    #[test]
    fn test_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let problems = stale_files(&dir.path().join("absent"), ".g.cs", &artifacts()).unwrap();
        assert_eq!(problems.len(), 2);
    }
}
