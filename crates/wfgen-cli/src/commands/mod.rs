//! CLI command implementations

pub mod check;
pub mod generate;
pub mod init;
pub mod inspect;

use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use wfgen_codegen::{ArtifactSet, GenerationOutput, Pipeline};
use wfgen_core::{Compilation, GeneratorConfig};

/// One snapshot's generation pass
pub struct SnapshotOutput {
    /// Snapshot file
    pub snapshot: PathBuf,

    /// Directory name under the output directory
    pub name: String,

    /// Generated artifacts and diagnostics
    pub output: GenerationOutput,
}

/// Snapshot files under the given files and directories, sorted
pub fn discover_snapshots(inputs: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut snapshots = Vec::new();

    for input in inputs {
        if input.is_file() {
            snapshots.push(input.clone());
            continue;
        }
        if !input.is_dir() {
            anyhow::bail!("Snapshot input not found: {}", input.display());
        }

        for entry in walkdir::WalkDir::new(input)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .filter(|e| {
                e.path()
                    .extension()
                    .is_some_and(|ext| ext == "yaml" || ext == "yml" || ext == "json")
            })
        {
            snapshots.push(entry.into_path());
        }
    }

    snapshots.sort();
    snapshots.dedup();
    Ok(snapshots)
}

/// Run the pipeline over every snapshot, one blocking task each
pub async fn generate_all(snapshots: Vec<PathBuf>) -> Result<Vec<SnapshotOutput>> {
    let pipeline = Arc::new(
        Pipeline::new(GeneratorConfig::temporal()).context("Failed to create pipeline")?,
    );

    let tasks: Vec<_> = snapshots
        .into_iter()
        .map(|snapshot| {
            let pipeline = Arc::clone(&pipeline);
            tokio::task::spawn_blocking(move || generate_one(&pipeline, snapshot))
        })
        .collect();

    let mut outputs = Vec::with_capacity(tasks.len());
    for task in tasks {
        outputs.push(task.await.context("Generation task panicked")??);
    }

    let mut names = BTreeMap::new();
    for output in &outputs {
        ensure_file_name(&output.name).with_context(|| {
            format!("Invalid compilation name in {}", output.snapshot.display())
        })?;
        for file_name in output.output.artifacts.file_names() {
            ensure_file_name(file_name).with_context(|| {
                format!("Invalid artifact name from {}", output.snapshot.display())
            })?;
        }
        if let Some(previous) = names.insert(output.name.as_str(), &output.snapshot) {
            anyhow::bail!(
                "Snapshots {} and {} both generate into '{}'",
                previous.display(),
                output.snapshot.display(),
                output.name
            );
        }
    }

    Ok(outputs)
}

fn generate_one(pipeline: &Pipeline, snapshot: PathBuf) -> Result<SnapshotOutput> {
    tracing::debug!("Generating from {}", snapshot.display());

    let compilation = Compilation::load(&snapshot)
        .with_context(|| format!("Failed to load snapshot {}", snapshot.display()))?;
    let output = pipeline
        .run(&compilation)
        .with_context(|| format!("Generation failed for {}", snapshot.display()))?;

    Ok(SnapshotOutput {
        name: output_name(&compilation, &snapshot),
        snapshot,
        output,
    })
}

/// Reject names that would leave the directory they are joined onto
pub fn ensure_file_name(name: &str) -> Result<()> {
    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) if !name.contains(['/', '\\']) => Ok(()),
        _ => anyhow::bail!("'{name}' is not a plain file name"),
    }
}

/// Generated files in `dir` that are not part of `artifacts`
pub fn leftover_files(dir: &Path, suffix: &str, artifacts: &ArtifactSet) -> Result<Vec<PathBuf>> {
    let mut leftovers = Vec::new();
    if !dir.is_dir() {
        return Ok(leftovers);
    }

    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };
        if entry.file_type()?.is_file() && name.ends_with(suffix) && artifacts.get(name).is_none()
        {
            leftovers.push(entry.path());
        }
    }

    leftovers.sort();
    Ok(leftovers)
}

/// Compilation name, or the snapshot's file stem when unnamed
fn output_name(compilation: &Compilation, snapshot: &Path) -> String {
    if !compilation.name.trim().is_empty() {
        return compilation.name.trim().to_string();
    }
    snapshot
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("snapshot")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_discover_snapshots() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("nested")).unwrap();
        std::fs::write(dir.path().join("b.yaml"), "").unwrap();
        std::fs::write(dir.path().join("nested/a.json"), "").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "").unwrap();

        let found = discover_snapshots(&[dir.path().to_path_buf(), dir.path().join("b.yaml")])
            .unwrap();
        assert_eq!(
            found,
            vec![dir.path().join("b.yaml"), dir.path().join("nested/a.json")]
        );
    }

    #[test]
    fn test_discover_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        assert!(discover_snapshots(&[dir.path().join("missing")]).is_err());
    }

    #[rstest]
    #[case("Orders", "Orders")]
    #[case("  Orders ", "Orders")]
    #[case("", "snap")]
    #[case("   ", "snap")]
    fn test_output_name(#[case] name: &str, #[case] expected: &str) {
        let compilation = Compilation::new(name);
        assert_eq!(output_name(&compilation, Path::new("x/snap.yaml")), expected);
    }

    #[rstest]
    #[case("Orders", true)]
    #[case("P.Tests.ActsDouble.g.cs", true)]
    #[case("../escaped", false)]
    #[case("..", false)]
    #[case(".", false)]
    #[case("a/b", false)]
    #[case("a\\b", false)]
    #[case("/abs", false)]
    #[case("", false)]
    fn test_ensure_file_name(#[case] name: &str, #[case] ok: bool) {
        assert_eq!(ensure_file_name(name).is_ok(), ok);
    }

    #[test]
    fn test_leftover_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("Keep.g.cs"), "").unwrap();
        std::fs::write(dir.path().join("Old.g.cs"), "").unwrap();
        std::fs::write(dir.path().join("notes.md"), "").unwrap();

        let mut artifacts = ArtifactSet::new();
        artifacts
            .insert(wfgen_codegen::Artifact::new(
                "Keep.g.cs",
                String::new(),
                Default::default(),
            ))
            .unwrap();

        let leftovers = leftover_files(dir.path(), ".g.cs", &artifacts).unwrap();
        assert_eq!(leftovers, vec![dir.path().join("Old.g.cs")]);
        assert!(
            leftover_files(&dir.path().join("absent"), ".g.cs", &artifacts)
                .unwrap()
                .is_empty()
        );
    }
}
