//! Generate sources from compilation snapshots

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;
use wfgen_core::{Config, GeneratorConfig};

use super::{discover_snapshots, generate_all, leftover_files};

/// Run the generate command
pub async fn run(config_path: &str, inputs: &[String]) -> Result<()> {
    let config = Config::load(config_path).context("Failed to load configuration")?;

    tracing::info!("Generating project: {}", config.project.name);

    let inputs: Vec<PathBuf> = if inputs.is_empty() {
        config.input_paths()
    } else {
        inputs.iter().map(PathBuf::from).collect()
    };

    let snapshots = discover_snapshots(&inputs)?;
    if snapshots.is_empty() {
        anyhow::bail!("No snapshots found");
    }

    let output_dir = config.output_dir();
    let suffix = GeneratorConfig::temporal().generated_file_suffix;
    let mut written = 0;
    let mut warnings = 0;

    for snapshot in generate_all(snapshots).await? {
        let dir = output_dir.join(&snapshot.name);
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create {}", dir.display()))?;

        for artifact in snapshot.output.artifacts.iter() {
            let path = dir.join(artifact.file_name());
            fs::write(&path, artifact.content())
                .with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::debug!("Wrote {}", path.display());
            written += 1;
        }

        for path in leftover_files(&dir, &suffix, &snapshot.output.artifacts)? {
            fs::remove_file(&path)
                .with_context(|| format!("Failed to remove {}", path.display()))?;
            tracing::info!("Removed stale {}", path.display());
        }

        for diagnostic in &snapshot.output.diagnostics {
            tracing::warn!("{}: {}", snapshot.snapshot.display(), diagnostic);
            warnings += 1;
        }

        tracing::info!(
            "✓ {} ({} files)",
            snapshot.name,
            snapshot.output.artifacts.len()
        );
    }

    tracing::info!(
        "✓ Wrote {} files to {} ({} warnings)",
        written,
        output_dir.display(),
        warnings
    );
    Ok(())
}
