//! Print what the generator extracts from a snapshot

use anyhow::{Context, Result};
use wfgen_codegen::Pipeline;
use wfgen_core::{Compilation, GeneratorConfig};

/// Run the inspect command
pub async fn run(snapshot: &str) -> Result<()> {
    let compilation = Compilation::load(snapshot)
        .with_context(|| format!("Failed to load snapshot {snapshot}"))?;
    let pipeline = Pipeline::new(GeneratorConfig::temporal())?;

    let model = pipeline.extract(&compilation);
    let output = pipeline.run(&compilation)?;

    let report = serde_json::json!({
        "compilation": compilation.name,
        "model": model,
        "artifacts": output.artifacts.file_names().collect::<Vec<_>>(),
        "diagnostics": output.diagnostics,
    });
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
