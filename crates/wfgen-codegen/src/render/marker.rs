//! Sources of the marker types the generator owns

use wfgen_core::{GeneratorConfig, MarkerSource};

use super::{ClassBuilder, FileBuilder, GeneratedFile};
use crate::error::Result;

/// Render one marker type as an empty class
pub fn render(config: &GeneratorConfig, source: &MarkerSource) -> Result<GeneratedFile> {
    let class = source.attributes.iter().fold(
        ClassBuilder::declared(&source.name, &source.declaration),
        |class, attribute| class.add_attribute(attribute),
    );
    let model = FileBuilder::new(&source.namespace)
        .with_banner(&config.banner)
        .build(class)?;

    Ok(GeneratedFile {
        file_name: source.file_name.clone(),
        model,
    })
}
