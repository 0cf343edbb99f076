//! Text emission for file models

use minijinja::{AutoEscape, Environment};

use super::FileModel;
use crate::error::Result;

const SOURCE_FILE_TEMPLATE: &str = "source_file.cs.jinja";

/// Turns a [`FileModel`] into source text
pub trait Emitter {
    /// Emit the full text of one file
    fn emit(&self, file: &FileModel) -> Result<String>;
}

/// Emitter backed by the bundled minijinja template
#[derive(Debug)]
pub struct TemplateEmitter {
    env: Environment<'static>,
}

impl TemplateEmitter {
    /// Create an emitter with the bundled template registered
    pub fn new() -> Result<Self> {
        let mut env = Environment::new();
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        env.set_keep_trailing_newline(true);
        env.set_auto_escape_callback(|_| AutoEscape::None);
        env.add_template(
            SOURCE_FILE_TEMPLATE,
            include_str!("../../templates/source_file.cs.jinja"),
        )?;
        Ok(Self { env })
    }
}

impl Emitter for TemplateEmitter {
    fn emit(&self, file: &FileModel) -> Result<String> {
        let template = self.env.get_template(SOURCE_FILE_TEMPLATE)?;
        Ok(template.render(file)?)
    }
}
