// ABOUTME: CLI templates command - list available card templates
//
// Reads custom templates from ~/.cardforge/templates.json on top of the
// built-in presets.

use super::OutputFormat;
use crate::config::AppConfig;
use crate::models::TemplateLibrary;
use anyhow::Result;

/// Execute the templates command
pub fn execute(format: OutputFormat) -> Result<()> {
    let library = match AppConfig::templates_path() {
        Ok(path) => TemplateLibrary::load_from(&path)?,
        Err(_) => TemplateLibrary::builtin_only(),
    };

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(library.all())?);
        }
        OutputFormat::Text => {
            for template in library.all() {
                let tag = if template.builtin { "builtin" } else { "custom" };
                println!("{} [{tag}]", template.id);
                println!("  {}", template.name);
                println!("  {}", template.style_prompt);
            }
        }
    }

    Ok(())
}
