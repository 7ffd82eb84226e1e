use std::path::Path;

use anyhow::{Context, Result};

use crate::app::App;
use crate::render::terminal::Color;
use crate::OutputFormat;

pub fn run(app: &App, file: &Path, format: &OutputFormat, use_color: bool) -> Result<()> {
    let document = App::read_document(file)?;
    let preview = app
        .importer(false)
        .preview(&document)
        .with_context(|| format!("Failed to parse {}", file.display()))?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&preview)?);
        }
        OutputFormat::Plain => {
            if use_color {
                println!("{}{}{}", Color::BOLD, preview.title, Color::RESET);
            } else {
                println!("{}", preview.title);
            }
            println!("  Name: {}", preview.canonical_name);
            if let Some(post_type) = &preview.exported_post_type {
                println!("  Type: {}", post_type);
            }
            println!("  Meta rows: {}", preview.meta_count);
            for key in &preview.meta_keys {
                println!("    {}", key);
            }
            for warning in &preview.warnings {
                if use_color {
                    println!("{}warning:{} {}", Color::YELLOW, Color::RESET, warning);
                } else {
                    println!("warning: {}", warning);
                }
            }
        }
    }

    Ok(())
}
