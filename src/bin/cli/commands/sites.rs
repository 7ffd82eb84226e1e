use anyhow::{Context, Result};

use acf_importer::storage::Site;
use acf_importer::PostStore;

use crate::app::App;
use crate::OutputFormat;

pub fn run_list(app: &App, format: &OutputFormat) -> Result<()> {
    let sites = app.store.list_sites().context("Failed to list sites")?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&sites)?);
        }
        OutputFormat::Plain => {
            for site in &sites {
                let current = if site.id == app.config.site { "* " } else { "  " };
                println!("{}{} {}{}", current, site.id, site.name, status_suffix(site));
            }
        }
    }

    Ok(())
}

pub fn run_add(app: &App, name: &str, format: &OutputFormat) -> Result<()> {
    let site = app
        .store
        .add_site(name)
        .with_context(|| format!("Failed to add site '{}'", name))?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&site)?);
        }
        OutputFormat::Plain => {
            println!("Added site \"{}\"", site.name);
            println!("  ID: {}", site.id);
        }
    }

    Ok(())
}

fn status_suffix(site: &Site) -> String {
    let mut flags = Vec::new();
    if site.archived {
        flags.push("archived");
    }
    if site.spam {
        flags.push("spam");
    }
    if site.deleted {
        flags.push("deleted");
    }

    if flags.is_empty() {
        String::new()
    } else {
        format!(" [{}]", flags.join(", "))
    }
}
