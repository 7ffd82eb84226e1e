use std::path::Path;

use anyhow::{Context, Result};

use acf_importer::ImportOutcome;

use crate::app::App;
use crate::render::terminal::Color;
use crate::OutputFormat;

pub fn run(
    app: &App,
    file: &Path,
    site: Option<u64>,
    allow_duplicates: bool,
    all_sites: bool,
    format: &OutputFormat,
    use_color: bool,
) -> Result<()> {
    let document = App::read_document(file)?;
    let importer = app.importer(allow_duplicates);

    let outcomes = if all_sites {
        importer
            .import_network(&app.store, &document)
            .context("Network import failed")?
    } else {
        let site = app.site(site);
        let outcome = importer
            .import(&app.store, site, &document)
            .with_context(|| format!("Import into site {} failed", site))?;
        vec![outcome]
    };

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&outcomes)?);
        }
        OutputFormat::Plain => {
            for outcome in &outcomes {
                print_outcome(outcome, use_color);
            }
        }
    }

    Ok(())
}

fn print_outcome(outcome: &ImportOutcome, use_color: bool) {
    let action = if outcome.created { "Created" } else { "Reused" };
    if use_color {
        println!(
            "{}{} post {}{} in site {}",
            Color::BOLD,
            action,
            outcome.post_id,
            Color::RESET,
            outcome.site
        );
    } else {
        println!("{} post {} in site {}", action, outcome.post_id, outcome.site);
    }
    println!("  Meta written: {}", outcome.meta_written);

    for failure in &outcome.meta_failures {
        if use_color {
            println!(
                "  {}Failed: {} ({}){}",
                Color::RED,
                failure.key,
                failure.error,
                Color::RESET
            );
        } else {
            println!("  Failed: {} ({})", failure.key, failure.error);
        }
    }
}
