use anyhow::Result;

use crate::app::App;
use crate::render::terminal;
use crate::OutputFormat;

pub fn run(
    app: &App,
    title: &str,
    site: Option<u64>,
    format: &OutputFormat,
    use_color: bool,
) -> Result<()> {
    let site = app.site(site);
    let post = app.find_post(site, title)?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&post)?);
        }
        OutputFormat::Plain => {
            println!("{}", terminal::render_post(&post, use_color));
        }
    }

    Ok(())
}
