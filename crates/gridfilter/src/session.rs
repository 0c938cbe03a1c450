//! Shared setup for the commands that replay filters over a page.

use crate::prelude::*;
use gridfilter_core::{FilterConfig, FilterEngine, Page, UrlState};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_URL: &str = "https://localhost/commands/";

pub type Engine<'c> = FilterEngine<'c, Page, UrlState>;

#[derive(Debug, Clone, clap::Args)]
pub struct SessionArgs {
    /// Rendered commands page (HTML file)
    #[arg(value_name = "PAGE")]
    pub page: PathBuf,

    /// Page URL whose query string (or legacy #fragment) holds the filters
    #[arg(long, env = "GRIDFILTER_URL", default_value = DEFAULT_URL)]
    pub url: String,

    /// Change a filter after the page loads; applied in order
    #[arg(long = "set", value_name = "NAME=VALUE", value_parser = parse_assignment)]
    pub set: Vec<(String, String)>,

    /// TOML file describing the page's filters (defaults to the commands page layout)
    #[arg(long, env = "GRIDFILTER_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Parse a `NAME=VALUE` pair. The value may be empty to clear a filter.
pub fn parse_assignment(input: &str) -> std::result::Result<(String, String), Error> {
    match input.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => {
            Ok((name.trim().to_string(), value.to_string()))
        }
        _ => Err(Error::InvalidAssignment(input.to_string())),
    }
}

pub fn load_config(path: Option<&Path>) -> Result<FilterConfig> {
    let Some(path) = path else {
        return Ok(FilterConfig::default());
    };

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read filter config {}", path.display()))?;

    FilterConfig::from_toml_str(&content)
        .with_context(|| format!("Invalid filter config {}", path.display()))
}

/// Load the page, restore filters from the URL, then apply each `--set`.
pub fn start<'c>(config: &'c FilterConfig, args: &SessionArgs) -> Result<Engine<'c>> {
    for (name, _) in &args.set {
        if config.criterion(name).is_none() {
            return Err(Error::UnknownCriterion {
                name: name.clone(),
                valid: config.names().collect::<Vec<_>>().join(", "),
            }
            .into());
        }
    }

    let html = fs::read_to_string(&args.page)
        .with_context(|| format!("Failed to read page {}", args.page.display()))?;
    let page = Page::parse(&html, config)?;
    let state = UrlState::parse(&args.url)?;

    log::debug!(
        "Loaded {} cards from {}",
        page.cards().len(),
        args.page.display()
    );

    let mut engine = FilterEngine::new(config, page, state);
    engine.initialize();

    for (name, value) in &args.set {
        engine.set_criterion(name, value);
    }

    Ok(engine)
}
