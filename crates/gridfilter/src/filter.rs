use crate::prelude::{println, *};
use crate::session::{load_config, start, Engine, SessionArgs};
use colored::Colorize;
use gridfilter_core::{Card, FilterConfig};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, clap::Args, Clone)]
pub struct FilterOptions {
    #[clap(flatten)]
    pub session: SessionArgs,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
pub struct FilterOutput {
    /// The page URL after every change was mirrored into it
    pub url: String,
    /// Active criteria and their values
    pub criteria: BTreeMap<String, String>,
    pub visible: Vec<Card>,
    pub hidden_count: usize,
}

pub fn run(options: FilterOptions, global: crate::Global) -> Result<()> {
    let config = load_config(options.session.config.as_deref())?;

    if global.verbose {
        println!("Loading {}", options.session.page.display());
        println!();
    }

    let engine = start(&config, &options.session)?;
    let output = filter_output(&engine);

    if options.json {
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{}", format_filter_text(&output, &config));
    }

    Ok(())
}

/// Collect the engine's current result
pub fn filter_output(engine: &Engine<'_>) -> FilterOutput {
    let criteria = engine
        .config()
        .names()
        .filter_map(|name| {
            let value = engine.criterion_value(name)?;
            (!value.is_empty()).then_some((name.to_string(), value))
        })
        .collect();

    FilterOutput {
        url: engine.state().current_entry().to_string(),
        criteria,
        visible: engine.document().visible_cards().cloned().collect(),
        hidden_count: engine.hidden().len(),
    }
}

fn format_filter_text(output: &FilterOutput, config: &FilterConfig) -> String {
    let mut result = String::new();

    if output.visible.is_empty() {
        result.push_str(&format!("{}\n", "No cards match the current filters.".yellow()));
    } else {
        let mut table = new_table();
        let mut header = vec![prettytable::Cell::new("Card").style_spec("b")];
        header.extend(
            config
                .names()
                .map(|name| prettytable::Cell::new(name).style_spec("b")),
        );
        table.add_row(prettytable::Row::new(header));

        for card in &output.visible {
            let mut cells = vec![prettytable::Cell::new(&card.label)];
            cells.extend(config.names().map(|name| {
                prettytable::Cell::new(card.attributes.get(name).map_or("-", String::as_str))
            }));
            table.add_row(prettytable::Row::new(cells));
        }

        result.push_str(&table.to_string());
    }

    let total = output.visible.len() + output.hidden_count;
    result.push_str(&format!(
        "\n{} {} {} {} {}\n",
        "Showing".bright_white(),
        output.visible.len().to_string().bright_cyan().bold(),
        "of".bright_white(),
        total.to_string().bright_cyan().bold(),
        "cards".bright_white()
    ));

    if !output.criteria.is_empty() {
        let active = output
            .criteria
            .iter()
            .map(|(name, value)| format!("{}={}", name.green(), value))
            .collect::<Vec<_>>()
            .join(", ");
        result.push_str(&format!("{}: {}\n", "Filters".bright_white(), active));
    }

    result.push_str(&format!("{}: {}", "URL".bright_white(), output.url.cyan().underline()));

    result
}
