use crate::prelude::{println, *};
use crate::session::{load_config, start, Engine, SessionArgs};
use colored::Colorize;
use gridfilter_core::{Control, ControlKind};

#[derive(Debug, clap::Args, Clone)]
pub struct OptionsOptions {
    #[clap(flatten)]
    pub session: SessionArgs,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(options: OptionsOptions, global: crate::Global) -> Result<()> {
    let config = load_config(options.session.config.as_deref())?;

    if global.verbose {
        println!("Loading {}", options.session.page.display());
        println!();
    }

    let engine = start(&config, &options.session)?;
    let controls = select_controls(&engine);

    if options.json {
        println!("{}", serde_json::to_string_pretty(&controls)?);
        return Ok(());
    }

    if controls.is_empty() {
        println!("{}", "The page has no select filters.".yellow());
        return Ok(());
    }

    for control in controls {
        println!("{}", format_control_text(control));
    }

    Ok(())
}

/// Select controls in criterion order
pub fn select_controls<'e>(engine: &'e Engine<'_>) -> Vec<&'e Control> {
    engine
        .config()
        .criteria
        .iter()
        .filter_map(|criterion| engine.document().control(&criterion.control))
        .filter(|control| control.kind == ControlKind::Select)
        .collect()
}

fn format_control_text(control: &Control) -> String {
    let mut result = String::new();

    let state = if control.disabled {
        "disabled".bright_black()
    } else {
        "enabled".green()
    };
    result.push_str(&format!(
        "\n{} ({})\n",
        control.id.bright_cyan().bold(),
        state
    ));

    let mut table = new_table();
    table.add_row(prettytable::row![b => "Value", "Label", "Kind", "Selectable"]);
    for option in &control.options {
        let value = if option.value == control.value {
            format!("{} *", option.value)
        } else {
            option.value.clone()
        };
        let selectable = if option.visible {
            "yes".green().to_string()
        } else {
            "no".red().to_string()
        };
        table.add_row(prettytable::row![
            value,
            option.label,
            option.kind.as_deref().unwrap_or("-"),
            selectable
        ]);
    }
    result.push_str(&table.to_string());

    result
}
