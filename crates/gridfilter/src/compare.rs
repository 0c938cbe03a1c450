use crate::prelude::{println, *};
use colored::Colorize;
use gridfilter_core::criteria::match_value;
use gridfilter_core::MatchMode;

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct CompareOptions {
    /// Version being tested, optionally prefixed with a scope ("json-2.0.0")
    #[arg(value_name = "VERSION")]
    pub version: String,

    /// Minimum version
    #[arg(value_name = "AT_LEAST")]
    pub at_least: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, serde::Serialize)]
pub struct CompareOutput {
    pub version: String,
    pub at_least: String,
    pub matches: bool,
}

pub fn run(options: CompareOptions, _global: crate::Global) -> Result<()> {
    let output = compare(&options.version, &options.at_least);

    if options.json {
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        let verdict = if output.matches {
            "yes".green().bold()
        } else {
            "no".red().bold()
        };
        println!("{} >= {}: {}", output.version, output.at_least, verdict);
    }

    Ok(())
}

/// Compare the way the version filter does, scope prefix included.
pub fn compare(version: &str, at_least: &str) -> CompareOutput {
    CompareOutput {
        version: version.to_string(),
        at_least: at_least.to_string(),
        matches: match_value(MatchMode::VersionRange, at_least, version),
    }
}
