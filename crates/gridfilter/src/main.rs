use crate::prelude::*;
use clap::Parser;

mod compare;
mod error;
mod filter;
mod options;
mod prelude;
mod session;

#[derive(Debug, clap::Parser)]
#[command(
    author,
    version,
    about,
    long_about = "Filter the cards of a rendered commands page the way the page itself does"
)]
pub struct App {
    #[command(subcommand)]
    pub command: SubCommands,

    #[clap(flatten)]
    global: Global,
}

#[derive(Debug, Clone, clap::Args)]
pub struct Global {
    /// Whether to display additional information.
    #[clap(long, env = "GRIDFILTER_VERBOSE", global = true, default_value = "false")]
    verbose: bool,
}

#[derive(Debug, clap::Parser)]
pub enum SubCommands {
    /// Show the cards left visible by a set of filters
    Filter(crate::filter::FilterOptions),

    /// Show which select options the filters leave selectable
    Options(crate::options::OptionsOptions),

    /// Check whether one version is at least another
    Compare(crate::compare::CompareOptions),
}

fn main() -> Result<()> {
    env_logger::init();
    color_eyre::install()?;

    let app = App::parse();

    match app.command {
        SubCommands::Filter(options) => crate::filter::run(options, app.global),
        SubCommands::Options(options) => crate::options::run(options, app.global),
        SubCommands::Compare(options) => crate::compare::run(options, app.global),
    }
    .map_err(|err: color_eyre::eyre::Report| eyre!(err))
}
