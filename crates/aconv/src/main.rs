use crate::prelude::{eprintln, println, *};
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use std::path::PathBuf;

mod convert;
mod diagnostics;
mod fetch;
mod list;
mod prelude;
mod settings;

const EXAMPLES: &str = "\
Commands:
   list          Lists all the possible conversions.
   <from>2<to>   Converts from <from> to <to>. eg. hex2bin, dec2oct, eur2usd, etc.
   help          Displays this help page.

Examples:
   aconv bin2hex 1100110010   # Convert binary to hexadecimal
   aconv hex2dec ff5c         # Convert hexadecimal to decimal
   aconv eur2usd 10           # Convert Euros to US Dollars
   aconv aud2jpy 5000         # Convert Australian Dollars to Japanese Yens";

#[derive(Debug, clap::Parser)]
#[command(
    name = "aconv",
    author,
    version,
    about = "Convert numbers between bases and amounts between currencies",
    override_usage = "aconv [flags] <command> [<value>]",
    after_help = EXAMPLES
)]
pub struct App {
    /// Command to run: list, help or <from>2<to>
    pub command: Option<String>,

    /// Value to convert
    #[arg(allow_hyphen_values = true)]
    pub value: Option<String>,

    #[clap(flatten)]
    pub global: Global,
}

#[derive(Debug, Clone, clap::Args)]
pub struct Global {
    /// Output format - either "simple", "withUnit" or "full".
    #[clap(long, env = "ACONV_FORMAT", default_value = "full")]
    pub format: String,

    /// Reverse the conversion. eg. hex2bin becomes bin2hex, etc.
    #[clap(long, env = "ACONV_REVERSE", default_value = "false")]
    pub reverse: bool,

    /// Whether to display additional information.
    #[clap(long, env = "ACONV_VERBOSE", default_value = "false")]
    pub verbose: bool,

    /// Directory holding Settings.ini (defaults to the platform config directory)
    #[clap(long, env = "ACONV_CONFIG_DIR")]
    pub config_dir: Option<PathBuf>,

    /// Base URL of the currency quote service
    #[clap(long, env = "ACONV_QUOTE_URL", default_value = fetch::DEFAULT_QUOTE_URL)]
    pub quote_url: String,
}

fn init_logger(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}

/// Prints the message followed by the usage and exits with status 1.
fn exit_with_error(message: &str) -> ! {
    eprintln!("{}", message.trim_end());
    eprintln!();
    eprintln!("{}", App::command().render_help());
    std::process::exit(1)
}

fn run(app: App) -> Result<()> {
    let command = app
        .command
        .as_deref()
        .ok_or_eyre("No command specified.")?;

    match command.to_lowercase().as_str() {
        "help" => {
            println!("{}", App::command().render_long_help());
            Ok(())
        }
        "list" => list::run(),
        _ => convert::run(command, app.value.as_deref(), &app.global),
    }
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let app = match App::try_parse() {
        Ok(app) => app,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            err.exit()
        }
        Err(err) => exit_with_error(&err.to_string()),
    };

    init_logger(app.global.verbose);

    if let Err(err) = run(app) {
        exit_with_error(&f!("{err}"));
    }

    Ok(())
}
