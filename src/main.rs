use std::path::PathBuf;

use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use spotydown::{api::Spotydown, cli, config, fatal, set_quiet};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    /// Directory for downloaded tracks and track info files
    #[clap(long, global = true)]
    output_dir: Option<PathBuf>,

    /// Timeout in seconds for API requests
    #[clap(long, global = true)]
    timeout: Option<u64>,

    /// Only print warnings and errors
    #[clap(long, short, global = true)]
    quiet: bool,

    /// Without a subcommand, asks for a track URL and downloads it
    #[clap(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Download a track (prompts for the URL if omitted)
    Download(DownloadOptions),

    /// Show track metadata
    Info(InfoOptions),

    /// Print the direct download URL of a track
    Link(LinkOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct DownloadOptions {
    /// Spotify track URL or track id
    url: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct InfoOptions {
    /// Spotify track URL or track id
    url: String,

    /// Write "<name> - <artist>.txt" into the output directory
    #[clap(long)]
    save: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct LinkOptions {
    /// Spotify track URL or track id
    url: String,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

fn client(cli: &Cli) -> Spotydown {
    if let Err(e) = config::load_env() {
        fatal!("Cannot load environment. Err: {}", e);
    }

    let mut config = match config::Config::from_env() {
        Ok(config) => config,
        Err(e) => fatal!("Invalid configuration: {}", e),
    };
    if let Some(dir) = &cli.output_dir {
        config.output_dir = dir.clone();
    }
    if let Some(timeout) = cli.timeout {
        config.timeout_seconds = timeout;
    }

    match Spotydown::new(config) {
        Ok(api) => api,
        Err(e) => fatal!("Cannot create client: {}", e),
    }
}

fn main() {
    let cli = Cli::parse();
    set_quiet(cli.quiet);

    match cli.command.clone() {
        None => cli::download(&client(&cli), None),
        Some(Command::Download(opt)) => cli::download(&client(&cli), opt.url),
        Some(Command::Info(opt)) => cli::info(&client(&cli), opt.url, opt.save),
        Some(Command::Link(opt)) => cli::link(&client(&cli), opt.url),
        Some(Command::Completions(opt)) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
