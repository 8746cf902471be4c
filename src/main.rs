use cipherforge::config::Config;
use cipherforge::error::CfResult;
use cipherforge::giants::{self, GiantCandidate};
use clap::{ArgMatches, CommandFactory, FromArgMatches, Parser, Subcommand};
use std::process;
use tracing::{error, info, Level};

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Word frequency list (`word,count` CSV with a header row).
    #[arg(global = true, short, long, default_value = "words.csv")]
    words: String,

    /// Extra giants (JSON array of `{name, cipher}`), added to the built-in set.
    #[arg(global = true, short, long)]
    giants: Option<String>,

    /// JSON config file. Explicit flags override its values.
    #[arg(global = true, long)]
    config: Option<String>,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    Search(cmd::search::SearchArgs),
    Score(cmd::score::ScoreArgs),
    Encode(cmd::codec::CodecArgs),
    Decode(cmd::codec::CodecArgs),
}

fn main() {
    // Raw matches tell user input apart from defaults.
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    tracing_subscriber::fmt()
        .with_max_level(if cli.debug { Level::DEBUG } else { Level::INFO })
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = dispatch(&cli, &matches) {
        error!("❌ {}", e);
        process::exit(1);
    }
}

fn dispatch(cli: &Cli, matches: &ArgMatches) -> CfResult<()> {
    let candidates = load_giant_candidates(cli.giants.as_deref())?;

    match &cli.command {
        Commands::Search(args) => {
            let config = resolve_config(cli, &args.config, matches)?;
            cmd::search::run(args, config, &cli.words, candidates)
        }
        Commands::Score(args) => {
            let config = resolve_config(cli, &args.config, matches)?;
            cmd::score::run(args, config, &cli.words, candidates)
        }
        Commands::Encode(args) => cmd::codec::run_encode(args, &candidates),
        Commands::Decode(args) => cmd::codec::run_decode(args, &candidates),
    }
}

fn load_giant_candidates(path: Option<&str>) -> CfResult<Vec<GiantCandidate>> {
    let mut candidates = giants::builtin_candidates();
    if let Some(path) = path {
        info!("📂 Loading giants from: {}", path);
        candidates.extend(giants::load_candidates(path)?);
    }
    Ok(candidates)
}

/// The config file (if any) is the base; flags typed on the command line win.
fn resolve_config(cli: &Cli, cli_config: &Config, matches: &ArgMatches) -> CfResult<Config> {
    let Some(path) = &cli.config else {
        cli_config.validate()?;
        return Ok(cli_config.clone());
    };

    info!("⚖️  Loading config from: {}", path);
    let mut config = Config::load_from_file(path)?;
    if let Some((_, sub_matches)) = matches.subcommand() {
        config.merge_from_cli(cli_config, sub_matches);
    }
    config.validate()?;
    Ok(config)
}
