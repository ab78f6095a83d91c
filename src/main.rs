//! Placeholder Resolver CLI
//!
//! Usage:
//!   placeholder-resolver [OPTIONS] [FILE]
//!
//! Options:
//!   -p, --placeholders <FILE>  Placeholder file (TOML), repeatable; earlier files win
//!   -s, --set <KEY=VALUE>      Inline text placeholder, repeatable; wins over files
//!       --env                  Resolve env_<name> tags from environment variables
//!       --strict               Fail on tags that cannot be substituted
//!       --max-depth <N>        Markup expansion depth limit
//!       --max-expansions <N>   Total markup expansion limit per render
//!   -v, --verbose              Increase log verbosity
//!   -h, --help                 Print help

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing::debug;

use placeholder_resolver::placeholder::{self, Placeholder, Replacement, SharedResolver};
use placeholder_resolver::{
    render_with_config, PlaceholderFile, RenderConfig, DEFAULT_MAX_DEPTH, DEFAULT_MAX_EXPANSIONS,
};

#[derive(Parser)]
#[command(name = "placeholder-resolver")]
#[command(about = "Substitute <key> placeholder tags in text")]
struct Cli {
    /// Input file (reads from stdin if not provided)
    input: Option<PathBuf>,

    /// Placeholder file (TOML); earlier files take priority
    #[arg(short, long = "placeholders", value_name = "FILE")]
    placeholders: Vec<PathBuf>,

    /// Inline text placeholder; takes priority over files
    #[arg(short, long = "set", value_name = "KEY=VALUE", value_parser = parse_assignment)]
    set: Vec<Placeholder>,

    /// Resolve env_<name> tags from the environment variable NAME
    #[arg(long)]
    env: bool,

    /// Fail on tags that cannot be substituted
    #[arg(long)]
    strict: bool,

    /// How many levels of markup replacements may be expanded
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// How many markup replacements one render may expand in total
    #[arg(long, default_value_t = DEFAULT_MAX_EXPANSIONS)]
    max_expansions: usize,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn parse_assignment(s: &str) -> Result<Placeholder, String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{}'", s))?;
    Placeholder::text(key, value).map_err(|e| e.to_string())
}

/// Resolve `env_<name>` from the variable `NAME`, with `-` read as `_`
fn env_resolver() -> SharedResolver {
    placeholder::dynamic(|key: &str| {
        let name = key.strip_prefix("env_")?.replace('-', "_").to_uppercase();
        std::env::var(name).ok().map(Replacement::text)
    })
}

fn main() {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    // Inline values first, then files in order, then the environment
    let mut sources: Vec<SharedResolver> = Vec::new();

    if !cli.set.is_empty() {
        sources.push(placeholder::placeholders(cli.set));
    }

    for path in &cli.placeholders {
        match PlaceholderFile::from_file(path) {
            Ok(file) => sources.push(file.resolver()),
            Err(e) => {
                eprintln!("Error loading placeholders '{}': {}", path.display(), e);
                process::exit(1);
            }
        }
    }

    if cli.env {
        sources.push(env_resolver());
    }

    debug!(sources = sources.len(), "composing resolvers");
    let resolver = placeholder::combining_iter(sources);

    // Read input
    let (source, filename) = match &cli.input {
        Some(path) => match fs::read_to_string(path) {
            Ok(content) => (content, path.display().to_string()),
            Err(e) => {
                eprintln!("Error reading file '{}': {}", path.display(), e);
                process::exit(1);
            }
        },
        None => {
            let mut buffer = String::new();
            match io::stdin().read_to_string(&mut buffer) {
                Ok(_) => (buffer, "<stdin>".to_string()),
                Err(e) => {
                    eprintln!("Error reading from stdin: {}", e);
                    process::exit(1);
                }
            }
        }
    };

    let config = RenderConfig::new()
        .with_strict(cli.strict)
        .with_max_depth(cli.max_depth)
        .with_max_expansions(cli.max_expansions);
    match render_with_config(&source, &*resolver, config) {
        Ok(out) => print!("{}", out),
        Err(errors) => {
            for error in &errors {
                eprint!("{}", error.format(&source, &filename));
            }
            process::exit(1);
        }
    }
}
