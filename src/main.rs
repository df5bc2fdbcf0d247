//! `matcha` command-line tool.
//!
//! Matches a URL against a path pattern and prints what the placeholders
//! captured.
//!
//! ```text
//! $ matcha https://example.com/path/to/glory '/{A}/{B}/{C}/'
//! url: https://example.com/path/to/glory/
//! [0] path
//! [1] to
//! [2] glory
//! A = path
//! B = to
//! C = glory
//! ```
//!
//! Exit status: 0 on match, 1 on no match, 2 when the URL is invalid.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use matcha::config::{load_config, MatchaConfig, OutputConfig, OutputFormat};
use matcha::observability::init_logging;
use matcha::{Matcha, Url};

#[derive(Parser)]
#[command(name = "matcha")]
#[command(about = "Match a URL against a path pattern with {name} placeholders", long_about = None)]
struct Cli {
    /// Target URL
    url: String,

    /// Pattern, e.g. "/{A}/{B}/" or "https://example.com/items/{id}"
    pattern: String,

    /// Refine a successful match with another pattern (repeatable, applied in order)
    #[arg(long = "then", value_name = "PATTERN")]
    refinements: Vec<String>,

    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => MatchaConfig::default(),
    };
    if cli.json {
        config.output.format = OutputFormat::Json;
    }

    init_logging(&config.observability)?;

    let url = match Url::parse(&cli.url) {
        Ok(url) => url,
        Err(e) => {
            eprintln!("Error: invalid URL {:?}: {}", cli.url, e);
            return Ok(ExitCode::from(2));
        }
    };

    tracing::debug!(
        url = %url,
        pattern = %cli.pattern,
        refinements = cli.refinements.len(),
        "Matching"
    );

    let matched = Matcha::with_pattern(&url, &cli.pattern).and_then(|first| {
        cli.refinements
            .iter()
            .try_fold(first, |current, pattern| current.matched(pattern))
    });

    match matched {
        Some(matched) => {
            print_match(&matched, &config.output)?;
            Ok(ExitCode::SUCCESS)
        }
        None => {
            eprintln!("no match");
            Ok(ExitCode::from(1))
        }
    }
}

fn print_match(matched: &Matcha, output: &OutputConfig) -> Result<(), serde_json::Error> {
    match output.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(matched)?);
        }
        OutputFormat::Text => {
            if output.show_url {
                println!("url: {}", matched.url());
            }
            for (index, value) in matched.captures().iter().enumerate() {
                println!("[{}] {}", index, value);
            }
            for (name, value) in matched.named_captures() {
                println!("{} = {}", name, value);
            }
        }
    }
    Ok(())
}
