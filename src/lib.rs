pub mod cli;
pub mod config;
pub mod display;
pub mod query;

use anyhow::Context;
use colored::Colorize;
use std::io::Read;
use std::path::Path;
use tracing_subscriber::EnvFilter;

pub use cli::{Cli, ColorMode, Commands, OutputFormat, cli_parse};
pub use query::{
    BODY_KEY, Clause, ClauseKey, LogsQuery, Operator, QueryError, QueryValue,
    build_logs_query_for_server, clause_at_offset, parse_logs_query, quote_query_value,
    stringify_logs_query, unquote_query_value, validate_logs_query, validation_errors,
};

/// Install the tracing subscriber; `RUST_LOG` overrides the verbosity flags.
///
/// Returns false when a global subscriber was already installed.
fn init_tracing(verbose: u8) -> bool {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    match tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
    {
        Ok(()) => true,
        Err(err) => {
            tracing::debug!(%err, "tracing subscriber already installed");
            false
        }
    }
}

fn print_query_warnings(clauses: &[Clause], config: &config::QueryConfig, quiet: bool) {
    if quiet {
        return;
    }
    for warning in config::query_warnings(clauses, config) {
        eprintln!("{} {}", "Warning:".yellow().bold(), warning);
    }
}

fn read_clauses(file: Option<&Path>) -> anyhow::Result<Vec<Clause>> {
    let raw = match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read clauses file '{}'", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read clauses from stdin")?;
            buf
        }
    };

    serde_json::from_str(&raw).context("Invalid clauses JSON")
}

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{json}");
    Ok(())
}

/// Run the CLI. Returns `Ok(false)` when a validated query is invalid.
pub fn run() -> anyhow::Result<bool> {
    let cli = cli_parse();
    init_tracing(cli.verbose);

    let query_config = config::load_config(cli.config.as_deref())
        .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;
    let format = cli
        .format
        .or(query_config.format)
        .unwrap_or(OutputFormat::Text);

    match cli.color {
        ColorMode::Always => colored::control::set_override(true),
        ColorMode::Never => colored::control::set_override(false),
        ColorMode::Auto => {}
    }

    tracing::info!(
        profile = %query_config.profile_name,
        ?format,
        "loaded query config"
    );

    match &cli.command {
        Commands::Parse { query } => {
            let clauses = parse_logs_query(query);
            print_query_warnings(&clauses, &query_config, cli.quiet);
            match format {
                OutputFormat::Text => print!("{}", display::format_clauses_text(&clauses)),
                OutputFormat::Json => print_json(&clauses)?,
            }
        }
        Commands::Stringify { file } => {
            let clauses = read_clauses(file.as_deref())?;
            print_query_warnings(&clauses, &query_config, cli.quiet);
            let text = stringify_logs_query(&clauses);
            match format {
                OutputFormat::Text => println!("{text}"),
                OutputFormat::Json => print_json(&serde_json::json!({ "query": text }))?,
            }
        }
        Commands::Server { query } => {
            let clauses = parse_logs_query(query);
            print_query_warnings(&clauses, &query_config, cli.quiet);
            let server_query = build_logs_query_for_server(&clauses);
            match format {
                OutputFormat::Text => println!("{server_query}"),
                OutputFormat::Json => print_json(&serde_json::json!({
                    "query": server_query,
                    "valid": validate_logs_query(&clauses),
                }))?,
            }
        }
        Commands::Validate { query } => {
            let clauses = parse_logs_query(query);
            print_query_warnings(&clauses, &query_config, cli.quiet);
            let errors = validation_errors(&clauses);
            match format {
                OutputFormat::Text => print!("{}", display::format_validation_text(&errors)),
                OutputFormat::Json => print_json(&serde_json::json!({
                    "valid": errors.is_empty(),
                    "errors": errors
                        .iter()
                        .map(|e| serde_json::json!({
                            "message": e.to_string(),
                            "offset": e.offset(),
                        }))
                        .collect::<Vec<_>>(),
                }))?,
            }
            return Ok(errors.is_empty());
        }
        Commands::Quote { value, number } => {
            let quoted = if *number {
                let parsed = value
                    .parse::<i64>()
                    .map(QueryValue::Integer)
                    .or_else(|_| value.parse::<f64>().map(QueryValue::Float))
                    .with_context(|| format!("'{}' is not a number", value))?;
                quote_query_value(parsed)
            } else {
                quote_query_value(value.as_str())
            };
            match format {
                OutputFormat::Text => println!("{quoted}"),
                OutputFormat::Json => print_json(&serde_json::json!({ "value": quoted }))?,
            }
        }
        Commands::Highlight { query } => {
            let clauses = parse_logs_query(query);
            print_query_warnings(&clauses, &query_config, cli.quiet);
            println!("{}", display::highlight_query(query, &clauses));
        }
    }

    Ok(true)
}
