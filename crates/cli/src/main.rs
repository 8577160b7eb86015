use crate::{commands::FilterInput, error::CliError};
use clap::Parser;
use commands::Commands;
use cql_compiler::{DialectKind, LiteralBinding, LiteralPolicy, Queryables, compile_with_policy};
use cql_syntax::{ErrorCollector, parse_filter, to_string_tree};
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod commands;
mod error;
mod output;

#[derive(Parser)]
#[command(
    name = "cql2sql",
    version = "0.1.0",
    about = "Compiles OGC CQL2 filters into parameterized SQL"
)]
struct Cli {
    #[arg(long, global = true, help = "Log debug output to stderr")]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

fn main() -> Result<ExitCode, CliError> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Compile {
            input,
            dialect,
            queryables,
            inline_numbers,
            inline_booleans,
        } => {
            let policy = LiteralPolicy {
                numeric: binding(inline_numbers),
                boolean: binding(inline_booleans),
            };
            compile_command(&input, dialect, &queryables, policy)?;
        }
        Commands::Check { input } => return check_command(&input),
        Commands::Tree { input } => tree_command(&input)?,
    }

    Ok(ExitCode::SUCCESS)
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn binding(inline: bool) -> LiteralBinding {
    if inline {
        LiteralBinding::Inline
    } else {
        LiteralBinding::Bind
    }
}

fn compile_command(
    input: &FilterInput,
    dialect: DialectKind,
    queryables: &str,
    policy: LiteralPolicy,
) -> Result<(), CliError> {
    let cql = input.read()?;
    let queryables = Queryables::parse_list(queryables);
    debug!(%dialect, wildcard = queryables.is_wildcard(), "compiling filter");

    let compiled = compile_with_policy(dialect, &cql, &queryables, policy)?;
    output::print_json(&compiled)
}

fn check_command(input: &FilterInput) -> Result<ExitCode, CliError> {
    let cql = input.read()?;
    if cql.trim().is_empty() {
        println!("{}", output::check_report(&[]));
        return Ok(ExitCode::SUCCESS);
    }

    let mut errors = ErrorCollector::new();
    parse_filter(&cql, &mut errors);
    println!("{}", output::check_report(errors.errors()));

    Ok(if errors.has_errors() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

fn tree_command(input: &FilterInput) -> Result<(), CliError> {
    let cql = input.read()?;
    let mut errors = ErrorCollector::new();
    let tree = parse_filter(&cql, &mut errors);
    errors.finish()?;

    if let Some(tree) = tree {
        println!("{}", to_string_tree(&tree));
    }
    Ok(())
}
