use crate::error::CliError;
use clap::{Args, Subcommand};
use cql_compiler::DialectKind;
use std::{io::Read, path::PathBuf};

#[derive(Subcommand)]
pub enum Commands {
    /// Compile a filter into a SQL fragment and its bound parameters
    Compile {
        #[command(flatten)]
        input: FilterInput,

        #[arg(
            long,
            default_value = "geopackage",
            help = "Target SQL dialect: geopackage (gpkg, sqlite) or postgres (pg)"
        )]
        dialect: DialectKind,

        #[arg(
            long,
            help = "Comma-separated list of properties the filter may use, or * for any"
        )]
        queryables: String,

        #[arg(long, help = "Write numeric literals into the SQL instead of binding them")]
        inline_numbers: bool,

        #[arg(long, help = "Write boolean literals into the SQL instead of binding them")]
        inline_booleans: bool,
    },
    /// Report every syntax error in a filter
    Check {
        #[command(flatten)]
        input: FilterInput,
    },
    /// Print the parse tree of a filter
    Tree {
        #[command(flatten)]
        input: FilterInput,
    },
}

#[derive(Args)]
pub struct FilterInput {
    #[arg(help = "CQL filter text", conflicts_with = "file")]
    pub filter: Option<String>,

    #[arg(long, help = "Read the filter from this file, or from stdin when '-'")]
    pub file: Option<PathBuf>,
}

impl FilterInput {
    pub fn read(&self) -> Result<String, CliError> {
        match (&self.filter, &self.file) {
            (Some(filter), _) => Ok(filter.clone()),
            (None, Some(path)) if path.as_os_str() == "-" => {
                let mut filter = String::new();
                std::io::stdin().read_to_string(&mut filter)?;
                Ok(filter)
            }
            (None, Some(path)) => Ok(std::fs::read_to_string(path)?),
            (None, None) => Err(CliError::MissingFilter),
        }
    }
}
