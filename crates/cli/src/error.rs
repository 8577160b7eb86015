use cql_compiler::CqlError;
use cql_syntax::SyntaxErrors;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Failed to read the filter: {0}")]
    FilterRead(#[from] std::io::Error),

    #[error("No filter given; pass it as an argument or with --file")]
    MissingFilter,

    #[error("Failed to compile the filter: {0}")]
    Compile(#[from] CqlError),

    #[error("Invalid filter: {0}")]
    Syntax(#[from] SyntaxErrors),

    #[error("Failed to serialize data to JSON: {0}")]
    JsonSerialize(#[from] serde_json::Error),
}
