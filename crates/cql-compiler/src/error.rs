use cql_syntax::SyntaxErrors;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CqlError {
    #[error("{0}")]
    Syntax(#[from] SyntaxErrors),

    #[error("property '{property}' cannot be used in CQL filter, is not a queryable property")]
    NotQueryable { property: String },

    #[error("function '{name}' is not supported by the {dialect} dialect")]
    UnsupportedFunction { name: String, dialect: &'static str },

    #[error("function '{name}' takes {expected} argument(s), got {found}")]
    FunctionArity {
        name: String,
        expected: String,
        found: usize,
    },

    #[error("{construct} is not supported by the {dialect} dialect")]
    Unsupported {
        construct: String,
        dialect: &'static str,
    },

    #[error("internal error while translating CQL filter: {0}")]
    Internal(String),
}

pub type CqlResult<T> = std::result::Result<T, CqlError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown SQL dialect '{0}', expected 'geopackage' or 'postgres'")]
pub struct UnknownDialect(pub String);
