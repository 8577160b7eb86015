use crate::{
    dialect::{Dialect, GeoPackage, Postgres},
    error::{CqlError, CqlResult, UnknownDialect},
    listener::SqlListener,
    policy::LiteralPolicy,
    queryables::Queryables,
    random::{Randomizer, ThreadRandomizer},
    state::NamedParams,
};
use cql_syntax::{ErrorCollector, parse_filter, walk};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use tracing::debug;

/// A SQL boolean fragment with the values of its bound parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CompiledFilter {
    pub sql: String,
    pub params: NamedParams,
}

impl CompiledFilter {
    /// True when there is nothing to filter on.
    pub fn is_empty(&self) -> bool {
        self.sql.is_empty()
    }
}

/// Translates a CQL filter with the given listener.
///
/// Empty (or whitespace-only) input yields an empty filter. Syntax errors
/// are checked before anything is translated, and every one of them is
/// returned together.
pub fn compile_filter<D: Dialect, R: Randomizer>(
    cql: &str,
    mut listener: SqlListener<D, R>,
) -> CqlResult<CompiledFilter> {
    if cql.trim().is_empty() {
        return Ok(CompiledFilter::default());
    }

    let mut errors = ErrorCollector::new();
    let tree = parse_filter(cql, &mut errors);
    if let Err(syntax) = errors.finish() {
        debug!(errors = syntax.len(), "rejected CQL filter with syntax errors");
        return Err(syntax.into());
    }
    let tree = tree.ok_or_else(|| CqlError::Internal("parser returned no tree".into()))?;

    walk(&tree, &mut listener);

    let dialect = listener.dialect().name();
    let (sql, params) = listener.finish().inspect_err(|err| {
        debug!(dialect, error = %err, "failed to translate CQL filter");
    })?;
    debug!(dialect, params = params.len(), "compiled CQL filter");

    Ok(CompiledFilter { sql, params })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DialectKind {
    #[serde(alias = "gpkg", alias = "sqlite")]
    GeoPackage,
    #[serde(alias = "pg", alias = "postgresql")]
    Postgres,
}

impl FromStr for DialectKind {
    type Err = UnknownDialect;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "geopackage" | "gpkg" | "sqlite" => Ok(Self::GeoPackage),
            "postgres" | "postgresql" | "pg" => Ok(Self::Postgres),
            _ => Err(UnknownDialect(s.to_string())),
        }
    }
}

impl fmt::Display for DialectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GeoPackage => write!(f, "geopackage"),
            Self::Postgres => write!(f, "postgres"),
        }
    }
}

/// Compiles `cql` for the given dialect with every literal bound.
pub fn compile(kind: DialectKind, cql: &str, queryables: &Queryables) -> CqlResult<CompiledFilter> {
    compile_with_policy(kind, cql, queryables, LiteralPolicy::default())
}

pub fn compile_with_policy(
    kind: DialectKind,
    cql: &str,
    queryables: &Queryables,
    policy: LiteralPolicy,
) -> CqlResult<CompiledFilter> {
    let queryables = queryables.clone();
    match kind {
        DialectKind::GeoPackage => compile_filter(
            cql,
            SqlListener::new(GeoPackage, ThreadRandomizer, queryables).with_literal_policy(policy),
        ),
        DialectKind::Postgres => compile_filter(
            cql,
            SqlListener::new(Postgres, ThreadRandomizer, queryables).with_literal_policy(policy),
        ),
    }
}
