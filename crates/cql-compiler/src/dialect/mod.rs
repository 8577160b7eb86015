//! Defines the `Dialect` trait for backend-specific SQL syntax.
//!
//! A dialect never sees literal values, only the placeholders and fragments
//! that the listener has already produced, so nothing it renders can carry
//! user input into the SQL text.

mod geopackage;
mod postgres;

pub use geopackage::GeoPackage;
pub use postgres::Postgres;

use crate::stack::Operand;

/// Scalar functions a filter may call, by lower-cased CQL name, with the
/// fewest and most arguments each accepts.
pub const SUPPORTED_FUNCTIONS: [(&str, usize, usize); 8] = [
    ("abs", 1, 1),
    ("coalesce", 2, usize::MAX),
    ("length", 1, 1),
    ("lower", 1, 1),
    ("round", 1, 2),
    ("substr", 2, 3),
    ("trim", 1, 1),
    ("upper", 1, 1),
];

/// Returns the `(min, max)` argument count of a supported function.
pub fn function_arity(name: &str) -> Option<(usize, usize)> {
    let name = name.to_ascii_lowercase();
    SUPPORTED_FUNCTIONS
        .iter()
        .find(|(supported, ..)| *supported == name)
        .map(|&(_, min, max)| (min, max))
}

pub trait Dialect {
    /// Returns the name of the dialect (e.g., "GeoPackage", "PostgreSQL").
    fn name(&self) -> &'static str;

    /// Symbol placed in front of a parameter name to form a placeholder.
    ///
    /// - GeoPackage (SQLite) uses `:name`
    /// - PostgreSQL (pgx named arguments) uses `@name`
    fn placeholder_prefix(&self) -> char;

    /// Value bound for a boolean literal.
    fn boolean_parameter(&self, value: bool) -> &'static str {
        if value { "true" } else { "false" }
    }

    /// A bound numeric or boolean placeholder in a position where no column
    /// gives it a type, such as a function argument or a bbox bound.
    fn typed_parameter(&self, placeholder: &str) -> String {
        placeholder.to_string()
    }

    /// Maps a CQL function name to the SQL function to call, or `None` when
    /// the function is not allowed. Argument counts are checked separately
    /// against `function_arity`.
    fn function_name(&self, name: &str) -> Option<&'static str> {
        let name = name.to_ascii_lowercase();
        SUPPORTED_FUNCTIONS
            .iter()
            .find(|(supported, ..)| *supported == name)
            .map(|(supported, ..)| *supported)
    }

    /// SQL function applied by a `CASEI`/`ACCENTI`/`LOWER`/`UPPER` clause.
    fn character_function(&self, function: CharacterFunction) -> Option<&'static str>;

    fn spatial_predicate(&self, op: SpatialOp, lhs: &str, rhs: &str) -> Operand;

    fn geometry_from_text(&self, placeholder: &str) -> String {
        format!("ST_GeomFromText({placeholder})")
    }

    /// A rectangle built from its four bounds.
    fn envelope(&self, west: &str, south: &str, east: &str, north: &str) -> String;

    fn date(&self, placeholder: &str) -> String;

    fn timestamp(&self, placeholder: &str) -> String;

    fn now(&self) -> String;

    /// An interval used as a value; `None` marks an open end.
    fn interval(&self, start: Option<&str>, end: Option<&str>) -> String;

    fn array(&self, elements: &[String]) -> String;

    /// Renders an array predicate. The result is always enclosed.
    fn array_predicate(&self, op: ArrayOp, lhs: &str, rhs: &str) -> String;
}

/// Wraps an identifier in double quotes, doubling embedded quotes.
pub fn quote_identifier(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}

/// Strips the quoting of a CQL identifier (`"my ""prop"""` becomes `my "prop"`).
/// Bare identifiers are returned as written.
pub fn unquote_identifier(ident: &str) -> String {
    match ident
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
    {
        Some(inner) => inner.replace("\"\"", "\""),
        None => ident.to_string(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharacterFunction {
    Casei,
    Accenti,
    Lower,
    Upper,
}

impl CharacterFunction {
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Casei => "CASEI",
            Self::Accenti => "ACCENTI",
            Self::Lower => "LOWER",
            Self::Upper => "UPPER",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpatialOp {
    Intersects,
    Equals,
    Disjoint,
    Touches,
    Within,
    Overlaps,
    Crosses,
    Contains,
}

impl SpatialOp {
    /// Parses the CQL function name, e.g. `S_INTERSECTS`.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        let op = match keyword.to_ascii_lowercase().as_str() {
            "s_intersects" => Self::Intersects,
            "s_equals" => Self::Equals,
            "s_disjoint" => Self::Disjoint,
            "s_touches" => Self::Touches,
            "s_within" => Self::Within,
            "s_overlaps" => Self::Overlaps,
            "s_crosses" => Self::Crosses,
            "s_contains" => Self::Contains,
            _ => return None,
        };
        Some(op)
    }

    /// The OGC simple-features SQL function implementing the predicate.
    pub fn sql_function(&self) -> &'static str {
        match self {
            Self::Intersects => "ST_Intersects",
            Self::Equals => "ST_Equals",
            Self::Disjoint => "ST_Disjoint",
            Self::Touches => "ST_Touches",
            Self::Within => "ST_Within",
            Self::Overlaps => "ST_Overlaps",
            Self::Crosses => "ST_Crosses",
            Self::Contains => "ST_Contains",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrayOp {
    Equals,
    Contains,
    ContainedBy,
    Overlaps,
}

impl ArrayOp {
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        let op = match keyword.to_ascii_lowercase().as_str() {
            "a_equals" => Self::Equals,
            "a_contains" => Self::Contains,
            "a_containedby" => Self::ContainedBy,
            "a_overlaps" => Self::Overlaps,
            _ => return None,
        };
        Some(op)
    }
}
