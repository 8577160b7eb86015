use super::{ArrayOp, CharacterFunction, Dialect, SpatialOp};
use crate::stack::Operand;

/// PostgreSQL with PostGIS. `ACCENTI` relies on the `unaccent` extension.
#[derive(Debug, Clone, Copy, Default)]
pub struct Postgres;

impl Dialect for Postgres {
    fn name(&self) -> &'static str {
        "PostgreSQL"
    }

    fn placeholder_prefix(&self) -> char {
        '@'
    }

    fn function_name(&self, name: &str) -> Option<&'static str> {
        match name.to_ascii_lowercase().as_str() {
            "abs" => Some("abs"),
            "coalesce" => Some("coalesce"),
            "length" => Some("char_length"),
            "lower" => Some("lower"),
            "round" => Some("round"),
            "substr" => Some("substr"),
            "trim" => Some("trim"),
            "upper" => Some("upper"),
            _ => None,
        }
    }

    fn character_function(&self, function: CharacterFunction) -> Option<&'static str> {
        let name = match function {
            CharacterFunction::Casei | CharacterFunction::Lower => "lower",
            CharacterFunction::Upper => "upper",
            CharacterFunction::Accenti => "unaccent",
        };
        Some(name)
    }

    fn spatial_predicate(&self, op: SpatialOp, lhs: &str, rhs: &str) -> Operand {
        Operand::bare(format!("{}({lhs}, {rhs})", op.sql_function()))
    }

    fn envelope(&self, west: &str, south: &str, east: &str, north: &str) -> String {
        format!("ST_MakeEnvelope({west}, {south}, {east}, {north})")
    }

    fn date(&self, placeholder: &str) -> String {
        format!("CAST({placeholder} AS date)")
    }

    fn timestamp(&self, placeholder: &str) -> String {
        format!("CAST({placeholder} AS timestamptz)")
    }

    fn now(&self) -> String {
        "NOW()".into()
    }

    fn interval(&self, start: Option<&str>, end: Option<&str>) -> String {
        format!(
            "tstzrange({}, {}, '[]')",
            start.unwrap_or("NULL"),
            end.unwrap_or("NULL")
        )
    }

    fn array(&self, elements: &[String]) -> String {
        if elements.is_empty() {
            return "'{}'".into();
        }
        format!("ARRAY[{}]", elements.join(", "))
    }

    fn array_predicate(&self, op: ArrayOp, lhs: &str, rhs: &str) -> String {
        let operator = match op {
            ArrayOp::Equals => "=",
            ArrayOp::Contains => "@>",
            ArrayOp::ContainedBy => "<@",
            ArrayOp::Overlaps => "&&",
        };
        format!("({lhs} {operator} {rhs})")
    }
}
