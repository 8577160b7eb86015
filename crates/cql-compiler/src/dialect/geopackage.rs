use super::{ArrayOp, CharacterFunction, Dialect, SpatialOp};
use crate::stack::Operand;

/// SQLite with the SpatiaLite extension, as used for GeoPackage files.
///
/// Arrays are stored as JSON text and handled with the JSON1 functions.
#[derive(Debug, Clone, Copy, Default)]
pub struct GeoPackage;

impl Dialect for GeoPackage {
    fn name(&self) -> &'static str {
        "GeoPackage"
    }

    fn placeholder_prefix(&self) -> char {
        ':'
    }

    /// GeoPackage stores booleans as INTEGER 0/1.
    fn boolean_parameter(&self, value: bool) -> &'static str {
        if value { "1" } else { "0" }
    }

    /// Bound values arrive as text and text sorts after every number in
    /// SQLite, so values without column affinity are converted explicitly.
    fn typed_parameter(&self, placeholder: &str) -> String {
        format!("CAST({placeholder} AS NUMERIC)")
    }

    fn character_function(&self, function: CharacterFunction) -> Option<&'static str> {
        match function {
            CharacterFunction::Casei | CharacterFunction::Lower => Some("lower"),
            CharacterFunction::Upper => Some("upper"),
            // SQLite has no accent folding.
            CharacterFunction::Accenti => None,
        }
    }

    fn spatial_predicate(&self, op: SpatialOp, lhs: &str, rhs: &str) -> Operand {
        // SpatiaLite predicates return 1, 0 or -1 (invalid input).
        Operand::enclosed(format!("({}({lhs}, {rhs}) = 1)", op.sql_function()))
    }

    fn envelope(&self, west: &str, south: &str, east: &str, north: &str) -> String {
        format!("BuildMbr({west}, {south}, {east}, {north})")
    }

    fn date(&self, placeholder: &str) -> String {
        format!("date({placeholder})")
    }

    fn timestamp(&self, placeholder: &str) -> String {
        format!("datetime({placeholder})")
    }

    fn now(&self) -> String {
        "datetime('now')".into()
    }

    fn interval(&self, start: Option<&str>, end: Option<&str>) -> String {
        format!(
            "json_array({}, {})",
            start.unwrap_or("NULL"),
            end.unwrap_or("NULL")
        )
    }

    fn array(&self, elements: &[String]) -> String {
        format!("json_array({})", elements.join(", "))
    }

    fn array_predicate(&self, op: ArrayOp, lhs: &str, rhs: &str) -> String {
        match op {
            ArrayOp::Equals => format!("(json({lhs}) = json({rhs}))"),
            ArrayOp::Contains => contains(lhs, rhs),
            ArrayOp::ContainedBy => contains(rhs, lhs),
            ArrayOp::Overlaps => format!(
                "(EXISTS (SELECT value FROM json_each({lhs}) INTERSECT SELECT value FROM json_each({rhs})))"
            ),
        }
    }
}

/// `outer` holds every element of `inner`.
fn contains(outer: &str, inner: &str) -> String {
    format!(
        "(NOT EXISTS (SELECT value FROM json_each({inner}) EXCEPT SELECT value FROM json_each({outer})))"
    )
}
