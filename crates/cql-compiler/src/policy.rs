use serde::{Deserialize, Serialize};

/// How a literal reaches the SQL text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LiteralBinding {
    /// As a bound parameter.
    #[default]
    Bind,
    /// Written into the SQL. Only offered for literal kinds whose text the
    /// grammar restricts to digits, signs and keywords.
    Inline,
}

/// Per-kind literal handling. Character, temporal and geometry literals are
/// always bound; bbox bounds follow `numeric`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LiteralPolicy {
    pub numeric: LiteralBinding,
    pub boolean: LiteralBinding,
}

impl LiteralPolicy {
    pub fn bind_all() -> Self {
        Self::default()
    }

    pub fn inline_scalars() -> Self {
        Self {
            numeric: LiteralBinding::Inline,
            boolean: LiteralBinding::Inline,
        }
    }
}
