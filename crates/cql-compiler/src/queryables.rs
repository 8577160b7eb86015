use serde::Deserialize;
use std::collections::HashSet;

/// Sentinel queryable that permits every property.
pub const WILDCARD: &str = "*";

/// Allow-list of properties a filter may reference.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "Vec<String>")]
pub struct Queryables {
    names: HashSet<String>,
    wildcard: bool,
}

impl Queryables {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: HashSet<String> = names.into_iter().map(Into::into).collect();
        let wildcard = names.contains(WILDCARD);
        Self { names, wildcard }
    }

    /// Allows any property.
    pub fn any() -> Self {
        Self::new([WILDCARD])
    }

    /// Parses a comma-separated list such as `name,height` or `*`.
    pub fn parse_list(list: &str) -> Self {
        Self::new(
            list.split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty()),
        )
    }

    /// Property names match exactly; case is significant.
    pub fn allows(&self, property: &str) -> bool {
        self.wildcard || self.names.contains(property)
    }

    pub fn is_wildcard(&self) -> bool {
        self.wildcard
    }
}

impl From<Vec<String>> for Queryables {
    fn from(names: Vec<String>) -> Self {
        Self::new(names)
    }
}
