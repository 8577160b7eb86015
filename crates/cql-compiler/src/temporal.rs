//! Temporal predicates as conditions on interval bounds.
//!
//! Both operands are normalised to closed intervals: an instant `x` becomes
//! `[x, x]` and an open interval end becomes an infinity. Each predicate is
//! then one of Allen's interval relations over the four bounds. Comparisons
//! involving an infinity are folded away at compile time.

use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemporalOp {
    After,
    Before,
    Contains,
    Disjoint,
    During,
    Equals,
    FinishedBy,
    Finishes,
    Intersects,
    Meets,
    MetBy,
    OverlappedBy,
    Overlaps,
    StartedBy,
    Starts,
}

impl TemporalOp {
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        let op = match keyword.to_ascii_lowercase().as_str() {
            "t_after" => Self::After,
            "t_before" => Self::Before,
            "t_contains" => Self::Contains,
            "t_disjoint" => Self::Disjoint,
            "t_during" => Self::During,
            "t_equals" => Self::Equals,
            "t_finishedby" => Self::FinishedBy,
            "t_finishes" => Self::Finishes,
            "t_intersects" => Self::Intersects,
            "t_meets" => Self::Meets,
            "t_metby" => Self::MetBy,
            "t_overlappedby" => Self::OverlappedBy,
            "t_overlaps" => Self::Overlaps,
            "t_startedby" => Self::StartedBy,
            "t_starts" => Self::Starts,
            _ => return None,
        };
        Some(op)
    }
}

/// One end of a normalised interval.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Bound {
    NegInfinity,
    Value(String),
    PosInfinity,
}

impl Bound {
    fn rank(&self) -> i8 {
        match self {
            Self::NegInfinity => -1,
            Self::Value(_) => 0,
            Self::PosInfinity => 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Period {
    pub start: Bound,
    pub end: Bound,
}

impl Period {
    pub fn instant(sql: impl Into<String>) -> Self {
        let sql = sql.into();
        Self {
            start: Bound::Value(sql.clone()),
            end: Bound::Value(sql),
        }
    }

    /// `None` marks an open (`'..'`) end.
    pub fn interval(start: Option<String>, end: Option<String>) -> Self {
        Self {
            start: start.map_or(Bound::NegInfinity, Bound::Value),
            end: end.map_or(Bound::PosInfinity, Bound::Value),
        }
    }
}

/// The fully open interval `('..', '..')`.
impl Default for Period {
    fn default() -> Self {
        Self::interval(None, None)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    Always,
    Never,
    Sql(String),
}

impl Condition {
    /// Renders the condition as an enclosed SQL boolean.
    pub fn to_sql(&self) -> String {
        match self {
            Self::Always => "1 = 1".into(),
            Self::Never => "1 = 0".into(),
            Self::Sql(sql) => format!("({sql})"),
        }
    }

    fn and(conditions: Vec<Condition>) -> Self {
        let mut parts = Vec::with_capacity(conditions.len());
        for condition in conditions {
            match condition {
                Self::Never => return Self::Never,
                Self::Always => {}
                Self::Sql(sql) => parts.push(sql),
            }
        }
        if parts.is_empty() {
            Self::Always
        } else {
            Self::Sql(parts.join(" AND "))
        }
    }

    fn not(self) -> Self {
        match self {
            Self::Always => Self::Never,
            Self::Never => Self::Always,
            Self::Sql(sql) => Self::Sql(format!("NOT ({sql})")),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Cmp {
    Lt,
    Le,
    Eq,
    Ge,
    Gt,
}

impl Cmp {
    fn symbol(self) -> &'static str {
        match self {
            Self::Lt => "<",
            Self::Le => "<=",
            Self::Eq => "=",
            Self::Ge => ">=",
            Self::Gt => ">",
        }
    }

    fn holds(self, ordering: Ordering) -> bool {
        match self {
            Self::Lt => ordering == Ordering::Less,
            Self::Le => ordering != Ordering::Greater,
            Self::Eq => ordering == Ordering::Equal,
            Self::Ge => ordering != Ordering::Less,
            Self::Gt => ordering == Ordering::Greater,
        }
    }
}

fn compare(lhs: &Bound, cmp: Cmp, rhs: &Bound) -> Condition {
    if let (Bound::Value(l), Bound::Value(r)) = (lhs, rhs) {
        return Condition::Sql(format!("{l} {} {r}", cmp.symbol()));
    }
    if cmp.holds(lhs.rank().cmp(&rhs.rank())) {
        Condition::Always
    } else {
        Condition::Never
    }
}

fn all(parts: &[(&Bound, Cmp, &Bound)]) -> Condition {
    Condition::and(parts.iter().map(|(l, c, r)| compare(l, *c, r)).collect())
}

/// Builds the condition for `op(a, b)`.
pub fn relation(op: TemporalOp, a: &Period, b: &Period) -> Condition {
    use Cmp::*;

    let (s1, e1, s2, e2) = (&a.start, &a.end, &b.start, &b.end);

    match op {
        TemporalOp::After => all(&[(s1, Gt, e2)]),
        TemporalOp::Before => all(&[(e1, Lt, s2)]),
        TemporalOp::Contains => all(&[(s1, Lt, s2), (e1, Gt, e2)]),
        TemporalOp::Disjoint => all(&[(s1, Le, e2), (e1, Ge, s2)]).not(),
        TemporalOp::During => all(&[(s1, Gt, s2), (e1, Lt, e2)]),
        TemporalOp::Equals => all(&[(s1, Eq, s2), (e1, Eq, e2)]),
        TemporalOp::FinishedBy => all(&[(s1, Lt, s2), (e1, Eq, e2)]),
        TemporalOp::Finishes => all(&[(s1, Gt, s2), (e1, Eq, e2)]),
        TemporalOp::Intersects => all(&[(s1, Le, e2), (e1, Ge, s2)]),
        TemporalOp::Meets => all(&[(e1, Eq, s2)]),
        TemporalOp::MetBy => all(&[(s1, Eq, e2)]),
        TemporalOp::OverlappedBy => all(&[(s1, Gt, s2), (s1, Lt, e2), (e1, Gt, e2)]),
        TemporalOp::Overlaps => all(&[(s1, Lt, s2), (e1, Gt, s2), (e1, Lt, e2)]),
        TemporalOp::StartedBy => all(&[(s1, Eq, s2), (e1, Gt, e2)]),
        TemporalOp::Starts => all(&[(s1, Eq, s2), (e1, Lt, e2)]),
    }
}
