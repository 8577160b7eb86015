//! Operand stack holding partially translated SQL.

/// One entry on the operand stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operand {
    /// A SQL fragment. `enclosed` is set when the fragment is already wrapped
    /// in parentheses (or is otherwise safe to splice into a boolean chain).
    Expr { sql: String, enclosed: bool },
    /// A quoted property reference.
    Column(String),
    /// A numeric or boolean literal, inlined or as a bare placeholder when
    /// `bound` is set.
    Scalar { sql: String, bound: bool },
    /// The `'..'` open end of an interval.
    Open,
    /// An interval; `None` marks an open start or end.
    Interval {
        start: Option<String>,
        end: Option<String>,
    },
}

impl Operand {
    pub fn bare(sql: impl Into<String>) -> Self {
        Self::Expr {
            sql: sql.into(),
            enclosed: false,
        }
    }

    pub fn enclosed(sql: impl Into<String>) -> Self {
        Self::Expr {
            sql: sql.into(),
            enclosed: true,
        }
    }

    pub fn is_enclosed(&self) -> bool {
        matches!(self, Self::Expr { enclosed: true, .. })
    }

    pub fn is_column(&self) -> bool {
        matches!(self, Self::Column(_))
    }
}

impl Default for Operand {
    fn default() -> Self {
        Self::bare("")
    }
}

/// LIFO stack of operands owned by one translation.
#[derive(Debug, Default)]
pub struct OperandStack {
    items: Vec<Operand>,
}

impl OperandStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, operand: Operand) {
        self.items.push(operand);
    }

    /// Pops the top operand. An empty stack yields an empty expression
    /// instead of panicking.
    pub fn pop(&mut self) -> Operand {
        self.items.pop().unwrap_or_default()
    }

    /// Pops `n` operands and returns them in source order (first pushed first).
    /// Missing operands are filled with empty expressions.
    pub fn pop_many(&mut self, n: usize) -> Vec<Operand> {
        let available = n.min(self.items.len());
        let mut operands = self.items.split_off(self.items.len() - available);
        if available < n {
            let mut padded = vec![Operand::default(); n - available];
            padded.append(&mut operands);
            operands = padded;
        }
        operands
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pop_many_returns_source_order() {
        let mut stack = OperandStack::new();
        for sql in ["a", "b", "c"] {
            stack.push(Operand::bare(sql));
        }

        let popped = stack.pop_many(2);
        assert_eq!(popped, vec![Operand::bare("b"), Operand::bare("c")]);
        assert_eq!(stack.len(), 1);
    }

    #[test]
    fn test_pop_on_empty_stack() {
        let mut stack = OperandStack::new();
        assert_eq!(stack.pop(), Operand::bare(""));
        assert!(stack.is_empty());
    }

    #[test]
    fn test_pop_many_underflow_pads_front() {
        let mut stack = OperandStack::new();
        stack.push(Operand::enclosed("(x)"));

        let popped = stack.pop_many(3);
        assert_eq!(
            popped,
            vec![Operand::bare(""), Operand::bare(""), Operand::enclosed("(x)")]
        );
        assert!(stack.is_empty());
    }

    #[test]
    fn test_operand_kinds() {
        assert!(Operand::Column("\"a\"".into()).is_column());
        assert!(!Operand::Column("\"a\"".into()).is_enclosed());
        assert!(!Operand::bare("x").is_column());
    }
}
