use crate::parser::Rule;
use pest::iterators::Pair;

/// Renders a parse tree as a LISP-style string, e.g.
/// `(cql_filter (boolean_expression ... ))`.
///
/// Leaves print their matched text; `EOI` is omitted.
pub fn to_string_tree(node: &Pair<'_, Rule>) -> String {
    let mut out = String::new();
    write_node(node, &mut out);
    out
}

fn write_node(node: &Pair<'_, Rule>, out: &mut String) {
    let mut children = node
        .clone()
        .into_inner()
        .filter(|child| child.as_rule() != Rule::EOI)
        .peekable();

    out.push('(');
    out.push_str(&format!("{:?}", node.as_rule()));
    out.push(' ');

    if children.peek().is_none() {
        out.push_str(node.as_str());
    } else {
        let mut first = true;
        for child in children {
            if !first {
                out.push(' ');
            }
            first = false;
            write_node(&child, out);
        }
    }

    out.push(')');
}
