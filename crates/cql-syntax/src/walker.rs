use crate::parser::Rule;
use pest::iterators::Pair;

/// Callbacks invoked by [`walk`] around every node of a parse tree.
///
/// `exit_rule` fires once all children of the node have been visited, which
/// is where a translator finds its children's results.
pub trait CqlListener {
    fn enter_rule(&mut self, _node: &Pair<'_, Rule>) {}

    fn exit_rule(&mut self, node: &Pair<'_, Rule>);
}

/// Depth-first, left-to-right traversal of `node` and its descendants.
pub fn walk<L: CqlListener + ?Sized>(node: &Pair<'_, Rule>, listener: &mut L) {
    listener.enter_rule(node);
    for child in node.clone().into_inner() {
        walk(&child, listener);
    }
    listener.exit_rule(node);
}
