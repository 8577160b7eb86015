//! CQL2 text grammar, parse entry point and tree traversal.
//!
//! The grammar is a pest PEG. [`parse_filter`] reports every syntax error it
//! can find to an [`ErrorListener`], and [`walk`] drives a [`CqlListener`]
//! through the resulting tree in post-order.

pub mod errors;
pub mod parser;
pub mod tree;
pub mod walker;

mod recovery;

pub use errors::{ErrorCollector, ErrorListener, SyntaxError, SyntaxErrors};
pub use parser::{CqlParser, MAX_NESTING_DEPTH, MAX_REPORTED_ERRORS, Rule, parse_filter};
pub use pest::iterators::Pair;
pub use tree::to_string_tree;
pub use walker::{CqlListener, walk};
