//! Grammar acceptance tests for the CQL2 text encoding.

mod boolean;
mod predicates;
mod spatial;
mod temporal_array;

use cql_syntax::parser::{CqlParser, Rule};
use pest::Parser;

pub fn assert_parses(inputs: &[&str]) {
    for input in inputs {
        let result = CqlParser::parse(Rule::cql_filter, input);
        assert!(result.is_ok(), "Failed to parse: {input}\n{result:?}");
    }
}

pub fn assert_rejects(inputs: &[&str]) {
    for input in inputs {
        let result = CqlParser::parse(Rule::cql_filter, input);
        assert!(result.is_err(), "Unexpectedly parsed: {input}");
    }
}

/// Collects the rules of every node in the tree, in pre-order.
pub fn rules_of(input: &str) -> Vec<Rule> {
    CqlParser::parse(Rule::cql_filter, input)
        .unwrap_or_else(|e| panic!("Failed to parse: {input}\n{e}"))
        .flatten()
        .map(|pair| pair.as_rule())
        .collect()
}
