use crate::{assert_parses, assert_rejects, rules_of};
use cql_syntax::parser::Rule;

#[test]
fn test_parse_boolean_structure() {
    assert_parses(&[
        "prop1 = 10 AND prop2 < 5",
        "(prop1 = 10 OR prop1 = 20) AND NOT (prop2 = 'X')",
        "a = 1 or b = 2 and c = 3",
        "NOT a = 1",
        "TRUE",
        "false",
        "((a = 1))",
        "  a = 1  ",
    ]);
}

#[test]
fn test_keywords_are_case_insensitive() {
    assert_parses(&["a = 1 and b = 2", "a = 1 Or not b = 2", "a iS nOt NuLl"]);
}

#[test]
fn test_reject_malformed_boolean_structure() {
    assert_rejects(&[
        "",
        "   ",
        "a = 1 AND",
        "AND a = 1",
        "(a = 1",
        "a = 1)",
        "NOT NOT a = 1",
        "prop1 ==== 1 AND prop2 !!= 5",
        "a",
    ]);
}

#[test]
fn test_and_binds_tighter_than_or() {
    let rules = rules_of("a = 1 OR b = 2 AND c = 3");
    let terms = rules.iter().filter(|r| **r == Rule::boolean_term).count();
    let factors = rules.iter().filter(|r| **r == Rule::boolean_factor).count();

    assert_eq!(terms, 2);
    assert_eq!(factors, 3);
}

#[test]
fn test_keyword_prefixed_identifiers() {
    assert_parses(&["android = 1", "order = 2", "notes = 'x'", "index = 3", "dates = 4"]);
}

#[test]
fn test_quoted_identifiers() {
    assert_parses(&[
        "\"date\" = '2020'",
        "\"my prop\" = 1",
        "\"we\"\"ird\" = 1",
    ]);
    assert_rejects(&["\"\" = 1"]);
}

#[test]
fn test_functions_as_boolean_primary_and_operand() {
    assert_parses(&["is_open()", "abs(temp) > 5", "round(x, 2) = 3", "f(g(h(1)))"]);
}
