use crate::{assert_parses, assert_rejects, rules_of};
use cql_syntax::parser::Rule;

#[test]
fn test_parse_binary_comparisons() {
    assert_parses(&[
        "a = 1",
        "a <> 'x'",
        "a < -1.5",
        "a > 1e3",
        "a <= .5",
        "a >= +2",
        "updated >= DATE('1970-01-01')",
        "flag = true",
        "'x' = a",
    ]);
}

#[test]
fn test_parse_like() {
    assert_parses(&[
        "name LIKE 'foo%'",
        "name NOT LIKE '_oo'",
        "CASEI(name) LIKE CASEI('FOO%')",
        "LOWER(name) LIKE UPPER('x')",
        "ACCENTI(name) LIKE ACCENTI('Chère')",
    ]);
    assert_rejects(&["name LIKE 5", "name LIKE other"]);
}

#[test]
fn test_parse_between() {
    assert_parses(&[
        "depth BETWEEN 100.0 AND 150.0",
        "depth NOT BETWEEN 1 AND 2",
        "depth BETWEEN lo AND hi AND x = 1",
    ]);
    assert_rejects(&["depth BETWEEN 'a' AND 'b'", "depth BETWEEN 1"]);
}

#[test]
fn test_parse_in_list() {
    assert_parses(&[
        "cityName IN ('Toronto', 'Frankfurt', 'Tokyo')",
        "category NOT IN (1, 2, 3)",
        "a IN (1)",
    ]);
    assert_rejects(&["a IN ()", "a IN 1, 2"]);
}

#[test]
fn test_parse_is_null() {
    assert_parses(&[
        "geometry IS NULL",
        "name IS NOT NULL",
        "POINT(1 2) IS NULL",
        "abs(x) IS NOT NULL",
    ]);
}

#[test]
fn test_character_literal_escapes() {
    assert_parses(&["name = 'it''s'", "name = ''", "name = 'naïve ☃'"]);
    assert_rejects(&["name = 'unterminated"]);
}

#[test]
fn test_in_list_elements_are_scalar_expressions() {
    let rules = rules_of("a IN ('x', 2, b)");
    let scalars = rules
        .iter()
        .filter(|r| **r == Rule::scalar_expression)
        .count();
    assert_eq!(scalars, 4);
}
