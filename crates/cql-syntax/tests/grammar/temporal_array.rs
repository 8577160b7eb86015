use crate::{assert_parses, assert_rejects, rules_of};
use cql_syntax::parser::Rule;

#[test]
fn test_parse_temporal_predicates() {
    assert_parses(&[
        "T_INTERSECTS(event_time, INTERVAL('1969-07-16T05:32:00Z', '1969-07-24T16:50:35Z'))",
        "T_AFTER(built, DATE('2015-01-01'))",
        "T_BEFORE(updated, TIMESTAMP('2012-08-10T05:30:00.123Z'))",
        "T_DURING(INTERVAL(starts_at, ends_at), INTERVAL('2017-06-10', '2017-06-11'))",
        "T_STARTS(x, INTERVAL('..', NOW()))",
        "t_metby(x, INTERVAL('2010-02-10', '..'))",
        "T_OVERLAPPEDBY(x, y)",
    ]);
    assert_rejects(&[
        "T_AFTER(built, DATE('2015-1-1'))",
        "T_AFTER(built, TIMESTAMP('2015-01-01'))",
        "T_AFTER(built)",
        "T_AFTER(built, INTERVAL('..'))",
    ]);
}

#[test]
fn test_interval_parameters() {
    let rules = rules_of("T_DURING(t, INTERVAL('..', '2020-01-01T00:00:00Z'))");
    assert!(rules.contains(&Rule::dot_dot_string));
    assert!(rules.contains(&Rule::timestamp_string));
    assert_eq!(
        rules.iter().filter(|r| **r == Rule::interval_parameter).count(),
        2
    );
}

#[test]
fn test_parse_array_predicates() {
    assert_parses(&[
        "A_EQUALS(layer:ids, ('a', 'b'))",
        "A_CONTAINS(tags, ('x'))",
        "A_CONTAINEDBY(tags, ('x', 'y', 'z'))",
        "A_OVERLAPS(tags, ())",
        "A_OVERLAPS(tags, (1, ('nested', TRUE), DATE('2020-01-01')))",
    ]);
    assert_rejects(&["A_CONTAINS(tags)", "A_EQUALS(tags, 'x')"]);
}
