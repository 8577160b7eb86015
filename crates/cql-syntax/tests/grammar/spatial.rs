use crate::{assert_parses, assert_rejects, rules_of};
use cql_syntax::parser::Rule;

#[test]
fn test_parse_spatial_predicates() {
    assert_parses(&[
        "S_INTERSECTS(geometry,POINT(36.319836 32.288087))",
        "s_within(geom, POLYGON((0 0, 1 0, 1 1, 0 0)))",
        "S_CONTAINS(geom, LINESTRING(0 0, 1 1, 2 2))",
        "S_DISJOINT(geom, MULTIPOINT(0 0, 1 1))",
        "S_TOUCHES(geom, MULTILINESTRING((0 0, 1 1), (2 2, 3 3)))",
        "S_OVERLAPS(geom, MULTIPOLYGON(((0 0, 1 0, 1 1, 0 0)), ((5 5, 6 5, 6 6, 5 5))))",
        "S_CROSSES(geom, GEOMETRYCOLLECTION(POINT(1 2), LINESTRING(0 0, 1 1)))",
        "S_EQUALS(geom, other_geom)",
        "S_INTERSECTS(geom, POINT(1 2 3))",
    ]);
}

#[test]
fn test_parse_bbox_arities() {
    assert_parses(&[
        "S_INTERSECTS(geom, BBOX(-180, -90, 180, 90))",
        "S_INTERSECTS(geom, BBOX(-180, -90, 0, 180, 90, 100))",
    ]);
    assert_rejects(&[
        "S_INTERSECTS(geom, BBOX(1, 2, 3))",
        "S_INTERSECTS(geom, BBOX(1, 2, 3, 4, 5))",
    ]);

    let rules = rules_of("S_INTERSECTS(geom, BBOX(1, 2, 3, 4))");
    assert!(rules.contains(&Rule::east_bound_lon));
    assert!(!rules.contains(&Rule::min_elev));
}

#[test]
fn test_reject_malformed_geometries() {
    assert_rejects(&[
        "S_INTERSECTS(geom, POINT())",
        "S_INTERSECTS(geom, POINT(1))",
        "S_INTERSECTS(geom)",
        "S_INTERSECTS(geom, POINT(1 2)",
    ]);
}
