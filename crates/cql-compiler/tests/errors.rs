use cql_compiler::{
    CompiledFilter, CqlError, CqlResult, GeoPackage, Queryables, SequentialRandomizer,
    SqlListener, compile_filter,
};
use cql_syntax::MAX_NESTING_DEPTH;

fn compile(cql: &str, queryables: &[&str]) -> CqlResult<CompiledFilter> {
    let listener = SqlListener::new(
        GeoPackage,
        SequentialRandomizer::new(),
        Queryables::new(queryables.iter().copied()),
    );
    compile_filter(cql, listener)
}

#[test]
fn test_property_not_queryable() {
    let err = compile("prop1 = 30 AND prop2 > 77", &["prop1"]).unwrap_err();

    assert_eq!(
        err,
        CqlError::NotQueryable {
            property: "prop2".into()
        }
    );
    assert_eq!(
        err.to_string(),
        "property 'prop2' cannot be used in CQL filter, is not a queryable property"
    );
}

#[test]
fn test_first_unqueryable_property_is_reported() {
    let err = compile("x = 1 OR y = 2", &[]).unwrap_err();
    assert!(err.to_string().contains("'x'"));
}

#[test]
fn test_multiple_syntax_errors() {
    let err = compile("prop1 ==== 1 AND prop2 !!= 5", &["prop1", "prop2"]).unwrap_err();

    let CqlError::Syntax(errors) = &err else {
        panic!("expected syntax errors, got {err:?}");
    };
    assert_eq!(errors.len(), 2);

    let message = err.to_string();
    assert_eq!(message.matches("syntax error at column").count(), 2);
    assert!(message.contains("syntax error at column 8"), "{message}");
    assert!(message.contains("syntax error at column 24"), "{message}");
}

#[test]
fn test_syntax_errors_before_queryables() {
    let err = compile("unknown = 1 AND x ! 2", &["prop1"]).unwrap_err();
    assert!(matches!(err, CqlError::Syntax(_)));
}

#[test]
fn test_error_on_later_line() {
    let err = compile("a = 1\nAND b ! 2", &["*"]).unwrap_err();
    assert!(err.to_string().starts_with("syntax error at line 2, column 7"));
}

#[test]
fn test_unsupported_function() {
    let err = compile("load_extension('x') = 1", &["*"]).unwrap_err();
    assert_eq!(
        err.to_string(),
        "function 'load_extension' is not supported by the GeoPackage dialect"
    );
}

#[test]
fn test_function_argument_count() {
    let err = compile("abs() = 1", &["*"]).unwrap_err();
    assert_eq!(err.to_string(), "function 'abs' takes 1 argument(s), got 0");

    let err = compile("substr(name) = 'x'", &["*"]).unwrap_err();
    assert_eq!(err.to_string(), "function 'substr' takes 2 to 3 argument(s), got 1");
}

#[test]
fn test_error_inside_group_is_not_repeated() {
    let CqlError::Syntax(errors) = compile("(a === 1 AND b = 2)", &["*"]).unwrap_err() else {
        panic!("expected a syntax error");
    };
    assert_eq!(errors.len(), 1, "{errors}");

    let CqlError::Syntax(errors) = compile("a = 1 AND (b === 2 OR c = 3)", &["*"]).unwrap_err()
    else {
        panic!("expected a syntax error");
    };
    assert_eq!(errors.len(), 1, "{errors}");
}

#[test]
fn test_accenti_unsupported_in_geopackage() {
    let err = compile("ACCENTI(name) LIKE 'x'", &["*"]).unwrap_err();
    assert_eq!(
        err,
        CqlError::Unsupported {
            construct: "ACCENTI".into(),
            dialect: "GeoPackage"
        }
    );
}

#[test]
fn test_nesting_limit() {
    let depth = MAX_NESTING_DEPTH + 1;
    let cql = format!("{}a = 1{}", "(".repeat(depth), ")".repeat(depth));

    let err = compile(&cql, &["*"]).unwrap_err();
    assert!(err.to_string().contains("maximum nesting depth"));

    let cql = format!(
        "{}a = 1{}",
        "(".repeat(MAX_NESTING_DEPTH),
        ")".repeat(MAX_NESTING_DEPTH)
    );
    assert_eq!(compile(&cql, &["*"]).unwrap().sql, r#"("a" = :cql_bcde)"#);
}

#[test]
fn test_empty_filter() {
    let compiled = compile("", &[]).unwrap();
    assert!(compiled.sql.is_empty());
    assert!(compiled.params.is_empty());
}
