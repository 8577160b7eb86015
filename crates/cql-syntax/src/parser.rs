use crate::{
    errors::{ErrorListener, SyntaxError},
    recovery,
};
use pest::{
    Parser,
    error::{Error as PestError, ErrorVariant, InputLocation},
    iterators::Pair,
};
use pest_derive::Parser;
use std::borrow::Cow;
use tracing::trace;

#[derive(Parser)]
#[grammar = "grammar/cql.pest"]
pub struct CqlParser;

/// Deepest parenthesis nesting accepted before the PEG parse is attempted.
pub const MAX_NESTING_DEPTH: usize = 32;

/// Upper bound on the syntax errors reported for a single filter.
pub const MAX_REPORTED_ERRORS: usize = 32;

/// Parses a CQL filter into its `cql_filter` node.
///
/// Syntax errors are reported to `errors` rather than returned. After the
/// first error the parser resynchronises at the next `AND`/`OR` and parses
/// the remainder on its own, so independent mistakes in one filter are all
/// reported in a single pass. A tree is returned only for error-free input.
pub fn parse_filter<'i>(input: &'i str, errors: &mut dyn ErrorListener) -> Option<Pair<'i, Rule>> {
    if let Some(offset) = recovery::nesting_overflow(input, MAX_NESTING_DEPTH) {
        errors.syntax_error(SyntaxError::at(
            input,
            offset,
            format!("maximum nesting depth of {MAX_NESTING_DEPTH} exceeded"),
        ));
        return None;
    }

    let err = match CqlParser::parse(Rule::cql_filter, input) {
        Ok(mut pairs) => return pairs.next(),
        Err(err) => err,
    };

    let mut offset = error_position(&err);
    report(input, offset, &err, errors);
    let mut reported = 1;

    while reported < MAX_REPORTED_ERRORS {
        let Some(resync) = recovery::next_connective(input, offset) else {
            break;
        };
        trace!(
            offset,
            resume = resync.offset,
            depth = resync.depth,
            "resynchronising CQL parse"
        );

        // Reopen the groups enclosing the connective so their closing
        // parentheses in the remainder still balance.
        let remainder = format!("{}{}", "(".repeat(resync.depth), &input[resync.offset..]);
        match CqlParser::parse(Rule::cql_filter, &remainder) {
            Ok(_) => break,
            Err(err) => {
                offset = resync.offset + error_position(&err).saturating_sub(resync.depth);
                report(input, offset, &err, errors);
                reported += 1;
            }
        }
    }

    None
}

fn error_position(err: &PestError<Rule>) -> usize {
    match err.location {
        InputLocation::Pos(pos) => pos,
        InputLocation::Span((start, _)) => start,
    }
}

/// Reports a pest error located at the absolute byte `offset` of `input`.
fn report(input: &str, offset: usize, err: &PestError<Rule>, errors: &mut dyn ErrorListener) {
    errors.syntax_error(SyntaxError::at(
        input,
        offset,
        describe(input, offset, &err.variant),
    ));
}

fn describe(input: &str, offset: usize, variant: &ErrorVariant<Rule>) -> String {
    let found = found_token(input, offset);

    match variant {
        ErrorVariant::ParsingError { positives, .. } if !positives.is_empty() => {
            let mut expected: Vec<Cow<'static, str>> = positives.iter().map(rule_label).collect();
            expected.sort_unstable();
            expected.dedup();
            format!("unexpected {found}, expected {}", expected.join(", "))
        }
        ErrorVariant::ParsingError { .. } => format!("unexpected {found}"),
        ErrorVariant::CustomError { message } => message.clone(),
    }
}

fn found_token(input: &str, offset: usize) -> String {
    let token: String = input
        .get(offset..)
        .unwrap_or_default()
        .chars()
        .take_while(|c| !c.is_whitespace())
        .take(16)
        .collect();

    if token.is_empty() {
        "end of input".to_string()
    } else {
        format!("'{token}'")
    }
}

/// Human-readable name of a rule, as shown in "expected …" lists.
pub fn rule_label(rule: &Rule) -> Cow<'static, str> {
    let label = match rule {
        Rule::EOI => "end of input",
        Rule::comparison_operator => "comparison operator",
        Rule::character_literal => "character literal",
        Rule::numeric_literal | Rule::numeric_expression => "number",
        Rule::boolean_literal => "boolean literal",
        Rule::identifier | Rule::property_name => "property name",
        Rule::function => "function",
        Rule::spatial_function => "spatial function",
        Rule::temporal_function => "temporal function",
        Rule::array_function => "array function",
        Rule::date_string => "date",
        Rule::timestamp_string => "timestamp",
        Rule::dot_dot_string => "'..'",
        Rule::kw_and => "AND",
        Rule::kw_or => "OR",
        Rule::kw_not => "NOT",
        Rule::kw_like => "LIKE",
        Rule::kw_between => "BETWEEN",
        Rule::kw_in => "IN",
        Rule::kw_is => "IS",
        Rule::kw_null => "NULL",
        Rule::x_coord
        | Rule::y_coord
        | Rule::z_coord
        | Rule::west_bound_lon
        | Rule::east_bound_lon
        | Rule::north_bound_lat
        | Rule::south_bound_lat
        | Rule::min_elev
        | Rule::max_elev => "coordinate",
        other => return Cow::Owned(format!("{other:?}").replace('_', " ")),
    };
    Cow::Borrowed(label)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorCollector;

    fn parse_errors(input: &str) -> Vec<SyntaxError> {
        let mut collector = ErrorCollector::new();
        let tree = parse_filter(input, &mut collector);
        assert!(tree.is_none(), "expected no tree for {input:?}");
        collector.errors().to_vec()
    }

    #[test]
    fn test_valid_filter_yields_tree() {
        let mut collector = ErrorCollector::new();
        let tree = parse_filter("prop1 = 10 AND prop2 < 5", &mut collector);

        assert!(!collector.has_errors());
        let tree = tree.expect("tree");
        assert_eq!(tree.as_rule(), Rule::cql_filter);
    }

    #[test]
    fn test_reports_independent_errors() {
        let errors = parse_errors("prop1 ==== 1 AND prop2 !!= 5");

        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].column, 8);
        assert!(errors[1].column > 16);
        assert!(errors[0].to_string().starts_with("syntax error at column 8: unexpected '==='"));
    }

    #[test]
    fn test_single_error_when_rest_is_valid() {
        let errors = parse_errors("prop1 === 1 AND prop2 = 5");
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_error_inside_group_reports_once() {
        let errors = parse_errors("(a === 1 AND b = 2)");
        assert_eq!(errors.len(), 1, "{errors:?}");
        assert_eq!(errors[0].column, 5);

        let errors = parse_errors("a = 1 AND (b === 2 OR c = 3)");
        assert_eq!(errors.len(), 1, "{errors:?}");
    }

    #[test]
    fn test_independent_errors_inside_group() {
        let errors = parse_errors("(a === 1 AND b !! 2)");
        assert_eq!(errors.len(), 2, "{errors:?}");
        assert!(errors[1].column > 13);
        assert!(errors[1].column <= 17);
    }

    #[test]
    fn test_unexpected_end_of_input() {
        let errors = parse_errors("prop1 =");
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.starts_with("unexpected end of input"));
    }

    #[test]
    fn test_nesting_guard() {
        let input = format!("{}a = 1{}", "(".repeat(100), ")".repeat(100));
        let errors = parse_errors(&input);

        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].offset, MAX_NESTING_DEPTH);
        assert!(errors[0].message.contains("maximum nesting depth"));
    }

    #[test]
    fn test_moderate_nesting_parses() {
        let input = format!("{}a = 1{}", "(".repeat(10), ")".repeat(10));
        let mut collector = ErrorCollector::new();
        assert!(parse_filter(&input, &mut collector).is_some());
    }

    #[test]
    fn test_error_count_is_bounded() {
        let input = "a ! 1 AND ".repeat(100);
        let errors = parse_errors(&input);
        assert_eq!(errors.len(), MAX_REPORTED_ERRORS);
    }

    #[test]
    fn test_rule_labels() {
        assert_eq!(rule_label(&Rule::comparison_operator), "comparison operator");
        assert_eq!(rule_label(&Rule::is_null_operand), "is null operand");
    }
}
