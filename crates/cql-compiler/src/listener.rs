//! Syntax-directed translation of a CQL parse tree into SQL.
//!
//! The listener runs on every rule exit. Leaves push an operand, and inner
//! rules pop the operands their children pushed and push one combined
//! fragment, so a successful walk leaves exactly one fragment behind.

use crate::{
    dialect::{
        ArrayOp, CharacterFunction, Dialect, GeoPackage, Postgres, SpatialOp, function_arity,
        quote_identifier, unquote_identifier,
    },
    error::{CqlError, CqlResult},
    policy::{LiteralBinding, LiteralPolicy},
    queryables::Queryables,
    random::{Randomizer, ThreadRandomizer},
    stack::Operand,
    state::{NamedParams, TranslationState},
    temporal::{Condition, Period, TemporalOp, relation},
};
use cql_syntax::{CqlListener, Pair, Rule};

pub struct SqlListener<D, R = ThreadRandomizer> {
    dialect: D,
    state: TranslationState<R>,
    policy: LiteralPolicy,
    /// Depth of enclosing `GEOMETRYCOLLECTION`s; members are bound as part
    /// of their collection rather than one by one.
    collection_depth: usize,
}

pub type GeoPackageListener<R = ThreadRandomizer> = SqlListener<GeoPackage, R>;
pub type PostgresListener<R = ThreadRandomizer> = SqlListener<Postgres, R>;

impl<D: Dialect, R: Randomizer> SqlListener<D, R> {
    pub fn new(dialect: D, randomizer: R, queryables: Queryables) -> Self {
        let prefix = dialect.placeholder_prefix();
        Self {
            dialect,
            state: TranslationState::new(randomizer, queryables, prefix),
            policy: LiteralPolicy::default(),
            collection_depth: 0,
        }
    }

    pub fn with_literal_policy(mut self, policy: LiteralPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn dialect(&self) -> &D {
        &self.dialect
    }

    /// Returns the translated fragment and its bound parameters.
    pub fn finish(self) -> CqlResult<(String, NamedParams)> {
        self.state.finish()
    }

    fn push_bare(&mut self, sql: impl Into<String>) {
        self.state.push(Operand::bare(sql));
    }

    fn push_enclosed(&mut self, sql: impl Into<String>) {
        self.state.push(Operand::enclosed(sql));
    }

    fn pop_value(&mut self) -> String {
        let operand = self.state.pop();
        self.render(operand)
    }

    fn pop_values(&mut self, n: usize) -> Vec<String> {
        self.state
            .pop_many(n)
            .into_iter()
            .map(|operand| self.render(operand))
            .collect()
    }

    fn render(&self, operand: Operand) -> String {
        match operand {
            Operand::Expr { sql, .. } | Operand::Column(sql) => sql,
            Operand::Scalar { sql, bound: true } => self.dialect.typed_parameter(&sql),
            Operand::Scalar { sql, bound: false } => sql,
            Operand::Open => "NULL".into(),
            Operand::Interval { start, end } => {
                self.dialect.interval(start.as_deref(), end.as_deref())
            }
        }
    }

    /// Renders an operand compared against `column`. A bound scalar next to a
    /// column takes the column's type and is left as a bare placeholder.
    fn render_against(&self, operand: Operand, column: bool) -> String {
        match operand {
            Operand::Scalar { sql, .. } if column => sql,
            other => self.render(other),
        }
    }

    fn enclose(&self, operand: Operand) -> String {
        if operand.is_enclosed() {
            return self.render(operand);
        }
        format!("({})", self.render(operand))
    }

    fn unsupported(&mut self, construct: impl Into<String>) {
        let dialect = self.dialect.name();
        self.state.fail(CqlError::Unsupported {
            construct: construct.into(),
            dialect,
        });
    }

    fn exit_filter(&mut self) {
        let operand = self.state.pop();
        let sql = self.enclose(operand);
        self.push_enclosed(sql);
    }

    /// `OR` over boolean terms or `AND` over boolean factors.
    fn exit_chain(&mut self, node: &Pair<'_, Rule>, member: Rule, connective: &str) {
        let n = count_children(node, member);
        if n < 2 {
            return;
        }
        let members = self.pop_values(n);
        self.push_enclosed(format!("({})", members.join(&format!(" {connective} "))));
    }

    fn exit_factor(&mut self, node: &Pair<'_, Rule>) {
        if !has_child(node, Rule::kw_not) {
            return;
        }
        let operand = self.state.pop();
        let sql = self.enclose(operand);
        self.push_bare(format!("NOT {sql}"));
    }

    fn exit_primary(&mut self, node: &Pair<'_, Rule>) {
        if !has_child(node, Rule::boolean_expression) {
            return;
        }
        let operand = self.state.pop();
        if operand.is_enclosed() {
            self.state.push(operand);
        } else {
            let sql = self.enclose(operand);
            self.push_enclosed(sql);
        }
    }

    fn exit_binary_comparison(&mut self, node: &Pair<'_, Rule>) {
        let op = child_text(node, Rule::comparison_operator).unwrap_or("=");
        let [lhs, rhs] = self.pop_against_first::<2>();
        self.push_bare(format!("{lhs} {op} {rhs}"));
    }

    fn exit_like(&mut self, node: &Pair<'_, Rule>) {
        let not = not_keyword(node);
        let [lhs, rhs] = self.pop_array();
        self.push_enclosed(format!("({lhs} {not}LIKE {rhs})"));
    }

    fn exit_between(&mut self, node: &Pair<'_, Rule>) {
        let not = not_keyword(node);
        let [value, low, high] = self.pop_against_first::<3>();
        self.push_enclosed(format!("({value} {not}BETWEEN {low} AND {high})"));
    }

    fn exit_in_list(&mut self, node: &Pair<'_, Rule>) {
        let not = not_keyword(node);
        let n = count_children(node, Rule::scalar_expression);
        let operands = self.state.pop_many(n);
        let mut values = self.render_against_first(operands).into_iter();
        let value = values.next().unwrap_or_default();
        let list = values.collect::<Vec<_>>().join(", ");
        self.push_enclosed(format!("({value} {not}IN ({list}))"));
    }

    fn exit_is_null(&mut self, node: &Pair<'_, Rule>) {
        let not = not_keyword(node);
        let operand = self.pop_value();
        self.push_enclosed(format!("({operand} IS {not}NULL)"));
    }

    fn exit_character_clause(&mut self, node: &Pair<'_, Rule>) {
        let function = node.clone().into_inner().find_map(|child| match child.as_rule() {
            Rule::kw_casei => Some(CharacterFunction::Casei),
            Rule::kw_accenti => Some(CharacterFunction::Accenti),
            Rule::kw_lower => Some(CharacterFunction::Lower),
            Rule::kw_upper => Some(CharacterFunction::Upper),
            _ => None,
        });
        let Some(function) = function else {
            return;
        };

        let operand = self.pop_value();
        match self.dialect.character_function(function) {
            Some(name) => self.push_bare(format!("{name}({operand})")),
            None => self.unsupported(function.keyword()),
        }
    }

    fn exit_property_name(&mut self, node: &Pair<'_, Rule>) {
        let property = unquote_identifier(node.as_str());
        if self.state.check_queryable(&property) {
            self.state.push(Operand::Column(quote_identifier(&property)));
        }
    }

    fn exit_numeric(&mut self, node: &Pair<'_, Rule>) {
        let operand = match self.policy.numeric {
            LiteralBinding::Bind => Operand::Scalar {
                sql: self.state.bind_parameter(node.as_str()),
                bound: true,
            },
            LiteralBinding::Inline => Operand::Scalar {
                sql: node.as_str().to_string(),
                bound: false,
            },
        };
        self.state.push(operand);
    }

    fn exit_boolean(&mut self, node: &Pair<'_, Rule>) {
        let value = node.as_str().eq_ignore_ascii_case("true");
        let operand = match self.policy.boolean {
            LiteralBinding::Bind => {
                let bound = self.dialect.boolean_parameter(value);
                Operand::Scalar {
                    sql: self.state.bind_parameter(bound),
                    bound: true,
                }
            }
            LiteralBinding::Inline => Operand::Scalar {
                sql: String::from(if value { "TRUE" } else { "FALSE" }),
                bound: false,
            },
        };
        self.state.push(operand);
    }

    fn exit_character_literal(&mut self, node: &Pair<'_, Rule>) {
        let placeholder = self.state.bind_parameter(node.as_str());
        self.push_bare(placeholder);
    }

    fn exit_function(&mut self, node: &Pair<'_, Rule>) {
        let name = child_text(node, Rule::identifier)
            .map(unquote_identifier)
            .unwrap_or_default();
        let arity = node
            .clone()
            .into_inner()
            .find(|child| child.as_rule() == Rule::argument_list)
            .map_or(0, |list| list.into_inner().count());
        let args = self.pop_values(arity);

        let Some(function) = self.dialect.function_name(&name) else {
            let dialect = self.dialect.name();
            self.state
                .fail(CqlError::UnsupportedFunction { name, dialect });
            return;
        };
        if let Some((min, max)) = function_arity(&name) {
            if !(min..=max).contains(&arity) {
                self.state.fail(CqlError::FunctionArity {
                    name,
                    expected: describe_arity(min, max),
                    found: arity,
                });
                return;
            }
        }
        self.push_bare(format!("{function}({})", args.join(", ")));
    }

    /// Binds the well-known text of a geometry.
    fn bind_geometry(&mut self, node: &Pair<'_, Rule>) {
        let placeholder = self.state.bind_parameter(node.as_str());
        let sql = self.dialect.geometry_from_text(&placeholder);
        self.push_bare(sql);
    }

    fn exit_bbox(&mut self) {
        let [west, south, east, north] = self.pop_array();
        let sql = self.dialect.envelope(&west, &south, &east, &north);
        self.push_bare(sql);
    }

    fn exit_spatial_predicate(&mut self, node: &Pair<'_, Rule>) {
        let keyword = child_text(node, Rule::spatial_function).unwrap_or_default();
        let Some(op) = SpatialOp::from_keyword(keyword) else {
            self.unsupported(keyword.to_string());
            return;
        };
        let [lhs, rhs] = self.pop_array();
        let operand = self.dialect.spatial_predicate(op, &lhs, &rhs);
        self.state.push(operand);
    }

    /// Binds a date or timestamp string without its quotes.
    fn exit_temporal_string(&mut self, node: &Pair<'_, Rule>) {
        let placeholder = self.state.bind_parameter(node.as_str().trim_matches('\''));
        self.push_bare(placeholder);
    }

    /// Converts a bound date/timestamp string into the dialect's typed value.
    /// Shared by `DATE(...)`/`TIMESTAMP(...)` and bare interval bounds.
    fn exit_instant(&mut self, node: &Pair<'_, Rule>) {
        let date = has_child(node, Rule::kw_date) || has_child(node, Rule::date_string);
        let timestamp =
            has_child(node, Rule::kw_timestamp) || has_child(node, Rule::timestamp_string);
        if !date && !timestamp {
            return;
        }

        let placeholder = self.pop_value();
        let sql = if date {
            self.dialect.date(&placeholder)
        } else {
            self.dialect.timestamp(&placeholder)
        };
        self.push_bare(sql);
    }

    fn exit_interval(&mut self) {
        let bounds = self.state.pop_many(2).into_iter().map(|operand| match operand {
            Operand::Open => None,
            other => Some(self.render(other)),
        });
        let [start, end] = to_array(bounds.collect());
        self.state.push(Operand::Interval { start, end });
    }

    fn exit_temporal_predicate(&mut self, node: &Pair<'_, Rule>) {
        let keyword = child_text(node, Rule::temporal_function).unwrap_or_default();
        let Some(op) = TemporalOp::from_keyword(keyword) else {
            self.unsupported(keyword.to_string());
            return;
        };

        let periods = self.state.pop_many(2).into_iter().map(|operand| match operand {
            Operand::Interval { start, end } => Period::interval(start, end),
            Operand::Open => Period::default(),
            // Padding for a missing operand.
            Operand::Expr { sql, .. } if sql.is_empty() => Period::default(),
            other => Period::instant(self.render(other)),
        });
        let [lhs, rhs] = to_array(periods.collect());
        let condition = relation(op, &lhs, &rhs);
        let sql = condition.to_sql();
        match condition {
            Condition::Sql(_) => self.push_enclosed(sql),
            Condition::Always | Condition::Never => self.push_bare(sql),
        }
    }

    fn exit_array_clause(&mut self, node: &Pair<'_, Rule>) {
        let n = count_children(node, Rule::array_element);
        let elements = self.pop_values(n);
        let sql = self.dialect.array(&elements);
        self.push_bare(sql);
    }

    fn exit_array_predicate(&mut self, node: &Pair<'_, Rule>) {
        let keyword = child_text(node, Rule::array_function).unwrap_or_default();
        let Some(op) = ArrayOp::from_keyword(keyword) else {
            self.unsupported(keyword.to_string());
            return;
        };
        let [lhs, rhs] = self.pop_array();
        let sql = self.dialect.array_predicate(op, &lhs, &rhs);
        self.push_enclosed(sql);
    }

    fn pop_array<const N: usize>(&mut self) -> [String; N] {
        to_array(self.pop_values(N))
    }

    /// Pops `N` operands where the first is compared against the rest.
    fn pop_against_first<const N: usize>(&mut self) -> [String; N] {
        let operands = self.state.pop_many(N);
        to_array(self.render_against_first(operands))
    }

    /// Renders a comparison's operands. Scalars stay bare placeholders when
    /// the other side of the comparison is a column.
    fn render_against_first(&self, operands: Vec<Operand>) -> Vec<String> {
        let first_is_column = operands.first().is_some_and(Operand::is_column);
        let rest_has_column = operands.iter().skip(1).any(Operand::is_column);
        operands
            .into_iter()
            .enumerate()
            .map(|(i, operand)| {
                let column = if i == 0 { rest_has_column } else { first_is_column };
                self.render_against(operand, column)
            })
            .collect()
    }
}

impl<D: Dialect, R: Randomizer> CqlListener for SqlListener<D, R> {
    fn enter_rule(&mut self, node: &Pair<'_, Rule>) {
        if node.as_rule() == Rule::geometry_collection {
            self.collection_depth += 1;
        }
    }

    fn exit_rule(&mut self, node: &Pair<'_, Rule>) {
        if node.as_rule() == Rule::geometry_collection {
            self.collection_depth = self.collection_depth.saturating_sub(1);
        }
        if self.state.is_halted() {
            return;
        }

        match node.as_rule() {
            Rule::cql_filter => self.exit_filter(),
            Rule::boolean_expression => self.exit_chain(node, Rule::boolean_term, "OR"),
            Rule::boolean_term => self.exit_chain(node, Rule::boolean_factor, "AND"),
            Rule::boolean_factor => self.exit_factor(node),
            Rule::boolean_primary => self.exit_primary(node),

            Rule::binary_comparison_predicate => self.exit_binary_comparison(node),
            Rule::is_like_predicate => self.exit_like(node),
            Rule::is_between_predicate => self.exit_between(node),
            Rule::is_in_list_predicate => self.exit_in_list(node),
            Rule::is_null_predicate => self.exit_is_null(node),
            Rule::character_clause | Rule::pattern_expression => {
                self.exit_character_clause(node)
            }

            Rule::property_name => self.exit_property_name(node),
            Rule::character_literal => self.exit_character_literal(node),
            Rule::numeric_literal
            | Rule::west_bound_lon
            | Rule::south_bound_lat
            | Rule::east_bound_lon
            | Rule::north_bound_lat => self.exit_numeric(node),
            Rule::boolean_literal => self.exit_boolean(node),
            Rule::function => self.exit_function(node),

            Rule::geometry_literal if self.collection_depth == 0 => self.bind_geometry(node),
            Rule::geometry_collection if self.collection_depth == 0 => self.bind_geometry(node),
            Rule::bbox => self.exit_bbox(),
            Rule::spatial_predicate => self.exit_spatial_predicate(node),

            Rule::date_string | Rule::timestamp_string => self.exit_temporal_string(node),
            Rule::instant_instance | Rule::interval_parameter => self.exit_instant(node),
            Rule::now => {
                let sql = self.dialect.now();
                self.push_bare(sql);
            }
            Rule::dot_dot_string => self.state.push(Operand::Open),
            Rule::interval => self.exit_interval(),
            Rule::temporal_predicate => self.exit_temporal_predicate(node),

            Rule::array_clause => self.exit_array_clause(node),
            Rule::array_predicate => self.exit_array_predicate(node),

            _ => {}
        }
    }
}

fn describe_arity(min: usize, max: usize) -> String {
    match (min, max) {
        (min, max) if min == max => min.to_string(),
        (min, usize::MAX) => format!("at least {min}"),
        (min, max) => format!("{min} to {max}"),
    }
}

fn has_child(node: &Pair<'_, Rule>, rule: Rule) -> bool {
    node.clone().into_inner().any(|child| child.as_rule() == rule)
}

fn count_children(node: &Pair<'_, Rule>, rule: Rule) -> usize {
    node.clone()
        .into_inner()
        .filter(|child| child.as_rule() == rule)
        .count()
}

fn child_text<'i>(node: &Pair<'i, Rule>, rule: Rule) -> Option<&'i str> {
    node.clone()
        .into_inner()
        .find(|child| child.as_rule() == rule)
        .map(|child| child.as_str())
}

fn not_keyword(node: &Pair<'_, Rule>) -> &'static str {
    if has_child(node, Rule::kw_not) { "NOT " } else { "" }
}

/// Converts popped values into a fixed-size array, padding with defaults.
fn to_array<T: Default, const N: usize>(values: Vec<T>) -> [T; N] {
    let mut values = values.into_iter();
    std::array::from_fn(|_| values.next().unwrap_or_default())
}
