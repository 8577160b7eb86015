use crate::error::CliError;
use cql_syntax::SyntaxError;
use serde::Serialize;

pub fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{json}");
    Ok(())
}

/// One line per syntax error, or `ok` when there are none.
pub fn check_report(errors: &[SyntaxError]) -> String {
    if errors.is_empty() {
        return "ok".to_string();
    }
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}
