//! Translation state shared by every dialect listener.

use crate::{
    error::{CqlError, CqlResult},
    queryables::Queryables,
    random::Randomizer,
    stack::{Operand, OperandStack},
};
use std::collections::BTreeMap;
use tracing::warn;

/// Bound parameter values by generated name.
pub type NamedParams = BTreeMap<String, String>;

pub const PARAMETER_PREFIX: &str = "cql_";

const ALPHABET: &[u8; 26] = b"abcdefghijklmnopqrstuvwxyz";
const NAME_LENGTH: usize = 4;

/// Random draws attempted before falling back to probing for a free name.
const MAX_DRAWS: usize = 8;

pub struct TranslationState<R> {
    stack: OperandStack,
    params: NamedParams,
    queryables: Queryables,
    randomizer: R,
    placeholder_prefix: char,
    error: Option<CqlError>,
}

impl<R: Randomizer> TranslationState<R> {
    pub fn new(randomizer: R, queryables: Queryables, placeholder_prefix: char) -> Self {
        Self {
            stack: OperandStack::new(),
            params: NamedParams::new(),
            queryables,
            randomizer,
            placeholder_prefix,
            error: None,
        }
    }

    pub fn push(&mut self, operand: Operand) {
        self.stack.push(operand);
    }

    pub fn pop(&mut self) -> Operand {
        self.stack.pop()
    }

    pub fn pop_many(&mut self, n: usize) -> Vec<Operand> {
        self.stack.pop_many(n)
    }

    /// Stores `value` under a fresh parameter name and returns its placeholder.
    pub fn bind_parameter(&mut self, value: impl Into<String>) -> String {
        let Some(name) = self.fresh_name() else {
            self.fail(CqlError::Internal("bound parameter names exhausted".into()));
            return String::new();
        };
        let placeholder = format!("{}{name}", self.placeholder_prefix);
        self.params.insert(name, value.into());
        placeholder
    }

    fn fresh_name(&mut self) -> Option<String> {
        let mut letters = [0usize; NAME_LENGTH];

        for _ in 0..MAX_DRAWS {
            for letter in letters.iter_mut() {
                *letter = self.randomizer.int_n(ALPHABET.len());
            }
            let name = parameter_name(&letters);
            if !self.params.contains_key(&name) {
                return Some(name);
            }
            warn!(name = %name, "bound parameter name collision, drawing another");
        }

        // Walk the name space from the last draw until a free name turns up.
        let space = ALPHABET.len().pow(NAME_LENGTH as u32);
        (0..space).find_map(|_| {
            increment(&mut letters);
            let name = parameter_name(&letters);
            (!self.params.contains_key(&name)).then_some(name)
        })
    }

    /// Records an error unless `property` is queryable. Returns whether the
    /// property may be used.
    pub fn check_queryable(&mut self, property: &str) -> bool {
        if self.queryables.allows(property) {
            return true;
        }
        self.fail(CqlError::NotQueryable {
            property: property.to_string(),
        });
        false
    }

    /// Records a translation error. Only the first one is kept and no further
    /// SQL is produced once one is recorded.
    pub fn fail(&mut self, error: CqlError) {
        if self.error.is_none() {
            self.error = Some(error);
        }
    }

    pub fn is_halted(&self) -> bool {
        self.error.is_some()
    }

    pub fn params(&self) -> &NamedParams {
        &self.params
    }

    /// Consumes the state, returning the single remaining fragment with its
    /// parameters or the recorded error.
    pub fn finish(mut self) -> CqlResult<(String, NamedParams)> {
        if let Some(error) = self.error {
            return Err(error);
        }
        if self.stack.len() != 1 {
            return Err(CqlError::Internal(format!(
                "expected one SQL fragment after translation, found {}",
                self.stack.len()
            )));
        }
        match self.stack.pop() {
            Operand::Expr { sql, .. } => {
                // Comparisons folded away at compile time leave their
                // parameters unreferenced.
                let prefix = self.placeholder_prefix;
                self.params
                    .retain(|name, _| sql.contains(&format!("{prefix}{name}")));
                Ok((sql, self.params))
            }
            other => Err(CqlError::Internal(format!(
                "translation ended with a non-boolean operand: {other:?}"
            ))),
        }
    }
}

fn parameter_name(letters: &[usize; NAME_LENGTH]) -> String {
    let mut name = String::with_capacity(PARAMETER_PREFIX.len() + NAME_LENGTH);
    name.push_str(PARAMETER_PREFIX);
    name.extend(
        letters
            .iter()
            .map(|&i| char::from(ALPHABET[i % ALPHABET.len()])),
    );
    name
}

/// Advances the letters like an odometer, wrapping at `zzzz`.
fn increment(letters: &mut [usize; NAME_LENGTH]) {
    for letter in letters.iter_mut().rev() {
        *letter = (*letter + 1) % ALPHABET.len();
        if *letter != 0 {
            return;
        }
    }
}
