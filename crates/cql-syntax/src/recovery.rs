//! Lexical scans used around the PEG parse: the nesting guard that runs
//! before it and the resynchronisation search that runs after a failure.
//!
//! Both skip over single-quoted literals and double-quoted identifiers.

const CONNECTIVES: [&str; 2] = ["and", "or"];

/// Point at which a failed parse resumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Resync {
    /// Byte offset just past the connective.
    pub offset: usize,
    /// Parentheses still open at the connective. The resumed parse has to
    /// accept that many closing parentheses that it never saw opened.
    pub depth: usize,
}

/// Finds the first `AND`/`OR` keyword that starts at or after `from`, or
/// `None` when no connective remains.
pub(crate) fn next_connective(input: &str, from: usize) -> Option<Resync> {
    let mut quote: Option<char> = None;
    let mut prev: Option<char> = None;
    let mut depth = 0usize;

    for (offset, ch) in input.char_indices() {
        match quote {
            Some(open) => {
                if ch == open {
                    quote = None;
                }
            }
            None if ch == '\'' || ch == '"' => quote = Some(ch),
            None if ch == '(' => depth += 1,
            None if ch == ')' => depth = depth.saturating_sub(1),
            None if offset >= from && !prev.is_some_and(is_word_char) => {
                if let Some(len) = connective_at(&input[offset..]) {
                    return Some(Resync {
                        offset: offset + len,
                        depth,
                    });
                }
            }
            None => {}
        }
        prev = Some(ch);
    }

    None
}

/// Returns the offset of the first opening parenthesis that nests deeper
/// than `limit`.
pub(crate) fn nesting_overflow(input: &str, limit: usize) -> Option<usize> {
    let mut quote: Option<char> = None;
    let mut depth = 0usize;

    for (offset, ch) in input.char_indices() {
        match (quote, ch) {
            (Some(open), c) if c == open => quote = None,
            (Some(_), _) => {}
            (None, '\'' | '"') => quote = Some(ch),
            (None, '(') => {
                depth += 1;
                if depth > limit {
                    return Some(offset);
                }
            }
            (None, ')') => depth = depth.saturating_sub(1),
            (None, _) => {}
        }
    }

    None
}

fn connective_at(rest: &str) -> Option<usize> {
    CONNECTIVES.iter().find_map(|keyword| {
        let head = rest.get(..keyword.len())?;
        let at_boundary = rest[keyword.len()..]
            .chars()
            .next()
            .is_none_or(|c| !is_word_char(c));
        (head.eq_ignore_ascii_case(keyword) && at_boundary).then_some(keyword.len())
    })
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '.' | ':')
}
