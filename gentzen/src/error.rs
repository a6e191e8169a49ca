use strum::EnumIs;
use thiserror::Error;

/// Failures surfaced while turning source text into a [`Formula`](crate::formula::Formula).
///
/// Every variant aborts the current parse: there is no recovery and no partial result.
/// Offsets are byte offsets into the source string; failures detected at end of input
/// report the input length.
#[derive(Debug, Clone, PartialEq, Eq, EnumIs, Error)]
pub enum Error {
    /// A character that starts no token, or an incomplete multi-character operator
    /// (`&` not followed by `&`, `|` not followed by `|`, `-` not followed by `>`).
    #[error("unexpected {} at offset {offset}: {context}", describe_found(.found))]
    LexError {
        found: Option<char>,
        offset: usize,
        context: String,
    },

    /// A `)` without a matching `(`, or a `(` that is never closed.
    #[error("unbalanced parentheses at offset {offset}")]
    UnbalancedParens { offset: usize },

    /// Operands and operators do not combine into exactly one formula.
    #[error("malformed expression at offset {offset}: {reason}")]
    MalformedExpression { offset: usize, reason: &'static str },

    /// The source is longer than the configured limit.
    #[error("input is {length} bytes long, the limit is {limit}")]
    InputTooLong { length: usize, limit: usize },

    /// The formula nests deeper than the configured limit.
    #[error("formula nesting depth {depth} exceeds the limit of {limit}")]
    NestingTooDeep { depth: usize, limit: usize },
}

fn describe_found(found: &Option<char>) -> String {
    match found {
        Some(c) => format!("character '{}'", c.escape_debug()),
        None => "end of input".to_string(),
    }
}

pub type Result<T> = std::result::Result<T, Error>;
