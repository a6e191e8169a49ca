//! Tokenisation of infix propositional formulas using chumsky.
//!
//! Accepted tokens: `!`, `&&`, `||`, `->`, `(`, `)` and variables `[A-Za-z][A-Za-z0-9]*`
//! (maximal munch). Whitespace separates tokens and is otherwise ignored. Lexing stops at the
//! first character that starts no token; the whole input is rejected with
//! [`Error::LexError`].
use std::fmt;

use chumsky::prelude::*;

use crate::error::{Error, Result};
use crate::formula::Operator;

pub type Span = SimpleSpan;
pub type Spanned<T> = (T, Span);

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Token {
    Op(Operator),
    LParen,
    RParen,
    Var(String),
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Op(op) => write!(f, "{op}"),
            Token::LParen => write!(f, "("),
            Token::RParen => write!(f, ")"),
            Token::Var(name) => write!(f, "{name}"),
        }
    }
}

fn lexer<'src>() -> impl Parser<'src, &'src str, Vec<Spanned<Token>>, extra::Err<Rich<'src, char>>>
{
    // Two-character connectives must be complete; a lone `&`, `|` or `-` matches nothing.
    let connective = choice((
        just("&&").to(Token::Op(Operator::And)),
        just("||").to(Token::Op(Operator::Or)),
        just("->").to(Token::Op(Operator::Implies)),
        just('!').to(Token::Op(Operator::Not)),
    ));

    let paren = choice((just('(').to(Token::LParen), just(')').to(Token::RParen)));

    let variable = any()
        .filter(|c: &char| c.is_ascii_alphabetic())
        .then(any().filter(|c: &char| c.is_ascii_alphanumeric()).repeated())
        .to_slice()
        .map(|s: &str| Token::Var(s.to_string()));

    choice((connective, paren, variable))
        .map_with(|tok, e| (tok, e.span()))
        .padded()
        .repeated()
        .collect::<Vec<_>>()
        // Whitespace with no token after it is left to the outer padding.
        .padded()
        .then_ignore(end())
}

/// Split `src` into spanned tokens.
pub fn tokenize(src: &str) -> Result<Vec<Spanned<Token>>> {
    let (tokens, errs) = lexer().parse(src).into_output_errors();

    if let Some(err) = errs.into_iter().next() {
        return Err(Error::LexError {
            found: err.found().copied(),
            offset: err.span().start,
            context: err.to_string(),
        });
    }

    tokens.ok_or_else(|| Error::LexError {
        found: None,
        offset: src.len(),
        context: "no tokens produced".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(src: &str) -> Vec<Token> {
        tokenize(src)
            .unwrap()
            .into_iter()
            .map(|(tok, _)| tok)
            .collect()
    }

    fn var(name: &str) -> Token {
        Token::Var(name.to_string())
    }

    #[test]
    fn tokenizes_all_connectives() {
        assert_eq!(
            kinds("!(a && b) || c -> d"),
            vec![
                Token::Op(Operator::Not),
                Token::LParen,
                var("a"),
                Token::Op(Operator::And),
                var("b"),
                Token::RParen,
                Token::Op(Operator::Or),
                var("c"),
                Token::Op(Operator::Implies),
                var("d"),
            ]
        );
    }

    #[test]
    fn variables_are_maximal() {
        assert_eq!(kinds("abc12&&x"), vec![var("abc12"), Token::Op(Operator::And), var("x")]);
        assert_eq!(kinds("  p1\tq2 \n"), vec![var("p1"), var("q2")]);
    }

    #[test]
    fn whitespace_only_is_empty() {
        for src in ["", "   ", "\t", "\n", " \t\r\n "] {
            assert!(kinds(src).is_empty(), "{src:?}");
        }
    }

    #[test]
    fn trailing_whitespace_keeps_spans() {
        let tokens = tokenize(" p \n").unwrap();
        assert_eq!(tokens.len(), 1);
        assert_eq!((tokens[0].1.start, tokens[0].1.end), (1, 2));
    }

    #[test]
    fn spans_point_into_source() {
        let tokens = tokenize("p -> q").unwrap();
        let spans: Vec<(usize, usize)> = tokens.iter().map(|(_, s)| (s.start, s.end)).collect();
        assert_eq!(spans, vec![(0, 1), (2, 4), (5, 6)]);
    }

    #[test]
    fn incomplete_connectives_fail() {
        for src in ["p & q", "p | q", "p - q", "p -", "p &"] {
            let err = tokenize(src).unwrap_err();
            assert!(err.is_lex_error(), "{src}: {err}");
        }
    }

    #[test]
    fn unknown_character_is_reported() {
        match tokenize("p $ q") {
            Err(Error::LexError { found, offset, .. }) => {
                assert_eq!(found, Some('$'));
                assert_eq!(offset, 2);
            }
            other => panic!("expected lex error, got {other:?}"),
        }
    }

    #[test]
    fn digits_cannot_start_a_variable() {
        assert!(tokenize("1p").unwrap_err().is_lex_error());
    }
}
