//! Operator-precedence (shunting-yard) parser for infix propositional formulas.
//!
//! Role
//! - Turn the token stream produced by [`crate::lexer`] into a single [`Formula`].
//! - Validate balanced parentheses and operand counts while doing so.
//!
//! Two working stacks are kept: pending operators (with open parentheses) and finished operands.
//! Precedence from tightest to loosest is `!`, `&&`, `||`, `->`; every binary connective is
//! left-associative, so `p -> q -> r` parses as `((p->q)->r)`. Negation is prefix and simply
//! waits on the stack for its operand, so `!!p` is accepted.
//!
//! Example
//! ```
//! use gentzen::parser::parse;
//!
//! let f = parse("!p || q && r -> s").unwrap();
//! assert_eq!(f.canonical(), "((!p||(q&&r))->s)");
//! ```
use std::str::FromStr;

use log::trace;
use smallvec::SmallVec;

use crate::config::ProverConfig;
use crate::error::{Error, Result};
use crate::formula::{Formula, Operator};
use crate::lexer::{Spanned, Token, tokenize};

/// Entry on the operator stack, tagged with the byte offset of its token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pending {
    Paren(usize),
    Op(Operator, usize),
}

/// Finished operand along with its tree depth.
struct Operand {
    formula: Formula,
    depth: usize,
}

/// What the next token must be for the expression to stay well formed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Expect {
    /// A variable, `!` or `(`.
    Operand,
    /// A binary connective, `)` or end of input.
    Operator,
}

struct ShuntingYard<'c> {
    config: &'c ProverConfig,
    operators: SmallVec<Pending, 16>,
    operands: SmallVec<Operand, 16>,
    expect: Expect,
}

impl<'c> ShuntingYard<'c> {
    fn new(config: &'c ProverConfig) -> Self {
        Self {
            config,
            operators: SmallVec::new(),
            operands: SmallVec::new(),
            expect: Expect::Operand,
        }
    }

    fn malformed(offset: usize, reason: &'static str) -> Error {
        Error::MalformedExpression { offset, reason }
    }

    fn push_operand(&mut self, formula: Formula, depth: usize) -> Result<()> {
        if depth > self.config.max_nesting_depth {
            return Err(Error::NestingTooDeep {
                depth,
                limit: self.config.max_nesting_depth,
            });
        }
        self.operands.push(Operand { formula, depth });
        Ok(())
    }

    /// Pop the top operator and combine it with its operands.
    fn reduce(&mut self) -> Result<()> {
        let (op, offset) = match self.operators.pop() {
            Some(Pending::Op(op, offset)) => (op, offset),
            Some(Pending::Paren(offset)) => return Err(Error::UnbalancedParens { offset }),
            None => return Err(Self::malformed(0, "no operator left to reduce")),
        };

        // The first operand popped is the right-hand side.
        let mut children: SmallVec<Formula, 2> = SmallVec::new();
        let mut depth = 0;
        for _ in 0..op.arity() {
            let operand = self
                .operands
                .pop()
                .ok_or_else(|| Self::malformed(offset, "operator is missing an operand"))?;
            depth = depth.max(operand.depth);
            children.insert(0, operand.formula);
        }

        let formula =
            Formula::compound(op, children).map_err(|_| Self::malformed(offset, "wrong arity"))?;
        trace!("Reduced `{op}` into {formula}");
        self.push_operand(formula, depth + 1)
    }

    /// Reduce while the top of the operator stack binds at least as tightly as `op`.
    fn reduce_while_tighter(&mut self, op: Operator) -> Result<()> {
        while let Some(Pending::Op(top, _)) = self.operators.last() {
            if top.precedence() < op.precedence() {
                break;
            }
            self.reduce()?;
        }
        Ok(())
    }

    fn feed(&mut self, (token, span): Spanned<Token>) -> Result<()> {
        let offset = span.start;
        trace!("Shifting `{token}` at offset {offset}");
        match token {
            Token::Var(name) => {
                if self.expect != Expect::Operand {
                    return Err(Self::malformed(offset, "variable follows an operand"));
                }
                self.push_operand(Formula::Atomic(name), 1)?;
                self.expect = Expect::Operator;
            }
            Token::LParen => {
                if self.expect != Expect::Operand {
                    return Err(Self::malformed(offset, "'(' follows an operand"));
                }
                self.operators.push(Pending::Paren(offset));
            }
            Token::RParen => {
                if !self.operators.iter().any(|p| matches!(p, Pending::Paren(_))) {
                    return Err(Error::UnbalancedParens { offset });
                }
                if self.expect != Expect::Operator {
                    return Err(Self::malformed(offset, "')' closes an incomplete expression"));
                }
                while let Some(Pending::Op(..)) = self.operators.last() {
                    self.reduce()?;
                }
                // Discard the matching '('.
                self.operators.pop();
            }
            Token::Op(Operator::Not) => {
                if self.expect != Expect::Operand {
                    return Err(Self::malformed(offset, "'!' follows an operand"));
                }
                self.operators.push(Pending::Op(Operator::Not, offset));
            }
            Token::Op(op) => {
                if self.expect != Expect::Operator {
                    return Err(Self::malformed(offset, "binary operator is missing its left operand"));
                }
                self.reduce_while_tighter(op)?;
                self.operators.push(Pending::Op(op, offset));
                self.expect = Expect::Operand;
            }
        }
        Ok(())
    }

    fn finish(mut self, end: usize) -> Result<Formula> {
        if self.expect != Expect::Operator {
            // Prefer reporting an unclosed '(' over the missing operand it encloses.
            if let Some(Pending::Paren(offset)) = self.operators.last() {
                return Err(Error::UnbalancedParens { offset: *offset });
            }
            return Err(Self::malformed(end, "expression ends where an operand is expected"));
        }

        while !self.operators.is_empty() {
            self.reduce()?;
        }

        let root = self
            .operands
            .pop()
            .ok_or_else(|| Self::malformed(end, "empty expression"))?;
        if !self.operands.is_empty() {
            return Err(Self::malformed(end, "operands left over after parsing"));
        }
        Ok(root.formula)
    }
}

/// Parse `src` with the default [`ProverConfig`].
pub fn parse(src: &str) -> Result<Formula> {
    parse_with(src, &ProverConfig::default())
}

/// Parse `src`, enforcing the limits of `config`.
pub fn parse_with(src: &str, config: &ProverConfig) -> Result<Formula> {
    if src.len() > config.max_input_len {
        return Err(Error::InputTooLong {
            length: src.len(),
            limit: config.max_input_len,
        });
    }

    let mut yard = ShuntingYard::new(config);
    for token in tokenize(src)? {
        yard.feed(token)?;
    }
    yard.finish(src.len())
}

impl FromStr for Formula {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canon(src: &str) -> String {
        parse(src).unwrap().canonical()
    }

    #[test]
    fn precedence() {
        assert_eq!(canon("p && q || r"), "((p&&q)||r)");
        assert_eq!(canon("p || q && r"), "(p||(q&&r))");
        assert_eq!(canon("p || q -> r"), "((p||q)->r)");
        assert_eq!(canon("p -> q || r"), "(p->(q||r))");
        assert_eq!(canon("!p && q"), "(!p&&q)");
        assert_eq!(canon("!(p && q)"), "!(p&&q)");
    }

    #[test]
    fn left_associativity() {
        assert_eq!(canon("p && q && r"), "((p&&q)&&r)");
        assert_eq!(canon("p || q || r"), "((p||q)||r)");
        assert_eq!(canon("p -> q -> r"), "((p->q)->r)");
        assert_eq!(canon("p -> (q -> r)"), "(p->(q->r))");
    }

    #[test]
    fn stacked_negation() {
        assert_eq!(canon("!!p"), "!!p");
        assert_eq!(canon("!(!p)"), "!!p");
        assert_eq!(canon("p && !!!q"), "(p&&!!!q)");
    }

    #[test]
    fn redundant_parentheses() {
        assert_eq!(canon("((p))"), "p");
        assert_eq!(canon("(p) && ((q))"), "(p&&q)");
    }

    #[test]
    fn unbalanced_parentheses() {
        for src in ["(p -> q", "p)", ")", "((p)", "p && (q", "("] {
            let err = parse(src).unwrap_err();
            assert!(err.is_unbalanced_parens(), "{src}: {err}");
        }
    }

    #[test]
    fn malformed_expressions() {
        for src in ["", "   ", "\t\n", "p q", "p &&", "&& p", "p !", "p (q)", "()", "(p &&)", "!", "p -> -> q"] {
            let err = parse(src).unwrap_err();
            assert!(err.is_malformed_expression(), "{src}: {err}");
        }
    }

    #[test]
    fn errors_carry_offsets() {
        assert_eq!(
            parse("p q").unwrap_err(),
            Error::MalformedExpression {
                offset: 2,
                reason: "variable follows an operand"
            }
        );
        assert_eq!(parse("p)").unwrap_err(), Error::UnbalancedParens { offset: 1 });
        assert_eq!(parse("(p").unwrap_err(), Error::UnbalancedParens { offset: 0 });
    }

    #[test]
    fn lex_errors_propagate() {
        assert!(parse("p & q").unwrap_err().is_lex_error());
    }

    #[test]
    fn input_length_limit() {
        let config = ProverConfig {
            max_input_len: 4,
            ..ProverConfig::default()
        };
        assert!(parse_with("p&&q", &config).is_ok());
        assert_eq!(
            parse_with("p && q", &config).unwrap_err(),
            Error::InputTooLong { length: 6, limit: 4 }
        );
    }

    #[test]
    fn nesting_limit() {
        let config = ProverConfig {
            max_nesting_depth: 3,
            ..ProverConfig::default()
        };
        assert!(parse_with("!!p", &config).is_ok());
        assert_eq!(
            parse_with("!!!p", &config).unwrap_err(),
            Error::NestingTooDeep { depth: 4, limit: 3 }
        );
        assert!(parse_with("(p && q) || r", &config).is_ok());
        assert!(parse_with("((p && q) || r) -> s", &config).unwrap_err().is_nesting_too_deep());
    }

    #[test]
    fn from_str() {
        let f: Formula = "p -> p".parse().unwrap();
        assert_eq!(f, Formula::atom("p").implies(Formula::atom("p")));
    }
}
