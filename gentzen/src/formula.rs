//! Propositional formulas over named variables.
//!
//! Role
//! - [`Formula`] is the immutable tree produced by the parser and consumed by the inference
//!   rules. Rules never mutate a formula; they clone the sub-formulas they keep.
//! - The canonical rendering ([`Formula::canonical`], also used by `Display`) is fully
//!   parenthesized for binary connectives and unparenthesized for negation:
//!   `p`, `!p`, `(p&&q)`, `!(p->!q)`. Two formulas denote the same proposition iff their
//!   canonical renderings are equal.
//!
//! Example
//! ```
//! use gentzen::formula::Formula;
//!
//! let p = Formula::atom("p");
//! let q = Formula::atom("q");
//! let f = (p.clone() & !q).implies(p);
//! assert_eq!(f.canonical(), "((p&&!q)->p)");
//! assert_eq!(f.operator_count(), 3);
//! ```
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use smallvec::SmallVec;
use strum::{Display, EnumIter, IntoStaticStr};

use crate::error::{Error, Result};

/// Truth assignment to propositional variables. Variables absent from the map are false.
pub type Valuation = BTreeMap<String, bool>;

/// The four connectives of the language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, IntoStaticStr)]
pub enum Operator {
    #[strum(serialize = "!")]
    Not,
    #[strum(serialize = "&&")]
    And,
    #[strum(serialize = "||")]
    Or,
    #[strum(serialize = "->")]
    Implies,
}

impl Operator {
    /// Number of operands the connective takes.
    #[inline]
    pub fn arity(self) -> usize {
        match self {
            Operator::Not => 1,
            Operator::And | Operator::Or | Operator::Implies => 2,
        }
    }

    /// Binding strength, highest first: `!` > `&&` > `||` > `->`.
    #[inline]
    pub fn precedence(self) -> u8 {
        match self {
            Operator::Not => 4,
            Operator::And => 3,
            Operator::Or => 2,
            Operator::Implies => 1,
        }
    }

    #[inline]
    pub fn symbol(self) -> &'static str {
        self.into()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Formula {
    /// A propositional variable, `[A-Za-z][A-Za-z0-9]*`.
    Atomic(String),
    Not(Box<Formula>),
    And(Box<Formula>, Box<Formula>),
    Or(Box<Formula>, Box<Formula>),
    Implies(Box<Formula>, Box<Formula>),
}

impl Formula {
    pub fn atom(name: impl Into<String>) -> Self {
        Formula::Atomic(name.into())
    }

    /// Build a compound formula from an operator and its operands.
    ///
    /// Fails with [`Error::MalformedExpression`] if the number of operands does not match the
    /// operator's arity. Operands are given left to right.
    pub fn compound(op: Operator, operands: SmallVec<Formula, 2>) -> Result<Self> {
        let mut operands = operands.into_iter();
        let (first, second, extra) = (operands.next(), operands.next(), operands.next());
        match (op, first, second, extra) {
            (Operator::Not, Some(inner), None, None) => Ok(!inner),
            (Operator::And, Some(lhs), Some(rhs), None) => Ok(lhs.and(rhs)),
            (Operator::Or, Some(lhs), Some(rhs), None) => Ok(lhs.or(rhs)),
            (Operator::Implies, Some(lhs), Some(rhs), None) => Ok(lhs.implies(rhs)),
            (op, ..) => Err(Error::MalformedExpression {
                offset: 0,
                reason: match op.arity() {
                    1 => "unary operator requires exactly one operand",
                    _ => "binary operator requires exactly two operands",
                },
            }),
        }
    }

    #[inline]
    pub fn and(self, rhs: Formula) -> Self {
        Formula::And(Box::new(self), Box::new(rhs))
    }

    #[inline]
    pub fn or(self, rhs: Formula) -> Self {
        Formula::Or(Box::new(self), Box::new(rhs))
    }

    #[inline]
    pub fn implies(self, rhs: Formula) -> Self {
        Formula::Implies(Box::new(self), Box::new(rhs))
    }

    /// Top-level connective, `None` for a variable.
    pub fn operator(&self) -> Option<Operator> {
        match self {
            Formula::Atomic(_) => None,
            Formula::Not(_) => Some(Operator::Not),
            Formula::And(..) => Some(Operator::And),
            Formula::Or(..) => Some(Operator::Or),
            Formula::Implies(..) => Some(Operator::Implies),
        }
    }

    #[inline]
    pub fn is_atomic(&self) -> bool {
        matches!(self, Formula::Atomic(_))
    }

    /// Direct sub-formulas, left to right.
    pub fn operands(&self) -> SmallVec<&Formula, 2> {
        let mut out = SmallVec::new();
        match self {
            Formula::Atomic(_) => {}
            Formula::Not(inner) => out.push(inner.as_ref()),
            Formula::And(lhs, rhs) | Formula::Or(lhs, rhs) | Formula::Implies(lhs, rhs) => {
                out.push(lhs.as_ref());
                out.push(rhs.as_ref());
            }
        }
        out
    }

    /// Number of connective occurrences in the tree.
    pub fn operator_count(&self) -> usize {
        let mut count = 0;
        let mut stack: SmallVec<&Formula, 16> = SmallVec::new();
        stack.push(self);
        while let Some(f) = stack.pop() {
            if !f.is_atomic() {
                count += 1;
            }
            stack.extend(f.operands());
        }
        count
    }

    /// Height of the tree; a variable has depth 1.
    pub fn depth(&self) -> usize {
        let mut max = 0;
        let mut stack: SmallVec<(&Formula, usize), 16> = SmallVec::new();
        stack.push((self, 1));
        while let Some((f, d)) = stack.pop() {
            max = max.max(d);
            stack.extend(f.operands().into_iter().map(|c| (c, d + 1)));
        }
        max
    }

    /// Names of all variables occurring in the formula.
    pub fn atoms(&self) -> BTreeSet<&str> {
        let mut atoms = BTreeSet::new();
        let mut stack: SmallVec<&Formula, 16> = SmallVec::new();
        stack.push(self);
        while let Some(f) = stack.pop() {
            match f {
                Formula::Atomic(name) => {
                    atoms.insert(name.as_str());
                }
                _ => stack.extend(f.operands()),
            }
        }
        atoms
    }

    /// Fully-parenthesized rendering used as the proposition's identity.
    pub fn canonical(&self) -> String {
        self.to_string()
    }

    /// Truth value under `valuation`. Unassigned variables are false.
    pub fn evaluate(&self, valuation: &Valuation) -> bool {
        match self {
            Formula::Atomic(name) => valuation.get(name).copied().unwrap_or(false),
            Formula::Not(inner) => !inner.evaluate(valuation),
            Formula::And(lhs, rhs) => lhs.evaluate(valuation) && rhs.evaluate(valuation),
            Formula::Or(lhs, rhs) => lhs.evaluate(valuation) || rhs.evaluate(valuation),
            Formula::Implies(lhs, rhs) => !lhs.evaluate(valuation) || rhs.evaluate(valuation),
        }
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Formula::Atomic(name) => f.write_str(name),
            Formula::Not(inner) => write!(f, "{}{inner}", Operator::Not),
            Formula::And(lhs, rhs) => write!(f, "({lhs}{}{rhs})", Operator::And),
            Formula::Or(lhs, rhs) => write!(f, "({lhs}{}{rhs})", Operator::Or),
            Formula::Implies(lhs, rhs) => write!(f, "({lhs}{}{rhs})", Operator::Implies),
        }
    }
}

impl std::ops::Not for Formula {
    type Output = Formula;

    fn not(self) -> Self::Output {
        Formula::Not(Box::new(self))
    }
}

impl std::ops::BitAnd for Formula {
    type Output = Formula;

    fn bitand(self, rhs: Self) -> Self::Output {
        self.and(rhs)
    }
}

impl std::ops::BitOr for Formula {
    type Output = Formula;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.or(rhs)
    }
}

#[cfg(test)]
mod tests {
    use smallvec::smallvec;
    use strum::IntoEnumIterator;

    use super::*;

    fn p() -> Formula {
        Formula::atom("p")
    }

    fn q() -> Formula {
        Formula::atom("q")
    }

    #[test]
    fn canonical_rendering() {
        assert_eq!(p().canonical(), "p");
        assert_eq!((!p()).canonical(), "!p");
        assert_eq!((!!p()).canonical(), "!!p");
        assert_eq!((p() & q()).canonical(), "(p&&q)");
        assert_eq!((p() | !q()).canonical(), "(p||!q)");
        assert_eq!(p().implies(q()).canonical(), "(p->q)");
        assert_eq!((!(p() & q())).canonical(), "!(p&&q)");
    }

    #[test]
    fn compound_checks_arity() {
        let not = Formula::compound(Operator::Not, smallvec![p()]).unwrap();
        assert_eq!(not, !p());

        let and = Formula::compound(Operator::And, smallvec![p(), q()]).unwrap();
        assert_eq!(and, p() & q());

        let err = Formula::compound(Operator::Not, smallvec![p(), q()]).unwrap_err();
        assert!(err.is_malformed_expression());
        let err = Formula::compound(Operator::Implies, smallvec![p()]).unwrap_err();
        assert!(err.is_malformed_expression());
    }

    #[test]
    fn top_level_connective() {
        assert_eq!(p().operator(), None);
        for op in Operator::iter() {
            let operands = if op.arity() == 1 {
                smallvec![p()]
            } else {
                smallvec![p(), q()]
            };
            let formula = Formula::compound(op, operands).unwrap();
            assert_eq!(formula.operator(), Some(op));
        }
    }

    #[test]
    fn operator_metadata() {
        let symbols: Vec<&str> = Operator::iter().map(Operator::symbol).collect();
        assert_eq!(symbols, ["!", "&&", "||", "->"]);
        assert!(Operator::Not.precedence() > Operator::And.precedence());
        assert!(Operator::And.precedence() > Operator::Or.precedence());
        assert!(Operator::Or.precedence() > Operator::Implies.precedence());
    }

    #[test]
    fn counting_and_depth() {
        let f = (p() & !q()).implies(p() | q());
        assert_eq!(f.operator_count(), 4);
        assert_eq!(f.depth(), 4);
        assert_eq!(p().depth(), 1);
        assert_eq!(f.atoms().into_iter().collect::<Vec<_>>(), ["p", "q"]);
    }

    #[test]
    fn evaluation() {
        let mut v = Valuation::new();
        v.insert("p".to_string(), true);
        assert!(p().evaluate(&v));
        assert!(!q().evaluate(&v));
        assert!(p().implies(q()).evaluate(&Valuation::new()));
        assert!(!p().implies(q()).evaluate(&v));
        assert!((p() | q()).evaluate(&v));
        assert!(!(p() & q()).evaluate(&v));
    }
}
