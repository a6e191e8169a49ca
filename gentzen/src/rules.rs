//! The eight structural inference rules of the propositional sequent calculus.
//!
//! Each rule is a free function `&Sequent -> Premises`. An empty result means the rule does
//! not apply; otherwise the premises are the child sequents that together justify the input.
//!
//! - Single-premise rules (`left-and`, `right-or`, `right-imp`, `left-not`, `right-not`)
//!   decompose *every* formula with their connective on their side in one pass.
//! - Branching rules (`left-imp`, `left-or`, `right-and`) decompose only the *first* matching
//!   formula; the others are left to later steps.
//!
//! [`Rule::PRIORITY`] lists the rules in the order the proof builder tries them: all
//! single-premise rules come before any branching one, which keeps trees narrow.
//!
//! ```
//! use gentzen::rules::{Rule, first_applicable};
//! use gentzen::sequent::Sequent;
//!
//! let goal = Sequent::goal("p -> p".parse().unwrap());
//! let (rule, premises) = first_applicable(&goal).unwrap();
//! assert_eq!(rule, Rule::RightImp);
//! assert_eq!(premises[0].to_string(), "{ [p]; [p] }");
//! ```
use smallvec::{SmallVec, smallvec};
use strum::{Display, EnumIter, IntoStaticStr};

use crate::formula::{Formula, Operator};
use crate::sequent::Sequent;

/// Child sequents produced by one rule application: none, one or two.
pub type Premises = SmallVec<Sequent, 2>;

/// Uniform signature shared by every rule.
pub type RuleFn = fn(&Sequent) -> Premises;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, IntoStaticStr)]
#[strum(serialize_all = "kebab-case")]
pub enum Rule {
    LeftAnd,
    RightOr,
    RightImp,
    LeftNot,
    RightNot,
    LeftImp,
    LeftOr,
    RightAnd,
}

impl Rule {
    /// Order in which rules are tried on a sequent.
    pub const PRIORITY: [Rule; 8] = [
        Rule::LeftAnd,
        Rule::RightOr,
        Rule::RightImp,
        Rule::LeftNot,
        Rule::RightNot,
        Rule::LeftImp,
        Rule::LeftOr,
        Rule::RightAnd,
    ];

    pub fn function(self) -> RuleFn {
        match self {
            Rule::LeftAnd => left_and,
            Rule::RightOr => right_or,
            Rule::RightImp => right_imp,
            Rule::LeftNot => left_not,
            Rule::RightNot => right_not,
            Rule::LeftImp => left_imp,
            Rule::LeftOr => left_or,
            Rule::RightAnd => right_and,
        }
    }

    #[inline]
    pub fn apply(self, seq: &Sequent) -> Premises {
        (self.function())(seq)
    }

    /// Whether a successful application yields two premises.
    pub fn is_branching(self) -> bool {
        matches!(self, Rule::LeftImp | Rule::LeftOr | Rule::RightAnd)
    }

    pub fn name(self) -> &'static str {
        self.into()
    }
}

/// Apply the first rule in [`Rule::PRIORITY`] that yields any premise.
pub fn first_applicable(seq: &Sequent) -> Option<(Rule, Premises)> {
    Rule::PRIORITY.into_iter().find_map(|rule| {
        let premises = rule.apply(seq);
        (!premises.is_empty()).then_some((rule, premises))
    })
}

fn cloned(formulas: &[Formula]) -> Vec<Formula> {
    formulas.to_vec()
}

fn has_connective(formulas: &[Formula], op: Operator) -> bool {
    formulas.iter().any(|f| f.operator() == Some(op))
}

// ---------------- Single-premise rules ----------------

/// `(A && B)` on the left becomes `A, B` on the left.
pub fn left_and(seq: &Sequent) -> Premises {
    if !has_connective(seq.assumptions(), Operator::And) {
        return Premises::new();
    }

    let mut assumptions = Vec::with_capacity(seq.assumptions().len() + 1);
    for formula in seq.assumptions() {
        match formula {
            Formula::And(lhs, rhs) => {
                assumptions.push(lhs.as_ref().clone());
                assumptions.push(rhs.as_ref().clone());
            }
            other => assumptions.push(other.clone()),
        }
    }
    smallvec![Sequent::new(assumptions, cloned(seq.conclusions()))]
}

/// `(A || B)` on the right becomes `A, B` on the right.
pub fn right_or(seq: &Sequent) -> Premises {
    if !has_connective(seq.conclusions(), Operator::Or) {
        return Premises::new();
    }

    let mut conclusions = Vec::with_capacity(seq.conclusions().len() + 1);
    for formula in seq.conclusions() {
        match formula {
            Formula::Or(lhs, rhs) => {
                conclusions.push(lhs.as_ref().clone());
                conclusions.push(rhs.as_ref().clone());
            }
            other => conclusions.push(other.clone()),
        }
    }
    smallvec![Sequent::new(cloned(seq.assumptions()), conclusions)]
}

/// `(A -> B)` on the right moves `A` to the end of the left and leaves `B` in its place.
pub fn right_imp(seq: &Sequent) -> Premises {
    if !has_connective(seq.conclusions(), Operator::Implies) {
        return Premises::new();
    }

    let mut assumptions = cloned(seq.assumptions());
    let mut conclusions = Vec::with_capacity(seq.conclusions().len());
    for formula in seq.conclusions() {
        match formula {
            Formula::Implies(lhs, rhs) => {
                assumptions.push(lhs.as_ref().clone());
                conclusions.push(rhs.as_ref().clone());
            }
            other => conclusions.push(other.clone()),
        }
    }
    smallvec![Sequent::new(assumptions, conclusions)]
}

/// `!A` on the left is dropped and `A` is appended to the right.
pub fn left_not(seq: &Sequent) -> Premises {
    if !has_connective(seq.assumptions(), Operator::Not) {
        return Premises::new();
    }

    let mut assumptions = Vec::with_capacity(seq.assumptions().len());
    let mut conclusions = cloned(seq.conclusions());
    for formula in seq.assumptions() {
        match formula {
            Formula::Not(inner) => conclusions.push(inner.as_ref().clone()),
            other => assumptions.push(other.clone()),
        }
    }
    smallvec![Sequent::new(assumptions, conclusions)]
}

/// `!A` on the right is dropped and `A` is appended to the left.
pub fn right_not(seq: &Sequent) -> Premises {
    if !has_connective(seq.conclusions(), Operator::Not) {
        return Premises::new();
    }

    let mut assumptions = cloned(seq.assumptions());
    let mut conclusions = Vec::with_capacity(seq.conclusions().len());
    for formula in seq.conclusions() {
        match formula {
            Formula::Not(inner) => assumptions.push(inner.as_ref().clone()),
            other => conclusions.push(other.clone()),
        }
    }
    smallvec![Sequent::new(assumptions, conclusions)]
}

// ---------------- Branching rules ----------------

/// Copy of `formulas` with the entry at `index` replaced by `with`.
fn replaced(formulas: &[Formula], index: usize, with: &Formula) -> Vec<Formula> {
    formulas
        .iter()
        .enumerate()
        .map(|(i, f)| if i == index { with.clone() } else { f.clone() })
        .collect()
}

/// Copy of `formulas` without the entry at `index`.
fn removed(formulas: &[Formula], index: usize) -> Vec<Formula> {
    formulas
        .iter()
        .enumerate()
        .filter(|&(i, _)| i != index)
        .map(|(_, f)| f.clone())
        .collect()
}

/// First `(A -> B)` on the left: one premise assumes `B` in its place, the other drops it and
/// appends `A` to the right.
pub fn left_imp(seq: &Sequent) -> Premises {
    let found = seq.assumptions().iter().enumerate().find_map(|(i, f)| match f {
        Formula::Implies(lhs, rhs) => Some((i, lhs, rhs)),
        _ => None,
    });
    let Some((index, lhs, rhs)) = found else {
        return Premises::new();
    };

    let mut conclusions = cloned(seq.conclusions());
    conclusions.push(lhs.as_ref().clone());
    smallvec![
        Sequent::new(
            replaced(seq.assumptions(), index, rhs),
            cloned(seq.conclusions())
        ),
        Sequent::new(removed(seq.assumptions(), index), conclusions),
    ]
}

/// First `(A || B)` on the left: one premise assumes `A` in its place, the other `B`.
pub fn left_or(seq: &Sequent) -> Premises {
    let found = seq.assumptions().iter().enumerate().find_map(|(i, f)| match f {
        Formula::Or(lhs, rhs) => Some((i, lhs, rhs)),
        _ => None,
    });
    let Some((index, lhs, rhs)) = found else {
        return Premises::new();
    };

    smallvec![
        Sequent::new(
            replaced(seq.assumptions(), index, lhs),
            cloned(seq.conclusions())
        ),
        Sequent::new(
            replaced(seq.assumptions(), index, rhs),
            cloned(seq.conclusions())
        ),
    ]
}

/// First `(A && B)` on the right: one premise concludes `A` in its place, the other `B`.
pub fn right_and(seq: &Sequent) -> Premises {
    let found = seq.conclusions().iter().enumerate().find_map(|(i, f)| match f {
        Formula::And(lhs, rhs) => Some((i, lhs, rhs)),
        _ => None,
    });
    let Some((index, lhs, rhs)) = found else {
        return Premises::new();
    };

    smallvec![
        Sequent::new(
            cloned(seq.assumptions()),
            replaced(seq.conclusions(), index, lhs)
        ),
        Sequent::new(
            cloned(seq.assumptions()),
            replaced(seq.conclusions(), index, rhs)
        ),
    ]
}
