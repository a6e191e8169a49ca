//! Sequents: a list of assumptions and a list of conclusions.
//!
//! A sequent `{ [a1, a2]; [c1, c2] }` asserts that the conjunction of its assumptions implies
//! the disjunction of its conclusions. Order inside each list only decides which formula a rule
//! picks first; the predicates below treat both lists as sets.
use std::collections::HashSet;
use std::fmt;

use crate::formula::{Formula, Valuation};

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Sequent {
    assumptions: Vec<Formula>,
    conclusions: Vec<Formula>,
}

impl Sequent {
    pub fn new(assumptions: Vec<Formula>, conclusions: Vec<Formula>) -> Self {
        Self {
            assumptions,
            conclusions,
        }
    }

    /// The sequent `{ []; [formula] }` whose proof establishes `formula` as a tautology.
    pub fn goal(formula: Formula) -> Self {
        Self::new(Vec::new(), vec![formula])
    }

    #[inline]
    pub fn assumptions(&self) -> &[Formula] {
        &self.assumptions
    }

    #[inline]
    pub fn conclusions(&self) -> &[Formula] {
        &self.conclusions
    }

    /// Some assumption and some conclusion render to the same canonical string.
    pub fn is_axiom(&self) -> bool {
        let assumed: HashSet<String> = self.assumptions.iter().map(Formula::canonical).collect();
        self.conclusions
            .iter()
            .any(|c| assumed.contains(&c.canonical()))
    }

    /// No rule needs to be applied: the sequent is an axiom, or every formula is a variable.
    pub fn is_finished(&self) -> bool {
        self.is_axiom() || self.is_atomic()
    }

    pub fn is_falsifiable(&self) -> bool {
        self.is_finished() && !self.is_axiom()
    }

    /// Every assumption and every conclusion is a variable. Vacuously true for empty lists.
    pub fn is_atomic(&self) -> bool {
        self.assumptions
            .iter()
            .chain(&self.conclusions)
            .all(Formula::is_atomic)
    }

    /// Total number of connectives across all formulas. Every rule application strictly
    /// decreases it.
    pub fn operator_count(&self) -> usize {
        self.assumptions
            .iter()
            .chain(&self.conclusions)
            .map(Formula::operator_count)
            .sum()
    }

    /// Assignment falsifying a falsifiable sequent: variables among the assumptions are true,
    /// every other variable is false.
    pub fn counter_model(&self) -> Option<Valuation> {
        if !self.is_falsifiable() {
            return None;
        }

        let mut valuation = Valuation::new();
        for formula in &self.conclusions {
            if let Formula::Atomic(name) = formula {
                valuation.insert(name.clone(), false);
            }
        }
        for formula in &self.assumptions {
            if let Formula::Atomic(name) = formula {
                valuation.insert(name.clone(), true);
            }
        }
        Some(valuation)
    }
}

fn write_list(f: &mut fmt::Formatter<'_>, formulas: &[Formula]) -> fmt::Result {
    f.write_str("[")?;
    for (i, formula) in formulas.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{formula}")?;
    }
    f.write_str("]")
}

impl fmt::Display for Sequent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{ ")?;
        write_list(f, &self.assumptions)?;
        f.write_str("; ")?;
        write_list(f, &self.conclusions)?;
        f.write_str(" }")
    }
}
