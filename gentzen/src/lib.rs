//! Gentzen: tautology checking for propositional logic with sequent-calculus proofs.
//!
//! A formula over variables and the connectives `!`, `&&`, `||`, `->` is parsed into a
//! [`Formula`](formula::Formula) and placed as the single conclusion of a root sequent
//! `{ []; [formula] }`. Structural inference rules then decompose sequents into simpler ones
//! until every branch ends in a finished sequent:
//!  - an axiom (some formula appears on both sides) closes its branch;
//!  - a falsifiable leaf (variables only, no overlap) yields a counter-model.
//!
//! The formula is a tautology exactly when every leaf of its proof tree is an axiom.
//!
//! Pipeline
//!  - [`lexer`]: characters to tokens (chumsky).
//!  - [`parser`]: tokens to a formula by operator precedence.
//!  - [`rules`]: the eight inference rules and their priority order.
//!  - [`proof`]: eager construction of the proof tree.
//!  - [`pretty`]: terminal rendering of proof trees.
//!
//! Example
//! ```
//! use gentzen::prove;
//!
//! let proof = prove("(p -> q) -> (!q -> !p)").unwrap();
//! assert!(proof.is_tautology());
//!
//! let proof = prove("p -> q").unwrap();
//! assert!(!proof.is_tautology());
//! let model = proof.counter_models().next().unwrap();
//! assert_eq!(model.get("p"), Some(&true));
//! assert_eq!(model.get("q"), Some(&false));
//! ```

/// Resource limits and their TOML representation.
pub mod config;
/// Parse errors.
pub mod error;
/// Formula trees and their canonical rendering.
pub mod formula;
/// Tokeniser for infix formulas.
pub mod lexer;
/// Operator-precedence parser.
pub mod parser;
/// Terminal rendering for proof trees.
pub mod pretty;
/// Proof tree construction.
pub mod proof;
/// Structural inference rules.
pub mod rules;
/// Sequents and their finishing predicates.
pub mod sequent;

use crate::config::ProverConfig;
use crate::error::Result;
use crate::proof::ProofTree;

/// Parse `src` and build its proof tree with the default limits.
pub fn prove(src: &str) -> Result<ProofTree> {
    prove_with(src, &ProverConfig::default())
}

/// Parse `src` under `config` and build its proof tree.
pub fn prove_with(src: &str, config: &ProverConfig) -> Result<ProofTree> {
    let formula = parser::parse_with(src, config)?;
    Ok(ProofTree::new(formula))
}

pub mod prelude {
    //! Convenient re-exports for end users.
    pub use crate::config::ProverConfig;
    pub use crate::error::{Error, Result};
    pub use crate::formula::{Formula, Operator, Valuation};
    pub use crate::parser::{parse, parse_with};
    pub use crate::pretty::PrettyProof;
    pub use crate::proof::{NodeStatus, ProofNode, ProofTree};
    pub use crate::rules::{Rule, first_applicable};
    pub use crate::sequent::Sequent;
    pub use crate::{prove, prove_with};
}
