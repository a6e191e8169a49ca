//! Eager construction of sequent-calculus proof trees.
//!
//! Role
//! - [`ProofNode::build`] expands a sequent by the first applicable rule in
//!   [`Rule::PRIORITY`] and recursively expands the premises until every leaf is finished.
//! - [`ProofTree`] wraps the root built from a formula and answers the questions a caller
//!   asks of a proof: is it a tautology, and if not, which assignments falsify it.
//!
//! Termination
//! - Every rule strictly decreases [`Sequent::operator_count`], so the depth of a tree is
//!   bounded by the number of connectives in the root sequent.
//!
//! Example
//! ```
//! use gentzen::proof::ProofTree;
//!
//! let tree = ProofTree::new("p || !p".parse().unwrap());
//! assert!(tree.is_tautology());
//! assert_eq!(tree.depth(), 2);
//!
//! let tree = ProofTree::new("p && !p".parse().unwrap());
//! assert!(!tree.is_tautology());
//! assert_eq!(tree.counter_models().count(), 2);
//! ```
use log::{Level, debug, log_enabled, trace};
use smallvec::SmallVec;
use strum::{Display, EnumIs};

use crate::formula::{Formula, Valuation};
use crate::rules::{Rule, first_applicable};
use crate::sequent::Sequent;

/// Classification of a node once the tree is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIs)]
#[strum(serialize_all = "lowercase")]
pub enum NodeStatus {
    /// Leaf closed by a formula occurring on both sides.
    Axiom,
    /// Leaf made of variables only, with no formula on both sides.
    Falsifiable,
    /// Expanded by a rule into one or two premises.
    Internal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProofNode {
    sequent: Sequent,
    rule: Option<Rule>,
    children: Vec<ProofNode>,
}

impl ProofNode {
    /// Build the complete subtree rooted at `sequent`.
    ///
    /// # Panics
    /// If no rule applies to a sequent that is not finished. For sequents over the four
    /// connectives this cannot happen: each compound formula triggers exactly one rule.
    pub fn build(sequent: Sequent) -> Self {
        if sequent.is_finished() {
            return Self {
                sequent,
                rule: None,
                children: Vec::new(),
            };
        }

        let Some((rule, premises)) = first_applicable(&sequent) else {
            panic!("no inference rule applies to unfinished sequent {sequent}");
        };
        trace!("{rule}: {sequent} => {} premise(s)", premises.len());

        let children = premises.into_iter().map(ProofNode::build).collect();
        Self {
            sequent,
            rule: Some(rule),
            children,
        }
    }

    #[inline]
    pub fn sequent(&self) -> &Sequent {
        &self.sequent
    }

    /// Rule applied to this node, `None` for leaves.
    #[inline]
    pub fn rule(&self) -> Option<Rule> {
        self.rule
    }

    #[inline]
    pub fn children(&self) -> &[ProofNode] {
        &self.children
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn status(&self) -> NodeStatus {
        if !self.is_leaf() {
            NodeStatus::Internal
        } else if self.sequent.is_axiom() {
            NodeStatus::Axiom
        } else {
            NodeStatus::Falsifiable
        }
    }

    #[inline]
    pub fn is_axiom(&self) -> bool {
        self.sequent.is_axiom()
    }

    #[inline]
    pub fn is_falsifiable(&self) -> bool {
        self.sequent.is_falsifiable()
    }

    /// Number of rule applications on the longest path to a leaf.
    pub fn depth(&self) -> usize {
        self.walk().map(|(_, depth)| depth).max().unwrap_or(0)
    }

    /// Pre-order traversal of this subtree.
    pub fn nodes(&self) -> Nodes<'_> {
        Nodes { inner: self.walk() }
    }

    fn walk(&self) -> Walk<'_> {
        let mut stack = SmallVec::new();
        stack.push((self, 0));
        Walk { stack }
    }
}

/// Depth-annotated pre-order walk driven by an explicit stack.
struct Walk<'a> {
    stack: SmallVec<(&'a ProofNode, usize), 16>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = (&'a ProofNode, usize);

    fn next(&mut self) -> Option<Self::Item> {
        let (node, depth) = self.stack.pop()?;
        // Reverse so the leftmost premise is visited first.
        self.stack
            .extend(node.children.iter().rev().map(|child| (child, depth + 1)));
        Some((node, depth))
    }
}

/// Iterator over the nodes of a proof tree, parents before children, left to right.
pub struct Nodes<'a> {
    inner: Walk<'a>,
}

impl<'a> Iterator for Nodes<'a> {
    type Item = &'a ProofNode;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(node, _)| node)
    }
}

/// Fully expanded proof attempt for a single formula.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProofTree {
    root: ProofNode,
}

impl ProofTree {
    /// Build the proof tree of the goal `{ []; [formula] }`.
    pub fn new(formula: Formula) -> Self {
        Self::from_sequent(Sequent::goal(formula))
    }

    pub fn from_sequent(sequent: Sequent) -> Self {
        let tree = Self {
            root: ProofNode::build(sequent),
        };
        if log_enabled!(Level::Debug) {
            debug!(
                "Built proof tree for {}: {} node(s), depth {}, {}",
                tree.root.sequent,
                tree.node_count(),
                tree.depth(),
                if tree.is_tautology() {
                    "closed"
                } else {
                    "falsifiable"
                }
            );
        }
        tree
    }

    #[inline]
    pub fn root(&self) -> &ProofNode {
        &self.root
    }

    /// Every leaf is an axiom.
    pub fn is_tautology(&self) -> bool {
        self.leaves().all(ProofNode::is_axiom)
    }

    pub fn depth(&self) -> usize {
        self.root.depth()
    }

    pub fn node_count(&self) -> usize {
        self.nodes().count()
    }

    pub fn nodes(&self) -> Nodes<'_> {
        self.root.nodes()
    }

    pub fn leaves(&self) -> impl Iterator<Item = &ProofNode> {
        self.nodes().filter(|node| node.is_leaf())
    }

    pub fn falsifiable_leaves(&self) -> impl Iterator<Item = &ProofNode> {
        self.leaves().filter(|node| node.is_falsifiable())
    }

    /// One falsifying assignment per falsifiable leaf, left to right.
    pub fn counter_models(&self) -> impl Iterator<Item = Valuation> + '_ {
        self.falsifiable_leaves()
            .filter_map(|node| node.sequent.counter_model())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree(src: &str) -> ProofTree {
        ProofTree::new(src.parse().unwrap())
    }

    #[test]
    fn leaf_for_finished_root() {
        let t = ProofTree::from_sequent(Sequent::new(
            vec![Formula::atom("p")],
            vec![Formula::atom("p")],
        ));
        assert_eq!(t.node_count(), 1);
        assert_eq!(t.depth(), 0);
        assert_eq!(t.root().status(), NodeStatus::Axiom);
        assert_eq!(t.root().rule(), None);
    }

    #[test]
    fn walk_is_preorder_left_to_right() {
        let t = tree("(p || q) && r");
        let order: Vec<String> = t.nodes().map(|n| n.sequent().to_string()).collect();
        assert_eq!(
            order,
            [
                "{ []; [((p||q)&&r)] }",
                "{ []; [(p||q)] }",
                "{ []; [p, q] }",
                "{ []; [r] }",
            ]
        );
    }

    #[test]
    fn status_display() {
        assert_eq!(NodeStatus::Axiom.to_string(), "axiom");
        assert_eq!(NodeStatus::Falsifiable.to_string(), "falsifiable");
        assert_eq!(NodeStatus::Internal.to_string(), "internal");
    }
}
