//! RcDoc-based outline printer with termcolor annotations for proof trees.
//!
//! Role
//! - Render a [`ProofTree`] as an indented outline, one sequent per line, premises nested
//!   under the node that produced them.
//! - Provide colored output for terminals (TTY-aware) and plain strings for logs/tests.
//!
//! ```text
//! { []; [(p->p)] }  right-imp
//!   { [p]; [p] }  [axiom]
//! ```
use std::fmt;
use std::io::{self, Write};

use pretty::{FmtWrite, RcDoc, RenderAnnotated};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::formula::Valuation;
use crate::proof::{NodeStatus, ProofNode, ProofTree};

/// Styles used to annotate parts of the rendered outline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    Rule,
    Axiom,
    Falsifiable,
    Model,
}

impl Style {
    fn to_color_spec(self) -> ColorSpec {
        let mut s = ColorSpec::new();
        match self {
            Style::Rule => {
                s.set_fg(Some(Color::Cyan)).set_dimmed(true);
            }
            Style::Axiom => {
                s.set_fg(Some(Color::Green)).set_bold(true);
            }
            Style::Falsifiable => {
                s.set_fg(Some(Color::Red)).set_bold(true);
            }
            Style::Model => {
                s.set_fg(Some(Color::Yellow));
            }
        }
        s
    }
}

fn styled(style: Style, s: String) -> RcDoc<'static, Style> {
    RcDoc::as_string(s).annotate(style)
}

fn model_doc(valuation: &Valuation) -> RcDoc<'static, Style> {
    let assignments: Vec<String> = valuation
        .iter()
        .map(|(name, value)| format!("{name}={value}"))
        .collect();
    styled(Style::Model, assignments.join(", "))
}

fn to_doc(node: &ProofNode) -> RcDoc<'static, Style> {
    let sequent = node.sequent().to_string();
    let head = match node.status() {
        NodeStatus::Internal => {
            let rule = node.rule().map(|r| r.name()).unwrap_or_default();
            RcDoc::as_string(sequent)
                .append(RcDoc::text("  "))
                .append(styled(Style::Rule, rule.to_string()))
        }
        NodeStatus::Axiom => styled(Style::Axiom, sequent)
            .append(RcDoc::text("  "))
            .append(styled(Style::Axiom, "[axiom]".to_string())),
        NodeStatus::Falsifiable => {
            let doc = styled(Style::Falsifiable, sequent)
                .append(RcDoc::text("  "))
                .append(styled(Style::Falsifiable, "[falsifiable]".to_string()));
            match node.sequent().counter_model() {
                Some(model) if !model.is_empty() => {
                    doc.append(RcDoc::text("  ")).append(model_doc(&model))
                }
                _ => doc,
            }
        }
    };

    let children = node
        .children()
        .iter()
        .map(|child| RcDoc::hardline().append(to_doc(child)));
    head.append(RcDoc::concat(children).nest(2))
}

// A writer that maps Style annotations to termcolor ColorSpec on a WriteColor sink.
struct ColorWriter<'w, W: WriteColor + Write> {
    out: &'w mut W,
}

impl<'a, 'w, W: WriteColor + Write> RenderAnnotated<'a, Style> for ColorWriter<'w, W> {
    fn push_annotation(&mut self, ann: &'a Style) -> io::Result<()> {
        self.out.set_color(&ann.to_color_spec())
    }
    fn pop_annotation(&mut self) -> io::Result<()> {
        self.out.reset()
    }
}

impl<'w, W: WriteColor + Write> pretty::Render for ColorWriter<'w, W> {
    type Error = io::Error;
    fn write_str(&mut self, s: &str) -> io::Result<usize> {
        self.out.write_all(s.as_bytes())?;
        Ok(s.len())
    }
    fn write_str_all(&mut self, s: &str) -> io::Result<()> {
        self.out.write_all(s.as_bytes())
    }
    fn fail_doc(&self) -> Self::Error {
        io::Error::other("render failed")
    }
}

fn render_to<W: WriteColor + Write>(
    doc: &RcDoc<'_, Style>,
    width: usize,
    out: &mut W,
) -> io::Result<()> {
    let mut cw = ColorWriter { out };
    doc.render_raw(width, &mut cw)
}

/// Width of the terminal, or 80 if it cannot be determined.
fn terminal_width() -> usize {
    term_size::dimensions().map(|(w, _)| w).unwrap_or(80)
}

/// Pretty-printing conveniences for proofs.
pub trait PrettyProof {
    /// Build an RcDoc representation with style annotations.
    fn pretty_doc(&self) -> RcDoc<'static, Style>;

    /// Render with colors to any termcolor writer at the given width.
    fn pretty_render_to<W: WriteColor + Write>(&self, width: usize, out: &mut W) -> io::Result<()> {
        render_to(&self.pretty_doc(), width, out)
    }

    /// Print to stdout with colors (TTY-aware) at the terminal width.
    fn pretty_print(&self) -> io::Result<()> {
        let stdout = StandardStream::stdout(ColorChoice::Auto);
        let mut stdout = stdout.lock();
        self.pretty_render_to(terminal_width(), &mut stdout)?;
        writeln!(stdout)
    }

    /// Format into a plain string (no colors).
    fn pretty_string(&self) -> String {
        let mut buf = String::new();
        let _ = self.pretty_doc().render_fmt(80, &mut buf);
        buf
    }
}

impl PrettyProof for ProofNode {
    fn pretty_doc(&self) -> RcDoc<'static, Style> {
        to_doc(self)
    }
}

impl PrettyProof for ProofTree {
    fn pretty_doc(&self) -> RcDoc<'static, Style> {
        to_doc(self.root())
    }
}

impl fmt::Display for ProofTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut w = FmtWrite::new(f);
        self.pretty_doc().render_raw(80, &mut w)
    }
}

#[cfg(test)]
mod tests {
    use termcolor::{Ansi, NoColor};

    use super::*;

    fn tree(src: &str) -> ProofTree {
        ProofTree::new(src.parse().unwrap())
    }

    #[test]
    fn outline_of_closed_proof() {
        assert_eq!(
            tree("p -> p").pretty_string(),
            "{ []; [(p->p)] }  right-imp\n  { [p]; [p] }  [axiom]"
        );
    }

    #[test]
    fn outline_of_failed_proof() {
        let expected = "{ []; [(p&&!p)] }  right-and\n\
                        \x20 { []; [p] }  [falsifiable]  p=false\n\
                        \x20 { []; [!p] }  right-not\n\
                        \x20   { [p]; [] }  [falsifiable]  p=true";
        assert_eq!(tree("p && !p").pretty_string(), expected);
    }

    #[test]
    fn display_matches_plain_string() {
        let t = tree("(p || q) -> (q || p)");
        assert_eq!(t.to_string(), t.pretty_string());
    }

    #[test]
    fn colorless_writer_matches_plain_string() {
        let t = tree("!(p && q) -> (!p || !q)");
        let mut out = NoColor::new(Vec::new());
        t.pretty_render_to(80, &mut out).unwrap();
        assert_eq!(String::from_utf8(out.into_inner()).unwrap(), t.pretty_string());
    }

    #[test]
    fn ansi_writer_emits_escapes() {
        let t = tree("p -> q");
        let mut out = Ansi::new(Vec::new());
        t.pretty_render_to(80, &mut out).unwrap();
        let rendered = String::from_utf8(out.into_inner()).unwrap();
        assert!(rendered.contains("\x1b["));
        assert!(rendered.contains("[falsifiable]"));
    }
}
