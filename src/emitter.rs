//! XML serialization of parse trees and token streams
//!
//! A nonterminal becomes an element wrapping its children; a terminal becomes
//! an element named after its token class wrapping the escaped token text.
//! Output is append-only: [`XmlEmitter`] never revisits what it has written,
//! so it can be driven node by node or over a whole tree.

use crate::parser::lexer::Token;
use crate::parser::tree::Node;
use std::borrow::Cow;

/// Whitespace policy of the emitted XML
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Layout {
    /// No whitespace between elements: `<term><identifier>x</identifier></term>`
    Compact,
    /// One element per line, two spaces of indentation per level, and terminal
    /// text padded with single spaces: `<identifier> x </identifier>`
    #[default]
    Indented,
}

/// Incremental XML writer
#[derive(Debug)]
pub struct XmlEmitter {
    layout: Layout,
    out: String,
    depth: usize,
}

impl XmlEmitter {
    pub fn new(layout: Layout) -> Self {
        Self {
            layout,
            out: String::new(),
            depth: 0,
        }
    }

    /// Open a nonterminal element.
    pub fn open(&mut self, label: &str) {
        self.indent();
        self.out.push('<');
        self.out.push_str(label);
        self.out.push('>');
        self.newline();
        self.depth += 1;
    }

    /// Close the innermost open nonterminal element.
    pub fn close(&mut self, label: &str) {
        self.depth = self.depth.saturating_sub(1);
        self.indent();
        self.out.push_str("</");
        self.out.push_str(label);
        self.out.push('>');
        self.newline();
    }

    /// Write a terminal element for `token`.
    pub fn terminal(&mut self, token: &Token) {
        let label = token.label();
        let text = token.text();
        let pad = match self.layout {
            Layout::Compact => "",
            Layout::Indented => " ",
        };

        self.indent();
        self.out.push('<');
        self.out.push_str(label);
        self.out.push('>');
        self.out.push_str(pad);
        self.out.push_str(&escape(&text));
        self.out.push_str(pad);
        self.out.push_str("</");
        self.out.push_str(label);
        self.out.push('>');
        self.newline();
    }

    /// Write `node` and everything below it.
    pub fn node(&mut self, node: &Node) {
        match node {
            Node::Terminal(token) => self.terminal(token),
            Node::Branch { kind, children } => {
                self.open(kind.label());
                for child in children {
                    self.node(child);
                }
                self.close(kind.label());
            }
        }
    }

    /// Write a flat token listing wrapped in a `<tokens>` element.
    pub fn tokens<'a>(&mut self, tokens: impl IntoIterator<Item = &'a Token>) {
        self.open("tokens");
        for token in tokens {
            self.terminal(token);
        }
        self.close("tokens");
    }

    pub fn finish(self) -> String {
        self.out
    }

    fn indent(&mut self) {
        if self.layout == Layout::Indented {
            for _ in 0..self.depth {
                self.out.push_str("  ");
            }
        }
    }

    fn newline(&mut self) {
        if self.layout == Layout::Indented {
            self.out.push('\n');
        }
    }
}

/// Serialize a parse tree.
pub fn render_tree(node: &Node, layout: Layout) -> String {
    let mut emitter = XmlEmitter::new(layout);
    emitter.node(node);
    emitter.finish()
}

/// Serialize a token stream as a `<tokens>` listing.
pub fn render_tokens(tokens: &[Token], layout: Layout) -> String {
    let mut emitter = XmlEmitter::new(layout);
    emitter.tokens(tokens);
    emitter.finish()
}

/// Escape the characters that collide with XML markup.
pub fn escape(text: &str) -> Cow<'_, str> {
    if !text.contains(['<', '>', '&', '"']) {
        return Cow::Borrowed(text);
    }

    let mut escaped = String::with_capacity(text.len() + 8);
    for ch in text.chars() {
        match ch {
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(ch),
        }
    }
    Cow::Owned(escaped)
}
