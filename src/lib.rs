//! # Introduction
//!
//! jack-analyzer reads programs written in Jack, a small object-based teaching
//! language, and writes the concrete syntax tree of each class as XML for a
//! later compilation stage. It performs no type checking, symbol resolution,
//! or code generation.
//!
//! ## Pipeline
//!
//! ```text
//! Source → Lexer → Parser → Tree → Emitter → XML
//! ```
//!
//! 1. [`parser`] — scans tokens on demand and builds the parse tree by
//!    recursive descent, one method per grammar rule.
//! 2. [`emitter`] — serializes a tree (or a bare token stream) as XML.
//! 3. [`driver`] — finds `.jack` files, runs one independent analysis per
//!    file, and writes artifacts only for files that parse.
//! 4. [`cli`] — command-line flags for the `jack-analyzer` binary.
//!
//! ## Example
//!
//! ```
//! use jack_analyzer::emitter::{render_tree, Layout};
//! use jack_analyzer::parser::parse_source;
//!
//! let tree = parse_source("class Main { }").unwrap();
//! assert_eq!(
//!     render_tree(&tree, Layout::Compact),
//!     "<class><keyword>class</keyword><identifier>Main</identifier>\
//!      <symbol>{</symbol><symbol>}</symbol></class>"
//! );
//! ```

pub mod cli;
pub mod driver;
pub mod emitter;
pub mod parser;
