//! S-expression front end
//!
//! This module turns source text into the source AST:
//! - [`lexer`]: Tokenization (source text → tokens)
//! - [`parser`]: Parsing (tokens → AST)
//! - [`ast`]: Source AST node definitions
//!
//! # Grammar
//!
//! ```text
//! program := expr*
//! expr    := NUMBER | '(' IDENT expr* ')'
//! ```
//!
//! Hand-written recursive descent; no external parser generator dependencies.

pub mod ast;
pub mod lexer;
pub mod parser;
