//! # Introduction
//!
//! sexpc translates a tiny S-expression language into C-style function-call
//! statements:
//!
//! ```text
//! (add 1 (subtract 2 3))   →   add(1, subtract(2, 3));
//! ```
//!
//! ## Pipeline
//!
//! ```text
//! Source → Lexer → Parser → Source AST → Transformer → Target AST → Codegen → Text
//! ```
//!
//! 1. [`parser`] — tokenises the source and builds the source AST.
//! 2. [`transform`] — lowers it into the C-shaped target AST with per-kind
//!    enter/leave visitors.
//! 3. [`codegen`] — prints the target AST.
//! 4. [`error`] — [`CompileError`], one variant per stage.
//! 5. [`census`] — per-kind node counts behind `--stats`.
//!
//! Every stage is a pure function of its input, so independent compilations
//! may run concurrently.

pub mod census;
pub mod codegen;
pub mod error;
pub mod parser;
pub mod transform;

pub use codegen::generate;
pub use error::{CompileError, CompileResult, Stage};
pub use parser::lexer::tokenize;
pub use parser::parser::parse;
pub use transform::transform;

/// Example programs run by `sexpc --demo`.
pub const DEMO_PROGRAMS: &[&str] = &["(add 1 (subtract 2 3))", "(add 1 2)\n(subtract 3 4)"];

/// Compile S-expression source into C-style statements.
pub fn compile(source: &str) -> CompileResult<String> {
    let tokens = tokenize(source)?;
    let program = parse(&tokens)?;
    let lowered = transform(&program)?;
    Ok(generate(&lowered)?)
}
