//! Lowering from the S-expression AST to the C-style target AST
//!
//! - [`ast`]: Target AST node definitions
//! - [`visitor`]: Per-kind enter/leave visitors and the traversal driving them
//!
//! Top-level calls become expression statements; nested calls and number
//! literals become call arguments. A number literal directly under the
//! program has nowhere to go and is rejected.

pub mod ast;
pub mod visitor;

use crate::parser::ast::{self as source, SourceKind, SourceLocation};
use log::debug;
use thiserror::Error;
use visitor::{Context, ProgramVisitor};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransformError {
    /// A bare number at the top level is not a statement
    #[error("Transform error at {location}: number literal {value} is not a valid top-level statement")]
    TopLevelLiteral {
        value: String,
        location: SourceLocation,
    },

    /// A node reached a context it cannot be attached to
    #[error("Transform error: {kind} cannot be attached to {context}")]
    DetachedNode {
        kind: SourceKind,
        context: &'static str,
    },
}

impl TransformError {
    pub fn location(&self) -> Option<SourceLocation> {
        match self {
            TransformError::TopLevelLiteral { location, .. } => Some(*location),
            TransformError::DetachedNode { .. } => None,
        }
    }
}

pub type TransformResult<T> = Result<T, TransformError>;

/// Lower a source program into a target program in a single pre-order pass.
pub fn transform(program: &source::Program) -> TransformResult<ast::Program> {
    let mut output = ast::Program::new();
    visitor::traverse(&ProgramVisitor, program, None, &mut Context::Root(&mut output))?;

    debug!("lowered to {} statements", output.body.len());
    Ok(output)
}
