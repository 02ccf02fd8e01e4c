//! Compilation error type
//!
//! [`CompileError`] wraps the error of whichever stage failed. The first
//! failure aborts the compilation; there is no partial output.

use crate::codegen::CodeGenError;
use crate::parser::ast::SourceLocation;
use crate::parser::lexer::LexError;
use crate::parser::parser::ParseError;
use crate::transform::TransformError;
use std::fmt;
use thiserror::Error;

/// Pipeline stage that produced an error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Lex,
    Parse,
    Transform,
    CodeGen,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Lex => "lex",
            Stage::Parse => "parse",
            Stage::Transform => "transform",
            Stage::CodeGen => "codegen",
        };
        f.pad(name)
    }
}

/// Failure of any pipeline stage, wrapping that stage's own error
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Transform(#[from] TransformError),

    #[error(transparent)]
    CodeGen(#[from] CodeGenError),
}

impl CompileError {
    /// The stage that failed.
    pub fn stage(&self) -> Stage {
        match self {
            CompileError::Lex(_) => Stage::Lex,
            CompileError::Parse(_) => Stage::Parse,
            CompileError::Transform(_) => Stage::Transform,
            CompileError::CodeGen(_) => Stage::CodeGen,
        }
    }

    /// Where in the source the failure was detected, when known.
    pub fn location(&self) -> Option<SourceLocation> {
        match self {
            CompileError::Lex(e) => Some(e.location),
            CompileError::Parse(e) => e.location(),
            CompileError::Transform(e) => e.location(),
            CompileError::CodeGen(_) => None,
        }
    }
}

pub type CompileResult<T> = Result<T, CompileError>;
