//! C-style code generation from the target AST
//!
//! Each top-level statement becomes one line `callee(arg, arg, ...);`.
//! Number literals are emitted verbatim, never reparsed or reformatted.

use crate::transform::ast::*;
use log::debug;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodeGenError {
    /// A node whose contents cannot be written as valid C. Only reachable for
    /// hand-built trees; `transform` never produces one.
    #[error("Codegen error: malformed {kind}: {detail}")]
    Malformed { kind: TargetKind, detail: String },
}

pub type CodeGenResult<T> = Result<T, CodeGenError>;

/// Render a whole program, one statement per line.
pub fn generate(program: &Program) -> CodeGenResult<String> {
    let lines = program
        .body
        .iter()
        .map(generate_statement)
        .collect::<CodeGenResult<Vec<_>>>()?;
    let output = lines.join("\n");

    debug!("generated {} bytes of output", output.len());
    Ok(output)
}

pub fn generate_statement(stmt: &Statement) -> CodeGenResult<String> {
    match stmt {
        Statement::Expression(ExpressionStatement { expression }) => {
            Ok(format!("{};", generate_expression(expression)?))
        }
    }
}

pub fn generate_expression(expr: &Expression) -> CodeGenResult<String> {
    match expr {
        Expression::Call(call) => {
            let callee = generate_identifier(&call.callee)?;
            let args = call
                .arguments
                .iter()
                .map(generate_expression)
                .collect::<CodeGenResult<Vec<_>>>()?;
            Ok(format!("{}({})", callee, args.join(", ")))
        }
        Expression::Identifier(ident) => generate_identifier(ident),
        Expression::Number(lit) => {
            if lit.value.is_empty() || !lit.value.bytes().all(|b| b.is_ascii_digit()) {
                return Err(CodeGenError::Malformed {
                    kind: TargetKind::NumberLiteral,
                    detail: format!("{:?} is not a run of digits", lit.value),
                });
            }
            Ok(lit.value.clone())
        }
    }
}

fn generate_identifier(ident: &Identifier) -> CodeGenResult<String> {
    if ident.name.is_empty() || !ident.name.bytes().all(|b| b.is_ascii_alphabetic()) {
        return Err(CodeGenError::Malformed {
            kind: TargetKind::Identifier,
            detail: format!("{:?} is not a run of letters", ident.name),
        });
    }
    Ok(ident.name.clone())
}
