// Target AST: C-style statements and call expressions

use crate::census::NodeCounts;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetKind {
    Program,
    ExpressionStatement,
    CallExpression,
    Identifier,
    NumberLiteral,
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TargetKind::Program => "Program",
            TargetKind::ExpressionStatement => "ExpressionStatement",
            TargetKind::CallExpression => "CallExpression",
            TargetKind::Identifier => "Identifier",
            TargetKind::NumberLiteral => "NumberLiteral",
        };
        f.pad(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identifier {
    pub name: String,
}

impl Identifier {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberLiteral {
    pub value: String,
}

impl NumberLiteral {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }
}

/// `callee(arguments...)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallExpression {
    pub callee: Identifier,
    pub arguments: Vec<Expression>,
}

impl CallExpression {
    /// A call with no arguments yet; the transformer fills them in.
    pub fn new(callee: impl Into<String>) -> Self {
        Self {
            callee: Identifier::new(callee),
            arguments: Vec::new(),
        }
    }

    pub fn with_arguments(mut self, arguments: Vec<Expression>) -> Self {
        self.arguments = arguments;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expression {
    Call(CallExpression),
    Identifier(Identifier),
    Number(NumberLiteral),
}

impl Expression {
    pub fn kind(&self) -> TargetKind {
        match self {
            Expression::Call(_) => TargetKind::CallExpression,
            Expression::Identifier(_) => TargetKind::Identifier,
            Expression::Number(_) => TargetKind::NumberLiteral,
        }
    }

    /// The argument list of a call, `None` for leaves.
    pub fn arguments_mut(&mut self) -> Option<&mut Vec<Expression>> {
        match self {
            Expression::Call(call) => Some(&mut call.arguments),
            Expression::Identifier(_) | Expression::Number(_) => None,
        }
    }
}

/// An expression evaluated for its effect: `expression;`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpressionStatement {
    pub expression: Expression,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    Expression(ExpressionStatement),
}

impl Statement {
    pub fn expression(expression: Expression) -> Self {
        Statement::Expression(ExpressionStatement { expression })
    }

    pub fn arguments_mut(&mut self) -> Option<&mut Vec<Expression>> {
        match self {
            Statement::Expression(stmt) => stmt.expression.arguments_mut(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Program {
    pub body: Vec<Statement>,
}

impl Program {
    pub fn new() -> Self {
        Program::default()
    }

    /// Count every node in the tree by kind. Callee identifiers count too.
    pub fn node_counts(&self) -> NodeCounts<TargetKind> {
        let mut counts = NodeCounts::default();
        counts.record(TargetKind::Program);

        let mut pending: Vec<&Expression> = Vec::new();
        for Statement::Expression(stmt) in &self.body {
            counts.record(TargetKind::ExpressionStatement);
            pending.push(&stmt.expression);
        }

        while let Some(expr) = pending.pop() {
            counts.record(expr.kind());
            if let Expression::Call(call) = expr {
                counts.record(TargetKind::Identifier);
                pending.extend(call.arguments.iter());
            }
        }
        counts
    }
}
