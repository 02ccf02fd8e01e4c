//! Enter/leave visitors that lower the source AST into the target AST
//!
//! Traversal is depth-first pre-order. Each source kind has exactly one
//! visitor; [`traverse_node`] is the dispatch table, a `match` over the closed
//! [`SourceNode`] enum. A visitor's `enter` attaches the node it builds to the
//! current [`Context`] and may hand back a new context for the node's children.

use super::ast::{self as target, Expression, Statement};
use super::{TransformError, TransformResult};
use crate::parser::ast::{self as source, SourceKind, SourceNode};
use log::trace;

/// Where the next lowered node is attached.
#[derive(Debug)]
pub enum Context<'t> {
    /// Slot for the target root, before the `Program` visitor has run
    Root(&'t mut target::Program),
    /// Top-level statement list
    Body(&'t mut Vec<Statement>),
    /// Argument list of the call currently being built
    Arguments(&'t mut Vec<Expression>),
}

impl Context<'_> {
    pub fn describe(&self) -> &'static str {
        match self {
            Context::Root(_) => "the program root",
            Context::Body(_) => "the program body",
            Context::Arguments(_) => "a call's arguments",
        }
    }
}

/// Source nodes the traversal can walk.
pub trait Visitable {
    const KIND: SourceKind;

    /// Children to visit after `enter`. Leaves have none.
    fn children(&self) -> &[SourceNode];
}

impl Visitable for source::Program {
    const KIND: SourceKind = SourceKind::Program;

    fn children(&self) -> &[SourceNode] {
        &self.children
    }
}

impl Visitable for source::CallExpression {
    const KIND: SourceKind = SourceKind::CallExpression;

    fn children(&self) -> &[SourceNode] {
        &self.children
    }
}

impl Visitable for source::NumberLiteral {
    const KIND: SourceKind = SourceKind::NumberLiteral;

    fn children(&self) -> &[SourceNode] {
        &[]
    }
}

/// Per-kind lowering hooks.
///
/// `enter` runs before the node's children and returns the context they
/// attach to (or `None` for leaves). `leave` runs after all children.
pub trait Visitor {
    type Node: Visitable;

    fn enter<'c>(
        &self,
        node: &Self::Node,
        parent: Option<SourceKind>,
        ctx: &'c mut Context<'_>,
    ) -> TransformResult<Option<Context<'c>>>;

    fn leave(
        &self,
        node: &Self::Node,
        parent: Option<SourceKind>,
        ctx: &mut Context<'_>,
    ) -> TransformResult<()>;
}

pub struct ProgramVisitor;
pub struct CallExpressionVisitor;
pub struct NumberLiteralVisitor;

impl Visitor for ProgramVisitor {
    type Node = source::Program;

    fn enter<'c>(
        &self,
        node: &source::Program,
        _parent: Option<SourceKind>,
        ctx: &'c mut Context<'_>,
    ) -> TransformResult<Option<Context<'c>>> {
        trace!("enter Program ({} children)", node.children.len());
        match ctx {
            Context::Root(program) => {
                **program = target::Program::new();
                Ok(Some(Context::Body(&mut program.body)))
            }
            other => Err(TransformError::DetachedNode {
                kind: SourceKind::Program,
                context: other.describe(),
            }),
        }
    }

    fn leave(
        &self,
        _node: &source::Program,
        _parent: Option<SourceKind>,
        _ctx: &mut Context<'_>,
    ) -> TransformResult<()> {
        trace!("leave Program");
        Ok(())
    }
}

impl Visitor for CallExpressionVisitor {
    type Node = source::CallExpression;

    fn enter<'c>(
        &self,
        node: &source::CallExpression,
        parent: Option<SourceKind>,
        ctx: &'c mut Context<'_>,
    ) -> TransformResult<Option<Context<'c>>> {
        trace!("enter CallExpression '{}' at {}", node.callee, node.location);
        let call = target::CallExpression::new(node.callee.as_str());

        // The source parent decides: nested calls are argument values,
        // top-level calls become statements.
        match (parent, ctx) {
            (Some(SourceKind::CallExpression), Context::Arguments(arguments)) => {
                arguments.push(Expression::Call(call));
                Ok(arguments
                    .last_mut()
                    .and_then(Expression::arguments_mut)
                    .map(Context::Arguments))
            }
            (Some(SourceKind::Program), Context::Body(body)) => {
                body.push(Statement::expression(Expression::Call(call)));
                Ok(body
                    .last_mut()
                    .and_then(Statement::arguments_mut)
                    .map(Context::Arguments))
            }
            (_, other) => Err(TransformError::DetachedNode {
                kind: SourceKind::CallExpression,
                context: other.describe(),
            }),
        }
    }

    fn leave(
        &self,
        node: &source::CallExpression,
        _parent: Option<SourceKind>,
        _ctx: &mut Context<'_>,
    ) -> TransformResult<()> {
        trace!("leave CallExpression '{}'", node.callee);
        Ok(())
    }
}

impl Visitor for NumberLiteralVisitor {
    type Node = source::NumberLiteral;

    fn enter<'c>(
        &self,
        node: &source::NumberLiteral,
        _parent: Option<SourceKind>,
        ctx: &'c mut Context<'_>,
    ) -> TransformResult<Option<Context<'c>>> {
        trace!("enter NumberLiteral {} at {}", node.value, node.location);
        match ctx {
            Context::Arguments(arguments) => {
                arguments.push(Expression::Number(target::NumberLiteral::new(
                    node.value.as_str(),
                )));
                Ok(None)
            }
            Context::Body(_) => Err(TransformError::TopLevelLiteral {
                value: node.value.clone(),
                location: node.location,
            }),
            other => Err(TransformError::DetachedNode {
                kind: SourceKind::NumberLiteral,
                context: other.describe(),
            }),
        }
    }

    fn leave(
        &self,
        _node: &source::NumberLiteral,
        _parent: Option<SourceKind>,
        _ctx: &mut Context<'_>,
    ) -> TransformResult<()> {
        Ok(())
    }
}

/// Visit `node` with `visitor`, then its children, then leave.
pub fn traverse<V: Visitor>(
    visitor: &V,
    node: &V::Node,
    parent: Option<SourceKind>,
    ctx: &mut Context<'_>,
) -> TransformResult<()> {
    if let Some(mut child_ctx) = visitor.enter(node, parent, ctx)? {
        for child in node.children() {
            traverse_node(child, Some(<V::Node as Visitable>::KIND), &mut child_ctx)?;
        }
    }
    visitor.leave(node, parent, ctx)
}

/// Dispatch a non-root source node to the visitor for its kind.
pub fn traverse_node(
    node: &SourceNode,
    parent: Option<SourceKind>,
    ctx: &mut Context<'_>,
) -> TransformResult<()> {
    match node {
        SourceNode::CallExpression(call) => traverse(&CallExpressionVisitor, call, parent, ctx),
        SourceNode::NumberLiteral(lit) => traverse(&NumberLiteralVisitor, lit, parent, ctx),
    }
}
