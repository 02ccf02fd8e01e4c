// Source AST definitions for the S-expression front end

use crate::census::NodeCounts;
use std::fmt;

/// Source location information for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// The three kinds of source node. The transformer dispatches on this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    Program,
    CallExpression,
    NumberLiteral,
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SourceKind::Program => "Program",
            SourceKind::CallExpression => "CallExpression",
            SourceKind::NumberLiteral => "NumberLiteral",
        };
        f.pad(name)
    }
}

/// `(callee arg*)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallExpression {
    pub callee: String,
    pub children: Vec<SourceNode>,
    pub location: SourceLocation,
}

/// A run of digits, kept as written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberLiteral {
    pub value: String,
    pub location: SourceLocation,
}

/// Any node that can appear below the root
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceNode {
    CallExpression(CallExpression),
    NumberLiteral(NumberLiteral),
}

impl SourceNode {
    pub fn kind(&self) -> SourceKind {
        match self {
            SourceNode::CallExpression(_) => SourceKind::CallExpression,
            SourceNode::NumberLiteral(_) => SourceKind::NumberLiteral,
        }
    }

    /// Get the source location of this node
    pub fn location(&self) -> &SourceLocation {
        match self {
            SourceNode::CallExpression(call) => &call.location,
            SourceNode::NumberLiteral(lit) => &lit.location,
        }
    }
}

/// Top-level program structure
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Program {
    pub children: Vec<SourceNode>, // Top-level expressions, in source order
}

impl Program {
    pub fn new() -> Self {
        Program::default()
    }

    /// Count every node in the tree by kind, the root included.
    pub fn node_counts(&self) -> NodeCounts<SourceKind> {
        let mut counts = NodeCounts::default();
        counts.record(SourceKind::Program);
        let mut pending: Vec<&SourceNode> = self.children.iter().collect();
        while let Some(node) = pending.pop() {
            counts.record(node.kind());
            if let SourceNode::CallExpression(call) = node {
                pending.extend(call.children.iter());
            }
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn number(value: &str) -> SourceNode {
        SourceNode::NumberLiteral(NumberLiteral {
            value: value.to_string(),
            location: SourceLocation::new(1, 1),
        })
    }

    fn call(callee: &str, children: Vec<SourceNode>) -> SourceNode {
        SourceNode::CallExpression(CallExpression {
            callee: callee.to_string(),
            children,
            location: SourceLocation::new(1, 1),
        })
    }

    #[test]
    fn test_node_counts_nested() {
        let program = Program {
            children: vec![
                call("add", vec![number("1"), call("subtract", vec![number("2"), number("3")])]),
                call("noop", vec![]),
            ],
        };

        let counts = program.node_counts();
        assert_eq!(counts.get(SourceKind::Program), 1);
        assert_eq!(counts.get(SourceKind::CallExpression), 3);
        assert_eq!(counts.get(SourceKind::NumberLiteral), 3);
        assert_eq!(counts.total(), 7);
    }

    #[test]
    fn test_node_counts_empty_program() {
        let counts = Program::new().node_counts();
        assert_eq!(counts.total(), 1);
        assert_eq!(counts.get(SourceKind::CallExpression), 0);
        assert_eq!(counts.sorted(), vec![(SourceKind::Program, 1)]);
    }
}
