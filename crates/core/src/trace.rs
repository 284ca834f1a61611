//! # Interpreter Traces
//!
//! A [`TraceNode`] records how the pairing interpreter walked a program
//! against its environment: one node per environment layer consumed, labeled
//! with the annotation that layer contributed. Because environments may be
//! infinite, the trace is often the only affordable way to see *which part*
//! of an environment a program actually touched.

/// A node in a trace tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceNode {
    /// What happened at this node (usually the environment head consumed).
    pub label: String,
    /// Traces of the child resolutions, in shape order.
    pub children: Vec<TraceNode>,
}

impl TraceNode {
    /// Create a leaf trace node.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            children: Vec::new(),
        }
    }

    /// Add a child trace.
    pub fn with_child(mut self, child: TraceNode) -> Self {
        self.children.push(child);
        self
    }

    /// Add multiple children.
    pub fn with_children(mut self, children: Vec<TraceNode>) -> Self {
        self.children.extend(children);
        self
    }

    /// Total number of nodes in the trace.
    pub fn size(&self) -> usize {
        1 + self.children.iter().map(TraceNode::size).sum::<usize>()
    }

    /// Pretty-print the trace tree.
    pub fn display(&self) -> String {
        self.display_indent(0)
    }

    fn display_indent(&self, indent: usize) -> String {
        use std::fmt::Write;
        let mut out = String::new();
        let prefix = "  ".repeat(indent);
        writeln!(out, "{}{}", prefix, self.label).unwrap();
        for child in &self.children {
            out.push_str(&child.display_indent(indent + 1));
        }
        out
    }
}

impl std::fmt::Display for TraceNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display())
    }
}
