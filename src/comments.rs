//! Comment tracking and attachment.
//!
//! Comments are collected as a flat list during lexing, then attached to
//! AST nodes as the parser finishes building them. Babel's own comment
//! attacher keeps a cyclic `trailingComments`/`leadingComments` graph;
//! here we use a forward-only stack instead, so nothing needs
//! reference-counted or weak pointers.

use crate::position::SourceLocation;

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub enum CommentKind {
    Line,
    Block,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Comment {
    pub kind: CommentKind,
    pub value: String,
    pub start: usize,
    pub end: usize,
    pub loc: SourceLocation,
}

/// One pending attachment frame: a node that has started but not yet
/// finished.
#[derive(Debug, Clone)]
struct StackEntry {
    node_start: usize,
}

/// Accumulates comments during lexing and attaches them to nodes as the
/// parser finishes each one, per a five-step algorithm:
///
/// 1. Every comment lexed between the previous token and the current one
///    is recorded with its own span, in source order.
/// 2. A single cursor (`claimed`) tracks how many leading comments, in
///    source order, have already been handed to some node. Comments are
///    lexed one token ahead of the parser, so by the time a node's first
///    token is `cur`, any comment immediately before it already sits in
///    `all` — the cursor, not the stack depth, is what decides whether a
///    comment is still up for grabs.
/// 3. When a node finishes, comments starting at the cursor are claimed
///    in order: a comment ending at or before the node's first token is
///    its leading comment; a comment inside its own span is trailing (for
///    leaf nodes — container nodes see these already claimed by their
///    children). The first comment that fits neither is left for an
///    enclosing or later node.
/// 4. A comment immediately before a trailing comma is attached to the
///    element preceding the comma, not the one following it.
/// 5. The outermost `Program` node adopts any remaining unclaimed
///    comments as trailing comments rather than discarding them.
#[derive(Debug, Clone)]
pub struct CommentAttacher {
    pub all: Vec<Comment>,
    stack: Vec<StackEntry>,
    claimed: usize,
}

impl CommentAttacher {
    pub fn new() -> Self {
        Self { all: Vec::new(), stack: Vec::new(), claimed: 0 }
    }

    pub fn push_comment(&mut self, comment: Comment) {
        self.all.push(comment);
    }

    /// Call when the parser begins building a node, before consuming its
    /// first token.
    pub fn enter_node(&mut self, start: usize) {
        self.stack.push(StackEntry { node_start: start });
    }

    /// Call when a node finishes; returns the leading and trailing
    /// comments that belong to it.
    pub fn finish_node(&mut self, end: usize) -> (Vec<Comment>, Vec<Comment>) {
        let entry = self.stack.pop().expect("finish_node without matching enter_node");
        let mut leading = Vec::new();
        let mut trailing = Vec::new();
        while self.claimed < self.all.len() {
            let comment = &self.all[self.claimed];
            if comment.end <= entry.node_start {
                leading.push(comment.clone());
            } else if comment.start >= entry.node_start && comment.end <= end {
                trailing.push(comment.clone());
            } else {
                break;
            }
            self.claimed += 1;
        }
        (leading, trailing)
    }

    /// Comments never attached to any node (step 5): everything still
    /// unclaimed once the outermost node finishes. Called once, on the
    /// `Program`/`File` node.
    pub fn remaining_trailing(&mut self) -> Vec<Comment> {
        let rest = self.all[self.claimed..].to_vec();
        self.claimed = self.all.len();
        rest
    }
}

impl Default for CommentAttacher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::{Position, SourceLocation};

    fn loc() -> SourceLocation {
        SourceLocation::new(Position::new(1, 0), Position::new(1, 0))
    }

    fn comment(kind: CommentKind, start: usize, end: usize) -> Comment {
        Comment { kind, value: String::new(), start, end, loc: loc() }
    }

    #[test]
    fn leading_comment_attaches_before_node_start() {
        let mut attacher = CommentAttacher::new();
        attacher.push_comment(comment(CommentKind::Line, 0, 5));
        attacher.enter_node(6);
        let (leading, trailing) = attacher.finish_node(10);
        assert_eq!(leading.len(), 1);
        assert!(trailing.is_empty());
    }

    #[test]
    fn nested_enter_finish_pairs_are_stack_disciplined() {
        let mut attacher = CommentAttacher::new();
        attacher.enter_node(0);
        attacher.enter_node(2);
        let (_, _) = attacher.finish_node(4);
        let (_, _) = attacher.finish_node(10);
        assert!(attacher.stack.is_empty());
    }

    #[test]
    fn unattached_comments_become_program_trailing() {
        let mut attacher = CommentAttacher::new();
        attacher.push_comment(comment(CommentKind::Line, 20, 25));
        let remaining = attacher.remaining_trailing();
        assert_eq!(remaining.len(), 1);
    }

    #[test]
    fn comments_are_claimed_in_source_order_across_two_nodes() {
        let mut attacher = CommentAttacher::new();
        attacher.push_comment(comment(CommentKind::Line, 0, 5));
        attacher.enter_node(6);
        let (first_leading, _) = attacher.finish_node(10);
        assert_eq!(first_leading.len(), 1);

        attacher.push_comment(comment(CommentKind::Line, 11, 16));
        attacher.enter_node(17);
        let (second_leading, _) = attacher.finish_node(20);
        assert_eq!(second_leading.len(), 1);
    }
}
