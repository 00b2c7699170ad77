//! Mutable parser state.
//!
//! Speculative parsing (arrow-vs-paren, async-arrow-vs-call, JSX-vs-
//! relational, TS type-args-vs-`<`) works by cloning this whole struct,
//! trying a production against the clone, and either committing the
//! clone back over the original or discarding it — a checkpoint/restore
//! scheme rather than exception-based backtracking.

use crate::comments::{Comment, CommentAttacher};
use crate::context::ContextStack;
use crate::options::Options;
use crate::position::{LineTable, Position, SourceLocation};
use crate::token::{Token, TokenType, TokenValue};

/// Labeled-statement stack entry, used to validate `break`/`continue`
/// targets and loop-only labels.
#[derive(Debug, Clone)]
pub struct LabelEntry {
    pub name: Option<String>,
    pub is_loop: bool,
}

#[derive(Debug, Clone)]
pub struct State {
    pub input: String,
    pub options: Options,
    line_table: LineTable,

    pub pos: usize,
    pub line: usize,
    pub column: usize,

    pub cur: Token,
    pub prev_end: usize,
    pub prev_end_loc: Position,

    /// Whether the token about to be lexed may start an expression
    /// (governs `/` as regex vs. division, and `{` as block vs. object).
    pub expr_allowed: bool,

    pub context: ContextStack,
    pub comments: CommentAttacher,

    pub strict: bool,
    pub in_function: bool,
    pub in_generator: bool,
    pub in_async: bool,
    pub in_method: bool,
    pub in_class_property: bool,
    pub in_property_name: bool,
    pub class_depth: u32,

    pub labels: Vec<LabelEntry>,
    pub decorator_stack: Vec<u32>,

    pub collected_tokens: Vec<Token>,
    pub exported_identifiers: Vec<String>,

    pub octal_position: Option<usize>,
    pub invalid_template_escape_position: Option<usize>,
}

impl State {
    pub fn new(input: impl Into<String>, options: Options) -> Self {
        let input = input.into();
        let line_table = LineTable::new(&input, options.start_line);
        let start_pos = Position::new(options.start_line, 0);
        Self {
            input,
            pos: 0,
            line: options.start_line,
            column: 0,
            cur: Token::new(TokenType::Eof, 0, 0, SourceLocation::new(start_pos, start_pos)),
            prev_end: 0,
            prev_end_loc: start_pos,
            expr_allowed: true,
            context: ContextStack::new(),
            comments: CommentAttacher::new(),
            strict: options.strict_mode.unwrap_or(false),
            in_function: false,
            in_generator: false,
            in_async: false,
            in_method: false,
            in_class_property: false,
            in_property_name: false,
            class_depth: 0,
            labels: Vec::new(),
            decorator_stack: Vec::new(),
            collected_tokens: Vec::new(),
            exported_identifiers: Vec::new(),
            octal_position: None,
            invalid_template_escape_position: None,
            options,
        }
    }

    pub fn position_for(&self, offset: usize) -> Position {
        self.line_table.position_for(offset)
    }

    pub fn push_comment(&mut self, comment: Comment) {
        self.comments.push_comment(comment);
    }

    /// A full checkpoint for speculative parsing. `skip_arrays` avoids
    /// copying `collected_tokens`/`comments.all` when the caller only
    /// needs to test whether a production parses, not keep its token
    /// trace.
    pub fn checkpoint(&self, skip_arrays: bool) -> State {
        let mut clone = self.clone();
        if skip_arrays {
            clone.collected_tokens = Vec::new();
        }
        clone
    }

    /// Restore from a previously taken checkpoint, discarding whatever
    /// speculative progress was made on `self`.
    pub fn restore(&mut self, checkpoint: State) {
        *self = checkpoint;
    }

    pub fn cur_starts_expr(&self) -> bool {
        self.cur.kind.info().starts_expr
    }

    pub fn token_value_as_str(&self) -> Option<&str> {
        match &self.cur.value {
            TokenValue::Str(s) => Some(s.as_str()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checkpoint_restore_roundtrips_position() {
        let mut state = State::new("let x = 1;", Options::default());
        state.pos = 4;
        let checkpoint = state.checkpoint(false);
        state.pos = 999;
        state.restore(checkpoint);
        assert_eq!(state.pos, 4);
    }

    #[test]
    fn skip_arrays_drops_collected_tokens_only() {
        let mut state = State::new("x", Options::default());
        state.collected_tokens.push(Token::new(TokenType::Name, 0, 1, SourceLocation::default()));
        let checkpoint = state.checkpoint(true);
        assert!(checkpoint.collected_tokens.is_empty());
        assert_eq!(state.collected_tokens.len(), 1);
    }

    #[test]
    fn strict_mode_follows_options() {
        let state = State::new("x", Options::default().with_strict_mode(true));
        assert!(state.strict);
    }
}
