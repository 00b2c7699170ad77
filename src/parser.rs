//! Parser state glue: ties [`State`], the lexer, and the expression and
//! statement grammars together behind the public `parse`/
//! `parse_expression` entry points.

use crate::ast::{Node, NodeKind};
use crate::error::{ParseError, SyntaxErrorKind};
use crate::options::{DialectPlugin, Options};
use crate::position::SourceLocation;
use crate::state::State;
use crate::token::TokenType;

pub struct Parser {
    pub state: State,
}

impl Parser {
    pub fn new(input: impl Into<String>, options: Options) -> Result<Self, ParseError> {
        options
            .validate_plugins()
            .map_err(|message| ParseError::new(0, crate::position::Position::new(options.start_line, 0), SyntaxErrorKind::Plugin, message))?;
        let mut state = State::new(input, options);
        Self::skip_hashbang(&mut state);
        state.next_token()?;
        Ok(Self { state })
    }

    /// `#!/usr/bin/env node`-style hashbang comments are only legal at
    /// byte 0 and are skipped before the first real token is lexed.
    fn skip_hashbang(state: &mut State) {
        if state.input.starts_with("#!") {
            let end = state.input.find('\n').unwrap_or(state.input.len());
            state.pos = end;
        }
    }

    pub fn has_plugin(&self, plugin: DialectPlugin) -> bool {
        self.state.options.has_plugin(plugin)
    }

    // -- token-stream helpers -------------------------------------------------

    pub fn cur_kind(&self) -> TokenType {
        self.state.cur.kind
    }

    pub fn at(&self, kind: TokenType) -> bool {
        self.state.cur.kind == kind
    }

    pub fn next(&mut self) -> Result<(), ParseError> {
        if self.state.options.tokens {
            self.state.collected_tokens.push(self.state.cur.clone());
        }
        self.state.next_token()
    }

    /// Consumes the current token if it matches `kind`, returning
    /// whether it did.
    pub fn eat(&mut self, kind: TokenType) -> Result<bool, ParseError> {
        if self.at(kind) {
            self.next()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    pub fn expect(&mut self, kind: TokenType) -> Result<(), ParseError> {
        if self.eat(kind)? {
            Ok(())
        } else {
            Err(self.unexpected(&format!("Unexpected token, expected \"{}\"", kind.info().label)))
        }
    }

    pub fn unexpected(&self, message: &str) -> ParseError {
        ParseError::new(self.state.cur.start, self.state.cur.loc.start, SyntaxErrorKind::Grammar, message)
    }

    pub fn error_at(&self, pos: usize, message: impl Into<String>) -> ParseError {
        ParseError::new(pos, self.state.position_for(pos), SyntaxErrorKind::Grammar, message)
    }

    // -- node construction -----------------------------------------------------

    pub fn start(&mut self) -> usize {
        let start = self.state.cur.start;
        self.state.comments.enter_node(start);
        start
    }

    pub fn finish(&mut self, start: usize, kind: NodeKind) -> Node {
        let end = self.state.prev_end;
        let loc = SourceLocation::new(self.state.position_for(start), self.state.prev_end_loc);
        let (leading, trailing) = self.state.comments.finish_node(end);
        let mut node = Node::new(start, end, loc, kind);
        node.leading_comments = leading;
        node.trailing_comments = trailing;
        if self.state.options.ranges {
            node.range = Some([start, end]);
        }
        node
    }

    // -- speculative parsing -----------------------------------------------------

    /// Runs `f` against a checkpointed clone of parser state. If it
    /// succeeds, the clone is committed back; if it fails, the original
    /// state is left untouched and the error is returned to the caller
    /// to decide what to try next.
    pub fn try_parse<T>(&mut self, f: impl FnOnce(&mut Parser) -> Result<T, ParseError>) -> Result<T, ParseError> {
        log::debug!("speculative parse entered at byte {}", self.state.cur.start);
        let checkpoint = self.state.checkpoint(false);
        match f(self) {
            Ok(value) => Ok(value),
            Err(e) => {
                log::debug!("speculative parse rolled back: {}", e.message);
                self.state.restore(checkpoint);
                Err(e)
            }
        }
    }

    // -- top level ---------------------------------------------------------------

    pub fn parse_program(&mut self) -> Result<Node, ParseError> {
        let start = self.start();
        let mut body = Vec::new();
        let directives = self.parse_directive_prologue(&mut body)?;
        while !self.at(TokenType::Eof) {
            body.push(self.parse_statement(true)?);
        }
        self.check_duplicate_exports()?;
        let mut node = self.finish(start, NodeKind::Program { body, source_type: self.state.options.source_type, directives });
        let trailing = self.state.comments.remaining_trailing();
        node.trailing_comments.extend(trailing);
        Ok(node)
    }

    pub fn parse_file(&mut self) -> Result<Node, ParseError> {
        let start = self.start();
        let program = self.parse_program()?;
        let comments = self.state.comments.all.clone();
        let tokens = self.state.options.tokens.then(|| self.state.collected_tokens.clone());
        Ok(self.finish(start, NodeKind::File { program: Box::new(program), comments, tokens }))
    }

    fn check_duplicate_exports(&self) -> Result<(), ParseError> {
        let mut seen = std::collections::HashSet::new();
        for name in &self.state.exported_identifiers {
            if !seen.insert(name) {
                return Err(self.error_at(0, format!("Duplicate export '{}'", name)));
            }
        }
        Ok(())
    }
}

/// Parses a full program.
pub fn parse(input: &str, options: Options) -> Result<Node, ParseError> {
    let mut parser = Parser::new(input, options)?;
    parser.parse_file()
}

/// Parses a single expression, with no surrounding statement grammar.
pub fn parse_expression(input: &str, options: Options) -> Result<Node, ParseError> {
    let mut parser = Parser::new(input, options)?;
    let expr = parser.parse_expression_node()?;
    if !parser.at(TokenType::Eof) {
        return Err(parser.unexpected("Unexpected token"));
    }
    Ok(expr)
}
