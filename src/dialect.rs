//! Dialect plug-ins: JSX element/fragment parsing and a deliberately
//! shallow Flow/TypeScript type grammar, layered over the core
//! expression/statement parser rather than as separate overlay structs —
//! `Parser` already threads an active-plugin set through `Options`, so
//! each override point here is just a method gated on `has_plugin(...)`,
//! called from the one place in `expr.rs`/`stmt.rs` the base grammar
//! would otherwise dispatch unconditionally.
//!
//! JSX elements are not tokenized by the ordinary lexer (tag/attribute
//! names allow `-`, text runs allow anything up to `<`/`{`): this module
//! scans them directly off `state.input` by byte offset and only hands
//! control back to the ordinary token stream at `{expr}` boundaries,
//! mirroring the `readToken`/`updateContext` overrides Acorn's own JSX
//! plug-in uses instead of threading JSX awareness through the shared
//! lexer.

use crate::ast::{Node, NodeKind};
use crate::char_classifier::{is_identifier_char, is_identifier_start};
use crate::error::ParseError;
use crate::options::DialectPlugin;
use crate::parser::Parser;
use crate::position::SourceLocation;
use crate::token::TokenType;

impl Parser {
    fn jchar(&self, pos: usize) -> Option<char> {
        self.state.input[pos..].chars().next()
    }

    fn jloc(&self, start: usize, end: usize) -> SourceLocation {
        SourceLocation::new(self.state.position_for(start), self.state.position_for(end))
    }

    fn jskip_space(&self, mut pos: usize) -> usize {
        while let Some(c) = self.jchar(pos) {
            if c.is_whitespace() {
                pos += c.len_utf8();
            } else {
                break;
            }
        }
        pos
    }

    // -- JSX ----------------------------------------------------------------

    /// Entry point called from `expr.rs` when the current token is the
    /// `<` that starts a JSX element or fragment.
    pub fn parse_jsx(&mut self) -> Result<Node, ParseError> {
        let start = self.start();
        let after_lt = self.state.cur.end;
        let (kind, end) = self.parse_jsx_element_at(after_lt)?;
        let (leading, trailing) = self.state.comments.finish_node(end);
        let loc = self.jloc(start, end);
        self.state.pos = end;
        self.state.next_token()?;
        let mut node = Node::new(start, end, loc, kind);
        node.leading_comments = leading;
        node.trailing_comments = trailing;
        Ok(node)
    }

    fn jname_at(&self, pos: usize) -> Result<(String, usize), ParseError> {
        let first = self.jchar(pos).ok_or_else(|| self.error_at(pos, "Unexpected end of input in JSX name"))?;
        if !is_identifier_start(first as u32) {
            return Err(self.error_at(pos, "Expected a JSX identifier"));
        }
        let mut p = pos + first.len_utf8();
        while let Some(c) = self.jchar(p) {
            if is_identifier_char(c as u32) || c == '-' {
                p += c.len_utf8();
            } else {
                break;
            }
        }
        Ok((self.state.input[pos..p].to_string(), p))
    }

    /// Parses a tag/attribute name, including `ns:name` and `a.b.c`
    /// member forms (`JSXNamespacedName`/`JSXMemberExpression`).
    fn parse_jsx_name_node(&mut self, pos: usize) -> Result<(Node, usize), ParseError> {
        let (first, mut p) = self.jname_at(pos)?;
        let mut node = Node::new(pos, p, self.jloc(pos, p), NodeKind::JSXIdentifier { name: first });
        if self.jchar(p) == Some(':') {
            let (rest, p2) = self.jname_at(p + 1)?;
            let name_node = Node::new(p + 1, p2, self.jloc(p + 1, p2), NodeKind::JSXIdentifier { name: rest });
            node = Node::new(pos, p2, self.jloc(pos, p2), NodeKind::JSXNamespacedName { namespace: Box::new(node), name: Box::new(name_node) });
            p = p2;
        }
        while self.jchar(p) == Some('.') {
            let (rest, p2) = self.jname_at(p + 1)?;
            let prop_node = Node::new(p + 1, p2, self.jloc(p + 1, p2), NodeKind::JSXIdentifier { name: rest });
            node = Node::new(pos, p2, self.jloc(pos, p2), NodeKind::JSXMemberExpression { object: Box::new(node), property: Box::new(prop_node) });
            p = p2;
        }
        Ok((node, p))
    }

    fn jsx_string_at(&self, pos: usize) -> Result<(String, usize), ParseError> {
        let quote = self.jchar(pos).unwrap();
        let mut p = pos + 1;
        let content_start = p;
        loop {
            match self.jchar(p) {
                None => return Err(self.error_at(pos, "Unterminated JSX attribute string")),
                Some(c) if c == quote => return Ok((self.state.input[content_start..p].to_string(), p + 1)),
                Some(c) => p += c.len_utf8(),
            }
        }
    }

    fn parse_jsx_attributes_at(&mut self, mut pos: usize) -> Result<(Vec<Node>, usize), ParseError> {
        let mut attrs = Vec::new();
        loop {
            pos = self.jskip_space(pos);
            match self.jchar(pos) {
                Some('/') | Some('>') | None => break,
                Some('{') => {
                    let attr_start = pos;
                    let mut p = self.jskip_space(pos + 1);
                    if self.state.input[p..].starts_with("...") {
                        p += 3;
                    } else {
                        return Err(self.error_at(p, "Unexpected token, expected '...' in JSX spread attribute"));
                    }
                    self.state.pos = p;
                    self.state.next_token()?;
                    let argument = self.parse_maybe_assign()?;
                    if !self.at(TokenType::BraceR) {
                        return Err(self.unexpected("Expected '}' to close JSX spread attribute"));
                    }
                    let end = self.state.cur.end;
                    attrs.push(Node::new(attr_start, end, self.jloc(attr_start, end), NodeKind::JSXSpreadAttribute { argument: Box::new(argument) }));
                    pos = end;
                }
                _ => {
                    let attr_start = pos;
                    let (name_node, p2) = self.parse_jsx_name_node(pos)?;
                    let mut p = self.jskip_space(p2);
                    let value = if self.jchar(p) == Some('=') {
                        p = self.jskip_space(p + 1);
                        match self.jchar(p) {
                            Some('"') | Some('\'') => {
                                let value_start = p;
                                let (s, p3) = self.jsx_string_at(p)?;
                                let node = Node::new(value_start, p3, self.jloc(value_start, p3), NodeKind::StringLiteral { value: s });
                                p = p3;
                                Some(node)
                            }
                            Some('{') => {
                                let value_start = p;
                                self.state.pos = p + 1;
                                self.state.next_token()?;
                                let expr = self.parse_maybe_assign()?;
                                if !self.at(TokenType::BraceR) {
                                    return Err(self.unexpected("Expected '}' to close JSX attribute value"));
                                }
                                let end = self.state.cur.end;
                                p = end;
                                Some(Node::new(value_start, end, self.jloc(value_start, end), NodeKind::JSXExpressionContainer { expression: Box::new(expr) }))
                            }
                            _ => return Err(self.error_at(p, "Unexpected token in JSX attribute value")),
                        }
                    } else {
                        None
                    };
                    let end = p;
                    attrs.push(Node::new(attr_start, end, self.jloc(attr_start, end), NodeKind::JSXAttribute { name: Box::new(name_node), value: value.map(Box::new) }));
                    pos = end;
                }
            }
        }
        Ok((attrs, pos))
    }

    fn parse_jsx_children(&mut self, mut pos: usize) -> Result<(Vec<Node>, usize), ParseError> {
        let mut children = Vec::new();
        loop {
            let text_start = pos;
            while let Some(c) = self.jchar(pos) {
                if c == '<' || c == '{' {
                    break;
                }
                pos += c.len_utf8();
            }
            if pos > text_start {
                let text = self.state.input[text_start..pos].to_string();
                children.push(Node::new(text_start, pos, self.jloc(text_start, pos), NodeKind::JSXText { value: text }));
            }
            match self.jchar(pos) {
                Some('{') => {
                    let start = pos;
                    self.state.pos = pos + 1;
                    self.state.next_token()?;
                    if self.at(TokenType::BraceR) {
                        let end = self.state.cur.end;
                        let empty = Node::new(end, end, self.jloc(end, end), NodeKind::JSXEmptyExpression);
                        children.push(Node::new(start, end, self.jloc(start, end), NodeKind::JSXExpressionContainer { expression: Box::new(empty) }));
                        pos = end;
                    } else if self.at(TokenType::Ellipsis) {
                        self.next()?;
                        let expr = self.parse_maybe_assign()?;
                        if !self.at(TokenType::BraceR) {
                            return Err(self.unexpected("Expected '}' to close JSX spread child"));
                        }
                        let end = self.state.cur.end;
                        children.push(Node::new(start, end, self.jloc(start, end), NodeKind::JSXSpreadChild { expression: Box::new(expr) }));
                        pos = end;
                    } else {
                        let expr = self.parse_maybe_assign()?;
                        if !self.at(TokenType::BraceR) {
                            return Err(self.unexpected("Expected '}' to close JSX expression"));
                        }
                        let end = self.state.cur.end;
                        children.push(Node::new(start, end, self.jloc(start, end), NodeKind::JSXExpressionContainer { expression: Box::new(expr) }));
                        pos = end;
                    }
                }
                Some('<') => {
                    if self.jchar(pos + 1) == Some('/') {
                        break;
                    }
                    let child_start = pos;
                    let (kind, after) = self.parse_jsx_element_at(pos + 1)?;
                    children.push(Node::new(child_start, after, self.jloc(child_start, after), kind));
                    pos = after;
                }
                _ => break,
            }
        }
        Ok((children, pos))
    }

    fn parse_jsx_closing(&mut self, pos: usize) -> Result<(Option<Node>, usize), ParseError> {
        if self.jchar(pos) != Some('<') || self.jchar(pos + 1) != Some('/') {
            return Err(self.error_at(pos, "Expected corresponding JSX closing tag"));
        }
        let start = pos;
        let mut p = self.jskip_space(pos + 2);
        let name = if self.jchar(p) == Some('>') {
            None
        } else {
            let (n, p2) = self.parse_jsx_name_node(p)?;
            p = p2;
            Some(n)
        };
        p = self.jskip_space(p);
        if self.jchar(p) != Some('>') {
            return Err(self.error_at(p, "Expected '>' to close JSX closing tag"));
        }
        let end = p + 1;
        let closing = name.map(|n| Node::new(start, end, self.jloc(start, end), NodeKind::JSXClosingElement { name: Box::new(n) }));
        Ok((closing, end))
    }

    /// Parses one JSX element/fragment body, given `pos` pointing just
    /// past its opening `<`. Returns the finished node kind and the
    /// offset just past its closing `>`.
    fn parse_jsx_element_at(&mut self, pos: usize) -> Result<(NodeKind, usize), ParseError> {
        if self.jchar(pos) == Some('>') {
            let (children, p) = self.parse_jsx_children(pos + 1)?;
            let (_closing, end) = self.parse_jsx_closing(p)?;
            return Ok((NodeKind::JSXFragment { children }, end));
        }
        let open_start = pos;
        let (name, p) = self.parse_jsx_name_node(pos)?;
        let (attributes, p2) = self.parse_jsx_attributes_at(p)?;
        let p3 = self.jskip_space(p2);
        if self.jchar(p3) == Some('/') && self.jchar(p3 + 1) == Some('>') {
            let open_end = p3 + 2;
            let opening = Node::new(open_start - 1, open_end, self.jloc(open_start - 1, open_end), NodeKind::JSXOpeningElement { name: Box::new(name), attributes, self_closing: true });
            return Ok((NodeKind::JSXElement { opening_element: Box::new(opening), children: Vec::new(), closing_element: None }, open_end));
        }
        if self.jchar(p3) != Some('>') {
            return Err(self.error_at(p3, "Unterminated JSX opening tag"));
        }
        let open_end = p3 + 1;
        let opening = Node::new(open_start - 1, open_end, self.jloc(open_start - 1, open_end), NodeKind::JSXOpeningElement { name: Box::new(name), attributes, self_closing: false });
        let (children, p4) = self.parse_jsx_children(open_end)?;
        let (closing, end) = self.parse_jsx_closing(p4)?;
        Ok((NodeKind::JSXElement { opening_element: Box::new(opening), children, closing_element: closing }, end))
    }

    // -- Flow / TypeScript shallow type grammar ----------------------------

    /// Parses a type position: union of primary types, with Flow's
    /// `?Type` nullable prefix. Deliberately shallow — generics are
    /// recognized and their argument list skipped rather than structured
    /// (`ast.rs` keeps only `TSTypeReference { type_name }`), matching
    /// the Non-goal that this core produce trees, not a type checker.
    pub(crate) fn parse_type(&mut self) -> Result<Node, ParseError> {
        let is_flow = self.has_plugin(DialectPlugin::Flow);
        let start = self.start();
        if is_flow && self.eat(TokenType::Question)? {
            let inner = self.parse_type()?;
            return Ok(self.finish(start, NodeKind::FlowNullableTypeAnnotation { type_annotation: Box::new(inner) }));
        }
        let mut left = self.parse_primary_type(is_flow)?;
        while self.at(TokenType::BitwiseOr) {
            self.next()?;
            let right = self.parse_primary_type(is_flow)?;
            let types = match left.kind {
                NodeKind::TSUnionType { types } => {
                    let mut types = types;
                    types.push(right);
                    types
                }
                _ => vec![left, right],
            };
            left = self.finish(start, NodeKind::TSUnionType { types });
        }
        Ok(left)
    }

    fn parse_primary_type(&mut self, is_flow: bool) -> Result<Node, ParseError> {
        let start = self.start();
        if self.at(TokenType::Null) {
            self.next()?;
            return Ok(self.finish(start, NodeKind::TSNullKeyword));
        }
        if self.at(TokenType::Void) {
            self.next()?;
            return Ok(self.finish(start, NodeKind::TSVoidKeyword));
        }
        if !matches!(self.cur_kind(), TokenType::Name) {
            return Err(self.unexpected("Unexpected token in type position"));
        }
        let word = self.state.token_value_as_str().unwrap_or_default().to_string();
        let kind = match word.as_str() {
            "any" if is_flow => {
                self.next()?;
                NodeKind::FlowAnyTypeAnnotation
            }
            "any" => {
                self.next()?;
                NodeKind::TSAnyKeyword
            }
            "unknown" => {
                self.next()?;
                NodeKind::TSUnknownKeyword
            }
            "number" if is_flow => {
                self.next()?;
                NodeKind::FlowNumberTypeAnnotation
            }
            "number" => {
                self.next()?;
                NodeKind::TSNumberKeyword
            }
            "string" if is_flow => {
                self.next()?;
                NodeKind::FlowStringTypeAnnotation
            }
            "string" => {
                self.next()?;
                NodeKind::TSStringKeyword
            }
            "boolean" if is_flow => {
                self.next()?;
                NodeKind::FlowBooleanTypeAnnotation
            }
            "boolean" => {
                self.next()?;
                NodeKind::TSBooleanKeyword
            }
            "undefined" => {
                self.next()?;
                NodeKind::TSUndefinedKeyword
            }
            _ => {
                let name_node = self.parse_identifier_public()?;
                if self.at(TokenType::RelationalOp) && self.state.cur.raw == "<" {
                    self.skip_type_arguments()?;
                }
                NodeKind::TSTypeReference { type_name: Box::new(name_node) }
            }
        };
        Ok(self.finish(start, kind))
    }

    /// Skips a `<...>` type-argument list by bracket depth. Does not
    /// split `>>`/`>>>` back into single `>` tokens, so nested generics
    /// closed with a compound shift token are not supported — see
    /// `DESIGN.md`'s Open Question on `inType` handling.
    fn skip_type_arguments(&mut self) -> Result<(), ParseError> {
        self.next()?; // the opening '<'
        let mut depth = 1u32;
        while depth > 0 {
            if self.at(TokenType::Eof) {
                return Err(self.unexpected("Unterminated type argument list"));
            }
            if self.at(TokenType::RelationalOp) {
                if self.state.cur.raw == "<" {
                    depth += 1;
                } else if self.state.cur.raw == ">" {
                    depth -= 1;
                }
            }
            self.next()?;
        }
        Ok(())
    }

    /// Attaches a `: Type` annotation to an already-parsed `Identifier`
    /// binding, when a Flow/TypeScript plug-in is active and one follows.
    pub(crate) fn maybe_attach_type_annotation(&mut self, mut node: Node) -> Result<Node, ParseError> {
        if !(self.has_plugin(DialectPlugin::Flow) || self.has_plugin(DialectPlugin::TypeScript)) {
            return Ok(node);
        }
        if !self.eat(TokenType::Colon)? {
            return Ok(node);
        }
        let annotation = self.parse_type()?;
        if let NodeKind::Identifier { type_annotation, .. } = &mut node.kind {
            *type_annotation = Some(Box::new(annotation));
        }
        Ok(node)
    }

    /// Consumes and discards a `: ReturnType` annotation between a
    /// parameter list and a function body, so functions written in the
    /// dialects still parse even though the return type itself is not
    /// retained on any `ast.rs` node.
    pub(crate) fn maybe_skip_return_type(&mut self) -> Result<(), ParseError> {
        if !(self.has_plugin(DialectPlugin::Flow) || self.has_plugin(DialectPlugin::TypeScript)) {
            return Ok(());
        }
        if self.eat(TokenType::Colon)? {
            self.parse_type()?;
        }
        Ok(())
    }

    /// `type Name = Type;`, producing the Flow or TS alias node kind
    /// depending on which plug-in is active.
    pub(crate) fn parse_type_alias(&mut self) -> Result<Node, ParseError> {
        let start = self.start();
        self.next()?; // 'type'
        let id = self.parse_identifier_public()?;
        self.expect(TokenType::Eq)?;
        let annotation = self.parse_type()?;
        self.semicolon()?;
        let kind = if self.has_plugin(DialectPlugin::Flow) {
            NodeKind::FlowTypeAlias { id: Box::new(id), right: Box::new(annotation) }
        } else {
            NodeKind::TSTypeAliasDeclaration { id: Box::new(id), type_annotation: Box::new(annotation) }
        };
        Ok(self.finish(start, kind))
    }

    /// `interface Name { ... }` (TypeScript-only node kind, reused for
    /// Flow's `interface` per `DESIGN.md`'s Open Question decision).
    pub(crate) fn parse_interface(&mut self) -> Result<Node, ParseError> {
        let start = self.start();
        self.next()?; // 'interface'
        let id = self.parse_identifier_public()?;
        if self.state.token_value_as_str() == Some("extends") || self.at(TokenType::Extends) {
            self.next()?;
            self.parse_identifier_public()?;
        }
        self.expect(TokenType::BraceL)?;
        let mut body = Vec::new();
        while !self.at(TokenType::BraceR) {
            let member_start = self.start();
            let (key, computed) = self.parse_class_member_key()?;
            let type_annotation = if self.eat(TokenType::Colon)? { Some(Box::new(self.parse_type()?)) } else { None };
            self.eat(TokenType::Semi)?;
            self.eat(TokenType::Comma)?;
            body.push(self.finish(member_start, NodeKind::TSPropertySignature { key: Box::new(key), type_annotation, computed }));
        }
        self.expect(TokenType::BraceR)?;
        Ok(self.finish(start, NodeKind::TSInterfaceDeclaration { id: Box::new(id), body }))
    }
}
