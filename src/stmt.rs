//! Statement parser: the top-level statement dispatch, directive
//! prologues, ASI, and the declaration/control-flow forms.

use crate::ast::{MethodKind, Node, NodeKind, VariableKind};
use crate::error::{ParseError, SyntaxErrorKind};
use crate::lval::check_lval;
use crate::options::DialectPlugin;
use crate::parser::Parser;
use crate::token::{TokenType, TokenValue};

impl Parser {
    /// Consumes leading string-literal expression statements as
    /// directives (`"use strict"` among them) before ordinary
    /// statements begin.
    pub fn parse_directive_prologue(&mut self, body: &mut Vec<Node>) -> Result<Vec<String>, ParseError> {
        let mut directives = Vec::new();
        loop {
            if !self.at(TokenType::String) {
                break;
            }
            let checkpoint = self.state.checkpoint(true);
            let raw = self.state.input[self.state.cur.start..self.state.cur.end].to_string();
            let stmt = self.parse_statement(true)?;
            match &stmt.kind {
                NodeKind::ExpressionStatement { expression } if matches!(expression.kind, NodeKind::StringLiteral { .. }) => {
                    let directive = raw.trim_matches(|c| c == '"' || c == '\'').to_string();
                    if directive == "use strict" {
                        self.state.strict = true;
                    }
                    directives.push(directive);
                    body.push(stmt);
                }
                _ => {
                    self.state.restore(checkpoint);
                    break;
                }
            }
        }
        if self.state.strict {
            if let Some(pos) = self.state.octal_position {
                let loc = self.state.position_for(pos);
                return Err(ParseError::new(pos, loc, SyntaxErrorKind::Scope, "Octal literals are not allowed in strict mode"));
            }
        }
        Ok(directives)
    }

    pub fn parse_statement(&mut self, top_level: bool) -> Result<Node, ParseError> {
        match self.cur_kind() {
            TokenType::BraceL => self.parse_block(false),
            TokenType::Semi => {
                let start = self.start();
                self.next()?;
                Ok(self.finish(start, NodeKind::EmptyStatement))
            }
            TokenType::Debugger => {
                let start = self.start();
                self.next()?;
                self.semicolon()?;
                Ok(self.finish(start, NodeKind::DebuggerStatement))
            }
            TokenType::If => self.parse_if(),
            TokenType::Return => self.parse_return(),
            TokenType::Switch => self.parse_switch(),
            TokenType::Throw => self.parse_throw(),
            TokenType::Try => self.parse_try(),
            TokenType::While => self.parse_while(),
            TokenType::Do => self.parse_do_while(),
            TokenType::For => self.parse_for(),
            TokenType::With => self.parse_with(),
            TokenType::Break => self.parse_break_continue(true),
            TokenType::Continue => self.parse_break_continue(false),
            TokenType::Var | TokenType::Const => self.parse_var_statement(),
            TokenType::Name if self.state.token_value_as_str() == Some("let") && self.next_token_starts_binding() => self.parse_var_statement(),
            TokenType::Function => self.parse_function_declaration(false),
            TokenType::Class => self.parse_class(true),
            TokenType::Import if top_level => self.parse_import(),
            TokenType::Export if top_level => self.parse_export(),
            TokenType::At => self.parse_decorated(),
            TokenType::Name if self.state.token_value_as_str() == Some("async") && self.next_token_is_function() => {
                self.next()?;
                self.parse_function_declaration(true)
            }
            TokenType::Name
                if self.state.token_value_as_str() == Some("type") && (self.has_plugin(DialectPlugin::Flow) || self.has_plugin(DialectPlugin::TypeScript)) =>
            {
                match self.try_parse(|p| p.parse_type_alias()) {
                    Ok(node) => Ok(node),
                    Err(_) => self.parse_labeled_or_expr_statement(),
                }
            }
            TokenType::Name if self.state.token_value_as_str() == Some("interface") && self.has_plugin(DialectPlugin::TypeScript) => {
                match self.try_parse(|p| p.parse_interface()) {
                    Ok(node) => Ok(node),
                    Err(_) => self.parse_labeled_or_expr_statement(),
                }
            }
            TokenType::Name => self.parse_labeled_or_expr_statement(),
            _ => self.parse_expression_statement(),
        }
    }

    /// `let` is only a declaration keyword when followed by a binding
    /// target (`[`, `{`, or an identifier); otherwise it's a contextual
    /// identifier used plainly (`let(0)`, `let = 1`, a labeled statement,
    /// ...). Checked via a throwaway one-token lookahead rather than by
    /// making `let` a distinct token type.
    fn next_token_starts_binding(&mut self) -> bool {
        let checkpoint = self.state.checkpoint(true);
        let starts = self.next().is_ok() && matches!(self.cur_kind(), TokenType::Name | TokenType::BraceL | TokenType::BracketL);
        self.state.restore(checkpoint);
        starts
    }

    /// `async function` is only a declaration if `function` follows with
    /// no line break in between — `async\nfunction f() {}` is an ASI
    /// boundary, and `async` parses as a plain identifier instead.
    fn next_token_is_function(&mut self) -> bool {
        let checkpoint = self.state.checkpoint(true);
        let is_function = self.next().is_ok() && self.cur_kind() == TokenType::Function && !self.state.cur.had_line_break_before;
        self.state.restore(checkpoint);
        is_function
    }

    /// A semicolon is required unless we're at `}`, EOF, or the previous
    /// token ended a line.
    pub fn semicolon(&mut self) -> Result<(), ParseError> {
        if self.eat(TokenType::Semi)? {
            return Ok(());
        }
        if self.at(TokenType::BraceR) || self.at(TokenType::Eof) || self.state.cur.had_line_break_before {
            return Ok(());
        }
        Err(self.unexpected("Unexpected token, expected \";\""))
    }

    pub fn parse_block(&mut self, is_function_body: bool) -> Result<Node, ParseError> {
        let start = self.start();
        self.expect(TokenType::BraceL)?;
        let mut body = Vec::new();
        let directives = if is_function_body { self.parse_directive_prologue(&mut body)? } else { Vec::new() };
        while !self.at(TokenType::BraceR) {
            body.push(self.parse_statement(false)?);
        }
        self.expect(TokenType::BraceR)?;
        Ok(self.finish(start, NodeKind::BlockStatement { body, directives }))
    }

    fn parse_if(&mut self) -> Result<Node, ParseError> {
        let start = self.start();
        self.next()?;
        self.expect(TokenType::ParenL)?;
        let test = self.parse_expression_node()?;
        self.expect(TokenType::ParenR)?;
        let consequent = self.parse_statement(false)?;
        let alternate = if self.eat(TokenType::Else)? { Some(Box::new(self.parse_statement(false)?)) } else { None };
        Ok(self.finish(start, NodeKind::IfStatement { test: Box::new(test), consequent: Box::new(consequent), alternate }))
    }

    fn parse_return(&mut self) -> Result<Node, ParseError> {
        if !self.state.in_function && !self.state.options.allow_return_outside_function {
            return Err(self.unexpected("'return' outside of function"));
        }
        let start = self.start();
        self.next()?;
        let argument = if self.at(TokenType::Semi) || self.at(TokenType::BraceR) || self.at(TokenType::Eof) || self.state.cur.had_line_break_before {
            None
        } else {
            Some(Box::new(self.parse_expression_node()?))
        };
        self.semicolon()?;
        Ok(self.finish(start, NodeKind::ReturnStatement { argument }))
    }

    fn parse_switch(&mut self) -> Result<Node, ParseError> {
        let start = self.start();
        self.next()?;
        self.expect(TokenType::ParenL)?;
        let discriminant = self.parse_expression_node()?;
        self.expect(TokenType::ParenR)?;
        self.expect(TokenType::BraceL)?;
        let mut cases = Vec::new();
        let mut seen_default = false;
        while !self.at(TokenType::BraceR) {
            let case_start = self.start();
            let test = if self.eat(TokenType::Case)? {
                let t = self.parse_expression_node()?;
                Some(Box::new(t))
            } else {
                self.expect(TokenType::Default)?;
                if seen_default {
                    return Err(self.unexpected("Multiple default clauses"));
                }
                seen_default = true;
                None
            };
            self.expect(TokenType::Colon)?;
            let mut consequent = Vec::new();
            while !matches!(self.cur_kind(), TokenType::Case | TokenType::Default | TokenType::BraceR) {
                consequent.push(self.parse_statement(false)?);
            }
            cases.push(self.finish(case_start, NodeKind::SwitchCase { test, consequent }));
        }
        self.expect(TokenType::BraceR)?;
        Ok(self.finish(start, NodeKind::SwitchStatement { discriminant: Box::new(discriminant), cases }))
    }

    fn parse_throw(&mut self) -> Result<Node, ParseError> {
        let start = self.start();
        self.next()?;
        if self.state.cur.had_line_break_before {
            return Err(self.unexpected("Illegal newline after throw"));
        }
        let argument = self.parse_expression_node()?;
        self.semicolon()?;
        Ok(self.finish(start, NodeKind::ThrowStatement { argument: Box::new(argument) }))
    }

    fn parse_try(&mut self) -> Result<Node, ParseError> {
        let start = self.start();
        self.next()?;
        let block = self.parse_block(false)?;
        let handler = if self.eat(TokenType::Catch)? {
            let catch_start = self.start();
            let param = if self.eat(TokenType::ParenL)? {
                let p = self.parse_binding_atom_public()?;
                self.expect(TokenType::ParenR)?;
                Some(Box::new(p))
            } else {
                None
            };
            let body = self.parse_block(false)?;
            Some(Box::new(self.finish(catch_start, NodeKind::CatchClause { param, body: Box::new(body) })))
        } else {
            None
        };
        let finalizer = if self.eat(TokenType::Finally)? { Some(Box::new(self.parse_block(false)?)) } else { None };
        if handler.is_none() && finalizer.is_none() {
            return Err(self.unexpected("Missing catch or finally after try"));
        }
        Ok(self.finish(start, NodeKind::TryStatement { block: Box::new(block), handler, finalizer }))
    }

    fn parse_while(&mut self) -> Result<Node, ParseError> {
        let start = self.start();
        self.next()?;
        self.expect(TokenType::ParenL)?;
        let test = self.parse_expression_node()?;
        self.expect(TokenType::ParenR)?;
        let body = self.parse_statement(false)?;
        Ok(self.finish(start, NodeKind::WhileStatement { test: Box::new(test), body: Box::new(body) }))
    }

    fn parse_do_while(&mut self) -> Result<Node, ParseError> {
        let start = self.start();
        self.next()?;
        let body = self.parse_statement(false)?;
        self.expect(TokenType::While)?;
        self.expect(TokenType::ParenL)?;
        let test = self.parse_expression_node()?;
        self.expect(TokenType::ParenR)?;
        self.eat(TokenType::Semi)?;
        Ok(self.finish(start, NodeKind::DoWhileStatement { body: Box::new(body), test: Box::new(test) }))
    }

    fn parse_with(&mut self) -> Result<Node, ParseError> {
        if self.state.strict {
            return Err(self.unexpected("'with' in strict mode"));
        }
        let start = self.start();
        self.next()?;
        self.expect(TokenType::ParenL)?;
        let object = self.parse_expression_node()?;
        self.expect(TokenType::ParenR)?;
        let body = self.parse_statement(false)?;
        Ok(self.finish(start, NodeKind::WithStatement { object: Box::new(object), body: Box::new(body) }))
    }

    fn parse_break_continue(&mut self, is_break: bool) -> Result<Node, ParseError> {
        let start = self.start();
        self.next()?;
        let label = if matches!(self.cur_kind(), TokenType::Name) && !self.state.cur.had_line_break_before {
            Some(Box::new(self.parse_identifier_public()?))
        } else {
            None
        };
        self.semicolon()?;
        Ok(self.finish(start, if is_break { NodeKind::BreakStatement { label } } else { NodeKind::ContinueStatement { label } }))
    }

    /// `for`, `for-in`, `for-of` and `for-await` disambiguation.
    fn parse_for(&mut self) -> Result<Node, ParseError> {
        let start = self.start();
        self.next()?;
        let is_await = self.eat(TokenType::Await)?;
        self.expect(TokenType::ParenL)?;
        let init = if self.at(TokenType::Semi) {
            None
        } else if matches!(self.cur_kind(), TokenType::Var | TokenType::Const) || (matches!(self.cur_kind(), TokenType::Name) && self.state.token_value_as_str() == Some("let")) {
            Some(self.parse_var_decl_head()?)
        } else {
            Some(self.parse_expression_node()?)
        };

        if matches!(self.cur_kind(), TokenType::Name) && self.state.token_value_as_str() == Some("of") {
            self.next()?;
            let right = self.parse_maybe_assign()?;
            self.expect(TokenType::ParenR)?;
            let body = self.parse_statement(false)?;
            let left = init.ok_or_else(|| self.unexpected("Expected for-of binding"))?;
            return Ok(self.finish(start, NodeKind::ForOfStatement { left: Box::new(left), right: Box::new(right), body: Box::new(body), is_await }));
        }
        if self.eat(TokenType::In)? {
            let right = self.parse_expression_node()?;
            self.expect(TokenType::ParenR)?;
            let body = self.parse_statement(false)?;
            let left = init.ok_or_else(|| self.unexpected("Expected for-in binding"))?;
            return Ok(self.finish(start, NodeKind::ForInStatement { left: Box::new(left), right: Box::new(right), body: Box::new(body) }));
        }

        self.expect(TokenType::Semi)?;
        let test = if self.at(TokenType::Semi) { None } else { Some(Box::new(self.parse_expression_node()?)) };
        self.expect(TokenType::Semi)?;
        let update = if self.at(TokenType::ParenR) { None } else { Some(Box::new(self.parse_expression_node()?)) };
        self.expect(TokenType::ParenR)?;
        let body = self.parse_statement(false)?;
        Ok(self.finish(start, NodeKind::ForStatement { init: init.map(Box::new), test, update, body: Box::new(body) }))
    }

    fn var_kind_from_cur(&self) -> VariableKind {
        match self.cur_kind() {
            TokenType::Var => VariableKind::Var,
            TokenType::Const => VariableKind::Const,
            _ => VariableKind::Let,
        }
    }

    fn parse_var_decl_head(&mut self) -> Result<Node, ParseError> {
        let start = self.start();
        let kind = self.var_kind_from_cur();
        self.next()?;
        let mut declarations = vec![self.parse_var_declarator()?];
        while self.eat(TokenType::Comma)? {
            declarations.push(self.parse_var_declarator()?);
        }
        Ok(self.finish(start, NodeKind::VariableDeclaration { kind, declarations }))
    }

    fn parse_var_statement(&mut self) -> Result<Node, ParseError> {
        let node = self.parse_var_decl_head()?;
        self.semicolon()?;
        Ok(node)
    }

    fn parse_var_declarator(&mut self) -> Result<Node, ParseError> {
        let start = self.start();
        let id = self.parse_binding_atom_public()?;
        let id = self.maybe_attach_type_annotation(id)?;
        check_lval(&id, true, self.state.strict)?;
        let init = if self.eat(TokenType::Eq)? { Some(Box::new(self.parse_maybe_assign()?)) } else { None };
        Ok(self.finish(start, NodeKind::VariableDeclarator { id: Box::new(id), init }))
    }

    fn parse_function_declaration(&mut self, is_async: bool) -> Result<Node, ParseError> {
        let start = self.start();
        self.expect(TokenType::Function)?;
        let generator = self.eat(TokenType::Star)?;
        let id = Some(Box::new(self.parse_identifier_public()?));
        let prev_in_function = self.state.in_function;
        self.state.in_function = true;
        let params = self.parse_binding_list(TokenType::ParenL, TokenType::ParenR)?;
        self.maybe_skip_return_type()?;
        let body = self.parse_block(true)?;
        self.state.in_function = prev_in_function;
        Ok(self.finish(start, NodeKind::FunctionDeclaration { id, params, body: Box::new(body), generator, is_async }))
    }

    fn parse_decorated(&mut self) -> Result<Node, ParseError> {
        let mut decorators = Vec::new();
        while self.at(TokenType::At) {
            let dec_start = self.start();
            self.next()?;
            let expression = self.parse_maybe_assign()?;
            decorators.push(self.finish(dec_start, NodeKind::Decorator { expression: Box::new(expression) }));
        }
        let mut class_node = self.parse_class(true)?;
        if let NodeKind::ClassDeclaration { decorators: existing, .. } = &mut class_node.kind {
            *existing = decorators;
        }
        Ok(class_node)
    }

    pub fn parse_class(&mut self, as_declaration: bool) -> Result<Node, ParseError> {
        let start = self.start();
        self.expect(TokenType::Class)?;
        let id = if matches!(self.cur_kind(), TokenType::Name) { Some(Box::new(self.parse_identifier_public()?)) } else { None };
        let super_class = if self.eat(TokenType::Extends)? { Some(Box::new(self.parse_subscripts_public()?)) } else { None };
        let body = self.parse_class_body()?;
        Ok(self.finish(
            start,
            if as_declaration {
                NodeKind::ClassDeclaration { id, super_class, body: Box::new(body), decorators: Vec::new() }
            } else {
                NodeKind::ClassExpression { id, super_class, body: Box::new(body), decorators: Vec::new() }
            },
        ))
    }

    fn parse_class_body(&mut self) -> Result<Node, ParseError> {
        let start = self.start();
        self.expect(TokenType::BraceL)?;
        let mut body = Vec::new();
        let mut seen_constructor = false;
        while !self.at(TokenType::BraceR) {
            if self.eat(TokenType::Semi)? {
                continue;
            }
            let member = self.parse_class_member()?;
            if let NodeKind::ClassMethod { kind: MethodKind::Constructor, .. } = &member.kind {
                if seen_constructor {
                    return Err(self.unexpected("A class may only have one constructor"));
                }
                seen_constructor = true;
            }
            body.push(member);
        }
        self.expect(TokenType::BraceR)?;
        Ok(self.finish(start, NodeKind::ClassBody { body }))
    }

    fn parse_class_member(&mut self) -> Result<Node, ParseError> {
        let start = self.state.cur.start;
        let mut decorators = Vec::new();
        while self.at(TokenType::At) {
            let dec_start = self.start();
            self.next()?;
            let expr = self.parse_maybe_assign()?;
            decorators.push(self.finish(dec_start, NodeKind::Decorator { expression: Box::new(expr) }));
        }
        self.state.comments.enter_node(start);
        let is_static = matches!(self.cur_kind(), TokenType::Name)
            && self.state.token_value_as_str() == Some("static")
            && !self.next_is_class_member_terminator();
        if is_static {
            self.next()?;
        }
        let is_async = matches!(self.cur_kind(), TokenType::Name) && self.state.token_value_as_str() == Some("async");
        if is_async {
            self.next()?;
        }
        let generator = self.eat(TokenType::Star)?;
        let is_private = self.at(TokenType::Hash);
        let (key, computed) = self.parse_class_member_key()?;
        let is_accessor = !is_private && !is_async && !generator && self.is_accessor_keyword(&key);
        if is_accessor {
            let kind = match &key.kind {
                NodeKind::Identifier { name, .. } if name == "get" => MethodKind::Get,
                _ => MethodKind::Set,
            };
            let (real_key, real_computed) = self.parse_class_member_key()?;
            let params = self.parse_binding_list(TokenType::ParenL, TokenType::ParenR)?;
            let body = self.parse_block(true)?;
            return Ok(self.finish(
                start,
                NodeKind::ClassMethod { kind, key: Box::new(real_key), params, body: Box::new(body), computed: real_computed, is_static, generator: false, is_async: false, decorators },
            ));
        }
        if self.at(TokenType::ParenL) {
            let kind = if !is_static && matches!(&key.kind, NodeKind::Identifier { name, .. } if name == "constructor") {
                MethodKind::Constructor
            } else {
                MethodKind::Method
            };
            let params = self.parse_binding_list(TokenType::ParenL, TokenType::ParenR)?;
            let body = self.parse_block(true)?;
            return Ok(if is_private {
                self.finish(start, NodeKind::ClassPrivateMethod { kind, key: Box::new(key), params, body: Box::new(body), is_static, generator, is_async })
            } else {
                self.finish(start, NodeKind::ClassMethod { kind, key: Box::new(key), params, body: Box::new(body), computed, is_static, generator, is_async, decorators })
            });
        }
        let value = if self.eat(TokenType::Eq)? { Some(Box::new(self.parse_maybe_assign()?)) } else { None };
        self.semicolon()?;
        Ok(if is_private {
            self.finish(start, NodeKind::ClassPrivateProperty { key: Box::new(key), value, is_static })
        } else {
            self.finish(start, NodeKind::ClassProperty { key: Box::new(key), value, computed, decorators })
        })
    }

    /// `static` is only the modifier keyword when it isn't itself being
    /// used as a member name (`static() {}`, `static = 1;`, `static;`,
    /// or a bare `static` as the class's only/last member). Checked via
    /// a one-token lookahead, the same way `let` is disambiguated from a
    /// binding keyword in [`Self::next_token_starts_binding`].
    fn next_is_class_member_terminator(&mut self) -> bool {
        let checkpoint = self.state.checkpoint(true);
        let is_terminator =
            self.next().is_ok() && matches!(self.cur_kind(), TokenType::ParenL | TokenType::Eq | TokenType::Semi | TokenType::BraceR);
        self.state.restore(checkpoint);
        is_terminator
    }

    fn is_accessor_keyword(&self, key: &Node) -> bool {
        matches!(&key.kind, NodeKind::Identifier { name, .. } if (name == "get" || name == "set"))
            && !matches!(self.cur_kind(), TokenType::ParenL | TokenType::Eq | TokenType::Semi | TokenType::BraceR)
    }

    fn parse_import(&mut self) -> Result<Node, ParseError> {
        let start = self.start();
        self.next()?;
        let mut specifiers = Vec::new();
        if matches!(self.cur_kind(), TokenType::Name) {
            let local = self.parse_identifier_public()?;
            specifiers.push(self.finish(local.start, NodeKind::ImportDefaultSpecifier { local: Box::new(local) }));
            self.eat(TokenType::Comma)?;
        }
        if self.eat(TokenType::Star)? {
            self.expect_contextual("as")?;
            let local = self.parse_identifier_public()?;
            specifiers.push(self.finish(local.start, NodeKind::ImportNamespaceSpecifier { local: Box::new(local) }));
        } else if self.eat(TokenType::BraceL)? {
            let mut first = true;
            while !self.at(TokenType::BraceR) {
                if !first {
                    self.expect(TokenType::Comma)?;
                    if self.at(TokenType::BraceR) {
                        break;
                    }
                }
                first = false;
                let spec_start = self.start();
                let imported = self.parse_identifier_public()?;
                let local = if self.eat_contextual("as")? { self.parse_identifier_public()? } else { imported.clone() };
                specifiers.push(self.finish(spec_start, NodeKind::ImportSpecifier { imported: Box::new(imported), local: Box::new(local) }));
            }
            self.expect(TokenType::BraceR)?;
        }
        if !specifiers.is_empty() {
            self.expect_contextual("from")?;
        }
        let source = self.parse_string_literal_public()?;
        self.semicolon()?;
        Ok(self.finish(start, NodeKind::ImportDeclaration { specifiers, source: Box::new(source) }))
    }

    fn parse_export(&mut self) -> Result<Node, ParseError> {
        let start = self.start();
        self.next()?;
        if self.eat(TokenType::Default)? {
            let declaration = if self.at(TokenType::Function) {
                self.parse_function_declaration(false)?
            } else if self.at(TokenType::Class) {
                self.parse_class(true)?
            } else {
                let expr = self.parse_maybe_assign()?;
                self.semicolon()?;
                expr
            };
            self.state.exported_identifiers.push("default".to_string());
            return Ok(self.finish(start, NodeKind::ExportDefaultDeclaration { declaration: Box::new(declaration) }));
        }
        if self.eat(TokenType::Star)? {
            self.expect_contextual("from")?;
            let source = self.parse_string_literal_public()?;
            self.semicolon()?;
            return Ok(self.finish(start, NodeKind::ExportAllDeclaration { source: Box::new(source) }));
        }
        if self.eat(TokenType::BraceL)? {
            let mut specifiers = Vec::new();
            let mut first = true;
            while !self.at(TokenType::BraceR) {
                if !first {
                    self.expect(TokenType::Comma)?;
                    if self.at(TokenType::BraceR) {
                        break;
                    }
                }
                first = false;
                let spec_start = self.start();
                let local = self.parse_identifier_public()?;
                let exported = if self.eat_contextual("as")? { self.parse_identifier_public()? } else { local.clone() };
                if let NodeKind::Identifier { name, .. } = &exported.kind {
                    self.state.exported_identifiers.push(name.clone());
                }
                specifiers.push(self.finish(spec_start, NodeKind::ExportSpecifier { local: Box::new(local), exported: Box::new(exported) }));
            }
            self.expect(TokenType::BraceR)?;
            let source = if self.eat_contextual("from")? { Some(Box::new(self.parse_string_literal_public()?)) } else { None };
            self.semicolon()?;
            return Ok(self.finish(start, NodeKind::ExportNamedDeclaration { declaration: None, specifiers, source }));
        }
        let declaration = self.parse_statement(true)?;
        self.collect_export_names(&declaration);
        Ok(self.finish(start, NodeKind::ExportNamedDeclaration { declaration: Some(Box::new(declaration)), specifiers: Vec::new(), source: None }))
    }

    fn collect_export_names(&mut self, node: &Node) {
        let name = match &node.kind {
            NodeKind::FunctionDeclaration { id: Some(id), .. } | NodeKind::ClassDeclaration { id: Some(id), .. } => match &id.kind {
                NodeKind::Identifier { name, .. } => Some(name.clone()),
                _ => None,
            },
            NodeKind::VariableDeclaration { declarations, .. } => {
                for decl in declarations {
                    if let NodeKind::VariableDeclarator { id, .. } = &decl.kind {
                        if let NodeKind::Identifier { name, .. } = &id.kind {
                            self.state.exported_identifiers.push(name.clone());
                        }
                    }
                }
                None
            }
            _ => None,
        };
        if let Some(name) = name {
            self.state.exported_identifiers.push(name);
        }
    }

    fn expect_contextual(&mut self, word: &str) -> Result<(), ParseError> {
        if self.eat_contextual(word)? {
            Ok(())
        } else {
            Err(self.unexpected(&format!("Unexpected token, expected \"{}\"", word)))
        }
    }

    pub(crate) fn eat_contextual(&mut self, word: &str) -> Result<bool, ParseError> {
        if matches!(self.cur_kind(), TokenType::Name) && self.state.token_value_as_str() == Some(word) {
            self.next()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    fn parse_string_literal_public(&mut self) -> Result<Node, ParseError> {
        let start = self.start();
        let value = match &self.state.cur.value {
            TokenValue::Str(s) => s.clone(),
            _ => return Err(self.unexpected("Expected a string literal")),
        };
        self.next()?;
        Ok(self.finish(start, NodeKind::StringLiteral { value }))
    }

    fn parse_labeled_or_expr_statement(&mut self) -> Result<Node, ParseError> {
        let checkpoint = self.state.checkpoint(true);
        let start = self.start();
        let ident = self.parse_identifier_public()?;
        if self.eat(TokenType::Colon)? {
            let body = self.parse_statement(false)?;
            return Ok(self.finish(start, NodeKind::LabeledStatement { label: Box::new(ident), body: Box::new(body) }));
        }
        self.state.restore(checkpoint);
        self.parse_expression_statement()
    }

    fn parse_expression_statement(&mut self) -> Result<Node, ParseError> {
        let start = self.start();
        let expr = self.parse_expression_node()?;
        self.semicolon()?;
        Ok(self.finish(start, NodeKind::ExpressionStatement { expression: Box::new(expr) }))
    }
}
