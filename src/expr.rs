//! Expression parser: precedence climbing over binary operators, with
//! the atom/subscript/unary layers Acorn-style parsers split out so
//! arrow-function and pattern disambiguation have a place to hook in.

use crate::ast::{MethodKind, Node, NodeKind, TemplateElementValue};
use crate::error::ParseError;
use crate::lval::to_assignable;
use crate::options::DialectPlugin;
use crate::parser::Parser;
use crate::token::{TokenType, TokenValue};

impl Parser {
    pub fn parse_expression_node(&mut self) -> Result<Node, ParseError> {
        let start = self.state.cur.start;
        let expr = self.parse_maybe_assign()?;
        if self.at(TokenType::Comma) {
            self.state.comments.enter_node(start);
            let mut expressions = vec![expr];
            while self.eat(TokenType::Comma)? {
                expressions.push(self.parse_maybe_assign()?);
            }
            return Ok(self.finish(start, NodeKind::SequenceExpression { expressions }));
        }
        Ok(expr)
    }

    pub fn parse_maybe_assign(&mut self) -> Result<Node, ParseError> {
        if self.at(TokenType::Yield) {
            return self.parse_yield();
        }
        if let Some(arrow) = self.try_parse_arrow()? {
            return Ok(arrow);
        }
        let start = self.state.cur.start;
        let left = self.parse_conditional()?;
        if let Some(operator) = self.assignment_operator() {
            self.state.comments.enter_node(start);
            self.next()?;
            let target = if operator == "=" { to_assignable(left, false)? } else { left };
            let right = self.parse_maybe_assign()?;
            return Ok(self.finish(start, NodeKind::AssignmentExpression { operator, left: Box::new(target), right: Box::new(right) }));
        }
        Ok(left)
    }

    fn assignment_operator(&self) -> Option<String> {
        match self.cur_kind() {
            TokenType::Eq => Some("=".to_string()),
            TokenType::AssignOp => Some(self.state.cur.raw.clone()),
            _ => None,
        }
    }

    fn parse_yield(&mut self) -> Result<Node, ParseError> {
        let start = self.start();
        self.next()?;
        let delegate = self.eat(TokenType::Star)?;
        let argument = if self.can_start_yield_argument() {
            Some(Box::new(self.parse_maybe_assign()?))
        } else {
            None
        };
        Ok(self.finish(start, NodeKind::YieldExpression { argument, delegate }))
    }

    fn can_start_yield_argument(&self) -> bool {
        !matches!(self.cur_kind(), TokenType::Semi | TokenType::BraceR | TokenType::ParenR | TokenType::BracketR | TokenType::Comma | TokenType::Colon | TokenType::Eof)
            && !self.state.cur.had_line_break_before
    }

    /// Tries the whole input starting here as an arrow-function head;
    /// on failure (ordinary parenthesized expression, identifier used
    /// plainly, etc.) restores state and lets the caller fall through
    /// to `parse_conditional`.
    fn try_parse_arrow(&mut self) -> Result<Option<Node>, ParseError> {
        let is_async = self.at(TokenType::Name) && self.state.token_value_as_str() == Some("async") && !self.state.cur.had_line_break_before;
        if matches!(self.cur_kind(), TokenType::Name) && !is_async {
            return self.try_single_param_arrow();
        }
        if matches!(self.cur_kind(), TokenType::ParenL) {
            return self.try_paren_arrow(false);
        }
        if is_async {
            return self.try_async_arrow();
        }
        Ok(None)
    }

    fn try_single_param_arrow(&mut self) -> Result<Option<Node>, ParseError> {
        let checkpoint = self.state.checkpoint(true);
        let start = self.start();
        let name = self.state.token_value_as_str().unwrap_or_default().to_string();
        let id_start = self.state.cur.start;
        self.state.comments.enter_node(id_start);
        self.next()?;
        if self.at(TokenType::Arrow) && !self.state.cur.had_line_break_before {
            let param = self.finish(id_start, NodeKind::Identifier { name, type_annotation: None, optional: false });
            return self.finish_arrow(start, vec![param], false).map(Some);
        }
        self.state.restore(checkpoint);
        Ok(None)
    }

    fn try_async_arrow(&mut self) -> Result<Option<Node>, ParseError> {
        let checkpoint = self.state.checkpoint(true);
        let start = self.start();
        self.next()?; // `async`
        if self.state.cur.had_line_break_before {
            self.state.restore(checkpoint);
            return Ok(None);
        }
        if matches!(self.cur_kind(), TokenType::Name) {
            let name = self.state.token_value_as_str().unwrap_or_default().to_string();
            let id_start = self.state.cur.start;
            self.state.comments.enter_node(id_start);
            self.next()?;
            if self.at(TokenType::Arrow) {
                let param = self.finish(id_start, NodeKind::Identifier { name, type_annotation: None, optional: false });
                return self.finish_arrow(start, vec![param], true).map(Some);
            }
            self.state.restore(checkpoint);
            return Ok(None);
        }
        if matches!(self.cur_kind(), TokenType::ParenL) {
            return self.try_paren_arrow(true);
        }
        self.state.restore(checkpoint);
        Ok(None)
    }

    fn try_paren_arrow(&mut self, is_async: bool) -> Result<Option<Node>, ParseError> {
        let checkpoint = self.state.checkpoint(true);
        match self.parse_arrow_params_and_arrow(is_async) {
            Ok(node) => Ok(Some(node)),
            Err(_) => {
                self.state.restore(checkpoint);
                Ok(None)
            }
        }
    }

    fn parse_arrow_params_and_arrow(&mut self, is_async: bool) -> Result<Node, ParseError> {
        let start = self.start();
        let params = self.parse_binding_list(TokenType::ParenL, TokenType::ParenR)?;
        self.maybe_skip_return_type()?;
        if !self.at(TokenType::Arrow) || self.state.cur.had_line_break_before {
            return Err(self.unexpected("Not an arrow function"));
        }
        self.finish_arrow(start, params, is_async)
    }

    fn finish_arrow(&mut self, start: usize, params: Vec<Node>, is_async: bool) -> Result<Node, ParseError> {
        self.expect(TokenType::Arrow)?;
        let (body, expression) = if self.at(TokenType::BraceL) {
            (self.parse_block(false)?, false)
        } else {
            (self.parse_maybe_assign()?, true)
        };
        Ok(self.finish(start, NodeKind::ArrowFunctionExpression { params, body: Box::new(body), expression, is_async }))
    }

    /// Parses a parenthesized, comma-separated binding list used by both
    /// arrow parameters and (after the fact) function parameter lists.
    pub fn parse_binding_list(&mut self, open: TokenType, close: TokenType) -> Result<Vec<Node>, ParseError> {
        self.expect(open)?;
        let mut items = Vec::new();
        let mut first = true;
        while !self.at(close) {
            if !first {
                self.expect(TokenType::Comma)?;
                if self.at(close) {
                    break;
                }
            }
            first = false;
            if self.at(TokenType::Ellipsis) {
                let rest_start = self.start();
                self.next()?;
                let argument = self.parse_binding_atom()?;
                items.push(self.finish(rest_start, NodeKind::RestElement { argument: Box::new(argument) }));
                break;
            }
            items.push(self.parse_binding_element()?);
        }
        self.expect(close)?;
        Ok(items)
    }

    fn parse_binding_element(&mut self) -> Result<Node, ParseError> {
        let start = self.state.cur.start;
        let left = self.parse_binding_atom()?;
        let left = self.maybe_attach_type_annotation(left)?;
        if self.eat(TokenType::Eq)? {
            self.state.comments.enter_node(start);
            let right = self.parse_maybe_assign()?;
            return Ok(self.finish(start, NodeKind::AssignmentPattern { left: Box::new(left), right: Box::new(right) }));
        }
        Ok(left)
    }

    pub fn parse_binding_atom_public(&mut self) -> Result<Node, ParseError> {
        self.parse_binding_atom()
    }

    fn parse_binding_atom(&mut self) -> Result<Node, ParseError> {
        match self.cur_kind() {
            TokenType::BracketL => self.parse_array_like(true),
            TokenType::BraceL => self.parse_object_like(true),
            _ => self.parse_identifier(),
        }
    }

    pub fn parse_identifier_public(&mut self) -> Result<Node, ParseError> {
        self.parse_identifier()
    }

    fn parse_identifier(&mut self) -> Result<Node, ParseError> {
        let start = self.start();
        let name = match &self.state.cur.value {
            TokenValue::Str(s) => s.clone(),
            _ => self.state.cur.raw.clone(),
        };
        if !matches!(self.cur_kind(), TokenType::Name) && !self.cur_kind().is_keyword() {
            return Err(self.unexpected("Unexpected token, expected an identifier"));
        }
        self.next()?;
        Ok(self.finish(start, NodeKind::Identifier { name, type_annotation: None, optional: false }))
    }

    fn parse_conditional(&mut self) -> Result<Node, ParseError> {
        let start = self.state.cur.start;
        let test = self.parse_binary_expr(1)?;
        if self.eat(TokenType::Question)? {
            self.state.comments.enter_node(start);
            let consequent = self.parse_maybe_assign()?;
            self.expect(TokenType::Colon)?;
            let alternate = self.parse_maybe_assign()?;
            return Ok(self.finish(
                start,
                NodeKind::ConditionalExpression { test: Box::new(test), consequent: Box::new(consequent), alternate: Box::new(alternate) },
            ));
        }
        Ok(test)
    }

    /// Operator-precedence climbing over the binop table in
    /// `TokenType::info`.
    fn parse_binary_expr(&mut self, min_prec: u8) -> Result<Node, ParseError> {
        let start = self.state.cur.start;
        let mut left = self.parse_maybe_unary()?;
        loop {
            let info = self.cur_kind().info();
            let prec = match info.binop {
                Some(p) if p >= min_prec => p,
                _ => break,
            };
            let operator = self.state.cur.raw.clone();
            let operator = if operator.is_empty() { info.label.to_string() } else { operator };
            let is_logical = matches!(self.cur_kind(), TokenType::LogicalOr | TokenType::LogicalAnd | TokenType::Nullish);
            self.state.comments.enter_node(start);
            self.next()?;
            let next_min = if info.right_associative { prec } else { prec + 1 };
            let right = self.parse_binary_expr(next_min)?;
            left = self.finish(
                start,
                if is_logical {
                    NodeKind::LogicalExpression { operator, left: Box::new(left), right: Box::new(right) }
                } else {
                    NodeKind::BinaryExpression { operator, left: Box::new(left), right: Box::new(right) }
                },
            );
        }
        Ok(left)
    }

    fn parse_maybe_unary(&mut self) -> Result<Node, ParseError> {
        // `start` only becomes a comment-attachment frame in the branch
        // that actually builds a node here; the common case delegates to
        // `parse_subscripts` (which opens its own frames), so opening one
        // unconditionally up front would leak it on that path.
        let start = self.state.cur.start;
        if self.cur_kind().info().prefix {
            self.state.comments.enter_node(start);
            let operator = self.state.cur.raw.clone();
            let operator = if operator.is_empty() { self.cur_kind().info().label.to_string() } else { operator };
            let is_update = matches!(self.cur_kind(), TokenType::IncDec);
            self.next()?;
            let argument = self.parse_maybe_unary()?;
            return Ok(self.finish(
                start,
                if is_update {
                    NodeKind::UpdateExpression { operator, argument: Box::new(argument), prefix: true }
                } else {
                    NodeKind::UnaryExpression { operator, argument: Box::new(argument), prefix: true }
                },
            ));
        }
        if self.at(TokenType::Await) {
            self.state.comments.enter_node(start);
            self.next()?;
            let argument = self.parse_maybe_unary()?;
            return Ok(self.finish(start, NodeKind::AwaitExpression { argument: Box::new(argument) }));
        }
        let mut expr = self.parse_subscripts()?;
        if matches!(self.cur_kind(), TokenType::IncDec) && !self.state.cur.had_line_break_before {
            self.state.comments.enter_node(start);
            let operator = self.state.cur.raw.clone();
            self.next()?;
            expr = self.finish(start, NodeKind::UpdateExpression { operator, argument: Box::new(expr), prefix: false });
        }
        while self.has_plugin(DialectPlugin::TypeScript) && self.eat_contextual("as")? {
            self.state.comments.enter_node(start);
            let type_annotation = self.parse_type()?;
            expr = self.finish(start, NodeKind::TSAsExpression { expression: Box::new(expr), type_annotation: Box::new(type_annotation) });
        }
        Ok(expr)
    }

    pub fn parse_subscripts_public(&mut self) -> Result<Node, ParseError> {
        self.parse_subscripts()
    }

    fn parse_subscripts(&mut self) -> Result<Node, ParseError> {
        let start = self.state.cur.start;
        let mut base = if self.at(TokenType::New) {
            self.parse_new_expression()?
        } else {
            self.parse_expr_atom()?
        };
        // Every wrapping node built below shares `start` (the base
        // expression's start) but is its own comment-attachment frame,
        // so each branch opens one with `enter_node` right before it
        // closes it with `finish` — reusing a single frame across loop
        // iterations would make the second `finish` pop empty.
        loop {
            if self.eat(TokenType::Dot)? {
                self.state.comments.enter_node(start);
                let property = self.parse_property_name()?;
                base = self.finish(start, NodeKind::MemberExpression { object: Box::new(base), property: Box::new(property), computed: false, optional: false });
            } else if self.eat(TokenType::QuestionDot)? {
                self.state.comments.enter_node(start);
                if self.at(TokenType::ParenL) {
                    let arguments = self.parse_call_arguments()?;
                    base = self.finish(start, NodeKind::CallExpression { callee: Box::new(base), arguments, optional: true });
                } else if self.eat(TokenType::BracketL)? {
                    let property = self.parse_expression_node()?;
                    self.expect(TokenType::BracketR)?;
                    base = self.finish(start, NodeKind::MemberExpression { object: Box::new(base), property: Box::new(property), computed: true, optional: true });
                } else {
                    let property = self.parse_property_name()?;
                    base = self.finish(start, NodeKind::MemberExpression { object: Box::new(base), property: Box::new(property), computed: false, optional: true });
                }
            } else if self.eat(TokenType::BracketL)? {
                self.state.comments.enter_node(start);
                let property = self.parse_expression_node()?;
                self.expect(TokenType::BracketR)?;
                base = self.finish(start, NodeKind::MemberExpression { object: Box::new(base), property: Box::new(property), computed: true, optional: false });
            } else if self.at(TokenType::ParenL) {
                self.state.comments.enter_node(start);
                let arguments = self.parse_call_arguments()?;
                base = self.finish(start, NodeKind::CallExpression { callee: Box::new(base), arguments, optional: false });
            } else if self.at(TokenType::BackQuote) {
                self.state.comments.enter_node(start);
                let quasi = self.parse_template_literal()?;
                base = self.finish(start, NodeKind::TaggedTemplateExpression { tag: Box::new(base), quasi: Box::new(quasi) });
            } else {
                break;
            }
        }
        Ok(base)
    }

    /// Parses a class-member key: private (`#name`), computed
    /// (`[expr]`), string/numeric literal, or plain identifier
    /// (including contextual names like `constructor`/`static`).
    pub fn parse_class_member_key(&mut self) -> Result<(Node, bool), ParseError> {
        if self.at(TokenType::Hash) {
            let start = self.start();
            self.next()?;
            let name = self.parse_identifier()?;
            let id = match name.kind {
                NodeKind::Identifier { name, .. } => name,
                _ => unreachable!(),
            };
            return Ok((self.finish(start, NodeKind::PrivateName { id }), false));
        }
        if self.at(TokenType::BracketL) {
            let key = self.parse_object_key(true)?;
            return Ok((key, true));
        }
        Ok((self.parse_object_key(false)?, false))
    }

    fn parse_property_name(&mut self) -> Result<Node, ParseError> {
        if self.at(TokenType::Hash) {
            let start = self.start();
            self.next()?;
            let name = self.parse_identifier()?;
            let id = match name.kind {
                NodeKind::Identifier { name, .. } => name,
                _ => unreachable!(),
            };
            return Ok(self.finish(start, NodeKind::PrivateName { id }));
        }
        self.parse_identifier()
    }

    fn parse_new_expression(&mut self) -> Result<Node, ParseError> {
        let start = self.start();
        self.next()?;
        if self.at(TokenType::Dot) {
            self.state.comments.enter_node(start);
            let meta = self.finish(start, NodeKind::Identifier { name: "new".into(), type_annotation: None, optional: false });
            self.next()?;
            let property = self.parse_identifier()?;
            return Ok(self.finish(start, NodeKind::MetaProperty { meta: Box::new(meta), property: Box::new(property) }));
        }
        let callee = self.parse_subscripts_no_call()?;
        let arguments = if self.at(TokenType::ParenL) { self.parse_call_arguments()? } else { Vec::new() };
        Ok(self.finish(start, NodeKind::NewExpression { callee: Box::new(callee), arguments }))
    }

    fn parse_subscripts_no_call(&mut self) -> Result<Node, ParseError> {
        let start = self.start();
        let mut base = if self.at(TokenType::New) { self.parse_new_expression()? } else { self.parse_expr_atom()? };
        loop {
            if self.eat(TokenType::Dot)? {
                let property = self.parse_property_name()?;
                base = self.finish(start, NodeKind::MemberExpression { object: Box::new(base), property: Box::new(property), computed: false, optional: false });
            } else if self.eat(TokenType::BracketL)? {
                let property = self.parse_expression_node()?;
                self.expect(TokenType::BracketR)?;
                base = self.finish(start, NodeKind::MemberExpression { object: Box::new(base), property: Box::new(property), computed: true, optional: false });
            } else {
                break;
            }
        }
        Ok(base)
    }

    fn parse_call_arguments(&mut self) -> Result<Vec<Node>, ParseError> {
        self.expect(TokenType::ParenL)?;
        let mut args = Vec::new();
        let mut first = true;
        while !self.at(TokenType::ParenR) {
            if !first {
                self.expect(TokenType::Comma)?;
                if self.at(TokenType::ParenR) {
                    break;
                }
            }
            first = false;
            if self.at(TokenType::Ellipsis) {
                let start = self.start();
                self.next()?;
                let argument = self.parse_maybe_assign()?;
                args.push(self.finish(start, NodeKind::SpreadElement { argument: Box::new(argument) }));
            } else {
                args.push(self.parse_maybe_assign()?);
            }
        }
        self.expect(TokenType::ParenR)?;
        Ok(args)
    }

    fn parse_expr_atom(&mut self) -> Result<Node, ParseError> {
        // Branches that delegate to a helper build and finish their own
        // node (own `start`/`finish` pair); only the literal/keyword
        // branches below open a node frame directly, so `start()` is
        // called just before each one instead of once up front — a
        // shared call here would leak an unmatched comment-stack frame
        // whenever a delegating branch runs.
        match self.cur_kind() {
            TokenType::Num => {
                let start = self.start();
                let value = match self.state.cur.value {
                    TokenValue::Num(n) => n,
                    _ => 0.0,
                };
                self.next()?;
                Ok(self.finish(start, NodeKind::NumericLiteral { value }))
            }
            TokenType::BigInt => {
                let start = self.start();
                let value = match &self.state.cur.value {
                    TokenValue::BigInt(s) => s.clone(),
                    _ => String::new(),
                };
                self.next()?;
                Ok(self.finish(start, NodeKind::BigIntLiteral { value }))
            }
            TokenType::String => {
                let start = self.start();
                let value = match &self.state.cur.value {
                    TokenValue::Str(s) => s.clone(),
                    _ => String::new(),
                };
                self.next()?;
                Ok(self.finish(start, NodeKind::StringLiteral { value }))
            }
            TokenType::Regexp => {
                let start = self.start();
                let (pattern, flags) = match &self.state.cur.value {
                    TokenValue::Regexp { pattern, flags } => (pattern.clone(), flags.clone()),
                    _ => (String::new(), String::new()),
                };
                self.next()?;
                Ok(self.finish(start, NodeKind::RegExpLiteral { pattern, flags }))
            }
            TokenType::True | TokenType::False => {
                let start = self.start();
                let value = self.at(TokenType::True);
                self.next()?;
                Ok(self.finish(start, NodeKind::BooleanLiteral { value }))
            }
            TokenType::Null => {
                let start = self.start();
                self.next()?;
                Ok(self.finish(start, NodeKind::NullLiteral))
            }
            TokenType::This => {
                let start = self.start();
                self.next()?;
                Ok(self.finish(start, NodeKind::ThisExpression))
            }
            TokenType::Super => {
                let start = self.start();
                self.next()?;
                Ok(self.finish(start, NodeKind::Super))
            }
            TokenType::ParenL => self.parse_paren_expression(),
            TokenType::BracketL => self.parse_array_like(false),
            TokenType::BraceL => self.parse_object_like(false),
            TokenType::Function => self.parse_function_expression(false),
            TokenType::Class => self.parse_class(false),
            TokenType::BackQuote => self.parse_template_literal(),
            TokenType::Name => {
                if self.state.token_value_as_str() == Some("async") {
                    self.try_async_function_expression()
                } else {
                    self.parse_identifier()
                }
            }
            TokenType::TypeOf | TokenType::Void | TokenType::Delete => self.parse_identifier(),
            TokenType::RelationalOp if self.state.cur.raw == "<" && self.has_plugin(DialectPlugin::Jsx) => self.parse_jsx(),
            _ => Err(self.unexpected("Unexpected token")),
        }
    }

    fn try_async_function_expression(&mut self) -> Result<Node, ParseError> {
        let checkpoint = self.state.checkpoint(true);
        self.next()?;
        if self.at(TokenType::Function) && !self.state.cur.had_line_break_before {
            return self.parse_function_expression(true);
        }
        self.state.restore(checkpoint);
        self.parse_identifier()
    }

    fn parse_paren_expression(&mut self) -> Result<Node, ParseError> {
        self.expect(TokenType::ParenL)?;
        let expr = self.parse_expression_node()?;
        self.expect(TokenType::ParenR)?;
        Ok(Node::new(expr.start, expr.end, expr.loc.clone(), NodeKind::ParenthesizedExpression { expression: Box::new(expr) }))
    }

    fn parse_function_expression(&mut self, is_async: bool) -> Result<Node, ParseError> {
        let start = self.start();
        self.expect(TokenType::Function)?;
        let generator = self.eat(TokenType::Star)?;
        let id = if matches!(self.cur_kind(), TokenType::Name) { Some(Box::new(self.parse_identifier()?)) } else { None };
        let params = self.parse_binding_list(TokenType::ParenL, TokenType::ParenR)?;
        self.maybe_skip_return_type()?;
        let body = self.parse_block(true)?;
        Ok(self.finish(start, NodeKind::FunctionExpression { id, params, body: Box::new(body), generator, is_async }))
    }

    fn parse_array_like(&mut self, as_pattern: bool) -> Result<Node, ParseError> {
        let start = self.start();
        self.expect(TokenType::BracketL)?;
        let mut elements = Vec::new();
        let mut first = true;
        while !self.at(TokenType::BracketR) {
            if !first {
                self.expect(TokenType::Comma)?;
                if self.at(TokenType::BracketR) {
                    break;
                }
            }
            first = false;
            if self.at(TokenType::Comma) {
                elements.push(None);
                continue;
            }
            if self.at(TokenType::Ellipsis) {
                let rest_start = self.start();
                self.next()?;
                let argument = if as_pattern { self.parse_binding_atom()? } else { self.parse_maybe_assign()? };
                elements.push(Some(self.finish(rest_start, NodeKind::RestElement { argument: Box::new(argument) })));
                break;
            }
            elements.push(Some(if as_pattern { self.parse_binding_element()? } else { self.parse_maybe_assign()? }));
        }
        self.expect(TokenType::BracketR)?;
        Ok(self.finish(start, if as_pattern { NodeKind::ArrayPattern { elements } } else { NodeKind::ArrayExpression { elements } }))
    }

    fn parse_object_like(&mut self, as_pattern: bool) -> Result<Node, ParseError> {
        let start = self.start();
        self.expect(TokenType::BraceL)?;
        let mut properties = Vec::new();
        let mut first = true;
        while !self.at(TokenType::BraceR) {
            if !first {
                self.expect(TokenType::Comma)?;
                if self.at(TokenType::BraceR) {
                    break;
                }
            }
            first = false;
            let member = self.parse_object_member(as_pattern)?;
            let is_rest = matches!(member.kind, NodeKind::RestElement { .. });
            properties.push(member);
            // Unlike `parse_array_like`, which breaks its loop the moment
            // it pushes a rest element, an object *expression*'s spread is
            // fine mid-list (`{...a, b}`) — only a pattern's rest element
            // must be the last property.
            if as_pattern && is_rest && !self.at(TokenType::BraceR) {
                return Err(self.unexpected("Rest element must be last element"));
            }
        }
        self.expect(TokenType::BraceR)?;
        Ok(self.finish(start, if as_pattern { NodeKind::ObjectPattern { properties } } else { NodeKind::ObjectExpression { properties } }))
    }

    fn parse_object_member(&mut self, as_pattern: bool) -> Result<Node, ParseError> {
        let start = self.start();
        if self.at(TokenType::Ellipsis) {
            self.next()?;
            let argument = if as_pattern { self.parse_binding_atom()? } else { self.parse_maybe_assign()? };
            return Ok(self.finish(start, NodeKind::RestElement { argument: Box::new(argument) }));
        }
        let is_async = !as_pattern && self.at(TokenType::Name) && self.state.token_value_as_str() == Some("async");
        if is_async {
            let checkpoint = self.state.checkpoint(true);
            self.next()?;
            if self.looks_like_property_key() {
                return self.parse_object_method(start, false, true);
            }
            self.state.restore(checkpoint);
        }
        let generator = !as_pattern && self.eat(TokenType::Star)?;
        let computed = self.at(TokenType::BracketL);
        let key = self.parse_object_key(computed)?;
        if !as_pattern && (self.at(TokenType::ParenL) || generator) {
            return self.finish_object_method(start, key, computed, generator, false);
        }
        if !as_pattern && !computed && self.is_getter_setter_key(&key) {
            let kind = match &key.kind {
                NodeKind::Identifier { name, .. } if name == "get" => MethodKind::Get,
                _ => MethodKind::Set,
            };
            let real_computed = self.at(TokenType::BracketL);
            let real_key = self.parse_object_key(real_computed)?;
            return self.finish_object_accessor(start, real_key, real_computed, kind);
        }
        if self.eat(TokenType::Colon)? {
            let value = if as_pattern { self.parse_binding_element()? } else { self.parse_maybe_assign()? };
            return Ok(self.finish(start, NodeKind::ObjectProperty { key: Box::new(key), value: Box::new(value), computed, shorthand: false }));
        }
        // shorthand
        let value = if self.eat(TokenType::Eq)? {
            let name = match &key.kind {
                NodeKind::Identifier { name, .. } => name.clone(),
                _ => String::new(),
            };
            let ident = Node::new(key.start, key.end, key.loc.clone(), NodeKind::Identifier { name, type_annotation: None, optional: false });
            let default = self.parse_maybe_assign()?;
            self.finish(start, NodeKind::AssignmentPattern { left: Box::new(ident), right: Box::new(default) })
        } else {
            key.clone_shallow()
        };
        Ok(self.finish(start, NodeKind::ObjectProperty { key: Box::new(key), value: Box::new(value), computed: false, shorthand: true }))
    }

    fn looks_like_property_key(&self) -> bool {
        !matches!(self.cur_kind(), TokenType::Colon | TokenType::Comma | TokenType::BraceR | TokenType::ParenL | TokenType::Eq)
    }

    fn is_getter_setter_key(&self, key: &Node) -> bool {
        if let NodeKind::Identifier { name, .. } = &key.kind {
            (name == "get" || name == "set") && !matches!(self.cur_kind(), TokenType::Colon | TokenType::Comma | TokenType::BraceR | TokenType::ParenL)
        } else {
            false
        }
    }

    fn parse_object_key(&mut self, computed: bool) -> Result<Node, ParseError> {
        if computed {
            self.next()?; // `[`
            let key = self.parse_maybe_assign()?;
            self.expect(TokenType::BracketR)?;
            return Ok(key);
        }
        match self.cur_kind() {
            TokenType::String => {
                let start = self.start();
                let value = match &self.state.cur.value {
                    TokenValue::Str(s) => s.clone(),
                    _ => String::new(),
                };
                self.next()?;
                Ok(self.finish(start, NodeKind::StringLiteral { value }))
            }
            TokenType::Num => {
                let start = self.start();
                let value = match self.state.cur.value {
                    TokenValue::Num(n) => n,
                    _ => 0.0,
                };
                self.next()?;
                Ok(self.finish(start, NodeKind::NumericLiteral { value }))
            }
            _ => self.parse_identifier(),
        }
    }

    fn finish_object_method(&mut self, start: usize, key: Node, computed: bool, generator: bool, is_async: bool) -> Result<Node, ParseError> {
        let params = self.parse_binding_list(TokenType::ParenL, TokenType::ParenR)?;
        let body = self.parse_block(true)?;
        Ok(self.finish(
            start,
            NodeKind::ObjectMethod { kind: MethodKind::Method, key: Box::new(key), params, body: Box::new(body), computed, generator, is_async },
        ))
    }

    fn parse_object_method(&mut self, start: usize, generator: bool, is_async: bool) -> Result<Node, ParseError> {
        let computed = self.at(TokenType::BracketL);
        let key = self.parse_object_key(computed)?;
        self.finish_object_method(start, key, computed, generator, is_async)
    }

    fn finish_object_accessor(&mut self, start: usize, key: Node, computed: bool, kind: MethodKind) -> Result<Node, ParseError> {
        let params = self.parse_binding_list(TokenType::ParenL, TokenType::ParenR)?;
        let body = self.parse_block(true)?;
        Ok(self.finish(start, NodeKind::ObjectMethod { kind, key: Box::new(key), params, body: Box::new(body), computed, generator: false, is_async: false }))
    }

    pub fn parse_template_literal(&mut self) -> Result<Node, ParseError> {
        let start = self.start();
        self.expect(TokenType::BackQuote)?;
        let mut quasis = Vec::new();
        let mut expressions = Vec::new();
        loop {
            let (value, tail) = self.read_template_chunk()?;
            let el_start = self.state.prev_end;
            quasis.push(Node::new(el_start, el_start, self.state.cur.loc.clone(), NodeKind::TemplateElement { value, tail }));
            if tail {
                break;
            }
            expressions.push(self.parse_expression_node()?);
            self.expect(TokenType::BraceR)?;
        }
        Ok(self.finish(start, NodeKind::TemplateLiteral { quasis, expressions }))
    }

    /// Reads one template element directly from the input between the
    /// lexer's structural tokens, since template contents are not
    /// tokenized like ordinary source. `raw` is the verbatim source
    /// slice; `cooked` decodes escapes and normalizes line terminators,
    /// becoming `None` if any escape in the chunk was malformed.
    fn read_template_chunk(&mut self) -> Result<(TemplateElementValue, bool), ParseError> {
        let input = self.state.input.clone();
        let chunk_start = self.state.pos;
        let mut pos = chunk_start;
        let mut cooked = String::new();
        let mut cooked_valid = true;
        loop {
            match input[pos..].chars().next() {
                None => return Err(self.error_at(pos, "Unterminated template")),
                Some('`') => {
                    let raw = input[chunk_start..pos].to_string();
                    pos += 1;
                    self.state.pos = pos;
                    self.next()?;
                    return Ok((TemplateElementValue { raw, cooked: cooked_valid.then_some(cooked) }, true));
                }
                Some('$') if input[pos + 1..].starts_with('{') => {
                    let raw = input[chunk_start..pos].to_string();
                    pos += 2;
                    self.state.pos = pos;
                    self.next()?;
                    return Ok((TemplateElementValue { raw, cooked: cooked_valid.then_some(cooked) }, false));
                }
                Some('\\') => {
                    let (escaped, next, valid) = self.state.read_template_escape_sequence(pos + 1)?;
                    if !valid {
                        cooked_valid = false;
                    }
                    if let Some(c) = escaped {
                        cooked.push(c);
                    }
                    pos = next;
                }
                Some('\r') => {
                    cooked.push('\n');
                    pos += if input[pos + 1..].starts_with('\n') { 2 } else { 1 };
                }
                Some(c) => {
                    cooked.push(c);
                    pos += c.len_utf8();
                }
            }
        }
    }
}

impl Node {
    fn clone_shallow(&self) -> Node {
        self.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::Options;
    use crate::parser::{parse_expression};

    fn expr(src: &str) -> Node {
        parse_expression(src, Options::default()).unwrap()
    }

    #[test]
    fn binary_precedence_matches_grammar() {
        let node = expr("1 + 2 * 3");
        match node.kind {
            NodeKind::BinaryExpression { operator, right, .. } => {
                assert_eq!(operator, "+");
                assert!(matches!(right.kind, NodeKind::BinaryExpression { .. }));
            }
            _ => panic!("expected BinaryExpression"),
        }
    }

    #[test]
    fn logical_and_binds_tighter_than_or() {
        let node = expr("a || b && c");
        match node.kind {
            NodeKind::LogicalExpression { operator, right, .. } => {
                assert_eq!(operator, "||");
                assert!(matches!(right.kind, NodeKind::LogicalExpression { .. }));
            }
            _ => panic!("expected LogicalExpression"),
        }
    }

    #[test]
    fn single_identifier_arrow() {
        let node = expr("x => x + 1");
        assert!(matches!(node.kind, NodeKind::ArrowFunctionExpression { expression: true, .. }));
    }

    #[test]
    fn parenthesized_arrow_with_multiple_params() {
        let node = expr("(a, b) => a + b");
        match node.kind {
            NodeKind::ArrowFunctionExpression { params, .. } => assert_eq!(params.len(), 2),
            _ => panic!("expected ArrowFunctionExpression"),
        }
    }

    #[test]
    fn async_arrow_with_await() {
        let node = expr("async (x) => { return await x; }");
        match node.kind {
            NodeKind::ArrowFunctionExpression { is_async, expression, .. } => {
                assert!(is_async);
                assert!(!expression);
            }
            _ => panic!("expected ArrowFunctionExpression"),
        }
    }

    #[test]
    fn member_and_call_chain() {
        let node = expr("a.b().c[0]");
        assert!(matches!(node.kind, NodeKind::MemberExpression { computed: true, .. }));
    }

    #[test]
    fn optional_chaining_call() {
        let node = expr("a?.b?.()");
        assert!(matches!(node.kind, NodeKind::CallExpression { optional: true, .. }));
    }

    #[test]
    fn object_literal_with_shorthand_and_method() {
        let node = expr("({ a, b() { return 1; } })");
        match node.kind {
            NodeKind::ParenthesizedExpression { expression } => match expression.kind {
                NodeKind::ObjectExpression { properties } => assert_eq!(properties.len(), 2),
                _ => panic!("expected ObjectExpression"),
            },
            _ => panic!("expected ParenthesizedExpression"),
        }
    }

    #[test]
    fn template_literal_with_expression() {
        let node = expr("`a${1}b`");
        match node.kind {
            NodeKind::TemplateLiteral { quasis, expressions } => {
                assert_eq!(quasis.len(), 2);
                assert_eq!(expressions.len(), 1);
            }
            _ => panic!("expected TemplateLiteral"),
        }
    }
}
