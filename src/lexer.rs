//! The lexer: turns `state.input[state.pos..]` into the next [`Token`],
//! context-sensitively.

use crate::ast::SourceType;
use crate::char_classifier::{is_identifier_char, is_identifier_start, is_newline, is_whitespace};
use crate::comments::{Comment, CommentKind};
use crate::error::{ParseError, SyntaxErrorKind};
use crate::position::SourceLocation;
use crate::state::State;
use crate::token::{Token, TokenType, TokenValue, KEYWORDS};

pub type LexResult<T> = Result<T, ParseError>;

fn byte_at(input: &str, pos: usize) -> Option<u8> {
    input.as_bytes().get(pos).copied()
}

fn char_at(input: &str, pos: usize) -> Option<char> {
    input[pos..].chars().next()
}

impl State {
    fn err(&self, pointer: usize, kind: SyntaxErrorKind, message: impl Into<String>) -> ParseError {
        let loc = self.position_for(pointer);
        ParseError::new(pointer, loc, kind, message)
    }

    /// Advance past whitespace and comments, recording the latter.
    fn skip_space(&mut self) -> LexResult<()> {
        loop {
            match byte_at(&self.input, self.pos) {
                None => return Ok(()),
                Some(b'/') => {
                    match byte_at(&self.input, self.pos + 1) {
                        Some(b'/') => self.skip_line_comment(2),
                        Some(b'*') => self.skip_block_comment()?,
                        _ => return Ok(()),
                    }
                }
                // Annex B legacy HTML-like comments, both scoped to
                // non-module source the way the grammar restricts them.
                Some(b'<') if self.options.source_type == SourceType::Script && self.input[self.pos..].starts_with("<!--") => {
                    self.skip_line_comment(4);
                }
                Some(b'-')
                    if self.options.source_type == SourceType::Script
                        && self.input[self.pos..].starts_with("-->")
                        && self.is_at_line_start() =>
                {
                    self.skip_line_comment(3);
                }
                Some(b) if b < 0x80 => {
                    if is_whitespace(b as u32) || is_newline(b as u32) {
                        self.pos += 1;
                    } else {
                        return Ok(());
                    }
                }
                Some(_) => {
                    let ch = char_at(&self.input, self.pos).unwrap();
                    let cp = ch as u32;
                    if is_whitespace(cp) || is_newline(cp) {
                        self.pos += ch.len_utf8();
                    } else {
                        return Ok(());
                    }
                }
            }
        }
    }

    /// True if everything since the start of input (or the previous line
    /// terminator) up to the current position is whitespace — the
    /// condition `-->`'s Annex B single-line comment form requires.
    fn is_at_line_start(&self) -> bool {
        let before = &self.input[..self.pos];
        let mut line_start = 0;
        for (i, c) in before.char_indices() {
            if is_newline(c as u32) {
                line_start = i + c.len_utf8();
            }
        }
        before[line_start..].chars().all(|c| is_whitespace(c as u32))
    }

    fn skip_line_comment(&mut self, marker_len: usize) {
        let start = self.pos;
        self.pos += marker_len;
        while let Some(ch) = char_at(&self.input, self.pos) {
            if is_newline(ch as u32) {
                break;
            }
            self.pos += ch.len_utf8();
        }
        let end = self.pos;
        self.push_comment_range(CommentKind::Line, start, end, marker_len, 0);
    }

    fn skip_block_comment(&mut self) -> LexResult<()> {
        let start = self.pos;
        self.pos += 2;
        loop {
            match byte_at(&self.input, self.pos) {
                None => return Err(self.err(start, SyntaxErrorKind::Lex, "Unterminated comment")),
                Some(b'*') if byte_at(&self.input, self.pos + 1) == Some(b'/') => {
                    self.pos += 2;
                    break;
                }
                Some(_) => {
                    let ch = char_at(&self.input, self.pos).unwrap();
                    self.pos += ch.len_utf8();
                }
            }
        }
        let end = self.pos;
        self.push_comment_range(CommentKind::Block, start, end, 2, 2);
        Ok(())
    }

    fn push_comment_range(&mut self, kind: CommentKind, start: usize, end: usize, lead: usize, trail: usize) {
        let value = self.input[start + lead..end - trail].to_string();
        let loc = SourceLocation::new(self.position_for(start), self.position_for(end));
        self.push_comment(Comment { kind, value, start, end, loc });
    }

    /// Read the next token and install it as `self.cur`.
    pub fn next_token(&mut self) -> LexResult<()> {
        let had_line_break_before = self.skip_space_tracking_newline()?;
        self.prev_end = self.cur.end;
        self.prev_end_loc = self.cur.loc.end;

        let start = self.pos;
        if start >= self.input.len() {
            self.cur = Token::new(TokenType::Eof, start, start, self.span(start, start));
            self.cur.had_line_break_before = had_line_break_before;
            return Ok(());
        }

        let mut token = self.read_token(start)?;
        token.had_line_break_before = had_line_break_before;
        log::trace!("token {:?} {}..{}", token.kind, token.start, token.end);
        self.cur = token;
        self.update_context()?;
        Ok(())
    }

    fn skip_space_tracking_newline(&mut self) -> LexResult<bool> {
        let before = self.pos;
        self.skip_space()?;
        Ok(self.input[before..self.pos].bytes().any(|b| b == b'\n' || b == b'\r'))
    }

    fn span(&self, start: usize, end: usize) -> SourceLocation {
        SourceLocation::new(self.position_for(start), self.position_for(end))
    }

    fn make(&self, kind: TokenType, start: usize, end: usize) -> Token {
        let mut token = Token::new(kind, start, end, self.span(start, end));
        token.raw = self.input[start..end].to_string();
        token
    }

    fn read_token(&mut self, start: usize) -> LexResult<Token> {
        let ch = char_at(&self.input, start).unwrap();
        if ch.is_ascii_digit() {
            return self.read_number(start);
        }
        if ch == '"' || ch == '\'' {
            return self.read_string(start, ch);
        }
        if ch == '`' {
            self.pos += 1;
            return Ok(self.make(TokenType::BackQuote, start, self.pos));
        }
        if is_identifier_start(ch as u32) {
            return self.read_word(start);
        }
        self.read_punctuator(start, ch)
    }

    fn read_punctuator(&mut self, start: usize, ch: char) -> LexResult<Token> {
        macro_rules! tok {
            ($len:expr, $kind:expr) => {{
                self.pos = start + $len;
                Ok(self.make($kind, start, self.pos))
            }};
        }
        match ch {
            '(' => tok!(1, TokenType::ParenL),
            ')' => tok!(1, TokenType::ParenR),
            '[' => tok!(1, TokenType::BracketL),
            ']' => tok!(1, TokenType::BracketR),
            '{' => tok!(1, TokenType::BraceL),
            '}' => tok!(1, TokenType::BraceR),
            ',' => tok!(1, TokenType::Comma),
            ';' => tok!(1, TokenType::Semi),
            ':' => {
                if byte_at(&self.input, start + 1) == Some(b':') {
                    tok!(2, TokenType::DoubleColon)
                } else {
                    tok!(1, TokenType::Colon)
                }
            }
            '@' => tok!(1, TokenType::At),
            '#' => tok!(1, TokenType::Hash),
            '.' => {
                if byte_at(&self.input, start + 1) == Some(b'.') && byte_at(&self.input, start + 2) == Some(b'.') {
                    tok!(3, TokenType::Ellipsis)
                } else if byte_at(&self.input, start + 1).map(|b| b.is_ascii_digit()).unwrap_or(false) {
                    self.read_number(start)
                } else {
                    tok!(1, TokenType::Dot)
                }
            }
            '?' => {
                if byte_at(&self.input, start + 1) == Some(b'.')
                    && !byte_at(&self.input, start + 2).map(|b| b.is_ascii_digit()).unwrap_or(false)
                {
                    tok!(2, TokenType::QuestionDot)
                } else if byte_at(&self.input, start + 1) == Some(b'?') {
                    tok!(2, TokenType::Nullish)
                } else {
                    tok!(1, TokenType::Question)
                }
            }
            '=' => {
                if byte_at(&self.input, start + 1) == Some(b'>') {
                    tok!(2, TokenType::Arrow)
                } else if byte_at(&self.input, start + 1) == Some(b'=') && byte_at(&self.input, start + 2) == Some(b'=') {
                    tok!(3, TokenType::EqualityOp)
                } else if byte_at(&self.input, start + 1) == Some(b'=') {
                    tok!(2, TokenType::EqualityOp)
                } else {
                    tok!(1, TokenType::Eq)
                }
            }
            '!' => {
                if byte_at(&self.input, start + 1) == Some(b'=') && byte_at(&self.input, start + 2) == Some(b'=') {
                    tok!(3, TokenType::EqualityOp)
                } else if byte_at(&self.input, start + 1) == Some(b'=') {
                    tok!(2, TokenType::EqualityOp)
                } else {
                    tok!(1, TokenType::Prefix)
                }
            }
            '<' => {
                let b1 = byte_at(&self.input, start + 1);
                if b1 == Some(b'<') {
                    if byte_at(&self.input, start + 2) == Some(b'=') { tok!(3, TokenType::AssignOp) } else { tok!(2, TokenType::BitShift) }
                } else if b1 == Some(b'=') {
                    tok!(2, TokenType::RelationalOp)
                } else {
                    tok!(1, TokenType::RelationalOp)
                }
            }
            '>' => {
                let b1 = byte_at(&self.input, start + 1);
                if b1 == Some(b'>') {
                    let b2 = byte_at(&self.input, start + 2);
                    if b2 == Some(b'>') {
                        if byte_at(&self.input, start + 3) == Some(b'=') { tok!(4, TokenType::AssignOp) } else { tok!(3, TokenType::BitShift) }
                    } else if b2 == Some(b'=') {
                        tok!(3, TokenType::AssignOp)
                    } else {
                        tok!(2, TokenType::BitShift)
                    }
                } else if b1 == Some(b'=') {
                    tok!(2, TokenType::RelationalOp)
                } else {
                    tok!(1, TokenType::RelationalOp)
                }
            }
            '+' | '-' => {
                let b0 = ch as u8;
                if byte_at(&self.input, start + 1) == Some(b0) {
                    tok!(2, TokenType::IncDec)
                } else if byte_at(&self.input, start + 1) == Some(b'=') {
                    tok!(2, TokenType::AssignOp)
                } else {
                    tok!(1, TokenType::PlusMin)
                }
            }
            '*' => {
                if byte_at(&self.input, start + 1) == Some(b'*') {
                    if byte_at(&self.input, start + 2) == Some(b'=') { tok!(3, TokenType::AssignOp) } else { tok!(2, TokenType::StarStar) }
                } else if byte_at(&self.input, start + 1) == Some(b'=') {
                    tok!(2, TokenType::AssignOp)
                } else {
                    tok!(1, TokenType::Star)
                }
            }
            '%' => {
                if byte_at(&self.input, start + 1) == Some(b'=') { tok!(2, TokenType::AssignOp) } else { tok!(1, TokenType::Modulo) }
            }
            '/' => {
                if self.expr_allowed {
                    self.read_regexp(start)
                } else if byte_at(&self.input, start + 1) == Some(b'=') {
                    tok!(2, TokenType::AssignOp)
                } else {
                    tok!(1, TokenType::Slash)
                }
            }
            '|' => {
                if byte_at(&self.input, start + 1) == Some(b'|') {
                    if byte_at(&self.input, start + 2) == Some(b'=') { tok!(3, TokenType::AssignOp) } else { tok!(2, TokenType::LogicalOr) }
                } else if byte_at(&self.input, start + 1) == Some(b'=') {
                    tok!(2, TokenType::AssignOp)
                } else {
                    tok!(1, TokenType::BitwiseOr)
                }
            }
            '&' => {
                if byte_at(&self.input, start + 1) == Some(b'&') {
                    if byte_at(&self.input, start + 2) == Some(b'=') { tok!(3, TokenType::AssignOp) } else { tok!(2, TokenType::LogicalAnd) }
                } else if byte_at(&self.input, start + 1) == Some(b'=') {
                    tok!(2, TokenType::AssignOp)
                } else {
                    tok!(1, TokenType::BitwiseAnd)
                }
            }
            '^' => {
                if byte_at(&self.input, start + 1) == Some(b'=') { tok!(2, TokenType::AssignOp) } else { tok!(1, TokenType::BitwiseXor) }
            }
            '~' => tok!(1, TokenType::Prefix),
            _ => Err(self.err(start, SyntaxErrorKind::Lex, format!("Unexpected character '{}'", ch))),
        }
    }

    fn read_word(&mut self, start: usize) -> LexResult<Token> {
        let mut pos = start + char_at(&self.input, start).unwrap().len_utf8();
        while let Some(ch) = char_at(&self.input, pos) {
            if is_identifier_char(ch as u32) {
                pos += ch.len_utf8();
            } else {
                break;
            }
        }
        self.pos = pos;
        let word = &self.input[start..pos];
        let kind = KEYWORDS.get(word).copied().unwrap_or(TokenType::Name);
        let mut token = self.make(kind, start, pos);
        token.raw = word.to_string();
        if kind == TokenType::Name {
            token.value = TokenValue::Str(word.to_string());
        }
        Ok(token)
    }

    fn read_number(&mut self, start: usize) -> LexResult<Token> {
        let mut pos = start;
        let bytes = self.input.as_bytes();
        let is_zero_prefixed = bytes.get(pos) == Some(&b'0');
        if is_zero_prefixed {
            match bytes.get(pos + 1) {
                Some(b'x') | Some(b'X') => {
                    pos += 2;
                    pos = self.scan_digits(pos, |b| b.is_ascii_hexdigit())?;
                    return self.finish_number(start, pos, 16);
                }
                Some(b'o') | Some(b'O') => {
                    pos += 2;
                    pos = self.scan_digits(pos, |b| (b'0'..=b'7').contains(&b))?;
                    return self.finish_number(start, pos, 8);
                }
                Some(b'b') | Some(b'B') => {
                    pos += 2;
                    pos = self.scan_digits(pos, |b| b == b'0' || b == b'1')?;
                    return self.finish_number(start, pos, 2);
                }
                _ => {}
            }
        }
        pos = self.scan_digits(pos, |b| b.is_ascii_digit())?;
        if bytes.get(pos) == Some(&b'.') {
            pos += 1;
            pos = self.scan_digits(pos, |b| b.is_ascii_digit())?;
        }
        if matches!(bytes.get(pos), Some(b'e') | Some(b'E')) {
            pos += 1;
            if matches!(bytes.get(pos), Some(b'+') | Some(b'-')) {
                pos += 1;
            }
            pos = self.scan_digits(pos, |b| b.is_ascii_digit())?;
        }
        if bytes.get(pos) == Some(&b'n') {
            let raw = self.input[start..pos].replace('_', "");
            pos += 1;
            self.check_no_identifier_after_number(pos)?;
            self.pos = pos;
            let mut token = self.make(TokenType::BigInt, start, self.pos);
            token.value = TokenValue::BigInt(raw);
            return Ok(token);
        }
        self.finish_number(start, pos, 10)
    }

    /// A number literal must not be directly followed by an identifier
    /// character or another digit (`3in x`, `0x1g`, `1.5e` are all
    /// errors rather than a number token plus a separate identifier).
    fn check_no_identifier_after_number(&self, end: usize) -> LexResult<()> {
        match char_at(&self.input, end) {
            Some(c) if is_identifier_start(c as u32) || c.is_ascii_digit() => {
                Err(self.err(end, SyntaxErrorKind::Lex, "Identifier directly after number"))
            }
            _ => Ok(()),
        }
    }

    /// Scans a run of digits valid under `valid`, allowing a single `_`
    /// numeric separator between two valid digits. A separator with no
    /// valid digit on either side (leading, trailing, doubled, or
    /// adjacent to `.`/an exponent marker/a radix prefix/the `n` BigInt
    /// suffix) is a lex error rather than silently accepted or dropped.
    fn scan_digits(&self, mut pos: usize, valid: impl Fn(u8) -> bool) -> LexResult<usize> {
        let bytes = self.input.as_bytes();
        let mut prev_was_digit = false;
        loop {
            match bytes.get(pos) {
                Some(&b) if valid(b) => {
                    pos += 1;
                    prev_was_digit = true;
                }
                Some(&b'_') => {
                    let next_is_digit = bytes.get(pos + 1).map(|&b| valid(b)).unwrap_or(false);
                    if !prev_was_digit || !next_is_digit {
                        return Err(self.err(pos, SyntaxErrorKind::Lex, "Invalid or unexpected numeric separator"));
                    }
                    pos += 1;
                    prev_was_digit = false;
                }
                _ => break,
            }
        }
        Ok(pos)
    }

    fn finish_number(&mut self, start: usize, end: usize, radix: u32) -> LexResult<Token> {
        self.check_no_identifier_after_number(end)?;
        self.pos = end;
        let raw = self.input[start..end].replace('_', "");
        let value = if radix == 10 {
            raw.parse::<f64>().map_err(|_| self.err(start, SyntaxErrorKind::Lex, "Invalid number"))?
        } else {
            let digits = &raw[2..];
            i64::from_str_radix(digits, radix)
                .map(|v| v as f64)
                .map_err(|_| self.err(start, SyntaxErrorKind::Lex, "Invalid number"))?
        };
        let mut token = self.make(TokenType::Num, start, end);
        token.value = TokenValue::Num(value);
        Ok(token)
    }

    fn read_string(&mut self, start: usize, quote: char) -> LexResult<Token> {
        let mut pos = start + 1;
        let mut value = String::new();
        loop {
            match char_at(&self.input, pos) {
                None => return Err(self.err(start, SyntaxErrorKind::Lex, "Unterminated string constant")),
                Some(c) if c == quote => {
                    pos += 1;
                    break;
                }
                Some('\\') => {
                    pos += 1;
                    let (escaped, next) = self.read_escape_sequence(pos)?;
                    if let Some(c) = escaped {
                        value.push(c);
                    }
                    pos = next;
                }
                Some(c) if is_newline(c as u32) && c != '\u{2028}' && c != '\u{2029}' => {
                    return Err(self.err(pos, SyntaxErrorKind::Lex, "Unterminated string constant"));
                }
                Some(c) => {
                    value.push(c);
                    pos += c.len_utf8();
                }
            }
        }
        self.pos = pos;
        let mut token = self.make(TokenType::String, start, pos);
        token.value = TokenValue::Str(value);
        Ok(token)
    }

    /// Reads one escape sequence starting just after the backslash.
    /// Returns the decoded character (`None` for a line continuation)
    /// and the position just past the escape.
    fn read_escape_sequence(&mut self, pos: usize) -> LexResult<(Option<char>, usize)> {
        let c = char_at(&self.input, pos).ok_or_else(|| self.err(pos, SyntaxErrorKind::Lex, "Unterminated string constant"))?;
        match c {
            'n' => Ok((Some('\n'), pos + 1)),
            'r' => Ok((Some('\r'), pos + 1)),
            't' => Ok((Some('\t'), pos + 1)),
            'b' => Ok((Some('\u{8}'), pos + 1)),
            'f' => Ok((Some('\u{c}'), pos + 1)),
            'v' => Ok((Some('\u{b}'), pos + 1)),
            '0'..='7' => {
                let start = pos;
                let mut end = pos + 1;
                let mut max_len = if c <= '3' { 3 } else { 2 };
                while max_len > 1 {
                    if matches!(char_at(&self.input, end), Some('0'..='7')) {
                        end += 1;
                        max_len -= 1;
                    } else {
                        break;
                    }
                }
                if &self.input[start..end] != "0" {
                    self.octal_position.get_or_insert(start);
                }
                let n = u32::from_str_radix(&self.input[start..end], 8).unwrap_or(0);
                Ok((char::from_u32(n), end))
            }
            'x' => {
                let hex_start = pos + 1;
                let hex_end = hex_start + 2;
                let hex = self.input.get(hex_start..hex_end).ok_or_else(|| self.err(pos, SyntaxErrorKind::Lex, "Invalid Unicode escape"))?;
                let n = u32::from_str_radix(hex, 16).map_err(|_| self.err(pos, SyntaxErrorKind::Lex, "Invalid Unicode escape"))?;
                Ok((char::from_u32(n), hex_end))
            }
            'u' => self.read_unicode_escape(pos + 1),
            '\r' => {
                let next = if char_at(&self.input, pos + 1) == Some('\n') { pos + 2 } else { pos + 1 };
                Ok((None, next))
            }
            c if is_newline(c as u32) => Ok((None, pos + c.len_utf8())),
            c => Ok((Some(c), pos + c.len_utf8())),
        }
    }

    /// Reads one escape sequence inside a template literal. Identical to
    /// [`Self::read_escape_sequence`] for every well-formed escape; a
    /// malformed `\x`/`\u` is tolerated instead of raising (the template
    /// grammar's `NotEscapeSequence` production), recording where in
    /// `invalid_template_escape_position` and reporting the escape as
    /// invalid so the caller can null out the element's cooked value.
    pub(crate) fn read_template_escape_sequence(&mut self, pos: usize) -> LexResult<(Option<char>, usize, bool)> {
        if char_at(&self.input, pos).is_none() {
            return Err(self.err(pos, SyntaxErrorKind::Lex, "Unterminated template"));
        }
        match self.read_escape_sequence(pos) {
            Ok((c, next)) => Ok((c, next, true)),
            Err(_) => {
                self.invalid_template_escape_position.get_or_insert(pos);
                let next = char_at(&self.input, pos).map(|c| pos + c.len_utf8()).unwrap_or(pos);
                Ok((None, next, false))
            }
        }
    }

    fn read_unicode_escape(&mut self, pos: usize) -> LexResult<(Option<char>, usize)> {
        if char_at(&self.input, pos) == Some('{') {
            let end = self.input[pos..]
                .find('}')
                .map(|i| pos + i)
                .ok_or_else(|| self.err(pos, SyntaxErrorKind::Lex, "Invalid Unicode escape"))?;
            let hex = &self.input[pos + 1..end];
            let n = u32::from_str_radix(hex, 16).map_err(|_| self.err(pos, SyntaxErrorKind::Lex, "Invalid Unicode escape"))?;
            Ok((char::from_u32(n), end + 1))
        } else {
            let end = pos + 4;
            let hex = self.input.get(pos..end).ok_or_else(|| self.err(pos, SyntaxErrorKind::Lex, "Invalid Unicode escape"))?;
            let n = u32::from_str_radix(hex, 16).map_err(|_| self.err(pos, SyntaxErrorKind::Lex, "Invalid Unicode escape"))?;
            Ok((char::from_u32(n), end))
        }
    }

    fn read_regexp(&mut self, start: usize) -> LexResult<Token> {
        let mut pos = start + 1;
        let mut in_class = false;
        loop {
            match char_at(&self.input, pos) {
                None => return Err(self.err(start, SyntaxErrorKind::Lex, "Unterminated regular expression")),
                Some('[') => {
                    in_class = true;
                    pos += 1;
                }
                Some(']') => {
                    in_class = false;
                    pos += 1;
                }
                Some('/') if !in_class => {
                    pos += 1;
                    break;
                }
                Some('\\') => {
                    pos += 1;
                    if char_at(&self.input, pos).is_some() {
                        pos += char_at(&self.input, pos).unwrap().len_utf8();
                    }
                }
                Some(c) if is_newline(c as u32) => {
                    return Err(self.err(start, SyntaxErrorKind::Lex, "Unterminated regular expression"));
                }
                Some(c) => pos += c.len_utf8(),
            }
        }
        let pattern_end = pos - 1;
        let pattern = self.input[start + 1..pattern_end].to_string();
        let flags_start = pos;
        while matches!(char_at(&self.input, pos), Some(c) if c.is_ascii_alphabetic()) {
            pos += 1;
        }
        let flags = self.input[flags_start..pos].to_string();
        self.pos = pos;
        let mut token = self.make(TokenType::Regexp, start, pos);
        token.value = TokenValue::Regexp { pattern, flags };
        Ok(token)
    }

    /// Applies the current token to the context stack, mirroring each
    /// `TokContext` updater.
    fn update_context(&mut self) -> LexResult<()> {
        // `}` closing a function body uncovers the function context
        // pushed at the `function` keyword (see `ContextStack::
        // update_brace_r`); that resolves `expr_allowed` on its own and
        // must not be clobbered by the generic `before_expr` fallback
        // below, or `/` right after a function declaration/expression
        // can never be read as a regex.
        if self.cur.kind == TokenType::BraceR {
            let (_, closed_function) = self.context.update_brace_r();
            if let Some(ctx) = closed_function {
                self.expr_allowed = !ctx.is_expr;
                return Ok(());
            }
        }
        match self.cur.kind {
            TokenType::BraceL => {
                self.context.update_brace_l(self.expr_allowed);
            }
            TokenType::DollarBraceL => {
                self.context.update_dollar_brace_l();
            }
            TokenType::ParenL => {
                self.context.update_paren_l(self.expr_allowed);
            }
            TokenType::ParenR => {
                self.context.update_paren_r();
            }
            TokenType::BackQuote => {
                self.context.update_back_quote();
            }
            TokenType::Function => {
                self.context.update_function();
            }
            _ => {}
        }
        // A bare identifier never flips `expr_allowed` on by itself
        // (`a / b` must stay division); the one contextual exception is
        // `of` in a `for (... of ...)` head, handled below rather than
        // through the static table since `of` is an ordinary `Name`
        // token, not its own keyword.
        self.expr_allowed = self.cur.kind.info().before_expr
            || (matches!(self.cur.kind, TokenType::Name) && self.cur.raw == "of" && !self.expr_allowed);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::Options;

    fn tokens(src: &str) -> Vec<TokenType> {
        let mut state = State::new(src, Options::default());
        let mut out = Vec::new();
        loop {
            state.next_token().unwrap();
            out.push(state.cur.kind);
            if state.cur.kind == TokenType::Eof {
                break;
            }
        }
        out
    }

    #[test]
    fn lexes_simple_arithmetic() {
        let kinds = tokens("1 + 2 * 3");
        assert_eq!(kinds, vec![TokenType::Num, TokenType::PlusMin, TokenType::Num, TokenType::Star, TokenType::Num, TokenType::Eof]);
    }

    #[test]
    fn distinguishes_division_from_regex() {
        let mut state = State::new("a / b", Options::default());
        state.next_token().unwrap(); // a
        state.next_token().unwrap(); // /
        assert_eq!(state.cur.kind, TokenType::Slash);

        let mut state = State::new("return /ab/", Options::default());
        state.next_token().unwrap(); // return
        state.next_token().unwrap(); // /ab/
        assert_eq!(state.cur.kind, TokenType::Regexp);
    }

    #[test]
    fn reads_hex_octal_binary_and_bigint() {
        let mut state = State::new("0xFF", Options::default());
        state.next_token().unwrap();
        assert_eq!(state.cur.value, TokenValue::Num(255.0));

        let mut state = State::new("10n", Options::default());
        state.next_token().unwrap();
        assert_eq!(state.cur.kind, TokenType::BigInt);
    }

    #[test]
    fn reads_string_escapes() {
        let mut state = State::new(r#""a\nb""#, Options::default());
        state.next_token().unwrap();
        assert_eq!(state.cur.value, TokenValue::Str("a\nb".to_string()));
    }

    #[test]
    fn tracks_octal_escape_position_for_strict_mode_checks() {
        let mut state = State::new(r#""\1""#, Options::default());
        state.next_token().unwrap();
        assert!(state.octal_position.is_some());
    }

    #[test]
    fn line_comment_is_collected() {
        let mut state = State::new("// hi\n1", Options::default());
        state.next_token().unwrap();
        assert_eq!(state.cur.kind, TokenType::Num);
        assert_eq!(state.comments.all.len(), 1);
        assert_eq!(state.comments.all[0].value, " hi");
    }

    #[test]
    fn keyword_vs_identifier() {
        let kinds = tokens("function foo");
        assert_eq!(kinds[0], TokenType::Function);
        assert_eq!(kinds[1], TokenType::Name);
    }
}
