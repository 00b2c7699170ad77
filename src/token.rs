//! Token-type registry and the [`Token`] data shape.

use crate::position::SourceLocation;
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Binary-operator precedence, 1 (`||`) through 11 (`**`, right-assoc).
pub type Precedence = u8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
pub enum TokenType {
    Eof,
    Name,
    PrivateName,
    Num,
    BigInt,
    Regexp,
    String,
    Template,
    TemplateContinuation, // `${` ... `}` boundary inside a template

    // Punctuation
    BracketL,
    BracketR,
    BraceL,
    BraceR,
    ParenL,
    ParenR,
    Comma,
    Semi,
    Colon,
    Dot,
    Question,
    QuestionDot,
    Arrow,
    Ellipsis,
    BackQuote,
    DollarBraceL,
    At,
    Hash,

    // Assignment
    Eq,
    AssignOp, // `+=`, `-=`, ... (operator text kept on the Token)

    // Binary / unary
    IncDec,
    Prefix,    // `!`, `~`
    LogicalOr,
    LogicalAnd,
    BitwiseOr,
    BitwiseXor,
    BitwiseAnd,
    EqualityOp,  // `==`, `!=`, `===`, `!==`
    RelationalOp, // `<`, `>`, `<=`, `>=`
    BitShift,    // `<<`, `>>`, `>>>`
    PlusMin,
    Modulo,
    Star,
    Slash,
    StarStar,
    Nullish, // `??`
    DoubleColon, // `::` function-bind plug-in

    // Keywords
    Break,
    Case,
    Catch,
    Continue,
    Debugger,
    Default,
    Do,
    Else,
    Finally,
    For,
    Function,
    If,
    Return,
    Switch,
    Throw,
    Try,
    Var,
    Const,
    While,
    With,
    New,
    This,
    Super,
    Class,
    Extends,
    Export,
    Import,
    Null,
    True,
    False,
    In,
    InstanceOf,
    TypeOf,
    Void,
    Delete,
    Yield,
    Await,
}

/// Static flags describing how a token participates in the grammar.
#[derive(Debug, Clone, Copy)]
pub struct TokenTypeInfo {
    pub label: &'static str,
    pub keyword: Option<&'static str>,
    pub before_expr: bool,
    pub starts_expr: bool,
    pub right_associative: bool,
    pub is_loop: bool,
    pub is_assign: bool,
    pub prefix: bool,
    pub postfix: bool,
    pub binop: Option<Precedence>,
}

const fn info(
    label: &'static str,
    keyword: Option<&'static str>,
    before_expr: bool,
    starts_expr: bool,
    right_associative: bool,
    is_loop: bool,
    is_assign: bool,
    prefix: bool,
    postfix: bool,
    binop: Option<Precedence>,
) -> TokenTypeInfo {
    TokenTypeInfo {
        label,
        keyword,
        before_expr,
        starts_expr,
        right_associative,
        is_loop,
        is_assign,
        prefix,
        postfix,
        binop,
    }
}

impl TokenType {
    /// Look up the static grammar metadata for this token kind.
    pub fn info(self) -> TokenTypeInfo {
        use TokenType::*;
        match self {
            Eof => info("eof", None, false, false, false, false, false, false, false, None),
            Name => info("name", None, false, true, false, false, false, false, false, None),
            PrivateName => info("privateName", None, false, true, false, false, false, false, false, None),
            Num => info("num", None, false, true, false, false, false, false, false, None),
            BigInt => info("bigint", None, false, true, false, false, false, false, false, None),
            Regexp => info("regexp", None, false, true, false, false, false, false, false, None),
            String => info("string", None, false, true, false, false, false, false, false, None),
            Template => info("template", None, false, true, false, false, false, false, false, None),
            TemplateContinuation => info("templateContinuation", None, false, true, false, false, false, false, false, None),
            BracketL => info("[", None, true, true, false, false, false, false, false, None),
            BracketR => info("]", None, false, false, false, false, false, false, false, None),
            BraceL => info("{", None, true, true, false, false, false, false, false, None),
            BraceR => info("}", None, false, false, false, false, false, false, false, None),
            ParenL => info("(", None, true, true, false, false, false, false, false, None),
            ParenR => info(")", None, false, false, false, false, false, false, false, None),
            Comma => info(",", None, true, false, false, false, false, false, false, None),
            Semi => info(";", None, true, false, false, false, false, false, false, None),
            Colon => info(":", None, true, false, false, false, false, false, false, None),
            Dot => info(".", None, false, false, false, false, false, false, false, None),
            Question => info("?", None, true, false, false, false, false, false, false, None),
            QuestionDot => info("?.", None, false, false, false, false, false, false, false, None),
            Arrow => info("=>", None, true, false, false, false, false, false, false, None),
            Ellipsis => info("...", None, true, false, false, false, false, false, false, None),
            BackQuote => info("`", None, false, true, false, false, false, false, false, None),
            DollarBraceL => info("${", None, true, true, false, false, false, false, false, None),
            At => info("@", None, false, false, false, false, false, false, false, None),
            Hash => info("#", None, false, true, false, false, false, false, false, None),
            Eq => info("=", None, true, false, true, false, true, false, false, None),
            AssignOp => info("_=", None, true, false, true, false, true, false, false, None),
            IncDec => info("++/--", None, false, true, false, false, false, true, true, None),
            Prefix => info("!/~", None, true, true, false, false, false, true, false, None),
            LogicalOr => info("||", None, true, false, false, false, false, false, false, Some(1)),
            LogicalAnd => info("&&", None, true, false, false, false, false, false, false, Some(2)),
            Nullish => info("??", None, true, false, false, false, false, false, false, Some(1)),
            BitwiseOr => info("|", None, true, false, false, false, false, false, false, Some(3)),
            BitwiseXor => info("^", None, true, false, false, false, false, false, false, Some(4)),
            BitwiseAnd => info("&", None, true, false, false, false, false, false, false, Some(5)),
            EqualityOp => info("==/!=", None, true, false, false, false, false, false, false, Some(6)),
            RelationalOp => info("</>", None, true, false, false, false, false, false, false, Some(7)),
            BitShift => info("<</>>", None, true, false, false, false, false, false, false, Some(8)),
            PlusMin => info("+/-", None, true, true, false, false, false, true, false, Some(9)),
            Modulo => info("%", None, true, false, false, false, false, false, false, Some(10)),
            Star => info("*", None, true, false, false, false, false, false, false, Some(10)),
            Slash => info("/", None, true, false, false, false, false, false, false, Some(10)),
            StarStar => info("**", None, true, false, true, false, false, false, false, Some(11)),
            DoubleColon => info("::", None, false, false, false, false, false, false, false, None),
            Break => info("break", Some("break"), false, false, false, false, false, false, false, None),
            Case => info("case", Some("case"), true, false, false, false, false, false, false, None),
            Catch => info("catch", Some("catch"), false, false, false, false, false, false, false, None),
            Continue => info("continue", Some("continue"), false, false, false, false, false, false, false, None),
            Debugger => info("debugger", Some("debugger"), false, false, false, false, false, false, false, None),
            Default => info("default", Some("default"), true, false, false, false, false, false, false, None),
            Do => info("do", Some("do"), true, false, false, true, false, false, false, None),
            Else => info("else", Some("else"), true, false, false, false, false, false, false, None),
            Finally => info("finally", Some("finally"), false, false, false, false, false, false, false, None),
            For => info("for", Some("for"), false, false, false, true, false, false, false, None),
            Function => info("function", Some("function"), false, true, false, false, false, false, false, None),
            If => info("if", Some("if"), false, false, false, false, false, false, false, None),
            Return => info("return", Some("return"), true, false, false, false, false, false, false, None),
            Switch => info("switch", Some("switch"), false, false, false, false, false, false, false, None),
            Throw => info("throw", Some("throw"), true, false, false, false, false, false, false, None),
            Try => info("try", Some("try"), false, false, false, false, false, false, false, None),
            Var => info("var", Some("var"), false, false, false, false, false, false, false, None),
            Const => info("const", Some("const"), false, false, false, false, false, false, false, None),
            While => info("while", Some("while"), false, false, false, true, false, false, false, None),
            With => info("with", Some("with"), false, false, false, false, false, false, false, None),
            New => info("new", Some("new"), true, true, false, false, false, false, false, None),
            This => info("this", Some("this"), false, true, false, false, false, false, false, None),
            Super => info("super", Some("super"), false, true, false, false, false, false, false, None),
            Class => info("class", Some("class"), false, true, false, false, false, false, false, None),
            Extends => info("extends", Some("extends"), true, false, false, false, false, false, false, None),
            Export => info("export", Some("export"), false, false, false, false, false, false, false, None),
            Import => info("import", Some("import"), false, true, false, false, false, false, false, None),
            Null => info("null", Some("null"), false, true, false, false, false, false, false, None),
            True => info("true", Some("true"), false, true, false, false, false, false, false, None),
            False => info("false", Some("false"), false, true, false, false, false, false, false, None),
            In => info("in", Some("in"), true, false, false, false, false, false, false, Some(7)),
            InstanceOf => info("instanceof", Some("instanceof"), true, false, false, false, false, false, false, Some(7)),
            TypeOf => info("typeof", Some("typeof"), true, true, false, false, false, true, false, None),
            Void => info("void", Some("void"), true, true, false, false, false, true, false, None),
            Delete => info("delete", Some("delete"), true, true, false, false, false, true, false, None),
            Yield => info("yield", Some("yield"), true, true, false, false, false, false, false, None),
            Await => info("await", Some("await"), true, true, false, false, false, false, false, None),
        }
    }

    pub fn binop(self) -> Option<Precedence> {
        self.info().binop
    }

    pub fn is_keyword(self) -> bool {
        self.info().keyword.is_some()
    }
}

/// Reverse lookup from keyword spelling to [`TokenType`], built once.
pub static KEYWORDS: Lazy<HashMap<&'static str, TokenType>> = Lazy::new(|| {
    use TokenType::*;
    [
        ("break", Break), ("case", Case), ("catch", Catch), ("continue", Continue),
        ("debugger", Debugger), ("default", Default), ("do", Do), ("else", Else),
        ("finally", Finally), ("for", For), ("function", Function), ("if", If),
        ("return", Return), ("switch", Switch), ("throw", Throw), ("try", Try),
        ("var", Var), ("const", Const), ("while", While), ("with", With),
        ("new", New), ("this", This), ("super", Super), ("class", Class),
        ("extends", Extends), ("export", Export), ("import", Import),
        ("null", Null), ("true", True), ("false", False), ("in", In),
        ("instanceof", InstanceOf), ("typeof", TypeOf), ("void", Void),
        ("delete", Delete), ("yield", Yield), ("await", Await),
    ]
    .into_iter()
    .collect()
});

/// Reserved words that may never be used as a binding, in any mode.
pub static ALWAYS_RESERVED: &[&str] = &[
    "break", "case", "catch", "continue", "debugger", "default", "delete", "do",
    "else", "export", "extends", "false", "finally", "for", "function", "if",
    "import", "in", "instanceof", "new", "null", "return", "super", "switch",
    "this", "throw", "true", "try", "typeof", "var", "void", "while", "with",
];

/// Reserved only in strict mode.
pub static STRICT_RESERVED: &[&str] = &[
    "implements", "interface", "let", "package", "private", "protected",
    "public", "static", "yield",
];

/// The literal payload carried by a token.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub enum TokenValue {
    None,
    Str(String),
    Num(f64),
    BigInt(String),
    Regexp { pattern: String, flags: String },
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct Token {
    pub kind: TokenType,
    pub start: usize,
    pub end: usize,
    pub loc: SourceLocation,
    pub value: TokenValue,
    /// Raw source text, needed for template cooked/raw pairs and for
    /// distinguishing compound assignment operators (`+=`, `**=`, ...).
    pub raw: String,
    /// True if the token was produced across a preceding line break.
    pub had_line_break_before: bool,
}

impl Token {
    pub fn new(kind: TokenType, start: usize, end: usize, loc: SourceLocation) -> Self {
        Self {
            kind,
            start,
            end,
            loc,
            value: TokenValue::None,
            raw: String::new(),
            had_line_break_before: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn precedence_table_matches_spec() {
        assert_eq!(TokenType::LogicalOr.binop(), Some(1));
        assert_eq!(TokenType::LogicalAnd.binop(), Some(2));
        assert_eq!(TokenType::BitwiseOr.binop(), Some(3));
        assert_eq!(TokenType::BitwiseXor.binop(), Some(4));
        assert_eq!(TokenType::BitwiseAnd.binop(), Some(5));
        assert_eq!(TokenType::EqualityOp.binop(), Some(6));
        assert_eq!(TokenType::RelationalOp.binop(), Some(7));
        assert_eq!(TokenType::In.binop(), Some(7));
        assert_eq!(TokenType::BitShift.binop(), Some(8));
        assert_eq!(TokenType::PlusMin.binop(), Some(9));
        assert_eq!(TokenType::Star.binop(), Some(10));
        assert_eq!(TokenType::StarStar.binop(), Some(11));
        assert!(TokenType::StarStar.info().right_associative);
    }

    #[test]
    fn keyword_lookup_roundtrip() {
        assert_eq!(KEYWORDS.get("function"), Some(&TokenType::Function));
        assert_eq!(KEYWORDS.get("notakeyword"), None);
    }

    #[test]
    fn always_reserved_excludes_contextual_keywords() {
        assert!(!ALWAYS_RESERVED.contains(&"async"));
        assert!(!ALWAYS_RESERVED.contains(&"of"));
        assert!(ALWAYS_RESERVED.contains(&"typeof"));
    }
}
