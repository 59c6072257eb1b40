//! Token types produced by the lexer.

use neuro_util::Span;
use std::fmt;

/// The sixteen reserved words of the language. Anything else that looks like
/// an identifier lexes as [`TokenKind::Ident`] instead.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Keyword {
    Remember,
    Update,
    Think,
    While,
    Spiral,
    Feel,
    Otherwise,
    Speak,
    Shout,
    Whisper,
    Laugh,
    Panic,
    Pause,
    Murmur,
    Sleep,
    Listen,
}

impl Keyword {
    /// Matches a lexed identifier string against the keyword table, or
    /// returns `None` if it's a plain identifier.
    pub fn lookup(word: &str) -> Option<Keyword> {
        Some(match word {
            "remember" => Keyword::Remember,
            "update" => Keyword::Update,
            "think" => Keyword::Think,
            "while" => Keyword::While,
            "spiral" => Keyword::Spiral,
            "feel" => Keyword::Feel,
            "otherwise" => Keyword::Otherwise,
            "speak" => Keyword::Speak,
            "shout" => Keyword::Shout,
            "whisper" => Keyword::Whisper,
            "laugh" => Keyword::Laugh,
            "panic" => Keyword::Panic,
            "pause" => Keyword::Pause,
            "murmur" => Keyword::Murmur,
            "sleep" => Keyword::Sleep,
            "listen" => Keyword::Listen,
            _ => return None,
        })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Keyword::Remember => "remember",
            Keyword::Update => "update",
            Keyword::Think => "think",
            Keyword::While => "while",
            Keyword::Spiral => "spiral",
            Keyword::Feel => "feel",
            Keyword::Otherwise => "otherwise",
            Keyword::Speak => "speak",
            Keyword::Shout => "shout",
            Keyword::Whisper => "whisper",
            Keyword::Laugh => "laugh",
            Keyword::Panic => "panic",
            Keyword::Pause => "pause",
            Keyword::Murmur => "murmur",
            Keyword::Sleep => "sleep",
            Keyword::Listen => "listen",
        }
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The flat, single-precedence binary operators the grammar recognizes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Op {
    Add,
    Sub,
    Mul,
    Div,
    Eq,
    Neq,
    Lt,
    Gt,
    Le,
    Ge,
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Op::Add => "+",
            Op::Sub => "-",
            Op::Mul => "*",
            Op::Div => "/",
            Op::Eq => "==",
            Op::Neq => "!=",
            Op::Lt => "<",
            Op::Gt => ">",
            Op::Le => "<=",
            Op::Ge => ">=",
        };
        write!(f, "{}", s)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum TokenKind {
    /// Raw numeric lexeme, not yet parsed into int/float — that happens in
    /// the parser, which knows whether a `.` was present.
    Number(String),
    Str(String),
    Ident(String),
    Keyword(Keyword),
    Op(Op),
    Assign,
    Newline,
    Indent,
    Dedent,
    Eof,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Number(n) => write!(f, "{}", n),
            TokenKind::Str(s) => write!(f, "{:?}", s),
            TokenKind::Ident(name) => write!(f, "{}", name),
            TokenKind::Keyword(k) => write!(f, "{}", k),
            TokenKind::Op(op) => write!(f, "{}", op),
            TokenKind::Assign => write!(f, "="),
            TokenKind::Newline => write!(f, "NEWLINE"),
            TokenKind::Indent => write!(f, "INDENT"),
            TokenKind::Dedent => write!(f, "DEDENT"),
            TokenKind::Eof => write!(f, "EOF"),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }
}
