//! Token model.
//!
//! A [`Token`] is a category, an annotation (location plus optional
//! original text) and, for literal categories, a decoded [`Value`].

use std::fmt;

use num_bigint::BigUint;

use crate::location::{Column, Line, Location};

/// Fixed punctuation and operator symbols.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Punct {
    // === Brackets ===
    LParen,
    RParen,
    LBracket,
    RBracket,
    LBrace,
    RBrace,

    // === Separators ===
    Semicolon,
    Comma,
    Pipe,
    PipePipe,
    Colon,
    ColonColon,
    ColonEq,
    Hash,
    Dot,
    DotDot,
    DotDotDot,

    // === Arithmetic & list ===
    Plus,
    PlusPlus,
    Minus,
    MinusMinus,
    Star,
    Slash,

    // === Comparison & matching ===
    Eq,
    EqEq,
    EqColonEq,
    EqSlashEq,
    EqLt,
    SlashEq,
    Lt,
    Gt,
    GtEq,

    // === Arrows & binaries ===
    Arrow,
    FatArrow,
    LArrow,
    LtEq,
    LtLt,
    GtGt,

    // === Misc ===
    Bang,
    Question,
    QuestionQuestion,
    QuestionEq,
}

impl Punct {
    /// Operators ordered longest-first, so the first prefix match is the
    /// longest one. The `.` family is handled by the dot scanner.
    pub(crate) const TABLE: &'static [(&'static str, Punct)] = &[
        ("=:=", Punct::EqColonEq),
        ("=/=", Punct::EqSlashEq),
        ("->", Punct::Arrow),
        ("--", Punct::MinusMinus),
        ("++", Punct::PlusPlus),
        ("/=", Punct::SlashEq),
        ("==", Punct::EqEq),
        ("=<", Punct::EqLt),
        ("=>", Punct::FatArrow),
        (">=", Punct::GtEq),
        (">>", Punct::GtGt),
        ("<<", Punct::LtLt),
        ("<=", Punct::LtEq),
        ("<-", Punct::LArrow),
        ("::", Punct::ColonColon),
        (":=", Punct::ColonEq),
        ("||", Punct::PipePipe),
        ("??", Punct::QuestionQuestion),
        ("?=", Punct::QuestionEq),
        ("(", Punct::LParen),
        (")", Punct::RParen),
        ("[", Punct::LBracket),
        ("]", Punct::RBracket),
        ("{", Punct::LBrace),
        ("}", Punct::RBrace),
        (";", Punct::Semicolon),
        (",", Punct::Comma),
        ("|", Punct::Pipe),
        ("!", Punct::Bang),
        ("+", Punct::Plus),
        ("-", Punct::Minus),
        ("*", Punct::Star),
        ("/", Punct::Slash),
        ("=", Punct::Eq),
        ("<", Punct::Lt),
        (">", Punct::Gt),
        (":", Punct::Colon),
        ("#", Punct::Hash),
        ("?", Punct::Question),
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Punct::LParen => "(",
            Punct::RParen => ")",
            Punct::LBracket => "[",
            Punct::RBracket => "]",
            Punct::LBrace => "{",
            Punct::RBrace => "}",
            Punct::Semicolon => ";",
            Punct::Comma => ",",
            Punct::Pipe => "|",
            Punct::PipePipe => "||",
            Punct::Colon => ":",
            Punct::ColonColon => "::",
            Punct::ColonEq => ":=",
            Punct::Hash => "#",
            Punct::Dot => ".",
            Punct::DotDot => "..",
            Punct::DotDotDot => "...",
            Punct::Plus => "+",
            Punct::PlusPlus => "++",
            Punct::Minus => "-",
            Punct::MinusMinus => "--",
            Punct::Star => "*",
            Punct::Slash => "/",
            Punct::Eq => "=",
            Punct::EqEq => "==",
            Punct::EqColonEq => "=:=",
            Punct::EqSlashEq => "=/=",
            Punct::EqLt => "=<",
            Punct::SlashEq => "/=",
            Punct::Lt => "<",
            Punct::Gt => ">",
            Punct::GtEq => ">=",
            Punct::Arrow => "->",
            Punct::FatArrow => "=>",
            Punct::LArrow => "<-",
            Punct::LtEq => "<=",
            Punct::LtLt => "<<",
            Punct::GtGt => ">>",
            Punct::Bang => "!",
            Punct::Question => "?",
            Punct::QuestionQuestion => "??",
            Punct::QuestionEq => "?=",
        }
    }
}

impl fmt::Display for Punct {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Token category.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Atom,
    Var,
    Integer,
    Float,
    String,
    Char,
    /// End of a form: `.` followed by whitespace, `%` or end of input.
    Dot,
    /// `%ssa%` marker opening a compiler check annotation.
    CheckComment,
    /// The `.` closing a check annotation.
    CheckEnd,
    SigilPrefix,
    SigilSuffix,
    /// A reserved word. Its category is the word itself.
    Reserved(String),
    Punct(Punct),
    /// Any other valid character, as a one-character symbol.
    Symbol(char),
}

/// Decoded value of a literal token.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// Atom, variable or sigil name.
    Name(String),
    Integer(BigUint),
    Float(f64),
    String(String),
    Char(char),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Name(name) => f.write_str(name),
            Value::Integer(n) => write!(f, "{n}"),
            Value::Float(x) => write!(f, "{x:?}"),
            Value::String(s) => write!(f, "{s:?}"),
            Value::Char(c) => write!(f, "${c}"),
        }
    }
}

/// Token annotation: where it starts and, when requested, its source text.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Anno {
    pub location: Location,
    pub text: Option<String>,
}

/// A classified lexeme.
#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub anno: Anno,
    value: Option<Value>,
}

impl Token {
    pub(crate) fn new(
        kind: TokenKind,
        location: Location,
        value: Option<Value>,
        text: Option<String>,
    ) -> Self {
        Self {
            kind,
            anno: Anno { location, text },
            value,
        }
    }

    #[inline]
    pub fn kind(&self) -> &TokenKind {
        &self.kind
    }

    /// Category name: `atom`, `var`, `integer`, ..., the reserved word
    /// itself, or the operator text.
    pub fn category(&self) -> std::borrow::Cow<'_, str> {
        use std::borrow::Cow;
        match &self.kind {
            TokenKind::Atom => Cow::Borrowed("atom"),
            TokenKind::Var => Cow::Borrowed("var"),
            TokenKind::Integer => Cow::Borrowed("integer"),
            TokenKind::Float => Cow::Borrowed("float"),
            TokenKind::String => Cow::Borrowed("string"),
            TokenKind::Char => Cow::Borrowed("char"),
            TokenKind::Dot => Cow::Borrowed("dot"),
            TokenKind::CheckComment => Cow::Borrowed("%ssa%"),
            TokenKind::CheckEnd => Cow::Borrowed("ssa_check_end"),
            TokenKind::SigilPrefix => Cow::Borrowed("sigil_prefix"),
            TokenKind::SigilSuffix => Cow::Borrowed("sigil_suffix"),
            TokenKind::Reserved(word) => Cow::Borrowed(word.as_str()),
            TokenKind::Punct(p) => Cow::Borrowed(p.as_str()),
            TokenKind::Symbol(c) => Cow::Owned(c.to_string()),
        }
    }

    #[inline]
    pub fn location(&self) -> Location {
        self.anno.location
    }

    #[inline]
    pub fn line(&self) -> Line {
        self.anno.location.line
    }

    #[inline]
    pub fn column(&self) -> Column {
        self.anno.location.column
    }

    /// Decoded value. `None` for categories that carry none (punctuation,
    /// reserved words, dots, markers).
    #[inline]
    pub fn value(&self) -> Option<&Value> {
        self.value.as_ref()
    }

    /// Original source text, present when the scan captured text.
    #[inline]
    pub fn text(&self) -> Option<&str> {
        self.anno.text.as_deref()
    }

    /// The name carried by an atom, variable or sigil token.
    pub fn name(&self) -> Option<&str> {
        match &self.value {
            Some(Value::Name(name)) => Some(name),
            _ => None,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:<12}", self.category())?;
        if let Some(value) = &self.value {
            write!(f, " {value}")?;
        }
        write!(f, " @ {}", self.anno.location)
    }
}
