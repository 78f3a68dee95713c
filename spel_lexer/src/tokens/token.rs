//! Token kinds and the positioned token record
use crate::utils::Span;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Every token kind the lexer can emit.
///
/// Serialized names are the stable kebab-case names used in test fixtures
/// and in the CLI's JSON output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TokenKind {
    // Literals
    IntegerLiteral,
    HexIntegerLiteral,
    RealLiteral,
    StringLiteralSingle,
    StringLiteralDouble,

    Identifier,

    // Punctuation
    Dot,
    DotEscaped,
    Comma,
    Semicolon,
    SemicolonRparen,
    Colon,
    Lparen,
    Rparen,
    Lcurly,
    Rcurly,
    Lbracket,
    Rbracket,
    Pipe,

    // Symbol operators
    Assign,
    Equal,
    NotEqual,
    LessThan,
    LessThanOrEqual,
    GreaterThan,
    GreaterThanOrEqual,
    Plus,
    Minus,
    Star,
    Div,
    Mod,
    Power,
    Bang,
    Pound,
    Dollar,
    At,
    Qmark,
    DefaultCoalesce,
    RangeUpto,

    // Word operators and literal keywords
    And,
    Or,
    In,
    Is,
    Between,
    Matches,
    True,
    False,
    NullLiteral,
    New,

    // Two-character openers
    TypeReferenceOpen,
    LambdaOpen,
    ProjectOpen,
    SelectOpen,
    SelectFirstOpen,
    SelectLastOpen,

    Whitespace,
    Eof,
}

/// Which consumer a token is meant for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    /// Seen by the parser
    Default,
    /// Only kept for source reconstruction
    Hidden,
}

/// Coarse grouping used by metrics and diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TokenClass {
    Literal,
    Identifier,
    Operator,
    Punctuation,
    Whitespace,
    Eof,
}

impl TokenClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenClass::Literal => "literal",
            TokenClass::Identifier => "identifier",
            TokenClass::Operator => "operator",
            TokenClass::Punctuation => "punctuation",
            TokenClass::Whitespace => "whitespace",
            TokenClass::Eof => "eof",
        }
    }
}

impl TokenKind {
    /// Stable kebab-case name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::IntegerLiteral => "integer-literal",
            Self::HexIntegerLiteral => "hex-integer-literal",
            Self::RealLiteral => "real-literal",
            Self::StringLiteralSingle => "string-literal-single",
            Self::StringLiteralDouble => "string-literal-double",
            Self::Identifier => "identifier",
            Self::Dot => "dot",
            Self::DotEscaped => "dot-escaped",
            Self::Comma => "comma",
            Self::Semicolon => "semicolon",
            Self::SemicolonRparen => "semicolon-rparen",
            Self::Colon => "colon",
            Self::Lparen => "lparen",
            Self::Rparen => "rparen",
            Self::Lcurly => "lcurly",
            Self::Rcurly => "rcurly",
            Self::Lbracket => "lbracket",
            Self::Rbracket => "rbracket",
            Self::Pipe => "pipe",
            Self::Assign => "assign",
            Self::Equal => "equal",
            Self::NotEqual => "not-equal",
            Self::LessThan => "less-than",
            Self::LessThanOrEqual => "less-than-or-equal",
            Self::GreaterThan => "greater-than",
            Self::GreaterThanOrEqual => "greater-than-or-equal",
            Self::Plus => "plus",
            Self::Minus => "minus",
            Self::Star => "star",
            Self::Div => "div",
            Self::Mod => "mod",
            Self::Power => "power",
            Self::Bang => "bang",
            Self::Pound => "pound",
            Self::Dollar => "dollar",
            Self::At => "at",
            Self::Qmark => "qmark",
            Self::DefaultCoalesce => "default-coalesce",
            Self::RangeUpto => "range-upto",
            Self::And => "and",
            Self::Or => "or",
            Self::In => "in",
            Self::Is => "is",
            Self::Between => "between",
            Self::Matches => "matches",
            Self::True => "true",
            Self::False => "false",
            Self::NullLiteral => "null-literal",
            Self::New => "new",
            Self::TypeReferenceOpen => "type-reference-open",
            Self::LambdaOpen => "lambda-open",
            Self::ProjectOpen => "project-open",
            Self::SelectOpen => "select-open",
            Self::SelectFirstOpen => "select-first-open",
            Self::SelectLastOpen => "select-last-open",
            Self::Whitespace => "whitespace",
            Self::Eof => "eof",
        }
    }

    /// The exact source text for kinds that always match the same characters
    pub fn fixed_text(&self) -> Option<&'static str> {
        let text = match self {
            Self::Dot => ".",
            Self::DotEscaped => "\\.",
            Self::Comma => ",",
            Self::Semicolon => ";",
            Self::SemicolonRparen => ";)",
            Self::Colon => ":",
            Self::Lparen => "(",
            Self::Rparen => ")",
            Self::Lcurly => "{",
            Self::Rcurly => "}",
            Self::Lbracket => "[",
            Self::Rbracket => "]",
            Self::Pipe => "|",
            Self::Assign => "=",
            Self::Equal => "==",
            Self::NotEqual => "!=",
            Self::LessThan => "<",
            Self::LessThanOrEqual => "<=",
            Self::GreaterThan => ">",
            Self::GreaterThanOrEqual => ">=",
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Star => "*",
            Self::Div => "/",
            Self::Mod => "%",
            Self::Power => "^",
            Self::Bang => "!",
            Self::Pound => "#",
            Self::Dollar => "$",
            Self::At => "@",
            Self::Qmark => "?",
            Self::DefaultCoalesce => "??",
            Self::RangeUpto => "..",
            Self::And => "and",
            Self::Or => "or",
            Self::In => "in",
            Self::Is => "is",
            Self::Between => "between",
            Self::Matches => "matches",
            Self::True => "true",
            Self::False => "false",
            Self::NullLiteral => "null",
            Self::New => "new",
            Self::TypeReferenceOpen => "T(",
            Self::LambdaOpen => "{|",
            Self::ProjectOpen => "!{",
            Self::SelectOpen => "?{",
            Self::SelectFirstOpen => "^{",
            Self::SelectLastOpen => "${",
            Self::IntegerLiteral
            | Self::HexIntegerLiteral
            | Self::RealLiteral
            | Self::StringLiteralSingle
            | Self::StringLiteralDouble
            | Self::Identifier
            | Self::Whitespace
            | Self::Eof => return None,
        };
        Some(text)
    }

    pub fn channel(&self) -> Channel {
        match self {
            Self::Whitespace => Channel::Hidden,
            _ => Channel::Default,
        }
    }

    pub fn is_literal(&self) -> bool {
        matches!(
            self,
            Self::IntegerLiteral
                | Self::HexIntegerLiteral
                | Self::RealLiteral
                | Self::StringLiteralSingle
                | Self::StringLiteralDouble
                | Self::True
                | Self::False
                | Self::NullLiteral
        )
    }

    pub fn is_numeric_literal(&self) -> bool {
        matches!(
            self,
            Self::IntegerLiteral | Self::HexIntegerLiteral | Self::RealLiteral
        )
    }

    pub fn is_string_literal(&self) -> bool {
        matches!(self, Self::StringLiteralSingle | Self::StringLiteralDouble)
    }

    /// Reserved words. These are matched by their own fixed-text rules.
    pub fn is_keyword(&self) -> bool {
        matches!(
            self,
            Self::And
                | Self::Or
                | Self::In
                | Self::Is
                | Self::Between
                | Self::Matches
                | Self::True
                | Self::False
                | Self::NullLiteral
                | Self::New
        )
    }

    pub fn is_operator(&self) -> bool {
        matches!(
            self,
            Self::Assign
                | Self::Equal
                | Self::NotEqual
                | Self::LessThan
                | Self::LessThanOrEqual
                | Self::GreaterThan
                | Self::GreaterThanOrEqual
                | Self::Plus
                | Self::Minus
                | Self::Star
                | Self::Div
                | Self::Mod
                | Self::Power
                | Self::Bang
                | Self::Qmark
                | Self::DefaultCoalesce
                | Self::RangeUpto
                | Self::And
                | Self::Or
                | Self::In
                | Self::Is
                | Self::Between
                | Self::Matches
                | Self::New
        )
    }

    pub fn is_punctuation(&self) -> bool {
        matches!(
            self,
            Self::Dot
                | Self::DotEscaped
                | Self::Comma
                | Self::Semicolon
                | Self::SemicolonRparen
                | Self::Colon
                | Self::Lparen
                | Self::Rparen
                | Self::Lcurly
                | Self::Rcurly
                | Self::Lbracket
                | Self::Rbracket
                | Self::Pipe
                | Self::Pound
                | Self::Dollar
                | Self::At
                | Self::TypeReferenceOpen
                | Self::LambdaOpen
                | Self::ProjectOpen
                | Self::SelectOpen
                | Self::SelectFirstOpen
                | Self::SelectLastOpen
        )
    }

    /// Openers that begin a bracketed construct closed by `)`, `}` or `]`
    pub fn is_opener(&self) -> bool {
        matches!(
            self,
            Self::Lparen
                | Self::Lcurly
                | Self::Lbracket
                | Self::TypeReferenceOpen
                | Self::LambdaOpen
                | Self::ProjectOpen
                | Self::SelectOpen
                | Self::SelectFirstOpen
                | Self::SelectLastOpen
        )
    }

    pub fn token_class(&self) -> TokenClass {
        if self.is_literal() {
            TokenClass::Literal
        } else if self.is_operator() {
            TokenClass::Operator
        } else if self.is_punctuation() {
            TokenClass::Punctuation
        } else {
            match self {
                Self::Identifier => TokenClass::Identifier,
                Self::Whitespace => TokenClass::Whitespace,
                _ => TokenClass::Eof,
            }
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classified, positioned slice of the source text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub span: Span,
    pub channel: Channel,
}

impl Token {
    /// Build a token whose channel follows from its kind
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            span,
            channel: kind.channel(),
        }
    }

    pub fn eof(span: Span) -> Self {
        Self::new(TokenKind::Eof, String::new(), span)
    }

    /// Byte offset of the first character (inclusive)
    pub fn start_offset(&self) -> usize {
        self.span.start.offset
    }

    /// Byte offset one past the last character (exclusive)
    pub fn end_offset(&self) -> usize {
        self.span.end.offset
    }

    pub fn is_hidden(&self) -> bool {
        self.channel == Channel::Hidden
    }

    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Eof => write!(f, "<EOF>"),
            _ => write!(f, "{} {:?}", self.kind, self.lexeme),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::Position;

    #[test]
    fn test_kind_names_match_serde_names() {
        for kind in [
            TokenKind::HexIntegerLiteral,
            TokenKind::SemicolonRparen,
            TokenKind::LessThanOrEqual,
            TokenKind::NullLiteral,
            TokenKind::SelectFirstOpen,
            TokenKind::DotEscaped,
            TokenKind::Eof,
        ] {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.as_str()));
        }
    }

    #[test]
    fn test_only_whitespace_is_hidden() {
        assert_eq!(TokenKind::Whitespace.channel(), Channel::Hidden);
        assert_eq!(TokenKind::Identifier.channel(), Channel::Default);
        assert_eq!(TokenKind::Eof.channel(), Channel::Default);
    }

    #[test]
    fn test_classification() {
        assert!(TokenKind::True.is_literal());
        assert!(TokenKind::True.is_keyword());
        assert!(!TokenKind::True.is_operator());
        assert!(TokenKind::Matches.is_operator());
        assert!(TokenKind::TypeReferenceOpen.is_punctuation());
        assert!(TokenKind::SelectLastOpen.is_opener());
        assert_eq!(TokenKind::Between.token_class(), TokenClass::Operator);
        assert_eq!(TokenKind::Pound.token_class(), TokenClass::Punctuation);
        assert_eq!(TokenKind::Identifier.token_class(), TokenClass::Identifier);
        assert_eq!(TokenKind::Eof.token_class(), TokenClass::Eof);
    }

    #[test]
    fn test_fixed_text() {
        assert_eq!(TokenKind::SelectLastOpen.fixed_text(), Some("${"));
        assert_eq!(TokenKind::NullLiteral.fixed_text(), Some("null"));
        assert_eq!(TokenKind::DotEscaped.fixed_text(), Some("\\."));
        assert_eq!(TokenKind::Identifier.fixed_text(), None);
    }

    #[test]
    fn test_token_offsets_and_channel() {
        let start = Position::start();
        let token = Token::new(TokenKind::Whitespace, "  ", Span::new(start, start.advance_str("  ")));
        assert_eq!(token.start_offset(), 0);
        assert_eq!(token.end_offset(), 2);
        assert!(token.is_hidden());

        let eof = Token::eof(Span::empty_at(start));
        assert!(eof.is_eof());
        assert_eq!(eof.to_string(), "<EOF>");
    }
}
