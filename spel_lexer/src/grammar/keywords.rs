//! Reserved words of the expression language
//!
//! Matching is case-sensitive: `and` is a keyword, `AND` is an identifier.
use crate::tokens::TokenKind;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Keyword {
    // Word operators
    And,
    Or,
    In,
    Is,
    Between,
    Matches,
    New,

    // Literal keywords
    True,
    False,
    Null,
}

impl Keyword {
    pub const ALL: [Keyword; 10] = [
        Keyword::And,
        Keyword::Or,
        Keyword::In,
        Keyword::Is,
        Keyword::Between,
        Keyword::Matches,
        Keyword::New,
        Keyword::True,
        Keyword::False,
        Keyword::Null,
    ];

    /// Exact, case-sensitive lookup
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "and" => Some(Self::And),
            "or" => Some(Self::Or),
            "in" => Some(Self::In),
            "is" => Some(Self::Is),
            "between" => Some(Self::Between),
            "matches" => Some(Self::Matches),
            "new" => Some(Self::New),
            "true" => Some(Self::True),
            "false" => Some(Self::False),
            "null" => Some(Self::Null),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::And => "and",
            Self::Or => "or",
            Self::In => "in",
            Self::Is => "is",
            Self::Between => "between",
            Self::Matches => "matches",
            Self::New => "new",
            Self::True => "true",
            Self::False => "false",
            Self::Null => "null",
        }
    }

    /// Token kind emitted when the keyword wins disambiguation
    pub fn token_kind(&self) -> TokenKind {
        match self {
            Self::And => TokenKind::And,
            Self::Or => TokenKind::Or,
            Self::In => TokenKind::In,
            Self::Is => TokenKind::Is,
            Self::Between => TokenKind::Between,
            Self::Matches => TokenKind::Matches,
            Self::New => TokenKind::New,
            Self::True => TokenKind::True,
            Self::False => TokenKind::False,
            Self::Null => TokenKind::NullLiteral,
        }
    }

    pub fn is_literal(&self) -> bool {
        matches!(self, Self::True | Self::False | Self::Null)
    }
}

impl std::fmt::Display for Keyword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

pub fn reserved_keywords() -> impl Iterator<Item = &'static str> {
    Keyword::ALL.iter().map(Keyword::as_str)
}

pub fn is_reserved_word(s: &str) -> bool {
    Keyword::from_str(s).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_through_text() {
        for keyword in Keyword::ALL {
            assert_eq!(Keyword::from_str(keyword.as_str()), Some(keyword));
            assert!(keyword.token_kind().is_keyword());
            assert_eq!(keyword.token_kind().fixed_text(), Some(keyword.as_str()));
        }
    }

    #[test]
    fn test_case_sensitive() {
        assert!(is_reserved_word("between"));
        assert!(!is_reserved_word("Between"));
        assert!(!is_reserved_word("AND"));
        assert!(!is_reserved_word("T"));
    }

    #[test]
    fn test_literal_keywords() {
        assert!(Keyword::Null.is_literal());
        assert!(!Keyword::Matches.is_literal());
        assert_eq!(Keyword::Null.token_kind(), TokenKind::NullLiteral);
        assert_eq!(reserved_keywords().count(), 10);
    }
}
