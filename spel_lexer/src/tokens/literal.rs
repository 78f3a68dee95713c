//! Decoding of literal lexemes into values
//!
//! The lexer only classifies text. These helpers turn the lexeme of a literal
//! token into the value a parser would attach to its literal node.
use super::token::{Token, TokenKind};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum LiteralValue {
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    String(String),
    Boolean(bool),
    Null,
}

#[derive(Debug, Error, PartialEq)]
pub enum LiteralError {
    #[error("{0} token does not carry a literal value")]
    NotALiteral(TokenKind),

    #[error("numeric literal '{lexeme}' is out of range for its type")]
    OutOfRange { lexeme: String },

    #[error("'{lexeme}' is not a well-formed {kind} lexeme")]
    Malformed { kind: TokenKind, lexeme: String },
}

/// Decode any literal token
pub fn literal_value(token: &Token) -> Result<LiteralValue, LiteralError> {
    match token.kind {
        TokenKind::IntegerLiteral | TokenKind::HexIntegerLiteral => {
            integer_literal_value(token.kind, &token.lexeme)
        }
        TokenKind::RealLiteral => real_literal_value(&token.lexeme),
        TokenKind::StringLiteralSingle | TokenKind::StringLiteralDouble => {
            string_literal_value(token.kind, &token.lexeme).map(LiteralValue::String)
        }
        TokenKind::True => Ok(LiteralValue::Boolean(true)),
        TokenKind::False => Ok(LiteralValue::Boolean(false)),
        TokenKind::NullLiteral => Ok(LiteralValue::Null),
        other => Err(LiteralError::NotALiteral(other)),
    }
}

/// Strip the delimiters. In single-quoted text a doubled quote stands for one quote.
pub fn string_literal_value(kind: TokenKind, lexeme: &str) -> Result<String, LiteralError> {
    let quote = match kind {
        TokenKind::StringLiteralSingle => '\'',
        TokenKind::StringLiteralDouble => '"',
        other => return Err(LiteralError::NotALiteral(other)),
    };

    let body = lexeme
        .strip_prefix(quote)
        .and_then(|rest| rest.strip_suffix(quote))
        .ok_or_else(|| LiteralError::Malformed {
            kind,
            lexeme: lexeme.to_string(),
        })?;

    match kind {
        TokenKind::StringLiteralSingle => Ok(body.replace("''", "'")),
        _ => Ok(body.to_string()),
    }
}

/// An `L`/`l` suffix selects a 64-bit value, otherwise the value must fit 32 bits
pub fn integer_literal_value(kind: TokenKind, lexeme: &str) -> Result<LiteralValue, LiteralError> {
    let malformed = || LiteralError::Malformed {
        kind,
        lexeme: lexeme.to_string(),
    };
    let out_of_range = || LiteralError::OutOfRange {
        lexeme: lexeme.to_string(),
    };

    let (digits, long) = match lexeme.strip_suffix(&['L', 'l'][..]) {
        Some(digits) => (digits, true),
        None => (lexeme, false),
    };

    let radix_digits = match kind {
        TokenKind::IntegerLiteral => digits,
        TokenKind::HexIntegerLiteral => digits
            .strip_prefix("0x")
            .or_else(|| digits.strip_prefix("0X"))
            .ok_or_else(malformed)?,
        other => return Err(LiteralError::NotALiteral(other)),
    };
    let radix = if kind == TokenKind::HexIntegerLiteral { 16 } else { 10 };

    if radix_digits.is_empty() || !radix_digits.chars().all(|c| c.is_digit(radix)) {
        return Err(malformed());
    }

    let value = i64::from_str_radix(radix_digits, radix).map_err(|_| out_of_range())?;
    if long {
        Ok(LiteralValue::Long(value))
    } else {
        i32::try_from(value)
            .map(LiteralValue::Int)
            .map_err(|_| out_of_range())
    }
}

/// `F`/`f` yields a 32-bit float; `D`/`d` or no suffix yields a double
pub fn real_literal_value(lexeme: &str) -> Result<LiteralValue, LiteralError> {
    let malformed = || LiteralError::Malformed {
        kind: TokenKind::RealLiteral,
        lexeme: lexeme.to_string(),
    };

    if let Some(number) = lexeme.strip_suffix(&['F', 'f'][..]) {
        let value: f32 = number.parse().map_err(|_| malformed())?;
        return if value.is_finite() {
            Ok(LiteralValue::Float(value))
        } else {
            Err(LiteralError::OutOfRange {
                lexeme: lexeme.to_string(),
            })
        };
    }

    let number = lexeme.strip_suffix(&['D', 'd'][..]).unwrap_or(lexeme);
    let value: f64 = number.parse().map_err(|_| malformed())?;
    if value.is_finite() {
        Ok(LiteralValue::Double(value))
    } else {
        Err(LiteralError::OutOfRange {
            lexeme: lexeme.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_single_quoted_doubled_quote_collapses() {
        assert_eq!(
            string_literal_value(TokenKind::StringLiteralSingle, "'it''s'").unwrap(),
            "it's"
        );
        assert_eq!(
            string_literal_value(TokenKind::StringLiteralSingle, "''").unwrap(),
            ""
        );
    }

    #[test]
    fn test_double_quoted_body_is_verbatim() {
        assert_eq!(
            string_literal_value(TokenKind::StringLiteralDouble, "\"a''b\"").unwrap(),
            "a''b"
        );
        assert_matches!(
            string_literal_value(TokenKind::StringLiteralDouble, "\"open"),
            Err(LiteralError::Malformed { .. })
        );
    }

    #[test]
    fn test_integer_values() {
        assert_eq!(
            integer_literal_value(TokenKind::IntegerLiteral, "42").unwrap(),
            LiteralValue::Int(42)
        );
        assert_eq!(
            integer_literal_value(TokenKind::IntegerLiteral, "3L").unwrap(),
            LiteralValue::Long(3)
        );
        assert_eq!(
            integer_literal_value(TokenKind::HexIntegerLiteral, "0x1F").unwrap(),
            LiteralValue::Int(31)
        );
        assert_eq!(
            integer_literal_value(TokenKind::HexIntegerLiteral, "0XffL").unwrap(),
            LiteralValue::Long(255)
        );
    }

    #[test]
    fn test_integer_overflow_is_reported() {
        assert_matches!(
            integer_literal_value(TokenKind::IntegerLiteral, "2147483648"),
            Err(LiteralError::OutOfRange { .. })
        );
        assert_eq!(
            integer_literal_value(TokenKind::IntegerLiteral, "2147483648L").unwrap(),
            LiteralValue::Long(2_147_483_648)
        );
        assert_matches!(
            integer_literal_value(TokenKind::IntegerLiteral, "99999999999999999999L"),
            Err(LiteralError::OutOfRange { .. })
        );
    }

    #[test]
    fn test_real_values() {
        assert_eq!(real_literal_value("2.75").unwrap(), LiteralValue::Double(2.75));
        assert_eq!(real_literal_value(".5").unwrap(), LiteralValue::Double(0.5));
        assert_eq!(real_literal_value("3e10").unwrap(), LiteralValue::Double(3e10));
        assert_eq!(real_literal_value("1.5E-3d").unwrap(), LiteralValue::Double(1.5e-3));
        assert_eq!(real_literal_value("2f").unwrap(), LiteralValue::Float(2.0));
        assert_matches!(real_literal_value("1e999"), Err(LiteralError::OutOfRange { .. }));
    }

    #[test]
    fn test_keyword_literals_and_non_literals() {
        use crate::utils::{Position, Span};
        let span = Span::empty_at(Position::start());
        assert_eq!(
            literal_value(&Token::new(TokenKind::NullLiteral, "null", span)).unwrap(),
            LiteralValue::Null
        );
        assert_eq!(
            literal_value(&Token::new(TokenKind::False, "false", span)).unwrap(),
            LiteralValue::Boolean(false)
        );
        assert_matches!(
            literal_value(&Token::new(TokenKind::Plus, "+", span)),
            Err(LiteralError::NotALiteral(TokenKind::Plus))
        );
    }
}
