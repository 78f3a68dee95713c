//! Collected token stream with parser-facing navigation
//!
//! Keeps every token, hidden ones included, and navigates over the indices
//! of the default-channel tokens. Spans stay those of the original text so
//! error reporting is exact after filtering.

use crate::logging::codes::{self, Code};
use crate::tokens::token::{Token, TokenKind};
use crate::utils::{SourceMap, Span};
use thiserror::Error;

#[derive(Debug, Clone)]
pub struct TokenStream {
    all_tokens: Vec<Token>,
    /// Indices into `all_tokens` of default-channel tokens
    significant_indices: Vec<usize>,
    /// Current position in `significant_indices`
    position: usize,
    source_map: Option<SourceMap>,
}

impl TokenStream {
    pub fn new(tokens: Vec<Token>) -> Self {
        let significant_indices: Vec<usize> = tokens
            .iter()
            .enumerate()
            .filter(|(_, token)| !token.is_hidden())
            .map(|(i, _)| i)
            .collect();

        crate::log_debug!("Token stream assembled",
            "total_tokens" => tokens.len(),
            "significant_tokens" => significant_indices.len()
        );

        Self {
            all_tokens: tokens,
            significant_indices,
            position: 0,
            source_map: None,
        }
    }

    /// Stream that can render caret diagnostics against the original text
    pub fn with_source(tokens: Vec<Token>, source: &str) -> Self {
        let mut stream = Self::new(tokens);
        stream.source_map = Some(SourceMap::new(source.to_string()));
        stream
    }

    pub fn current(&self) -> Option<&Token> {
        self.peek_ahead(0)
    }

    pub fn current_kind(&self) -> Option<TokenKind> {
        self.current().map(|token| token.kind)
    }

    pub fn current_span(&self) -> Option<Span> {
        self.current().map(|token| token.span)
    }

    /// Next significant token after the current one
    pub fn peek(&self) -> Option<&Token> {
        self.peek_ahead(1)
    }

    pub fn peek_ahead(&self, n: usize) -> Option<&Token> {
        self.significant_indices
            .get(self.position + n)
            .and_then(|&index| self.all_tokens.get(index))
    }

    pub fn advance(&mut self) -> Option<&Token> {
        if self.position < self.significant_indices.len() {
            self.position += 1;
        }
        self.current()
    }

    pub fn is_at_end(&self) -> bool {
        self.current().map_or(true, Token::is_eof)
    }

    pub fn check(&self, kind: TokenKind) -> bool {
        self.current_kind() == Some(kind)
    }

    /// Consume the current token if it has the given kind
    pub fn advance_if(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consume the current token, failing if it is not of the expected kind
    pub fn expect_kind(&mut self, expected: TokenKind) -> Result<Token, TokenStreamError> {
        match self.current() {
            Some(current) if current.kind == expected => {
                let token = current.clone();
                self.advance();
                Ok(token)
            }
            Some(current) if current.is_eof() => {
                Err(TokenStreamError::UnexpectedEndOfStream { expected })
            }
            Some(current) => Err(TokenStreamError::UnexpectedToken {
                expected,
                found: current.kind,
                lexeme: current.lexeme.clone(),
                span: current.span,
            }),
            None => Err(TokenStreamError::UnexpectedEndOfStream { expected }),
        }
    }

    pub fn save_position(&self) -> usize {
        self.position
    }

    pub fn restore_position(&mut self, saved_position: usize) {
        self.position = saved_position.min(self.significant_indices.len());
    }

    /// Number of significant tokens, EOF included
    pub fn len(&self) -> usize {
        self.significant_indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.significant_indices.is_empty()
    }

    pub fn remaining_count(&self) -> usize {
        self.significant_indices.len().saturating_sub(self.position)
    }

    /// Every token including hidden ones
    pub fn all_tokens(&self) -> &[Token] {
        &self.all_tokens
    }

    /// Concatenate every lexeme in order. Equals the scanned text.
    pub fn reconstruct_source(&self) -> String {
        self.all_tokens
            .iter()
            .map(|token| token.lexeme.as_str())
            .collect()
    }

    pub fn format_error(&self, span: Span, message: &str) -> String {
        match &self.source_map {
            Some(source_map) => source_map.format_error(&span, message),
            None => format!("error at {}: {}", span, message),
        }
    }

    pub fn has_eof(&self) -> bool {
        self.significant_indices
            .last()
            .and_then(|&index| self.all_tokens.get(index))
            .map_or(false, Token::is_eof)
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum TokenStreamError {
    #[error("expected {expected}, found {found} '{lexeme}' at {span}")]
    UnexpectedToken {
        expected: TokenKind,
        found: TokenKind,
        lexeme: String,
        span: Span,
    },

    #[error("expected {expected}, but reached end of input")]
    UnexpectedEndOfStream { expected: TokenKind },
}

impl TokenStreamError {
    pub fn error_code(&self) -> Code {
        match self {
            Self::UnexpectedToken { .. } => codes::stream::UNEXPECTED_TOKEN,
            Self::UnexpectedEndOfStream { .. } => codes::stream::UNEXPECTED_END,
        }
    }
}

/// Structural checks over a scanned token sequence
pub mod validation {
    use super::*;

    /// Each token must start exactly where the previous one ended
    pub fn validate_contiguous(tokens: &[Token]) -> Result<(), String> {
        if let Some(first) = tokens.first() {
            if first.start_offset() != 0 {
                return Err(format!(
                    "first token starts at offset {} instead of 0",
                    first.start_offset()
                ));
            }
        }

        for window in tokens.windows(2) {
            let (current, next) = (&window[0], &window[1]);
            if current.end_offset() != next.start_offset() {
                return Err(format!(
                    "gap or overlap between offsets {} and {}",
                    current.end_offset(),
                    next.start_offset()
                ));
            }
        }
        Ok(())
    }

    /// Exactly one EOF, last, with an empty span at the end of the text
    pub fn validate_eof(tokens: &[Token], source_len: usize) -> Result<(), String> {
        let eof_count = tokens.iter().filter(|t| t.is_eof()).count();
        if eof_count != 1 {
            return Err(format!("expected one EOF token, found {}", eof_count));
        }

        match tokens.last() {
            Some(last) if last.is_eof() => {
                if last.start_offset() == source_len && last.end_offset() == source_len {
                    Ok(())
                } else {
                    Err(format!(
                        "EOF span {}..{} does not sit at end of input ({})",
                        last.start_offset(),
                        last.end_offset(),
                        source_len
                    ))
                }
            }
            _ => Err("EOF is not the final token".to_string()),
        }
    }

    pub fn validate_token_stream(stream: &TokenStream, source_len: usize) -> Result<(), String> {
        validate_contiguous(stream.all_tokens())?;
        validate_eof(stream.all_tokens(), source_len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::Position;
    use assert_matches::assert_matches;

    fn build(parts: &[(TokenKind, &str)]) -> (Vec<Token>, String) {
        let mut pos = Position::start();
        let mut tokens = Vec::new();
        let mut source = String::new();
        for (kind, text) in parts {
            let end = pos.advance_str(text);
            tokens.push(Token::new(*kind, *text, Span::new(pos, end)));
            source.push_str(text);
            pos = end;
        }
        tokens.push(Token::eof(Span::empty_at(pos)));
        (tokens, source)
    }

    #[test]
    fn test_navigation_skips_hidden_tokens() {
        let (tokens, source) = build(&[
            (TokenKind::Identifier, "a"),
            (TokenKind::Whitespace, " "),
            (TokenKind::Plus, "+"),
            (TokenKind::Whitespace, "\n"),
            (TokenKind::IntegerLiteral, "1"),
        ]);
        let mut stream = TokenStream::with_source(tokens, &source);

        assert_eq!(stream.len(), 4);
        assert_eq!(stream.current_kind(), Some(TokenKind::Identifier));
        assert_eq!(stream.peek().map(|t| t.kind), Some(TokenKind::Plus));
        assert!(stream.advance_if(TokenKind::Identifier));
        assert!(!stream.advance_if(TokenKind::Minus));
        stream.advance();
        assert_eq!(stream.current_kind(), Some(TokenKind::IntegerLiteral));
        stream.advance();
        assert!(stream.is_at_end());
        assert!(stream.has_eof());
        assert_eq!(stream.reconstruct_source(), "a +\n1");
    }

    #[test]
    fn test_expect_kind_errors() {
        let (tokens, _) = build(&[(TokenKind::Identifier, "x")]);
        let mut stream = TokenStream::new(tokens);

        let err = stream.expect_kind(TokenKind::Lparen).unwrap_err();
        assert_matches!(
            err,
            TokenStreamError::UnexpectedToken {
                expected: TokenKind::Lparen,
                found: TokenKind::Identifier,
                ..
            }
        );
        assert_eq!(err.error_code(), codes::stream::UNEXPECTED_TOKEN);

        assert!(stream.expect_kind(TokenKind::Identifier).is_ok());
        assert_matches!(
            stream.expect_kind(TokenKind::Rparen),
            Err(TokenStreamError::UnexpectedEndOfStream {
                expected: TokenKind::Rparen
            })
        );
    }

    #[test]
    fn test_save_and_restore() {
        let (tokens, _) = build(&[(TokenKind::Identifier, "a"), (TokenKind::Dot, ".")]);
        let mut stream = TokenStream::new(tokens);
        let saved = stream.save_position();
        stream.advance();
        stream.advance();
        assert!(stream.is_at_end());
        stream.restore_position(saved);
        assert_eq!(stream.current_kind(), Some(TokenKind::Identifier));
        assert_eq!(stream.remaining_count(), 3);
    }

    #[test]
    fn test_validation() {
        let (tokens, source) = build(&[(TokenKind::Identifier, "ab"), (TokenKind::Whitespace, " ")]);
        let stream = TokenStream::new(tokens.clone());
        assert!(validation::validate_token_stream(&stream, source.len()).is_ok());

        let mut broken = tokens;
        broken.remove(1);
        assert!(validation::validate_contiguous(&broken).is_err());
        assert!(validation::validate_eof(&broken[..1], source.len()).is_err());
    }

    #[test]
    fn test_format_error_uses_source_map() {
        let (tokens, source) = build(&[(TokenKind::Identifier, "abc")]);
        let stream = TokenStream::with_source(tokens, &source);
        let span = stream.current_span().unwrap();
        let rendered = stream.format_error(span, "unexpected identifier");
        assert!(rendered.contains("1 | abc"));
        assert!(rendered.contains("^^^"));
    }
}
