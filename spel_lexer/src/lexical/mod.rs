//! Lexical analysis for SpEL expression text
//!
//! Scanning is longest-match: every rule in [`rules::RULES`] is offered the
//! text at the cursor, the longest proposal wins and ties go to the rule
//! declared first. Malformed literals take part in that contest as failure
//! proposals, so errors surface at the first offending character run.
//!
//! ```text
//! text -> Cursor -> rules -> disambiguator -> Tokenizer -> Token ... EOF
//! ```

pub mod cursor;
pub mod disambiguator;
pub mod error;
pub mod metrics;
pub mod rules;
pub mod tokenizer;

use crate::config::runtime::LexicalPreferences;
use crate::tokens::{Token, TokenStream};

pub use cursor::Cursor;
pub use error::LexerError;
pub use metrics::LexicalMetrics;
pub use tokenizer::{RawTokens, Tokenizer, Tokens};

// ============================================================================
// MODULE API
// ============================================================================

/// Create a tokenizer with preferences taken from the environment
pub fn create_tokenizer(source: &str) -> Tokenizer<'_> {
    Tokenizer::new(source)
}

pub fn create_tokenizer_with_preferences(
    source: &str,
    preferences: LexicalPreferences,
) -> Tokenizer<'_> {
    Tokenizer::with_preferences(source, preferences)
}

/// Lazy parser-facing tokens of `source`
pub fn tokenize(source: &str) -> Tokens<'_> {
    create_tokenizer(source).tokenize()
}

/// Lazy tokens of `source`, whitespace included
pub fn tokenize_raw(source: &str) -> RawTokens<'_> {
    create_tokenizer(source).tokenize_raw()
}

/// Scan all of `source` into a navigable stream that can render diagnostics
pub fn tokenize_to_stream(source: &str) -> Result<TokenStream, LexerError> {
    let tokens = tokenize_raw(source).collect::<Result<Vec<_>, _>>()?;
    Ok(TokenStream::with_source(tokens, source))
}

/// Every token of `source`, hidden ones included, ending with EOF
pub fn tokenize_all(source: &str) -> Result<Vec<Token>, LexerError> {
    tokenize_raw(source).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::token_stream::validation;
    use crate::tokens::TokenKind;
    use assert_matches::assert_matches;

    #[test]
    fn test_tokenize_to_stream() {
        let source = "#root.items.?[price > 10.5]";
        let mut stream = tokenize_to_stream(source).unwrap();

        assert!(validation::validate_token_stream(&stream, source.len()).is_ok());
        assert_eq!(stream.reconstruct_source(), source);
        assert_eq!(stream.current_kind(), Some(TokenKind::Pound));
        assert!(stream.expect_kind(TokenKind::Pound).is_ok());
        assert!(stream.expect_kind(TokenKind::Identifier).is_ok());
        assert_eq!(stream.len(), 12);
    }

    #[test]
    fn test_tokenize_all_keeps_whitespace() {
        let tokens = tokenize_all("1 + 2").unwrap();
        assert_eq!(tokens.len(), 6);
        assert!(tokens.iter().any(|token| token.kind == TokenKind::Whitespace));
        assert!(tokens.last().unwrap().is_eof());
    }

    #[test]
    fn test_errors_propagate() {
        assert_matches!(
            tokenize_to_stream("'open"),
            Err(LexerError::UnterminatedStringLiteral { .. })
        );
        assert_matches!(
            tokenize_all("a # `"),
            Err(LexerError::UnrecognizedCharacter { character: '`', .. })
        );
    }

    #[test]
    fn test_preferences_reach_tokenizer() {
        let preferences = LexicalPreferences {
            collect_detailed_metrics: false,
            track_operator_patterns: false,
            include_position_in_errors: false,
            log_token_events: false,
        };
        let mut tokenizer = create_tokenizer_with_preferences("a + b", preferences);
        while !tokenizer.next_token().unwrap().is_eof() {}

        assert_eq!(tokenizer.metrics().total_tokens, 5);
        assert_eq!(tokenizer.metrics().operator_tokens, 0);
        assert!(!tokenizer.preferences().include_position_in_errors);
    }

    #[test]
    fn test_lazy_sequence_is_filtered() {
        let kinds: Vec<_> = tokenize(" x ").map(|item| item.unwrap().kind).collect();
        assert_eq!(kinds, vec![TokenKind::Identifier, TokenKind::Eof]);
    }
}
