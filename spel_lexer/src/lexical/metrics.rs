//! Per-scan token statistics
use crate::config::runtime::LexicalPreferences;
use crate::tokens::{Token, TokenClass, TokenKind};
use serde::Serialize;
use std::collections::BTreeMap;

/// Counts gathered while scanning. EOF is never counted.
#[derive(Debug, Default, Clone, Serialize)]
pub struct LexicalMetrics {
    pub total_tokens: usize,
    pub literal_tokens: usize,
    pub keyword_tokens: usize,
    pub identifier_tokens: usize,
    pub operator_tokens: usize,
    pub punctuation_tokens: usize,
    pub whitespace_tokens: usize,
    /// Bytes, delimiters included
    pub max_string_literal_length: usize,
    /// Characters
    pub max_identifier_length: usize,

    // Only filled when operator tracking is enabled
    pub operator_usage_patterns: BTreeMap<String, usize>,
}

impl LexicalMetrics {
    pub(crate) fn record_token(&mut self, token: &Token, preferences: &LexicalPreferences) {
        if token.is_eof() {
            return;
        }
        self.total_tokens += 1;

        if !preferences.collect_detailed_metrics {
            return;
        }

        if token.kind.is_keyword() {
            self.keyword_tokens += 1;
        }

        match token.kind.token_class() {
            TokenClass::Literal => {
                self.literal_tokens += 1;
                if token.kind.is_string_literal() {
                    self.max_string_literal_length =
                        self.max_string_literal_length.max(token.lexeme.len());
                }
            }
            TokenClass::Identifier => {
                self.identifier_tokens += 1;
                self.max_identifier_length = self
                    .max_identifier_length
                    .max(token.lexeme.chars().count());
            }
            TokenClass::Operator => {
                self.operator_tokens += 1;

                if preferences.track_operator_patterns {
                    *self
                        .operator_usage_patterns
                        .entry(token.kind.as_str().to_string())
                        .or_insert(0) += 1;
                }
            }
            TokenClass::Punctuation => self.punctuation_tokens += 1,
            TokenClass::Whitespace => self.whitespace_tokens += 1,
            TokenClass::Eof => {}
        }
    }

    /// Usage count of one operator kind, zero when not tracked
    pub fn operator_usage(&self, kind: TokenKind) -> usize {
        self.operator_usage_patterns
            .get(kind.as_str())
            .copied()
            .unwrap_or(0)
    }
}
