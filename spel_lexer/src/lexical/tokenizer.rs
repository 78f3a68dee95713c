//! Scan driver: repeated selection and consumption until end of input
use super::cursor::Cursor;
use super::disambiguator;
use super::error::LexerError;
use super::metrics::LexicalMetrics;
use super::rules::{Proposal, RuleFailure};
use crate::config::compile_time::lexical::*;
use crate::config::runtime::LexicalPreferences;
use crate::logging::codes;
use crate::tokens::{Token, TokenKind};
use crate::utils::Span;
use crate::{log_debug, log_error, log_success};
use std::iter::FusedIterator;

#[derive(Debug, Clone, PartialEq)]
enum ScanState {
    Scanning,
    Done,
    /// Terminal. The stored error is returned again on every later call.
    Failed(LexerError),
}

/// One scan over one expression.
///
/// `next_token` yields tokens in order, then EOF. Once EOF has been produced
/// every later call yields EOF again. The first error ends the scan.
#[derive(Debug)]
pub struct Tokenizer<'a> {
    cursor: Cursor<'a>,
    state: ScanState,
    preferences: LexicalPreferences,
    metrics: LexicalMetrics,
    emitted: usize,
    started: bool,
}

impl<'a> Tokenizer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self::with_preferences(source, LexicalPreferences::default())
    }

    pub fn with_preferences(source: &'a str, preferences: LexicalPreferences) -> Self {
        Self {
            cursor: Cursor::new(source),
            state: ScanState::Scanning,
            preferences,
            metrics: LexicalMetrics::default(),
            emitted: 0,
            started: false,
        }
    }

    pub fn next_token(&mut self) -> Result<Token, LexerError> {
        match &self.state {
            ScanState::Scanning => {}
            ScanState::Done => return Ok(self.eof_token()),
            ScanState::Failed(error) => return Err(error.clone()),
        }

        match self.scan() {
            Ok(token) => {
                if token.is_eof() {
                    self.state = ScanState::Done;
                    self.report_completion();
                }
                Ok(token)
            }
            Err(error) => {
                self.report_error(&error);
                self.state = ScanState::Failed(error.clone());
                Err(error)
            }
        }
    }

    /// Parser-facing sequence: hidden-channel tokens are skipped
    pub fn tokenize(self) -> Tokens<'a> {
        Tokens {
            raw: self.tokenize_raw(),
        }
    }

    /// Every token, whitespace included, ending with EOF
    pub fn tokenize_raw(self) -> RawTokens<'a> {
        RawTokens {
            tokenizer: self,
            finished: false,
        }
    }

    pub fn metrics(&self) -> &LexicalMetrics {
        &self.metrics
    }

    pub fn preferences(&self) -> &LexicalPreferences {
        &self.preferences
    }

    /// Byte offset of the next unread character
    pub fn offset(&self) -> usize {
        self.cursor.offset()
    }

    pub fn source(&self) -> &'a str {
        self.cursor.source()
    }

    pub fn is_done(&self) -> bool {
        self.state != ScanState::Scanning
    }

    fn scan(&mut self) -> Result<Token, LexerError> {
        if !self.started {
            self.started = true;
            self.begin()?;
        }

        let Some(character) = self.cursor.peek(0) else {
            return Ok(self.eof_token());
        };

        if self.emitted >= MAX_TOKEN_COUNT {
            return Err(LexerError::TooManyTokens {
                max: MAX_TOKEN_COUNT,
                span: Span::empty_at(self.cursor.position()),
            });
        }

        let selection = disambiguator::select(&self.cursor).ok_or_else(|| {
            LexerError::UnrecognizedCharacter {
                character,
                span: self.span_of(1),
            }
        })?;

        match selection.proposal {
            Proposal::Failure { len, failure } => Err(self.failure(character, len, failure)),
            Proposal::Match { len, kind } => {
                let span = self.span_of(len);
                self.check_limits(kind, self.cursor.ahead(len), span)?;

                let token = Token::new(kind, self.cursor.advance(len), span);
                self.emitted += 1;
                self.metrics.record_token(&token, &self.preferences);

                if self.preferences.log_token_events {
                    log_debug!("Token produced",
                        "kind" => token.kind,
                        "lexeme" => format!("{:?}", token.lexeme),
                        "span" => token.span,
                        "rule" => selection.rule_name
                    );
                }

                Ok(token)
            }
        }
    }

    fn begin(&self) -> Result<(), LexerError> {
        let length = self.cursor.source().len();

        log_debug!("Starting lexical analysis",
            "source_bytes" => length,
            "max_source_length" => MAX_SOURCE_LENGTH,
            "max_tokens_allowed" => MAX_TOKEN_COUNT
        );

        if length > MAX_SOURCE_LENGTH {
            return Err(LexerError::SourceTooLarge {
                length,
                max: MAX_SOURCE_LENGTH,
            });
        }
        Ok(())
    }

    fn span_of(&self, len: usize) -> Span {
        Span::new(self.cursor.position(), self.cursor.position_after(len))
    }

    fn eof_token(&self) -> Token {
        Token::eof(Span::empty_at(self.cursor.position()))
    }

    fn failure(&self, first: char, len: usize, failure: RuleFailure) -> LexerError {
        let span = self.span_of(len);
        match failure {
            RuleFailure::UnterminatedString => LexerError::UnterminatedStringLiteral {
                delimiter: first,
                span,
            },
            RuleFailure::MalformedNumber => {
                let text = self.cursor.ahead(len);
                LexerError::MalformedNumericLiteral {
                    text: text.to_string(),
                    reason: malformed_number_reason(text),
                    span,
                }
            }
        }
    }

    fn check_limits(&self, kind: TokenKind, lexeme: &str, span: Span) -> Result<(), LexerError> {
        if kind.is_string_literal() && lexeme.len() > MAX_STRING_LITERAL_SIZE {
            return Err(LexerError::StringLiteralTooLarge {
                size: lexeme.len(),
                max: MAX_STRING_LITERAL_SIZE,
                span,
            });
        }

        if kind == TokenKind::Identifier {
            let length = lexeme.chars().count();
            if length > MAX_IDENTIFIER_LENGTH {
                return Err(LexerError::IdentifierTooLong {
                    length,
                    max: MAX_IDENTIFIER_LENGTH,
                    span,
                });
            }
        }

        Ok(())
    }

    fn report_error(&self, error: &LexerError) {
        let message = error.to_string();
        match error.span() {
            Some(span) if self.preferences.include_position_in_errors => {
                log_error!(error.error_code(), &message,
                    span = span,
                    "offset" => error.offset(),
                    "line" => span.start.line,
                    "column" => span.start.column,
                    "tokens_processed" => self.emitted
                );
            }
            _ => {
                log_error!(error.error_code(), &message,
                    "tokens_processed" => self.emitted
                );
            }
        }
    }

    fn report_completion(&self) {
        log_success!(codes::success::TOKENIZATION_COMPLETE,
            "Lexical analysis completed successfully",
            "source_bytes" => self.cursor.source().len(),
            "token_count" => self.metrics.total_tokens,
            "identifiers" => self.metrics.identifier_tokens,
            "literals" => self.metrics.literal_tokens,
            "operators" => self.metrics.operator_tokens,
            "whitespace" => self.metrics.whitespace_tokens,
            "max_string_literal_length" => self.metrics.max_string_literal_length
        );
    }
}

/// Describe which continuation a malformed numeric literal is missing
fn malformed_number_reason(text: &str) -> &'static str {
    match text.chars().last() {
        Some('x' | 'X') => "hexadecimal prefix has no digits",
        Some('.') => "decimal point has no fraction digits",
        _ => "exponent has no digits",
    }
}

/// Every token including hidden ones. Ends after EOF or after the first
/// error, whichever comes first.
#[derive(Debug)]
pub struct RawTokens<'a> {
    tokenizer: Tokenizer<'a>,
    finished: bool,
}

impl<'a> RawTokens<'a> {
    pub fn metrics(&self) -> &LexicalMetrics {
        self.tokenizer.metrics()
    }
}

impl<'a> Iterator for RawTokens<'a> {
    type Item = Result<Token, LexerError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let item = self.tokenizer.next_token();
        self.finished = match &item {
            Ok(token) => token.is_eof(),
            Err(_) => true,
        };
        Some(item)
    }
}

impl FusedIterator for RawTokens<'_> {}

/// Default-channel tokens only, ending with EOF
#[derive(Debug)]
pub struct Tokens<'a> {
    raw: RawTokens<'a>,
}

impl<'a> Tokens<'a> {
    pub fn metrics(&self) -> &LexicalMetrics {
        self.raw.metrics()
    }
}

impl<'a> Iterator for Tokens<'a> {
    type Item = Result<Token, LexerError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.raw
            .by_ref()
            .find(|item| !matches!(item, Ok(token) if token.is_hidden()))
    }
}

impl FusedIterator for Tokens<'_> {}
