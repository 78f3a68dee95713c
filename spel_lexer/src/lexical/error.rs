//! Lexical errors
use crate::logging::codes::{self, Code, Severity};
use crate::utils::Span;

/// Reasons a scan stops. Every variant is fatal: the tokenizer reports
/// exactly one error, at the first point of failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LexerError {
    #[error("unrecognized character {character:?} at {span}")]
    UnrecognizedCharacter { character: char, span: Span },

    #[error("unterminated string literal starting at {span} (missing closing {delimiter})")]
    UnterminatedStringLiteral { delimiter: char, span: Span },

    #[error("malformed numeric literal '{text}' at {span}: {reason}")]
    MalformedNumericLiteral {
        text: String,
        reason: &'static str,
        span: Span,
    },

    #[error("expression too large: {length} bytes (max {max})")]
    SourceTooLarge { length: usize, max: usize },

    #[error("too many tokens: limit of {max} reached at {span}")]
    TooManyTokens { max: usize, span: Span },

    #[error("string literal too large: {size} bytes (max {max}) at {span}")]
    StringLiteralTooLarge { size: usize, max: usize, span: Span },

    #[error("identifier too long: {length} characters (max {max}) at {span}")]
    IdentifierTooLong { length: usize, max: usize, span: Span },
}

impl LexerError {
    pub fn error_code(&self) -> Code {
        match self {
            LexerError::UnrecognizedCharacter { .. } => codes::lexical::UNRECOGNIZED_CHARACTER,
            LexerError::UnterminatedStringLiteral { .. } => codes::lexical::UNTERMINATED_STRING,
            LexerError::MalformedNumericLiteral { .. } => codes::lexical::MALFORMED_NUMBER,
            LexerError::SourceTooLarge { .. } => codes::lexical::SOURCE_TOO_LARGE,
            LexerError::TooManyTokens { .. } => codes::lexical::TOO_MANY_TOKENS,
            LexerError::StringLiteralTooLarge { .. } => codes::lexical::STRING_TOO_LARGE,
            LexerError::IdentifierTooLong { .. } => codes::lexical::IDENTIFIER_TOO_LONG,
        }
    }

    /// Source range the error points at, when it has one
    pub fn span(&self) -> Option<Span> {
        match self {
            LexerError::UnrecognizedCharacter { span, .. }
            | LexerError::UnterminatedStringLiteral { span, .. }
            | LexerError::MalformedNumericLiteral { span, .. }
            | LexerError::TooManyTokens { span, .. }
            | LexerError::StringLiteralTooLarge { span, .. }
            | LexerError::IdentifierTooLong { span, .. } => Some(*span),
            LexerError::SourceTooLarge { .. } => None,
        }
    }

    /// Absolute byte offset of the failure
    pub fn offset(&self) -> usize {
        self.span().map_or(0, |span| span.start.offset)
    }

    pub fn severity(&self) -> Severity {
        codes::get_severity(self.error_code().as_str())
    }

    pub fn requires_halt(&self) -> bool {
        codes::requires_halt(self.error_code().as_str())
    }

    /// Resource limit violations, as opposed to malformed input
    pub fn is_limit_violation(&self) -> bool {
        matches!(
            self,
            LexerError::SourceTooLarge { .. }
                | LexerError::TooManyTokens { .. }
                | LexerError::StringLiteralTooLarge { .. }
                | LexerError::IdentifierTooLong { .. }
        )
    }
}
