//! Token types for SpEL lexical analysis
//!
//! - [`TokenKind`] enumerates every kind the lexer can emit, with the stable
//!   kebab-case names used in fixtures and JSON output.
//! - [`Token`] is the positioned record: kind, exact lexeme, byte span and
//!   channel. Whitespace travels on the hidden channel so the concatenation
//!   of all lexemes always rebuilds the input.
//! - [`TokenStream`] is the collected, parser-facing view with lookahead,
//!   checkpoints and caret diagnostics.
//! - [`literal`] decodes literal lexemes into values.

pub mod literal;
pub mod token;
pub mod token_stream;

pub use literal::{literal_value, LiteralError, LiteralValue};
pub use token::{Channel, Token, TokenClass, TokenKind};
pub use token_stream::{TokenStream, TokenStreamError};

pub use crate::utils::{Position, SourceMap, Span};
