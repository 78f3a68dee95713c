// Internal modules
pub mod config;
pub mod grammar;
pub mod lexical;
#[macro_use]
pub mod logging;
pub mod source;
pub mod tokens;
pub mod utils;

// Re-export key types for library consumers
pub use lexical::{
    create_tokenizer, tokenize, tokenize_all, tokenize_raw, tokenize_to_stream, LexerError,
    Tokenizer,
};
pub use tokens::{Channel, Token, TokenKind, TokenStream};
