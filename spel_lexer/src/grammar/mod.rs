//! Lexical grammar data shared by the rule catalogue

pub mod keywords;

pub use keywords::{is_reserved_word, Keyword};
