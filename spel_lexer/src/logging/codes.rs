//! Error and success codes for the SpEL lexer
//!
//! Every code that can appear in a log event or on a `LexerError` is declared
//! here together with its classification metadata.

use std::collections::HashMap;
use std::sync::OnceLock;

/// Code wrapper shared by error and success codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Code(&'static str);

impl Code {
    pub const fn new(code: &'static str) -> Self {
        Self(code)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for Code {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Critical = 0,
    High = 1,
    Medium = 2,
    Low = 3,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
        }
    }
}

/// Classification metadata for an error code
#[derive(Debug, Clone)]
pub struct ErrorMetadata {
    pub code: &'static str,
    pub category: &'static str,
    pub severity: Severity,
    pub recoverable: bool,
    pub requires_halt: bool,
    pub description: &'static str,
    pub recommended_action: &'static str,
}

/// System error codes
pub mod system {
    use super::Code;

    pub const INTERNAL_ERROR: Code = Code::new("ERR001");
    pub const INITIALIZATION_FAILURE: Code = Code::new("ERR002");
}

/// Expression source loading error codes
pub mod source {
    use super::Code;

    pub const FILE_NOT_FOUND: Code = Code::new("E005");
    pub const FILE_TOO_LARGE: Code = Code::new("E007");
    pub const PERMISSION_DENIED: Code = Code::new("E009");
    pub const INVALID_ENCODING: Code = Code::new("E010");
    pub const IO_ERROR: Code = Code::new("E011");
}

/// Lexical analysis error codes
pub mod lexical {
    use super::Code;

    pub const UNRECOGNIZED_CHARACTER: Code = Code::new("E020");
    pub const UNTERMINATED_STRING: Code = Code::new("E021");
    pub const MALFORMED_NUMBER: Code = Code::new("E022");
    pub const IDENTIFIER_TOO_LONG: Code = Code::new("E023");
    pub const STRING_TOO_LARGE: Code = Code::new("E024");
    pub const SOURCE_TOO_LARGE: Code = Code::new("E026");
    pub const TOO_MANY_TOKENS: Code = Code::new("E027");
}

/// Token stream consumption error codes
pub mod stream {
    use super::Code;

    pub const UNEXPECTED_TOKEN: Code = Code::new("E050");
    pub const UNEXPECTED_END: Code = Code::new("E051");
}

/// Success codes
pub mod success {
    use super::Code;

    pub const SYSTEM_INITIALIZATION_COMPLETED: Code = Code::new("I004");
    pub const FILE_PROCESSING_SUCCESS: Code = Code::new("I006");
    pub const TOKENIZATION_COMPLETE: Code = Code::new("I020");
}

const METADATA: &[ErrorMetadata] = &[
    ErrorMetadata {
        code: "ERR001",
        category: "System",
        severity: Severity::Critical,
        recoverable: false,
        requires_halt: true,
        description: "Internal lexer error",
        recommended_action: "File a bug report with the offending expression",
    },
    ErrorMetadata {
        code: "ERR002",
        category: "System",
        severity: Severity::Critical,
        recoverable: false,
        requires_halt: true,
        description: "Logging or configuration initialization failure",
        recommended_action: "Check SPEL_* environment variables",
    },
    ErrorMetadata {
        code: "E005",
        category: "Source",
        severity: Severity::Medium,
        recoverable: false,
        requires_halt: true,
        description: "Expression file not found",
        recommended_action: "Check the path passed with --file",
    },
    ErrorMetadata {
        code: "E007",
        category: "Source",
        severity: Severity::Medium,
        recoverable: false,
        requires_halt: true,
        description: "Expression file exceeds the source length limit",
        recommended_action: "Split the expression or raise max_source_length",
    },
    ErrorMetadata {
        code: "E009",
        category: "Source",
        severity: Severity::Medium,
        recoverable: false,
        requires_halt: true,
        description: "Permission denied reading expression file",
        recommended_action: "Check file permissions",
    },
    ErrorMetadata {
        code: "E010",
        category: "Source",
        severity: Severity::Medium,
        recoverable: false,
        requires_halt: true,
        description: "Expression file is not valid UTF-8",
        recommended_action: "Re-encode the file as UTF-8",
    },
    ErrorMetadata {
        code: "E011",
        category: "Source",
        severity: Severity::Medium,
        recoverable: false,
        requires_halt: true,
        description: "I/O error while reading expression file",
        recommended_action: "Check disk and file system state",
    },
    ErrorMetadata {
        code: "E020",
        category: "Lexical",
        severity: Severity::Medium,
        recoverable: false,
        requires_halt: true,
        description: "Character cannot start any token",
        recommended_action: "Remove the character or quote it inside a string literal",
    },
    ErrorMetadata {
        code: "E021",
        category: "Lexical",
        severity: Severity::Medium,
        recoverable: false,
        requires_halt: true,
        description: "String literal not terminated before end of input",
        recommended_action: "Add the closing quote",
    },
    ErrorMetadata {
        code: "E022",
        category: "Lexical",
        severity: Severity::Low,
        recoverable: false,
        requires_halt: true,
        description: "Numeric literal is incomplete or malformed",
        recommended_action: "Complete the fraction, exponent, or hex digits",
    },
    ErrorMetadata {
        code: "E023",
        category: "Lexical",
        severity: Severity::Low,
        recoverable: false,
        requires_halt: true,
        description: "Identifier exceeds maximum allowed length",
        recommended_action: "Shorten the identifier or raise max_identifier_length",
    },
    ErrorMetadata {
        code: "E024",
        category: "Lexical",
        severity: Severity::Medium,
        recoverable: false,
        requires_halt: true,
        description: "String literal exceeds maximum size limit",
        recommended_action: "Shorten the literal or raise max_string_literal_size",
    },
    ErrorMetadata {
        code: "E026",
        category: "Lexical",
        severity: Severity::High,
        recoverable: false,
        requires_halt: true,
        description: "Expression text exceeds maximum source length",
        recommended_action: "Split the expression or raise max_source_length",
    },
    ErrorMetadata {
        code: "E027",
        category: "Lexical",
        severity: Severity::High,
        recoverable: false,
        requires_halt: true,
        description: "Expression produced too many tokens",
        recommended_action: "Simplify the expression or raise max_token_count",
    },
    ErrorMetadata {
        code: "E050",
        category: "Stream",
        severity: Severity::Medium,
        recoverable: true,
        requires_halt: false,
        description: "Token stream held a different token than expected",
        recommended_action: "Check the expression near the reported position",
    },
    ErrorMetadata {
        code: "E051",
        category: "Stream",
        severity: Severity::Medium,
        recoverable: true,
        requires_halt: false,
        description: "Token stream ended before an expected token",
        recommended_action: "Complete the expression",
    },
];

static ERROR_REGISTRY: OnceLock<HashMap<&'static str, &'static ErrorMetadata>> = OnceLock::new();

fn get_error_registry() -> &'static HashMap<&'static str, &'static ErrorMetadata> {
    ERROR_REGISTRY.get_or_init(|| METADATA.iter().map(|m| (m.code, m)).collect())
}

/// Get complete metadata for an error code
pub fn get_error_metadata(code: &str) -> Option<&'static ErrorMetadata> {
    get_error_registry().get(code).copied()
}

pub fn get_severity(code: &str) -> Severity {
    get_error_metadata(code)
        .map(|metadata| metadata.severity)
        .unwrap_or(Severity::Medium)
}

pub fn is_recoverable(code: &str) -> bool {
    get_error_metadata(code)
        .map(|metadata| metadata.recoverable)
        .unwrap_or(true)
}

/// Check if error stops tokenization
pub fn requires_halt(code: &str) -> bool {
    get_error_metadata(code)
        .map(|metadata| metadata.requires_halt)
        .unwrap_or(false)
}

/// Get human-readable description for error code
pub fn get_description(code: &str) -> &'static str {
    get_error_metadata(code)
        .map(|metadata| metadata.description)
        .unwrap_or("Unknown error")
}

pub fn get_action(code: &str) -> &'static str {
    get_error_metadata(code)
        .map(|metadata| metadata.recommended_action)
        .unwrap_or("No specific action available")
}

pub fn get_category(code: &str) -> &'static str {
    get_error_metadata(code)
        .map(|metadata| metadata.category)
        .unwrap_or("Unknown")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_error_code_has_metadata() {
        let codes = [
            system::INTERNAL_ERROR,
            system::INITIALIZATION_FAILURE,
            source::FILE_NOT_FOUND,
            source::FILE_TOO_LARGE,
            source::PERMISSION_DENIED,
            source::INVALID_ENCODING,
            source::IO_ERROR,
            lexical::UNRECOGNIZED_CHARACTER,
            lexical::UNTERMINATED_STRING,
            lexical::MALFORMED_NUMBER,
            lexical::IDENTIFIER_TOO_LONG,
            lexical::STRING_TOO_LARGE,
            lexical::SOURCE_TOO_LARGE,
            lexical::TOO_MANY_TOKENS,
            stream::UNEXPECTED_TOKEN,
            stream::UNEXPECTED_END,
        ];
        for code in codes {
            assert!(
                get_error_metadata(code.as_str()).is_some(),
                "missing metadata for {}",
                code
            );
        }
    }

    #[test]
    fn test_lexical_errors_halt_tokenization() {
        assert!(requires_halt(lexical::UNTERMINATED_STRING.as_str()));
        assert_eq!(get_category(lexical::MALFORMED_NUMBER.as_str()), "Lexical");
        assert!(!requires_halt(stream::UNEXPECTED_TOKEN.as_str()));
    }

    #[test]
    fn test_unknown_code_defaults() {
        assert_eq!(get_description("E999"), "Unknown error");
        assert_eq!(get_severity("E999"), Severity::Medium);
        assert!(is_recoverable("E999"));
        assert_eq!(get_action("E999"), "No specific action available");
    }
}
