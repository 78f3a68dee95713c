//! Configuration module for the SpEL lexer
//! Compile-time limits are generated from TOML configuration by build.rs

// Include generated constants from build.rs
include!(concat!(env!("OUT_DIR"), "/constants.rs"));

pub mod runtime;

/// Build information and configuration metadata
pub mod build_info {
    /// Returns the configuration profile used during build
    pub fn profile() -> &'static str {
        option_env!("SPEL_BUILD_PROFILE").unwrap_or("development")
    }

    /// Returns the configuration directory used during build
    pub fn config_dir() -> &'static str {
        option_env!("SPEL_CONFIG_DIR").unwrap_or("config")
    }

    /// Returns configuration source information
    pub fn source_info() -> String {
        format!("Generated from {}/{}.toml", config_dir(), profile())
    }
}

#[cfg(test)]
mod tests {
    use super::compile_time::{lexical, logging};
    use super::*;

    #[test]
    fn test_generated_limits_are_sane() {
        assert!(lexical::MAX_SOURCE_LENGTH > 0);
        assert!(lexical::MAX_TOKEN_COUNT > 0);
        assert!(lexical::MAX_STRING_LITERAL_SIZE <= lexical::MAX_SOURCE_LENGTH);
        assert!(lexical::MAX_IDENTIFIER_LENGTH > 0);
        assert!(logging::LOG_BUFFER_SIZE >= 100);
    }

    #[test]
    fn test_build_info() {
        assert!(build_info::source_info().ends_with(".toml"));
    }
}
