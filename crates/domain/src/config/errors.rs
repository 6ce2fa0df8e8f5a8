#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {0}: {1}")]
    FileRead(String, String),

    #[error("Failed to parse config: {0}")]
    Parse(String),

    #[error("Configuration validation error: {0}")]
    Validation(String),

    #[error("Rules line {line}: {message}")]
    DirectiveSyntax { line: usize, message: String },

    #[error("Rewrite rule #{index}: {source}")]
    Rule {
        index: usize,
        #[source]
        source: RuleError,
    },
}

/// Errors raised while turning rule definitions into compiled rules.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuleError {
    #[error("At least 3 arguments required, received {0}")]
    MissingArguments(usize),

    #[error("Only (name, data, both) RR parts are supported, received: {0}")]
    UnsupportedPart(String),

    #[error(
        "Only exact, prefix, suffix, substring, regex, fullregex, noop rule types are supported, received: {0}"
    )]
    UnsupportedMatchType(String),

    #[error("invalid regex matching pattern: {pattern}: {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error(
        "the rewrite regex pattern ({template}) uses more subexpressions than its corresponding matching regex pattern ({pattern})"
    )]
    TooManySubexpressions { template: String, pattern: String },

    #[error("invalid query class {0}")]
    InvalidClass(String),

    #[error("invalid RR type {0}")]
    InvalidType(String),

    #[error("Only answer, additional, authority supported, received: {0}")]
    UnsupportedSection(String),

    #[error("at least one answer rule is required")]
    MissingAnswer,
}
