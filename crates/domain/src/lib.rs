//! rewriteng domain layer
pub mod config;
pub mod dns_message;
pub mod dns_record;
pub mod errors;
pub mod validators;

pub use config::{
    parse_directives, CliOverrides, Config, ConfigError, FieldPart, LoggingConfig, MatchType,
    RewriteConfig, RewriteRuleConfig, RuleError, ServerConfig, SubRuleSpec, UpstreamConfig,
};
pub use dns_message::{DnsMessage, Question, ResponseCode, Section};
pub use dns_record::{DnsClass, OpaquePayload, RecordData, RecordType, ResourceRecord, Soa, Srv};
pub use errors::DomainError;
