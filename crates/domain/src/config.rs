pub mod directive;
pub mod errors;
pub mod logging;
pub mod rewrite;
pub mod root;
pub mod server;
pub mod upstream;

pub use directive::parse_directives;
pub use errors::{ConfigError, RuleError};
pub use logging::LoggingConfig;
pub use rewrite::{FieldPart, MatchType, RewriteConfig, RewriteRuleConfig, SubRuleSpec};
pub use root::{CliOverrides, Config};
pub use server::ServerConfig;
pub use upstream::UpstreamConfig;
