mod compound_rule;
mod response_rewriter;
mod rule;
mod rule_builder;

pub use compound_rule::CompoundRule;
pub use response_rewriter::ResponseRewriter;
pub use rule::{RewriteResult, Rule};
pub use rule_builder::RuleBuilder;
