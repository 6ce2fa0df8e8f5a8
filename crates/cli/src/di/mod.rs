use rewriteng_application::ports::DnsHandler;
use rewriteng_application::services::CompoundRule;
use rewriteng_application::use_cases::RewriteHandler;
use rewriteng_domain::Config;
use rewriteng_infrastructure::dns::UpstreamForwarder;
use std::sync::Arc;
use tracing::{debug, info};

/// Rewrite handler in front of the upstream forwarder.
pub fn build_handler_chain(config: &Config) -> anyhow::Result<Arc<dyn DnsHandler>> {
    let forwarder = UpstreamForwarder::from_config(&config.upstream)?;
    info!(
        servers = ?forwarder.servers(),
        timeout_ms = config.upstream.timeout_ms,
        tcp_fallback = config.upstream.tcp_fallback,
        "Upstream forwarder configured"
    );

    let rules = CompoundRule::build_rules(&config.rewrite.rules)?;
    for (index, rule) in rules.iter().enumerate() {
        debug!(
            index,
            class = %rule.query_class(),
            record_type = %rule.query_type(),
            match_type = rule.rule().match_type().as_str(),
            "Rewrite rule loaded"
        );
    }
    info!(rules = rules.len(), "Rewrite rules ready");

    Ok(Arc::new(
        RewriteHandler::new(rules).with_next(Arc::new(forwarder)),
    ))
}
