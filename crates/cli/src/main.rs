use clap::Parser;
use rewriteng_domain::CliOverrides;
use rewriteng_infrastructure::dns::DnsServerHandler;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use tracing::info;

mod bootstrap;
mod di;
mod server;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[derive(Parser, Debug)]
#[command(name = "rewriteng")]
#[command(version)]
#[command(about = "rewriteng - DNS proxy that rewrites queries and responses by rule")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// DNS server port
    #[arg(short = 'd', long)]
    dns_port: Option<u16>,

    /// Bind address
    #[arg(short = 'b', long)]
    bind: Option<String>,

    /// Extra rules in directive syntax
    #[arg(short = 'r', long, value_name = "FILE")]
    rules_file: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

impl Cli {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            dns_port: self.dns_port,
            bind_address: self.bind.clone(),
            log_level: self.log_level.clone(),
            rules_file: self.rules_file.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = bootstrap::load_config(cli.config.as_deref(), cli.overrides())?;

    bootstrap::init_logging(&config);

    info!("Starting rewriteng v{}", env!("CARGO_PKG_VERSION"));
    info!(
        config_file = cli.config.as_deref().unwrap_or("default"),
        dns_port = config.server.dns_port,
        bind = %config.server.bind_address,
        rules = config.rewrite.rules.len(),
        "Configuration loaded"
    );

    let chain = di::build_handler_chain(&config)?;
    let handler = Arc::new(DnsServerHandler::new(chain));

    let bind_ip: IpAddr = config.server.bind_address.parse()?;
    let bind_addr = SocketAddr::new(bind_ip, config.server.dns_port);

    tokio::select! {
        result = server::start_dns_server(bind_addr, handler, config.server.tcp_enabled) => result?,
        _ = tokio::signal::ctrl_c() => info!("Shutdown signal received"),
    }

    info!("Server shutdown complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_flags_become_overrides() {
        let cli = Cli::try_parse_from([
            "rewriteng",
            "-c",
            "/tmp/rewriteng.toml",
            "--dns-port",
            "5353",
            "--bind",
            "127.0.0.1",
            "--rules-file",
            "/tmp/rules.conf",
            "--log-level",
            "debug",
        ])
        .unwrap();

        let overrides = cli.overrides();

        assert_eq!(cli.config.as_deref(), Some("/tmp/rewriteng.toml"));
        assert_eq!(overrides.dns_port, Some(5353));
        assert_eq!(overrides.bind_address.as_deref(), Some("127.0.0.1"));
        assert_eq!(overrides.rules_file.as_deref(), Some("/tmp/rules.conf"));
        assert_eq!(overrides.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_cli_defaults_to_no_overrides() {
        let cli = Cli::try_parse_from(["rewriteng"]).unwrap();
        let overrides = cli.overrides();

        assert!(cli.config.is_none());
        assert!(overrides.dns_port.is_none());
        assert!(overrides.rules_file.is_none());
    }
}
