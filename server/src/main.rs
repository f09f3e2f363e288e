//! pdfnav HTTP server - PDF TOC navigation injection service.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod app;

#[derive(Parser)]
#[command(name = "pdfnav-server")]
#[command(version)]
#[command(about = "HTTP service that injects clickable TOC navigation into PDFs", long_about = None)]
struct Cli {
    /// Interface to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = 5000)]
    port: u16,

    /// Maximum request body size in KB
    #[arg(long, default_value_t = 1024)]
    body_limit_kb: usize,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = app::ServerConfig {
        listen_addr: format!("{}:{}", cli.host, cli.port),
        body_limit_kb: cli.body_limit_kb,
    };

    app::run_server(config).await
}
