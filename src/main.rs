mod cli;
mod config;
mod error;
mod flow;
mod http;
mod json;
mod render;
#[cfg(test)]
mod testing;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::Cli;

#[tokio::main]
async fn main() {
    let config = Cli::parse().into_config();
    init_tracing();

    tracing::debug!(url = %config.url, format = ?config.format, timeout = ?config.timeout, "starting fetch");

    let format = config.format;
    let completion = flow::start_with_config(&config, move |outcome| {
        render::emit(&mut std::io::stdout().lock(), &outcome, format);
    });

    completion.wait().await;
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
