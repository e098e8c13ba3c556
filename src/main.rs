use std::io::Write;
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use merchant_dashboard::api::DashboardClient;
use merchant_dashboard::commands::{self, Dashboard, Reply};
use merchant_dashboard::config::Config;
use merchant_dashboard::notify::ConsoleNotifier;

fn print_reply(result: Result<Reply, String>) -> bool {
    match result {
        Ok(Reply::Output(text)) => {
            if !text.is_empty() {
                println!("{}", text);
            }
            true
        }
        Ok(Reply::Quit) => false,
        Err(e) => {
            println!("❌ {}", e);
            true
        }
    }
}

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    // Initialize tracing; logs go to stderr so they don't interleave with the views
    let mut filter = EnvFilter::from_default_env();
    if let Ok(directive) = "merchant_dashboard=info".parse() {
        filter = filter.add_directive(directive);
    }
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .with_writer(std::io::stderr)
        .init();

    info!("Starting merchant dashboard v{}", env!("CARGO_PKG_VERSION"));

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            return;
        }
    };
    let client = match DashboardClient::new(config.api_base_url.clone(), config.request_timeout) {
        Ok(client) => client,
        Err(e) => {
            error!("Failed to create API client: {}", e);
            return;
        }
    };

    info!("Using API at {}", client.base_url());

    let mut dashboard = Dashboard::new(Arc::new(client), Arc::new(ConsoleNotifier), &config);

    println!("{}\n", commands::help::text());
    print_reply(commands::handle_line(&mut dashboard, "merchants").await);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        let _ = std::io::stdout().flush();

        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                error!("Failed to read input: {}", e);
                break;
            }
        };

        if !print_reply(commands::handle_line(&mut dashboard, &line).await) {
            break;
        }
    }

    info!("Merchant dashboard stopped");
}
