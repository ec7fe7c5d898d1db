use anyhow::Context;
use clap::Parser;
use dotenvy::dotenv;
use std::sync::Arc;
use tracing_subscriber::{fmt, EnvFilter};

use plan_checkout::config::validate_env;
use plan_checkout::{
    AuthClientConfig, HttpAuthClient, LogNotifier, PricingTable, SubscriptionSnapshot, TierConfig,
};

mod cli;

use cli::{CliArgs, Click};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();
    dotenv().ok();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,plan_checkout=debug"));
    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    if let Err(missing) = validate_env() {
        for e in &missing {
            tracing::error!("{}", e);
        }
        anyhow::bail!("{} required variable(s) missing", missing.len());
    }
    let tier = TierConfig::from_env()?;
    let auth_config = AuthClientConfig::from_env()?;

    let snapshot = match std::env::var("SUBSCRIPTION_SNAPSHOT_PATH") {
        Ok(path) => {
            let raw = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read snapshot {}", path))?;
            SubscriptionSnapshot::from_json(&raw)
                .with_context(|| format!("Invalid snapshot {}", path))?
        }
        Err(_) => SubscriptionSnapshot::NoSubscription,
    };

    let mut client = HttpAuthClient::new(&auth_config);
    if let Ok(cookie) = std::env::var("SESSION_COOKIE") {
        client = client.with_cookie(cookie);
    }

    let table = PricingTable::mount(
        tier,
        snapshot,
        Arc::new(client),
        Arc::new(LogNotifier),
        &auth_config.sign_in_path,
    );
    let session = table.session_resolved().await;
    tracing::info!("Session resolved: {:?}", session);

    println!("{}", serde_json::to_string_pretty(&table.view())?);
    if let Some(click) = args.click() {
        let outcome = match click {
            Click::Buy => table.click_buy().await,
            Click::Manage => table.click_manage().await,
        };
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    }
    table.unmount();
    Ok(())
}
