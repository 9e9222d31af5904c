mod cli;

use std::sync::Arc;

use clap::Parser;
use eyre::{eyre, WrapErr};

use izettle_purchase_core::http::HttpIzettleClient;
use izettle_purchase_core::{CoreError, PurchaseClient, PurchaseHistoryQuery};

#[tokio::main]
async fn main() -> eyre::Result<()> {
    let args = cli::Cli::parse();

    // Logs go to stderr; stdout carries only JSON.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_file(true)
        .with_line_number(true)
        .with_level(true)
        .init();

    if args.access_token.is_none() && args.token_file.is_none() {
        tracing::warn!("no access token configured; requests will be sent unauthenticated");
    }

    let http = HttpIzettleClient::new(
        args.access_token.as_deref(),
        args.token_file.as_deref(),
        args.requests_per_second,
    )
    .context("configure purchase API HTTP client")?;
    let client = PurchaseClient::with_json_builders(Arc::new(http))
        .with_base_url(&args.base_url)
        .context("configure purchase API base URL")?;

    let output = match args.command {
        cli::Command::History(history) => {
            let all = history.all;
            let query = build_history_query(history);
            tracing::info!(params = ?query.to_params(), all, "fetching purchase history");

            if all {
                let purchases = client
                    .fetch_all_purchases(&query)
                    .await
                    .context("fetch all purchases")?;
                tracing::info!(count = purchases.len(), "fetched purchases");
                serde_json::to_string_pretty(&purchases)?
            } else {
                let history = client
                    .fetch_purchase_history(&query)
                    .await
                    .context("fetch purchase history")?;
                serde_json::to_string_pretty(&history)?
            }
        }
        cli::Command::Get { purchase_id } => match client.fetch_purchase(&purchase_id).await {
            Ok(purchase) => serde_json::to_string_pretty(&purchase)?,
            Err(CoreError::PurchaseNotFound(message)) => {
                return Err(eyre!("purchase {purchase_id} does not exist ({message})"));
            }
            Err(err) => return Err(err).context("fetch purchase"),
        },
    };

    println!("{output}");
    Ok(())
}

fn build_history_query(args: cli::HistoryArgs) -> PurchaseHistoryQuery {
    let mut query = PurchaseHistoryQuery::new();
    // Explicit flags are applied last so they override same-named --param entries.
    for (key, value) in args.params {
        query = query.param(key, value);
    }
    if let Some(start_date) = args.start_date {
        query = query.start_date(start_date);
    }
    if let Some(end_date) = args.end_date {
        query = query.end_date(end_date);
    }
    if let Some(limit) = args.limit {
        query = query.limit(limit);
    }
    if let Some(hash) = args.last_purchase_hash {
        query = query.last_purchase_hash(hash);
    }
    if args.descending {
        query = query.descending(true);
    }
    query
}
