use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use uuid::Uuid;

/// izettle-purchase — fetch purchases from the iZettle purchase API as JSON.
#[derive(Parser)]
#[command(version, about)]
pub struct Cli {
    /// Purchase API base URL.
    #[arg(
        long,
        default_value = "https://purchase.izettle.com",
        env = "IZETTLE_PURCHASE_URL"
    )]
    pub base_url: String,

    /// OAuth access token sent as a bearer token.
    #[arg(long, env = "IZETTLE_ACCESS_TOKEN", hide_env_values = true)]
    pub access_token: Option<String>,

    /// File holding the access token (first non-empty line).
    /// Ignored when --access-token is set.
    #[arg(long)]
    pub token_file: Option<PathBuf>,

    /// Maximum outbound requests per second.
    #[arg(long)]
    pub requests_per_second: Option<u32>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Fetch purchase history.
    History(HistoryArgs),

    /// Fetch a single purchase by UUID.
    Get {
        /// Purchase UUID (purchaseUUID1).
        purchase_id: Uuid,
    },
}

#[derive(Args)]
pub struct HistoryArgs {
    /// First date to include (ISO date, inclusive).
    #[arg(long)]
    pub start_date: Option<String>,

    /// Date to stop at (ISO date, exclusive).
    #[arg(long)]
    pub end_date: Option<String>,

    /// Page size; values above 999 are sent as 1000.
    #[arg(long)]
    pub limit: Option<u32>,

    /// Continue after the purchase with this hash.
    #[arg(long)]
    pub last_purchase_hash: Option<String>,

    /// Newest purchases first.
    #[arg(long)]
    pub descending: bool,

    /// Extra query parameter as `key=value` (repeatable).
    #[arg(long = "param", value_parser = parse_key_value)]
    pub params: Vec<(String, String)>,

    /// Follow the pagination cursor and print every purchase.
    #[arg(long)]
    pub all: bool,
}

fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected `key=value`, got `{raw}`"))?;
    if key.is_empty() {
        return Err(format!("empty parameter name in `{raw}`"));
    }
    Ok((key.to_owned(), value.to_owned()))
}
