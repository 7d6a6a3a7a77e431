//! `catalog`: command-line access to the products API.
//!
//! Prints the server's JSON response on stdout. Logs and errors go to
//! stderr. Exit status is 0 on success, 2 for rejected input (including a
//! missing `--yes` on delete) and 1 when the API call itself fails.

use std::process::ExitCode;

use catalog_core::config::timeout_from_secs;
use catalog_core::types::DEFAULT_PER_PAGE;
use catalog_core::{CatalogClient, ClientConfig, Confirmation, Error, ListQuery, NewProduct};
use clap::{Parser, Subcommand};
use serde_json::Value;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Command line interface for the products API
#[derive(Parser, Debug)]
#[command(name = "catalog")]
#[command(about = "Manage products through the catalog REST API")]
#[command(version)]
pub struct Cli {
    /// API origin; trailing slashes are ignored [env: CATALOG_API_URL]
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Per-request timeout in seconds, 0 disables it [env: CATALOG_API_TIMEOUT_SECS]
    #[arg(long, global = true)]
    pub timeout_secs: Option<u64>,

    /// Increase log verbosity (-v info, -vv debug); RUST_LOG takes precedence
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a product
    CreateProduct {
        #[arg(long)]
        name: String,
        #[arg(long)]
        sku: String,
        #[arg(long, allow_negative_numbers = true)]
        price_cents: i64,
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        stock: i64,
        #[arg(long, default_value = "")]
        description: String,
    },

    /// Set the stock level of a product
    SetStock {
        id: u64,
        #[arg(allow_negative_numbers = true)]
        stock: i64,
    },

    /// Delete a product (requires --yes)
    DeleteProduct {
        id: u64,
        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },

    /// List one page of products
    ListProducts {
        /// Page size, clamped into 1..=100
        #[arg(long, default_value_t = DEFAULT_PER_PAGE)]
        per_page: u32,
        #[arg(long, default_value_t = 1)]
        page: u32,
    },

    /// Fetch a single product
    GetProduct { id: u64 },
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .with_writer(std::io::stderr)
        .init();
}

/// Flags override `fallback`, which `main` resolves from the environment.
fn config_from(cli: &Cli, fallback: ClientConfig) -> ClientConfig {
    let mut config = match cli.base_url.as_deref() {
        Some(url) => ClientConfig {
            base_url: ClientConfig::new(url).base_url,
            ..fallback
        },
        None => fallback,
    };
    if let Some(secs) = cli.timeout_secs {
        config = config.with_timeout(timeout_from_secs(secs));
    }
    config
}

fn run(client: &CatalogClient, command: Command) -> Result<Value, Error> {
    match command {
        Command::CreateProduct {
            name,
            sku,
            price_cents,
            stock,
            description,
        } => {
            let input = NewProduct::new(name, sku, price_cents)
                .with_stock(stock)
                .with_description(description);
            client.create_product(&input)
        }
        Command::SetStock { id, stock } => client.set_stock(id, stock),
        Command::DeleteProduct { id, yes } => client.delete_product(id, Confirmation::from(yes)),
        Command::ListProducts { per_page, page } => {
            client.list_products(ListQuery::new(per_page, page))
        }
        Command::GetProduct { id } => client.get_product(id),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = config_from(&cli, ClientConfig::from_env());
    debug!(base_url = %config.base_url, timeout = ?config.timeout, "resolved configuration");
    let client = CatalogClient::new(&config);

    let result = run(&client, cli.command);
    match &result {
        Ok(value) => match serde_json::to_string_pretty(value) {
            Ok(text) => println!("{text}"),
            Err(_) => println!("{value}"),
        },
        Err(err) => eprintln!("error: {err}"),
    }
    ExitCode::from(exit_status(&result))
}

/// 0 on success, 2 for rejected input, 1 when the API call failed.
fn exit_status(result: &Result<Value, Error>) -> u8 {
    match result {
        Ok(_) => 0,
        Err(Error::Validation(_)) => 2,
        Err(Error::Api(_)) => 1,
    }
}
