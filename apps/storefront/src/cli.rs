//! # Command Line
//!
//! `artbid [--json] [--config PATH] <command>`
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  artbid products [--available]     list artworks                       │
//! │  artbid product <id>               show one artwork                    │
//! │  artbid artists                    list artists                        │
//! │  artbid validate address <file>    check an address JSON file          │
//! │  artbid validate payment <file>    check a payment JSON file           │
//! │  artbid checkout --product 1 --bid 600 --payment pay.json              │
//! │                  [--address addr.json] [--email .. --password ..]      │
//! │                  [--sequential]                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! When a network step fails with a retryable error the user is asked
//! "Retry? [y/N]". Nothing is retried without asking, and `--json` never
//! asks.

use std::future::Future;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context};
use clap::{Parser, Subcommand};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info};

use artbid_client::{ClientConfig, StorefrontApi};
use artbid_core::dto::Credentials;
use artbid_core::validation::{validate_address, validate_payment};
use artbid_core::{Address, CheckoutPolicy, FieldErrors, PaymentMethod, Product};

use crate::commands::{address, auth, bid, cart, catalog, order, payment};
use crate::error::ApiError;
use crate::state::{CheckoutStore, ConfigState, SessionState};

#[derive(Parser, Debug)]
#[command(name = "artbid", version, about = "ArtBid storefront CLI")]
pub struct Cli {
    #[arg(long, global = true, help = "Output machine-readable JSON")]
    pub json: bool,
    #[arg(long, global = true, help = "Path to artbid.toml")]
    pub config: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    Products {
        #[arg(long, help = "Only artworks that are not sold")]
        available: bool,
    },
    Product {
        id: String,
    },
    Artists,
    Validate {
        #[command(subcommand)]
        command: ValidateCommands,
    },
    /// Bid, set address, pay and place the order in one session.
    Checkout {
        #[arg(long)]
        product: String,
        #[arg(long)]
        bid: String,
        #[arg(long, help = "Address JSON; defaults to the account's saved address")]
        address: Option<PathBuf>,
        #[arg(long, help = "Payment method JSON")]
        payment: PathBuf,
        #[arg(long, requires = "password")]
        email: Option<String>,
        #[arg(long, requires = "email")]
        password: Option<String>,
        #[arg(long, help = "Refuse out-of-order checkout steps")]
        sequential: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum ValidateCommands {
    Address { file: PathBuf },
    Payment { file: PathBuf },
}

/// Result of `artbid validate`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ValidationReport {
    valid: bool,
    fields: FieldErrors,
}

/// Summary printed at the end of `artbid checkout`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CheckoutReport {
    product: String,
    bid: bid::BidReceipt,
    address: Address,
    payment: payment::PaymentReceipt,
    order: order::OrderReceipt,
    cart_after: cart::CartResponse,
}

// =============================================================================
// Dispatch
// =============================================================================

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let client_config =
        ClientConfig::load(cli.config.clone()).context("failed to load client configuration")?;
    let api = StorefrontApi::new(client_config)?;
    let config = ConfigState::from_env();
    let json = cli.json;
    debug!(?config, json, "Starting artbid");

    match cli.command {
        Commands::Products { available } => products(&api, available, json).await,
        Commands::Product { id } => {
            let product = report(json, catalog::get_product(&api, &id).await)?;
            print(json, &product, || describe_product(&product))
        }
        Commands::Artists => {
            let artists = report(json, catalog::list_artists(&api).await)?;
            print(json, &artists, || {
                artists
                    .iter()
                    .map(|a| format!("{}  {}", a.full_name(), a.style))
                    .collect::<Vec<_>>()
                    .join("\n")
            })
        }
        Commands::Validate { command } => validate(command, json),
        Commands::Checkout {
            product,
            bid,
            address,
            payment,
            email,
            password,
            sequential,
        } => {
            let policy = if sequential {
                CheckoutPolicy::Sequential
            } else {
                config.checkout_policy
            };
            let credentials = email
                .zip(password)
                .map(|(email, password)| Credentials { email, password });
            let request = CheckoutRun {
                product_id: product,
                bid,
                address_file: address,
                payment_file: payment,
                credentials,
            };
            checkout(&api, &config, policy, request, json).await
        }
    }
}

async fn products(api: &StorefrontApi, available: bool, json: bool) -> anyhow::Result<()> {
    let path = if available { "products/available" } else { "products" };
    let mut fetcher = api.fetcher::<Vec<Product>>();
    fetcher
        .send(api.get_request(path), Some("Failed to load products"))
        .await;

    while let Some(error) = fetcher.state().error.clone() {
        if json || !ask_retry(&error) {
            bail!(error);
        }
        fetcher.retry().await;
    }

    let products = fetcher.take_data().unwrap_or_default();
    print(json, &products, || {
        products
            .iter()
            .map(describe_product)
            .collect::<Vec<_>>()
            .join("\n")
    })
}

fn validate(command: ValidateCommands, json: bool) -> anyhow::Result<()> {
    let fields = match command {
        ValidateCommands::Address { file } => validate_address(&read_json::<Address>(&file)?),
        ValidateCommands::Payment { file } => {
            validate_payment(&read_json::<PaymentMethod>(&file)?)
        }
    };

    let report = ValidationReport {
        valid: fields.is_empty(),
        fields,
    };
    print(json, &report, || {
        if report.valid {
            "valid".to_string()
        } else {
            report
                .fields
                .iter()
                .map(|(field, message)| format!("{}: {}", field, message))
                .collect::<Vec<_>>()
                .join("\n")
        }
    })?;

    if report.valid {
        Ok(())
    } else {
        Err(anyhow!("{} field(s) failed validation", report.fields.len()))
    }
}

// =============================================================================
// Checkout
// =============================================================================

struct CheckoutRun {
    product_id: String,
    bid: String,
    address_file: Option<PathBuf>,
    payment_file: PathBuf,
    credentials: Option<Credentials>,
}

/// Walks the whole checkout against one store.
async fn checkout(
    api: &StorefrontApi,
    config: &ConfigState,
    policy: CheckoutPolicy,
    plan: CheckoutRun,
    json: bool,
) -> anyhow::Result<()> {
    // Read both files first so a typo does not cost a placed bid.
    let address_form = plan.address_file.as_deref().map(read_json::<Address>).transpose()?;
    let method = read_json::<PaymentMethod>(&plan.payment_file)?;

    let store = CheckoutStore::new(policy);
    let session = SessionState::new();
    info!(policy = ?policy, "Checkout started");

    if let Some(credentials) = &plan.credentials {
        report(json, auth::login(api, &session, credentials).await)?;
    }

    let product = report(json, catalog::get_product(api, &plan.product_id).await)?;

    let bid_receipt = report(
        json,
        retrying(json, || bid::place_bid(api, &store, config, &product, &plan.bid)).await,
    )?;
    if !json {
        println!(
            "{}",
            bid_receipt
                .message
                .as_deref()
                .unwrap_or("Bid accepted.")
        );
    }

    let address = match address_form {
        Some(form) => report(json, address::save_address(&store, form))?,
        None if session.email().is_some() => {
            report(json, address::load_saved_address(api, &store).await)?
        }
        None => bail!("--address is required unless --email and --password are given"),
    };

    let payment_receipt = report(json, payment::pay(&store, &method))?;

    let order_receipt = report(
        json,
        retrying(json, || order::submit_order(api, &store, config)).await,
    )?;

    let summary = CheckoutReport {
        product: product.title.clone(),
        bid: bid_receipt,
        address,
        payment: payment_receipt,
        order: order_receipt,
        cart_after: cart::get_cart(&store, config),
    };
    print(json, &summary, || {
        format!(
            "Product:          {}\nBid Price:        {}\nShipping Address: {}\nPayment:          {} ({})\n{}",
            summary.product,
            config.format_price(summary.bid.bid_price.amount(), Some(product.currency.as_str())),
            summary.address.summary(),
            summary.payment.method,
            summary.payment.payment_intent_id,
            summary.order.message,
        )
    })
}

// =============================================================================
// Helpers
// =============================================================================

/// Runs `attempt` until it succeeds, fails for good, or the user declines.
async fn retrying<T, F, Fut>(json: bool, mut attempt: F) -> Result<T, ApiError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ApiError>>,
{
    loop {
        match attempt().await {
            Err(err) if err.retryable && !json && ask_retry(&err.message) => continue,
            other => return other,
        }
    }
}

fn ask_retry(message: &str) -> bool {
    eprint!("{}. Retry? [y/N] ", message);
    if std::io::stderr().flush().is_err() {
        return false;
    }

    let mut answer = String::new();
    match std::io::stdin().lock().read_line(&mut answer) {
        Ok(_) => parse_yes(&answer),
        Err(_) => false,
    }
}

fn parse_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

/// Prints the error as JSON in `--json` mode, then passes it on.
fn report<T>(json: bool, result: Result<T, ApiError>) -> anyhow::Result<T> {
    result.map_err(|err| {
        if json {
            if let Ok(body) = serde_json::to_string_pretty(&serde_json::json!({ "error": &err })) {
                println!("{}", body);
            }
        }
        anyhow::Error::new(err)
    })
}

fn print<T, F>(json: bool, value: &T, human: F) -> anyhow::Result<()>
where
    T: Serialize,
    F: FnOnce() -> String,
{
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        println!("{}", human());
    }
    Ok(())
}

fn read_json<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&contents).with_context(|| format!("failed to parse {}", path.display()))
}

fn describe_product(product: &Product) -> String {
    let mut line = format!("{:>4}  {}", product.id.as_str(), product.title);
    let artist = product.artist_name();
    if !artist.is_empty() {
        line.push_str(&format!(" by {}", artist));
    }
    if let Some(year) = &product.year_created {
        line.push_str(&format!(" ({})", year));
    }
    if product.sold {
        line.push_str("  [SOLD]");
    }
    line
}
