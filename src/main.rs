use clap::Parser;
use miette::{IntoDiagnostic, Result};
use rust_decimal_macros::dec;
use std::fs::File;
use std::io;
use std::path::PathBuf;
use storekeep::application::admin::AdminSession;
use storekeep::application::catalog::CatalogService;
use storekeep::application::checkout::CheckoutEngine;
use storekeep::domain::customer::Customer;
use storekeep::domain::instrument::PaymentInstrument;
use storekeep::domain::ports::OrderLedger;
use storekeep::domain::product::{Product, ProductKind};
use storekeep::infrastructure::credentials::StaticCredentials;
use storekeep::infrastructure::in_memory::{InMemoryCatalog, InMemoryOrderLedger};
use storekeep::interfaces::csv::catalog_reader::CatalogReader;
use storekeep::interfaces::json::ledger_writer::LedgerWriter;
use storekeep::interfaces::menu::{self, App, Shell};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Seed the catalog from a CSV file (category,id,name,price,stock,attribute)
    /// instead of the built-in demo products
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Write the order ledger as JSON to this file when the session ends
    #[arg(long)]
    ledger_out: Option<PathBuf>,
}

/// A seeding failure is a fatal configuration error.
async fn seed_catalog(service: &CatalogService, path: Option<&PathBuf>) -> storekeep::error::Result<()> {
    match path {
        Some(path) => {
            let file = File::open(path)?;
            let mut count = 0usize;
            for product in CatalogReader::new(file).products() {
                service.add_product(product?).await?;
                count += 1;
            }
            tracing::info!(count, path = %path.display(), "catalog seeded from file");
        }
        None => {
            let demo = [
                Product::new(
                    "E01",
                    "Smartphone",
                    dec!(299.99),
                    5,
                    ProductKind::Electronics {
                        brand: "Samsung".to_string(),
                    },
                )?,
                Product::new(
                    "E02",
                    "Laptop",
                    dec!(799.99),
                    2,
                    ProductKind::Electronics {
                        brand: "Dell".to_string(),
                    },
                )?,
                Product::new(
                    "C01",
                    "T-shirt",
                    dec!(19.99),
                    10,
                    ProductKind::Clothing {
                        size: "M".to_string(),
                    },
                )?,
                Product::new(
                    "C02",
                    "Jeans",
                    dec!(39.99),
                    7,
                    ProductKind::Clothing {
                        size: "L".to_string(),
                    },
                )?,
            ];
            for product in demo {
                service.add_product(product).await?;
            }
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();
    let cli = Cli::parse();

    let catalog_store = InMemoryCatalog::new();
    let ledger_store = InMemoryOrderLedger::new();

    let catalog = CatalogService::new(Box::new(catalog_store.clone()));
    seed_catalog(&catalog, cli.catalog.as_ref())
        .await
        .into_diagnostic()?;

    let engine = CheckoutEngine::new(
        Box::new(catalog_store.clone()),
        Box::new(ledger_store.clone()),
    );
    let admin = AdminSession::new(Box::new(StaticCredentials::single("admin", "1234")));

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut shell = Shell::new(stdin.lock(), stdout.lock());

    shell.line("======================================").into_diagnostic()?;
    shell.line(" Welcome to the Simple Online Shop!").into_diagnostic()?;
    shell.line("======================================").into_diagnostic()?;

    let name = shell.prompt_required("Enter your name: ").into_diagnostic()?;
    let mut customer = Customer::new(name).into_diagnostic()?;
    customer.add_instrument(
        PaymentInstrument::card("1234567890123456", dec!(1000.00)).into_diagnostic()?,
    );
    customer.add_instrument(
        PaymentInstrument::wallet("user@example.com", dec!(500.00)).into_diagnostic()?,
    );

    let mut app = App {
        catalog,
        engine,
        admin,
        customer,
    };
    menu::run(&mut shell, &mut app).await.into_diagnostic()?;

    if let Some(path) = cli.ledger_out {
        let orders = ledger_store.all().await.into_diagnostic()?;
        let file = File::create(&path).into_diagnostic()?;
        LedgerWriter::new(file)
            .write_orders(&orders)
            .into_diagnostic()?;
        tracing::info!(count = orders.len(), path = %path.display(), "ledger exported");
    }

    shell.line("======================================").into_diagnostic()?;
    shell.line(" Thank you for shopping with us!").into_diagnostic()?;
    shell.line("======================================").into_diagnostic()?;

    Ok(())
}
