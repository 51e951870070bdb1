use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;

use anyhow::Context;
use rust_decimal::Decimal;
use serde::Serialize;

use salesdesk_analyst::{AnalystConfig, AnalystResult, SalesAnalyst};
use salesdesk_core::Entity;
use salesdesk_invoicing::InvoiceStatus;
use salesdesk_parties::Merchant;
use salesdesk_store::{EntityStore, InMemoryEntityStore};

#[derive(Debug, Serialize)]
struct Report {
    merchants: usize,
    items: usize,
    invoices: usize,
    average_items_per_merchant: Option<Decimal>,
    average_items_per_merchant_standard_deviation: Option<Decimal>,
    merchants_with_high_item_count: Option<Vec<u64>>,
    average_invoices_per_merchant: Option<Decimal>,
    top_merchants_by_invoice_count: Option<Vec<u64>>,
    bottom_merchants_by_invoice_count: Option<Vec<u64>>,
    top_days_by_invoice_count: Option<Vec<&'static str>>,
    average_average_price_per_merchant: Option<Decimal>,
    golden_items: Option<Vec<u64>>,
    invoice_status: Vec<StatusShare>,
    merchants_with_pending_invoices: usize,
    top_revenue_earners: Option<Vec<Earner>>,
}

#[derive(Debug, Serialize)]
struct StatusShare {
    status: InvoiceStatus,
    percent: Option<Decimal>,
}

#[derive(Debug, Serialize)]
struct Earner {
    id: u64,
    name: String,
    revenue: Decimal,
}

/// Queries over an empty or degenerate dataset are reported as `null`.
fn figure<T>(query: &str, result: AnalystResult<T>) -> Option<T> {
    result
        .map_err(|e| tracing::warn!(query, error = %e, "query produced no figure"))
        .ok()
}

fn merchant_ids(merchants: Vec<&Merchant>) -> Vec<u64> {
    merchants.into_iter().map(|m| m.id().get()).collect()
}

fn build_report<S: EntityStore>(analyst: &SalesAnalyst<S>) -> Report {
    let store = analyst.store();

    let top_revenue_earners = figure("top_revenue_earners", analyst.top_revenue_earners_default())
        .map(|earners| {
            earners
                .into_iter()
                .filter_map(|m| {
                    figure("revenue_by_merchant", analyst.revenue_by_merchant(m.id())).map(|revenue| {
                        Earner {
                            id: m.id().get(),
                            name: m.name().to_string(),
                            revenue,
                        }
                    })
                })
                .collect()
        });

    Report {
        merchants: store.merchants().len(),
        items: store.items().len(),
        invoices: store.invoices().len(),
        average_items_per_merchant: figure(
            "average_items_per_merchant",
            analyst.average_items_per_merchant(),
        ),
        average_items_per_merchant_standard_deviation: figure(
            "average_items_per_merchant_standard_deviation",
            analyst.average_items_per_merchant_standard_deviation(),
        ),
        merchants_with_high_item_count: figure(
            "merchants_with_high_item_count",
            analyst.merchants_with_high_item_count(),
        )
        .map(merchant_ids),
        average_invoices_per_merchant: figure(
            "average_invoices_per_merchant",
            analyst.average_invoices_per_merchant(),
        ),
        top_merchants_by_invoice_count: figure(
            "top_merchants_by_invoice_count",
            analyst.top_merchants_by_invoice_count(),
        )
        .map(merchant_ids),
        bottom_merchants_by_invoice_count: figure(
            "bottom_merchants_by_invoice_count",
            analyst.bottom_merchants_by_invoice_count(),
        )
        .map(merchant_ids),
        top_days_by_invoice_count: figure(
            "top_days_by_invoice_count",
            analyst.top_days_by_invoice_count(),
        ),
        average_average_price_per_merchant: figure(
            "average_average_price_per_merchant",
            analyst.average_average_price_per_merchant(),
        ),
        golden_items: figure("golden_items", analyst.golden_items())
            .map(|items| items.into_iter().map(|i| i.id().get()).collect()),
        invoice_status: InvoiceStatus::ALL
            .into_iter()
            .map(|status| StatusShare {
                status,
                percent: figure("invoice_status", analyst.invoice_status(status)),
            })
            .collect(),
        merchants_with_pending_invoices: analyst.merchants_with_pending_invoices().len(),
        top_revenue_earners,
    }
}

fn main() -> anyhow::Result<()> {
    salesdesk_observability::init();

    let mut config = AnalystConfig::from_env();
    if let Some(arg) = std::env::args_os().nth(1) {
        config.snapshot_path = Some(PathBuf::from(arg));
    }

    let path = config.snapshot_path.clone().unwrap_or_else(|| {
        tracing::warn!("no snapshot path given; using ./snapshot.json");
        PathBuf::from("snapshot.json")
    });

    let file = File::open(&path)
        .with_context(|| format!("failed to open snapshot {}", path.display()))?;
    let store = InMemoryEntityStore::from_json(BufReader::new(file))
        .with_context(|| format!("failed to load snapshot {}", path.display()))?;

    tracing::info!(
        path = %path.display(),
        merchants = store.merchants().len(),
        invoices = store.invoices().len(),
        "snapshot loaded"
    );

    let analyst = SalesAnalyst::with_config(store, config);
    let report = build_report(&analyst);

    serde_json::to_writer_pretty(io::stdout().lock(), &report).context("failed to write report")?;
    println!();
    Ok(())
}
