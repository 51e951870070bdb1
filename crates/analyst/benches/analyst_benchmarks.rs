use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use chrono::{Duration, TimeZone, Utc};
use rust_decimal::Decimal;
use salesdesk_analyst::SalesAnalyst;
use salesdesk_core::{CustomerId, InvoiceId, InvoiceItemId, ItemId, MerchantId, TransactionId};
use salesdesk_invoicing::{Invoice, InvoiceItem, InvoiceStatus, Transaction, TransactionResult};
use salesdesk_parties::{Customer, Merchant};
use salesdesk_products::Item;
use salesdesk_store::{EntityStore, InMemoryEntityStore, Snapshot};

const ITEMS_PER_MERCHANT: u64 = 8;
const INVOICES_PER_MERCHANT: u64 = 12;
const LINES_PER_INVOICE: u64 = 3;

/// Deterministic dataset: `merchants` merchants with skewed but reproducible
/// prices, statuses and payment outcomes.
fn generate(merchants: u64) -> Snapshot {
    let epoch = Utc.with_ymd_and_hms(2012, 3, 1, 0, 0, 0).unwrap();
    let mut snapshot = Snapshot::default();
    let mut line_id = 0;
    let mut transaction_id = 0;

    for m in 1..=merchants {
        let merchant_id = MerchantId::new(m);
        snapshot.merchants.push(
            Merchant::new(merchant_id, format!("merchant {m}"), epoch - Duration::days((m % 365) as i64))
                .unwrap(),
        );

        for i in 0..ITEMS_PER_MERCHANT {
            let id = m * ITEMS_PER_MERCHANT + i;
            let cents = ((id * 7919) % 50_000 + 99) as i64;
            snapshot.items.push(
                Item::new(ItemId::new(id), format!("item {id}"), Decimal::new(cents, 2), merchant_id, epoch)
                    .unwrap(),
            );
        }

        for n in 0..INVOICES_PER_MERCHANT {
            let id = m * INVOICES_PER_MERCHANT + n;
            let invoice_id = InvoiceId::new(id);
            let status = InvoiceStatus::ALL[(id % 3) as usize];
            let created_at = epoch + Duration::hours((id * 13 % 2_000) as i64);
            snapshot.invoices.push(Invoice::new(
                invoice_id,
                CustomerId::new(id % 97 + 1),
                merchant_id,
                status,
                created_at,
            ));

            for l in 0..LINES_PER_INVOICE {
                line_id += 1;
                let item = m * ITEMS_PER_MERCHANT + (id + l) % ITEMS_PER_MERCHANT;
                snapshot.invoice_items.push(
                    InvoiceItem::new(
                        InvoiceItemId::new(line_id),
                        invoice_id,
                        ItemId::new(item),
                        (line_id % 9 + 1) as u32,
                        Decimal::new(((item * 31) % 9_000 + 50) as i64, 2),
                    )
                    .unwrap(),
                );
            }

            transaction_id += 1;
            let result = if id % 4 == 0 {
                TransactionResult::Failed
            } else {
                TransactionResult::Success
            };
            snapshot.transactions.push(Transaction::new(
                TransactionId::new(transaction_id),
                invoice_id,
                result,
                created_at + Duration::days(1),
            ));
        }
    }

    for c in 1..=97 {
        snapshot
            .customers
            .push(Customer::new(CustomerId::new(c), format!("first{c}"), format!("last{c}")));
    }

    snapshot
}

/// Store that only exposes slices, so every lookup takes the trait's linear-scan default.
struct ScanStore(InMemoryEntityStore);

impl EntityStore for ScanStore {
    fn merchants(&self) -> &[Merchant] {
        self.0.merchants()
    }

    fn items(&self) -> &[Item] {
        self.0.items()
    }

    fn invoices(&self) -> &[Invoice] {
        self.0.invoices()
    }

    fn invoice_items(&self) -> &[InvoiceItem] {
        self.0.invoice_items()
    }

    fn transactions(&self) -> &[Transaction] {
        self.0.transactions()
    }

    fn customers(&self) -> &[Customer] {
        self.0.customers()
    }
}

fn bench_store_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("store_build");

    for merchants in [10u64, 100, 1_000] {
        let snapshot = generate(merchants);
        group.throughput(Throughput::Elements(
            (snapshot.invoices.len() + snapshot.invoice_items.len()) as u64,
        ));
        group.bench_with_input(BenchmarkId::new("from_snapshot", merchants), &snapshot, |b, snapshot| {
            b.iter(|| InMemoryEntityStore::from_snapshot(black_box(snapshot.clone())).unwrap());
        });
    }

    group.finish();
}

fn bench_queries(c: &mut Criterion) {
    let mut group = c.benchmark_group("analyst_queries");
    let analyst = SalesAnalyst::new(InMemoryEntityStore::from_snapshot(generate(500)).unwrap());

    group.bench_function("merchants_ranked_by_revenue", |b| {
        b.iter(|| black_box(analyst.merchants_ranked_by_revenue().unwrap().len()));
    });
    group.bench_function("top_merchants_by_invoice_count", |b| {
        b.iter(|| black_box(analyst.top_merchants_by_invoice_count().unwrap().len()));
    });
    group.bench_function("top_days_by_invoice_count", |b| {
        b.iter(|| black_box(analyst.top_days_by_invoice_count().unwrap()));
    });
    group.bench_function("golden_items", |b| {
        b.iter(|| black_box(analyst.golden_items().unwrap().len()));
    });
    group.bench_function("best_item_for_merchant", |b| {
        b.iter(|| black_box(analyst.best_item_for_merchant(MerchantId::new(250)).unwrap()));
    });

    group.finish();
}

fn bench_indexed_vs_scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("indexed_vs_scan");

    for merchants in [10u64, 100] {
        let indexed = SalesAnalyst::new(InMemoryEntityStore::from_snapshot(generate(merchants)).unwrap());
        let scanned = SalesAnalyst::new(ScanStore(
            InMemoryEntityStore::from_snapshot(generate(merchants)).unwrap(),
        ));

        group.bench_with_input(BenchmarkId::new("indexed", merchants), &indexed, |b, analyst| {
            b.iter(|| black_box(analyst.merchants_with_pending_invoices().len()));
        });
        group.bench_with_input(BenchmarkId::new("linear_scan", merchants), &scanned, |b, analyst| {
            b.iter(|| black_box(analyst.merchants_with_pending_invoices().len()));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_store_build,
    bench_queries,
    bench_indexed_vs_scan
);
criterion_main!(benches);
