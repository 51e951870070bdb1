//! Aggregation & ranking queries.
//!
//! Each public method answers one fixed analytical question. Published figures
//! are rounded half-up to cents (see [`statistics`](crate::statistics)); the
//! outlier thresholds are assembled from those published figures:
//!
//! | query | threshold |
//! |---|---|
//! | `merchants_with_high_item_count` | `count > avg + 1σ` |
//! | `top_merchants_by_invoice_count` | `count > avg + 2σ` |
//! | `bottom_merchants_by_invoice_count` | `count < avg - 2σ` |
//! | `top_days_by_invoice_count` | `count > ⌊invoices / 7⌋ + σ(per-day counts)` |
//! | `golden_items` | `price > avg price + 2σ` |

use std::collections::BTreeMap;

use chrono::{Datelike, Month, NaiveDate, Weekday};
use rust_decimal::Decimal;

use salesdesk_core::{Entity, ItemId, MerchantId};
use salesdesk_invoicing::{Invoice, InvoiceItem, InvoiceStatus};
use salesdesk_parties::Merchant;
use salesdesk_products::Item;
use salesdesk_store::{relations, EntityStore};

use crate::config::AnalystConfig;
use crate::error::{AnalystError, AnalystResult};
use crate::statistics::{
    counts, floor_to_cents, mean, population_std_dev, ratio, round_half_up,
};

const DAYS_PER_WEEK: usize = 7;

/// Canonical week order used for per-day results.
pub const WEEKDAYS: [Weekday; DAYS_PER_WEEK] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Analytical queries over one immutable store.
///
/// `S` may be an owned store, a reference, or an `Arc` taken from a
/// `SnapshotCell`; the analyst never reaches for any other dataset.
#[derive(Debug)]
pub struct SalesAnalyst<S> {
    store: S,
    config: AnalystConfig,
}

impl<S: EntityStore> SalesAnalyst<S> {
    pub fn new(store: S) -> Self {
        Self::with_config(store, AnalystConfig::default())
    }

    pub fn with_config(store: S, config: AnalystConfig) -> Self {
        Self { store, config }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &AnalystConfig {
        &self.config
    }

    fn item_count(&self, merchant: &Merchant) -> usize {
        relations::merchant_items(&self.store, merchant).len()
    }

    fn invoice_count(&self, merchant: &Merchant) -> usize {
        relations::merchant_invoices(&self.store, merchant).len()
    }

    // ----- item counts -------------------------------------------------------

    /// Items in the dataset divided by merchants in the dataset.
    pub fn average_items_per_merchant(&self) -> AnalystResult<Decimal> {
        let total = Decimal::from(self.store.items().len());
        Ok(round_half_up(ratio(total, self.store.merchants().len())?))
    }

    /// Population deviation of the per-merchant item counts.
    pub fn average_items_per_merchant_standard_deviation(&self) -> AnalystResult<Decimal> {
        let per_merchant = counts(self.store.merchants().iter().map(|m| self.item_count(m)));
        Ok(round_half_up(population_std_dev(&per_merchant)?))
    }

    pub fn merchants_with_high_item_count(&self) -> AnalystResult<Vec<&Merchant>> {
        let threshold = self.average_items_per_merchant()?
            + self.average_items_per_merchant_standard_deviation()?;
        Ok(self
            .store
            .merchants()
            .iter()
            .filter(|m| Decimal::from(self.item_count(m)) > threshold)
            .collect())
    }

    pub fn merchants_with_only_one_item(&self) -> Vec<&Merchant> {
        self.store
            .merchants()
            .iter()
            .filter(|m| self.item_count(m) == 1)
            .collect()
    }

    /// Single-item merchants that registered in `month` (full or three-letter
    /// name, any case).
    pub fn merchants_with_only_one_item_registered_in_month(
        &self,
        month: &str,
    ) -> AnalystResult<Vec<&Merchant>> {
        let wanted: Month = month
            .trim()
            .parse()
            .map_err(|_| AnalystError::InvalidMonth(month.to_string()))?;
        Ok(self
            .merchants_with_only_one_item()
            .into_iter()
            .filter(|m| m.registration_month() == wanted)
            .collect())
    }

    // ----- invoice counts ----------------------------------------------------

    /// Invoices in the dataset divided by merchants in the dataset.
    pub fn average_invoices_per_merchant(&self) -> AnalystResult<Decimal> {
        let total = Decimal::from(self.store.invoices().len());
        Ok(round_half_up(ratio(total, self.store.merchants().len())?))
    }

    /// Population deviation of the per-merchant invoice counts.
    pub fn average_invoices_per_merchant_standard_deviation(&self) -> AnalystResult<Decimal> {
        let per_merchant = counts(self.store.merchants().iter().map(|m| self.invoice_count(m)));
        Ok(round_half_up(population_std_dev(&per_merchant)?))
    }

    pub fn top_merchants_by_invoice_count(&self) -> AnalystResult<Vec<&Merchant>> {
        let threshold = self.average_invoices_per_merchant()?
            + self.average_invoices_per_merchant_standard_deviation()? * Decimal::TWO;
        Ok(self
            .store
            .merchants()
            .iter()
            .filter(|m| Decimal::from(self.invoice_count(m)) > threshold)
            .collect())
    }

    pub fn bottom_merchants_by_invoice_count(&self) -> AnalystResult<Vec<&Merchant>> {
        let threshold = self.average_invoices_per_merchant()?
            - self.average_invoices_per_merchant_standard_deviation()? * Decimal::TWO;
        Ok(self
            .store
            .merchants()
            .iter()
            .filter(|m| Decimal::from(self.invoice_count(m)) < threshold)
            .collect())
    }

    /// Invoice counts per weekday of creation (UTC), Monday first. Days without
    /// invoices are present with a zero count.
    pub fn invoice_count_by_weekday(&self) -> [(Weekday, usize); DAYS_PER_WEEK] {
        let mut tally = [0usize; DAYS_PER_WEEK];
        for invoice in self.store.invoices() {
            tally[invoice.created_at().weekday().num_days_from_monday() as usize] += 1;
        }
        WEEKDAYS.map(|day| (day, tally[day.num_days_from_monday() as usize]))
    }

    /// Weekdays whose invoice count exceeds the truncated daily baseline
    /// (`invoices / 7`, integer division) plus one deviation of the daily counts.
    pub fn top_days_by_invoice_count(&self) -> AnalystResult<Vec<&'static str>> {
        let total = self.store.invoices().len();
        if total == 0 {
            return Err(AnalystError::EmptySequence("invoices per weekday"));
        }

        let by_day = self.invoice_count_by_weekday();
        let baseline = Decimal::from(total / DAYS_PER_WEEK);
        let spread = round_half_up(population_std_dev(&counts(by_day.iter().map(|(_, n)| *n)))?);
        let threshold = baseline + spread;

        Ok(by_day
            .iter()
            .filter(|(_, n)| Decimal::from(*n) > threshold)
            .map(|(day, _)| weekday_name(*day))
            .collect())
    }

    /// Share of invoices with `status`, as a percentage.
    pub fn invoice_status(&self, status: InvoiceStatus) -> AnalystResult<Decimal> {
        let invoices = self.store.invoices();
        let matching = invoices.iter().filter(|i| i.status() == status).count();
        let share = ratio(Decimal::from(matching) * Decimal::ONE_HUNDRED, invoices.len())?;
        Ok(round_half_up(share))
    }

    pub fn invoice_status_by_name(&self, status: &str) -> AnalystResult<Decimal> {
        let status_value: InvoiceStatus = status
            .parse()
            .map_err(|_| AnalystError::InvalidStatus(status.to_string()))?;
        self.invoice_status(status_value)
    }

    // ----- prices ------------------------------------------------------------

    /// Fails with `EmptySequence` when the merchant lists no items.
    pub fn average_item_price_for_merchant(&self, merchant_id: MerchantId) -> AnalystResult<Decimal> {
        let prices: Vec<Decimal> = self
            .store
            .items_by_merchant(merchant_id)
            .into_iter()
            .map(Item::unit_price)
            .collect();
        Ok(round_half_up(mean(&prices)?))
    }

    /// Mean of every merchant's (rounded) average item price, floored to cents
    /// rather than rounded.
    pub fn average_average_price_per_merchant(&self) -> AnalystResult<Decimal> {
        let averages = self
            .store
            .merchants()
            .iter()
            .map(|m| self.average_item_price_for_merchant(m.id()))
            .collect::<AnalystResult<Vec<_>>>()?;
        Ok(floor_to_cents(mean(&averages)?))
    }

    pub fn average_item_price(&self) -> AnalystResult<Decimal> {
        Ok(round_half_up(mean(&self.item_prices())?))
    }

    pub fn average_item_price_standard_deviation(&self) -> AnalystResult<Decimal> {
        Ok(round_half_up(population_std_dev(&self.item_prices())?))
    }

    fn item_prices(&self) -> Vec<Decimal> {
        self.store.items().iter().map(Item::unit_price).collect()
    }

    pub fn golden_items(&self) -> AnalystResult<Vec<&Item>> {
        let threshold = self.average_item_price()?
            + self.average_item_price_standard_deviation()? * Decimal::TWO;
        Ok(self
            .store
            .items()
            .iter()
            .filter(|item| item.unit_price() > threshold)
            .collect())
    }

    // ----- revenue -----------------------------------------------------------

    fn sum_invoice_totals<'a, I>(&self, invoices: I, what: &'static str) -> AnalystResult<Decimal>
    where
        I: IntoIterator<Item = &'a Invoice>,
    {
        invoices.into_iter().try_fold(Decimal::ZERO, |total, invoice| {
            let invoice_total = relations::invoice_total(&self.store, invoice)?;
            total
                .checked_add(invoice_total)
                .ok_or(AnalystError::Overflow(what))
        })
    }

    /// Revenue of every invoice created on `date`, whatever its time of day.
    /// A date without invoices yields zero.
    pub fn total_revenue_by_date(&self, date: NaiveDate) -> AnalystResult<Decimal> {
        let invoices = self
            .store
            .invoices()
            .iter()
            .filter(|invoice| invoice.created_on() == date);
        Ok(round_half_up(self.sum_invoice_totals(invoices, "revenue by date")?))
    }

    /// Revenue across all of the merchant's invoices, paid or not.
    pub fn revenue_by_merchant(&self, merchant_id: MerchantId) -> AnalystResult<Decimal> {
        let invoices = self.store.invoices_by_merchant(merchant_id);
        Ok(round_half_up(self.sum_invoice_totals(invoices, "revenue by merchant")?))
    }

    /// Merchants by descending revenue; equal revenue ranks the lower merchant
    /// id first.
    pub fn top_revenue_earners(&self, n: usize) -> AnalystResult<Vec<&Merchant>> {
        let mut ranked = self
            .store
            .merchants()
            .iter()
            .map(|m| self.revenue_by_merchant(m.id()).map(|revenue| (m, revenue)))
            .collect::<AnalystResult<Vec<_>>>()?;

        ranked.sort_by(|(a, a_revenue), (b, b_revenue)| {
            b_revenue.cmp(a_revenue).then_with(|| a.id().cmp(&b.id()))
        });

        Ok(ranked.into_iter().take(n).map(|(m, _)| m).collect())
    }

    pub fn top_revenue_earners_default(&self) -> AnalystResult<Vec<&Merchant>> {
        self.top_revenue_earners(self.config.top_earners)
    }

    pub fn merchants_ranked_by_revenue(&self) -> AnalystResult<Vec<&Merchant>> {
        self.top_revenue_earners(self.store.merchants().len())
    }

    /// Merchants with at least one invoice that is not paid in full.
    pub fn merchants_with_pending_invoices(&self) -> Vec<&Merchant> {
        self.store
            .merchants()
            .iter()
            .filter(|m| {
                relations::merchant_invoices(&self.store, m)
                    .into_iter()
                    .any(|invoice| !relations::is_paid_in_full(&self.store, invoice))
            })
            .collect()
    }

    // ----- best items --------------------------------------------------------

    /// Line items of the merchant's paid-in-full invoices.
    fn paid_lines(&self, merchant_id: MerchantId) -> AnalystResult<Vec<&InvoiceItem>> {
        let merchant = self
            .store
            .find_merchant(merchant_id)
            .ok_or(AnalystError::MerchantNotFound(merchant_id))?;

        Ok(relations::merchant_invoices(&self.store, merchant)
            .into_iter()
            .filter(|invoice| relations::is_paid_in_full(&self.store, invoice))
            .flat_map(|invoice| relations::invoice_items(&self.store, invoice))
            .collect())
    }

    fn resolve_item(&self, id: ItemId) -> AnalystResult<&Item> {
        self.store.find_item(id).ok_or_else(|| AnalystError::NotFound {
            entity: "item",
            id: id.to_string(),
        })
    }

    /// Every item tied for the highest quantity sold on paid invoices, by
    /// ascending item id. Empty when nothing was paid for.
    pub fn most_sold_item_for_merchant(&self, merchant_id: MerchantId) -> AnalystResult<Vec<&Item>> {
        let mut quantities: BTreeMap<ItemId, u64> = BTreeMap::new();
        for line in self.paid_lines(merchant_id)? {
            *quantities.entry(line.item_id()).or_default() += u64::from(line.quantity());
        }

        let Some(top) = quantities.values().copied().max() else {
            return Ok(Vec::new());
        };

        quantities
            .into_iter()
            .filter(|(_, quantity)| *quantity == top)
            .map(|(item_id, _)| self.resolve_item(item_id))
            .collect()
    }

    /// The item with the highest revenue on paid invoices. Ties go to the
    /// lowest item id. `None` when nothing was paid for.
    pub fn best_item_for_merchant(&self, merchant_id: MerchantId) -> AnalystResult<Option<&Item>> {
        let mut revenue: BTreeMap<ItemId, Decimal> = BTreeMap::new();
        for line in self.paid_lines(merchant_id)? {
            let amount = line.extended_price()?;
            let entry = revenue.entry(line.item_id()).or_default();
            *entry = entry
                .checked_add(amount)
                .ok_or(AnalystError::Overflow("item revenue"))?;
        }

        let Some(top) = revenue.values().copied().max() else {
            return Ok(None);
        };

        match revenue.into_iter().find(|(_, amount)| *amount == top) {
            Some((item_id, _)) => self.resolve_item(item_id).map(Some),
            None => Ok(None),
        }
    }
}
