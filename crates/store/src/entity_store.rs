use std::sync::Arc;

use salesdesk_core::{
    find_all_by, find_by_id, CustomerId, InvoiceId, ItemId, MerchantId,
};
use salesdesk_invoicing::{Invoice, InvoiceItem, Transaction};
use salesdesk_parties::{Customer, Merchant};
use salesdesk_products::Item;

/// Read-only access to a loaded dataset.
///
/// Implementors only have to expose the record collections; every lookup has a
/// linear-scan default. Stores that keep indices override the lookups, and
/// results must keep the collection's load order either way.
pub trait EntityStore {
    fn merchants(&self) -> &[Merchant];
    fn items(&self) -> &[Item];
    fn invoices(&self) -> &[Invoice];
    fn invoice_items(&self) -> &[InvoiceItem];
    fn transactions(&self) -> &[Transaction];
    fn customers(&self) -> &[Customer];

    fn find_merchant(&self, id: MerchantId) -> Option<&Merchant> {
        find_by_id(self.merchants(), id)
    }

    fn find_item(&self, id: ItemId) -> Option<&Item> {
        find_by_id(self.items(), id)
    }

    fn find_invoice(&self, id: InvoiceId) -> Option<&Invoice> {
        find_by_id(self.invoices(), id)
    }

    fn find_customer(&self, id: CustomerId) -> Option<&Customer> {
        find_by_id(self.customers(), id)
    }

    fn items_by_merchant(&self, merchant_id: MerchantId) -> Vec<&Item> {
        find_all_by(self.items(), |item| item.merchant_id() == merchant_id)
    }

    fn invoices_by_merchant(&self, merchant_id: MerchantId) -> Vec<&Invoice> {
        find_all_by(self.invoices(), |invoice| invoice.merchant_id() == merchant_id)
    }

    fn invoices_by_customer(&self, customer_id: CustomerId) -> Vec<&Invoice> {
        find_all_by(self.invoices(), |invoice| invoice.customer_id() == customer_id)
    }

    fn invoice_items_by_invoice(&self, invoice_id: InvoiceId) -> Vec<&InvoiceItem> {
        find_all_by(self.invoice_items(), |line| line.invoice_id() == invoice_id)
    }

    fn transactions_by_invoice(&self, invoice_id: InvoiceId) -> Vec<&Transaction> {
        find_all_by(self.transactions(), |txn| txn.invoice_id() == invoice_id)
    }
}

// Forward every method (not just the required ones) so wrapped stores keep
// their own index-backed lookups.
macro_rules! forward_entity_store {
    ($($wrapper:tt)*) => {
        impl<S> EntityStore for $($wrapper)*
        where
            S: EntityStore + ?Sized,
        {
            fn merchants(&self) -> &[Merchant] {
                (**self).merchants()
            }

            fn items(&self) -> &[Item] {
                (**self).items()
            }

            fn invoices(&self) -> &[Invoice] {
                (**self).invoices()
            }

            fn invoice_items(&self) -> &[InvoiceItem] {
                (**self).invoice_items()
            }

            fn transactions(&self) -> &[Transaction] {
                (**self).transactions()
            }

            fn customers(&self) -> &[Customer] {
                (**self).customers()
            }

            fn find_merchant(&self, id: MerchantId) -> Option<&Merchant> {
                (**self).find_merchant(id)
            }

            fn find_item(&self, id: ItemId) -> Option<&Item> {
                (**self).find_item(id)
            }

            fn find_invoice(&self, id: InvoiceId) -> Option<&Invoice> {
                (**self).find_invoice(id)
            }

            fn find_customer(&self, id: CustomerId) -> Option<&Customer> {
                (**self).find_customer(id)
            }

            fn items_by_merchant(&self, merchant_id: MerchantId) -> Vec<&Item> {
                (**self).items_by_merchant(merchant_id)
            }

            fn invoices_by_merchant(&self, merchant_id: MerchantId) -> Vec<&Invoice> {
                (**self).invoices_by_merchant(merchant_id)
            }

            fn invoices_by_customer(&self, customer_id: CustomerId) -> Vec<&Invoice> {
                (**self).invoices_by_customer(customer_id)
            }

            fn invoice_items_by_invoice(&self, invoice_id: InvoiceId) -> Vec<&InvoiceItem> {
                (**self).invoice_items_by_invoice(invoice_id)
            }

            fn transactions_by_invoice(&self, invoice_id: InvoiceId) -> Vec<&Transaction> {
                (**self).transactions_by_invoice(invoice_id)
            }
        }
    };
}

forward_entity_store!(&S);
forward_entity_store!(Arc<S>);

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal_macros::dec;

    /// Store relying purely on the provided scan-based lookups.
    struct ScanStore {
        merchants: Vec<Merchant>,
        items: Vec<Item>,
    }

    impl EntityStore for ScanStore {
        fn merchants(&self) -> &[Merchant] {
            &self.merchants
        }

        fn items(&self) -> &[Item] {
            &self.items
        }

        fn invoices(&self) -> &[Invoice] {
            &[]
        }

        fn invoice_items(&self) -> &[InvoiceItem] {
            &[]
        }

        fn transactions(&self) -> &[Transaction] {
            &[]
        }

        fn customers(&self) -> &[Customer] {
            &[]
        }
    }

    fn scan_store() -> ScanStore {
        let now = Utc::now();
        let merchant = |id: u64| Merchant::new(MerchantId::new(id), format!("m{id}"), now).unwrap();
        let item = |id: u64, merchant: u64| {
            Item::new(ItemId::new(id), format!("i{id}"), dec!(1.00), MerchantId::new(merchant), now)
                .unwrap()
        };
        ScanStore {
            merchants: vec![merchant(1), merchant(2)],
            items: vec![item(10, 2), item(11, 1), item(12, 2)],
        }
    }

    #[test]
    fn default_lookups_scan_in_load_order() {
        let store = scan_store();
        assert_eq!(store.find_merchant(MerchantId::new(2)).unwrap().name(), "m2");
        assert!(store.find_item(ItemId::new(99)).is_none());

        let ids: Vec<u64> = store
            .items_by_merchant(MerchantId::new(2))
            .into_iter()
            .map(|i| salesdesk_core::Entity::id(i).get())
            .collect();
        assert_eq!(ids, vec![10, 12]);
    }

    #[test]
    fn references_and_arcs_are_stores_too() {
        fn count_items<S: EntityStore>(store: S, merchant: u64) -> usize {
            store.items_by_merchant(MerchantId::new(merchant)).len()
        }

        let store = scan_store();
        assert_eq!(count_items(&store, 2), 2);
        assert_eq!(count_items(Arc::new(store), 1), 1);
    }
}
