//! Invoice persistence.

use tracing::debug;

use super::{get_json, put_json, KvStore, StoreResult};
use crate::models::Invoice;

const PREFIX: &str = "invoice:";

fn key(id: &str) -> String {
    format!("{PREFIX}{id}")
}

/// Invoices stored under `invoice:{id}`.
pub struct InvoiceRepository<S> {
    store: S,
}

impl<S: KvStore> InvoiceRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn save(&self, invoice: &Invoice) -> StoreResult<()> {
        put_json(&self.store, &key(&invoice.id), invoice)?;
        debug!("Saved invoice {}", invoice.id);
        Ok(())
    }

    pub fn find_by_id(&self, id: &str) -> StoreResult<Option<Invoice>> {
        get_json(&self.store, &key(id))
    }

    /// Every stored invoice, oldest upload first.
    pub fn find_all(&self) -> StoreResult<Vec<Invoice>> {
        let mut invoices = Vec::new();
        for key in self.store.list(PREFIX)? {
            if let Some(invoice) = get_json::<_, Invoice>(&self.store, &key)? {
                invoices.push(invoice);
            }
        }
        invoices.sort_by_key(|invoice| invoice.uploaded_at);
        Ok(invoices)
    }

    pub fn delete(&self, id: &str) -> StoreResult<()> {
        self.store.delete(&key(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use crate::store::MemoryStore;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_save_find_delete() {
        let repo = InvoiceRepository::new(MemoryStore::new());
        let invoice = Invoice::from_heuristics("a.pdf", "株式会社Foo");

        repo.save(&invoice).unwrap();
        assert_eq!(repo.find_by_id(&invoice.id).unwrap(), Some(invoice.clone()));
        assert_eq!(repo.find_all().unwrap(), vec![invoice.clone()]);

        repo.delete(&invoice.id).unwrap();
        assert_eq!(repo.find_by_id(&invoice.id).unwrap(), None);
        assert!(repo.find_all().unwrap().is_empty());
    }

    #[test]
    fn test_missing_is_none() {
        let repo = InvoiceRepository::new(MemoryStore::new());
        assert_eq!(repo.find_by_id("nope").unwrap(), None);
    }

    #[test]
    fn test_corrupt_record_propagates() {
        let store = MemoryStore::new();
        store.put("invoice:bad", "{").unwrap();
        let repo = InvoiceRepository::new(&store);
        assert!(matches!(repo.find_by_id("bad"), Err(StoreError::Corrupt { .. })));
    }
}
