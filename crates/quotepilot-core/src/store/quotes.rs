//! Quote request persistence.

use tracing::debug;

use super::{add_to_index, check_id, get_json, put_json, read_index, KvStore, StoreResult};
use crate::models::{QuoteRequest, QuoteStatus};

const INDEX_KEY: &str = "quote:index";

fn key(id: &str) -> String {
    format!("quote:{id}")
}

fn invoice_key(invoice_id: &str) -> String {
    format!("quote:invoice:{invoice_id}")
}

/// Quote requests stored under `quote:{id}`, indexed globally and per invoice.
///
/// Saving a request again replaces the stored state.
pub struct QuoteRequestRepository<S> {
    store: S,
}

impl<S: KvStore> QuoteRequestRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn save(&self, request: &QuoteRequest) -> StoreResult<()> {
        check_id(&request.id, &["invoice:"])?;
        put_json(&self.store, &key(&request.id), request)?;
        add_to_index(&self.store, INDEX_KEY, &request.id)?;
        add_to_index(&self.store, &invoice_key(&request.invoice.id), &request.id)?;
        debug!("Saved quote request {} ({})", request.id, request.status);
        Ok(())
    }

    pub fn find_by_id(&self, id: &str) -> StoreResult<Option<QuoteRequest>> {
        get_json(&self.store, &key(id))
    }

    pub fn find_by_invoice_id(&self, invoice_id: &str) -> StoreResult<Vec<QuoteRequest>> {
        self.load_all(read_index(&self.store, &invoice_key(invoice_id))?)
    }

    pub fn find_by_status(&self, status: QuoteStatus) -> StoreResult<Vec<QuoteRequest>> {
        Ok(self
            .find_all()?
            .into_iter()
            .filter(|request| request.status == status)
            .collect())
    }

    pub fn find_all(&self) -> StoreResult<Vec<QuoteRequest>> {
        self.load_all(read_index(&self.store, INDEX_KEY)?)
    }

    fn load_all(&self, ids: Vec<String>) -> StoreResult<Vec<QuoteRequest>> {
        let mut requests = Vec::with_capacity(ids.len());
        for id in ids {
            if let Some(request) = self.find_by_id(&id)? {
                requests.push(request);
            }
        }
        Ok(requests)
    }
}
