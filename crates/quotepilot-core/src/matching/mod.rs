//! Company matching: candidate lookup, contactability filter, priority ranking.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::models::{Company, ContactMethod};
use crate::store::{CompanyRepository, InvoiceRepository, KvStore, StoreResult};

/// One search criterion. When several are set, `invoice_id` wins over
/// `category`, which wins over `name`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invoice_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl SearchQuery {
    pub fn by_invoice(id: impl Into<String>) -> Self {
        Self {
            invoice_id: Some(id.into()),
            ..Self::default()
        }
    }

    pub fn by_category(category: impl Into<String>) -> Self {
        Self {
            category: Some(category.into()),
            ..Self::default()
        }
    }

    pub fn by_name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }
}

/// A matched company with its derived contact details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedCompany {
    #[serde(flatten)]
    pub company: Company,
    pub contact_methods: Vec<ContactMethod>,
    pub preferred_contact_method: ContactMethod,
    pub contact_priority: u32,
}

impl From<Company> for RankedCompany {
    fn from(company: Company) -> Self {
        Self {
            contact_methods: company.contact_methods(),
            preferred_contact_method: company.preferred_contact_method(),
            contact_priority: company.contact_priority(),
            company,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchOutcome {
    /// Contactable companies, best contact priority first.
    pub companies: Vec<RankedCompany>,
    /// Candidates before filtering.
    pub total_found: usize,
    pub contactable_count: usize,
}

/// Keep companies with at least one contact method.
///
/// [`Company::contact_methods`] always yields the manual fallback, so this
/// currently keeps every company.
pub fn filter_contactable(companies: Vec<Company>) -> Vec<Company> {
    companies
        .into_iter()
        .filter(|company| !company.contact_methods().is_empty())
        .collect()
}

/// Stable ascending sort by [`Company::contact_priority`].
pub fn sort_by_priority(mut companies: Vec<Company>) -> Vec<Company> {
    companies.sort_by_key(Company::contact_priority);
    companies
}

/// Read-only company lookups over the persistence layer.
pub struct MatchingEngine<S> {
    companies: CompanyRepository<S>,
    invoices: InvoiceRepository<S>,
}

impl<S: KvStore + Clone> MatchingEngine<S> {
    pub fn new(store: S) -> Self {
        Self {
            companies: CompanyRepository::new(store.clone()),
            invoices: InvoiceRepository::new(store),
        }
    }
}

impl<S: KvStore> MatchingEngine<S> {
    pub fn by_category(&self, category: &str) -> StoreResult<Vec<Company>> {
        self.companies.search_by_category(category)
    }

    pub fn by_name(&self, name: &str) -> StoreResult<Vec<Company>> {
        self.companies.search_by_name(name)
    }

    /// Companies serving the invoice's category. Empty when the invoice is
    /// unknown or has no category.
    pub fn by_invoice_id(&self, invoice_id: &str) -> StoreResult<Vec<Company>> {
        let Some(invoice) = self.invoices.find_by_id(invoice_id)? else {
            debug!("Invoice {} not found", invoice_id);
            return Ok(Vec::new());
        };

        match invoice.business_category {
            Some(category) => self.by_category(category.label()),
            None => Ok(Vec::new()),
        }
    }

    /// Run a query through lookup, filter and ranking.
    ///
    /// Returns `None` when the query names no criterion.
    pub fn search(&self, query: &SearchQuery) -> StoreResult<Option<SearchOutcome>> {
        let candidates = if let Some(id) = &query.invoice_id {
            self.by_invoice_id(id)?
        } else if let Some(category) = &query.category {
            self.by_category(category)?
        } else if let Some(name) = &query.name {
            self.by_name(name)?
        } else {
            return Ok(None);
        };

        let total_found = candidates.len();
        let contactable = sort_by_priority(filter_contactable(candidates));
        let contactable_count = contactable.len();

        info!("Search {:?}: {} found, {} contactable", query, total_found, contactable_count);

        Ok(Some(SearchOutcome {
            companies: contactable.into_iter().map(RankedCompany::from).collect(),
            total_found,
            contactable_count,
        }))
    }
}
